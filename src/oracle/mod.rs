//! 评分 Oracle 客户端
//!
//! 核心对具体提供方无感知：唯一的耦合点是 [`GradingOracle`] 契约。
//! 内置两个可互换的 HTTP 提供方（OpenAI / Gemini），由配置选择。
//! 生命周期层对 Oracle 调用零重试——失败即上报，提交本身不受影响。

mod gemini;
mod openai;

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Deserialize;

use crate::config::AppConfig;
use crate::errors::{GradeFlowError, Result};
use crate::models::assignments::entities::{AssignmentKind, Rubric, RubricCriterion};
use crate::models::feedbacks::entities::AiComments;

/// 评分请求携带的作业上下文
#[derive(Debug, Clone)]
pub struct AssignmentContext {
    pub title: String,
    pub description: String,
    pub kind: AssignmentKind,
    pub rubric: Rubric,
}

/// Oracle 返回的结构化评分结果
#[derive(Debug, Clone, PartialEq)]
pub struct GradeOutcome {
    // 总分 (0-100)
    pub score: i32,
    // 各评分维度得分 (0-100)
    pub rubric_scores: BTreeMap<String, i32>,
    pub feedback: AiComments,
}

#[async_trait::async_trait]
pub trait GradingOracle: Send + Sync {
    /// 对一份提交内容评分，网络失败或输出不可解析时返回错误
    async fn grade(&self, content: &str, context: &AssignmentContext) -> Result<GradeOutcome>;
}

/// 作业未定义评分细则时使用的默认细则
pub fn default_rubric() -> Rubric {
    Rubric {
        criteria: vec![
            RubricCriterion {
                name: "content".to_string(),
                weight: 30,
            },
            RubricCriterion {
                name: "organization".to_string(),
                weight: 20,
            },
            RubricCriterion {
                name: "analysis".to_string(),
                weight: 20,
            },
            RubricCriterion {
                name: "grammar".to_string(),
                weight: 15,
            },
            RubricCriterion {
                name: "creativity".to_string(),
                weight: 15,
            },
        ],
    }
}

/// 根据配置创建 Oracle 实例
pub fn create_oracle() -> Result<Arc<dyn GradingOracle>> {
    let config = AppConfig::get();
    match config.oracle.provider.as_str() {
        "openai" => Ok(Arc::new(openai::OpenAiOracle::from_config(&config.oracle))),
        "gemini" => Ok(Arc::new(gemini::GeminiOracle::from_config(&config.oracle))),
        other => Err(GradeFlowError::oracle_unavailable(format!(
            "未知的 Oracle 提供方: '{other}'. 支持: openai, gemini"
        ))),
    }
}

/// 两个提供方共用的评分提示词
pub(crate) fn build_grading_prompt(content: &str, context: &AssignmentContext) -> String {
    let rubric_lines = context
        .rubric
        .criteria
        .iter()
        .map(|c| format!("{} ({}%)", c.name, c.weight))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are an expert teacher assistant tasked with grading a student's {kind} submission.\n\
         \n\
         ASSIGNMENT: {title}\n\
         ASSIGNMENT DESCRIPTION: {description}\n\
         \n\
         STUDENT SUBMISSION:\n\
         {content}\n\
         \n\
         GRADING RUBRIC:\n\
         {rubric_lines}\n\
         \n\
         Please grade this submission and provide detailed feedback. \
         Consider the assignment requirements and rubric criteria.\n\
         \n\
         Respond in JSON format with the following structure:\n\
         {{\n\
           \"overallScore\": number between 0-100,\n\
           \"rubricScores\": {{ \"<criteria name>\": number between 0-100 }},\n\
           \"feedback\": {{\n\
             \"strengths\": [list of 2-3 specific strengths],\n\
             \"improvements\": [list of 2-3 specific areas for improvement],\n\
             \"comments\": \"general comments and suggestions\"\n\
           }}\n\
         }}",
        kind = context.kind,
        title = context.title,
        description = context.description,
    )
}

/// 提供方回复的 JSON 载荷
#[derive(Debug, Deserialize)]
struct GradePayload {
    #[serde(rename = "overallScore")]
    overall_score: f64,
    #[serde(rename = "rubricScores", default)]
    rubric_scores: BTreeMap<String, f64>,
    feedback: FeedbackPayload,
}

#[derive(Debug, Deserialize)]
struct FeedbackPayload {
    #[serde(default)]
    strengths: Vec<String>,
    #[serde(default)]
    improvements: Vec<String>,
    #[serde(default)]
    comments: String,
}

fn clamp_score(raw: f64) -> i32 {
    (raw.round() as i32).clamp(0, 100)
}

/// 解析提供方输出；容忍模型把 JSON 包裹在 Markdown 代码块中
pub(crate) fn parse_grade_payload(text: &str) -> Result<GradeOutcome> {
    let trimmed = text.trim();
    let json_str = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|s| s.strip_suffix("```"))
        .unwrap_or(trimmed)
        .trim();

    let payload: GradePayload = serde_json::from_str(json_str).map_err(|e| {
        GradeFlowError::oracle_response_parse(format!("评分输出不是合法 JSON: {e}"))
    })?;

    Ok(GradeOutcome {
        score: clamp_score(payload.overall_score),
        rubric_scores: payload
            .rubric_scores
            .into_iter()
            .map(|(name, score)| (name, clamp_score(score)))
            .collect(),
        feedback: AiComments {
            strengths: payload.feedback.strengths,
            improvements: payload.feedback.improvements,
            comments: payload.feedback.comments,
        },
    })
}

/// 测试用 Oracle：按脚本返回固定结果或固定失败
#[cfg(test)]
pub(crate) mod testing {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    pub(crate) struct ScriptedOracle {
        outcome: std::result::Result<GradeOutcome, GradeFlowError>,
        pub(crate) calls: AtomicUsize,
    }

    impl ScriptedOracle {
        pub(crate) fn succeeding(outcome: GradeOutcome) -> Self {
            Self {
                outcome: Ok(outcome),
                calls: AtomicUsize::new(0),
            }
        }

        pub(crate) fn failing() -> Self {
            Self {
                outcome: Err(GradeFlowError::oracle_unavailable("scripted failure")),
                calls: AtomicUsize::new(0),
            }
        }

        pub(crate) fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl GradingOracle for ScriptedOracle {
        async fn grade(
            &self,
            _content: &str,
            _context: &AssignmentContext,
        ) -> Result<GradeOutcome> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcome.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rubric_weights_sum_to_one_hundred() {
        let rubric = default_rubric();
        let total: u32 = rubric.criteria.iter().map(|c| c.weight).sum();
        assert_eq!(total, 100);
    }

    #[test]
    fn test_parse_plain_json() {
        let outcome = parse_grade_payload(
            r#"{"overallScore": 85, "rubricScores": {"content": 80.4}, "feedback": {"strengths": ["clear"], "improvements": ["depth"], "comments": "good"}}"#,
        )
        .unwrap();
        assert_eq!(outcome.score, 85);
        assert_eq!(outcome.rubric_scores.get("content"), Some(&80));
        assert_eq!(outcome.feedback.comments, "good");
    }

    #[test]
    fn test_parse_fenced_json() {
        let text = "```json\n{\"overallScore\": 72.6, \"rubricScores\": {}, \"feedback\": {\"strengths\": [], \"improvements\": [], \"comments\": \"ok\"}}\n```";
        let outcome = parse_grade_payload(text).unwrap();
        assert_eq!(outcome.score, 73);
    }

    #[test]
    fn test_parse_clamps_out_of_range_scores() {
        let outcome = parse_grade_payload(
            r#"{"overallScore": 130, "rubricScores": {"content": -5}, "feedback": {"comments": ""}}"#,
        )
        .unwrap();
        assert_eq!(outcome.score, 100);
        assert_eq!(outcome.rubric_scores.get("content"), Some(&0));
    }

    #[test]
    fn test_parse_garbage_is_a_parse_error() {
        let err = parse_grade_payload("I would give this essay a B+").unwrap_err();
        assert!(matches!(err, GradeFlowError::OracleResponseParse(_)));
    }

    #[test]
    fn test_prompt_contains_rubric_and_submission() {
        let context = AssignmentContext {
            title: "Essay 1".to_string(),
            description: "Write an essay".to_string(),
            kind: AssignmentKind::Essay,
            rubric: default_rubric(),
        };
        let prompt = build_grading_prompt("my essay text", &context);
        assert!(prompt.contains("my essay text"));
        assert!(prompt.contains("content (30%)"));
        assert!(prompt.contains("overallScore"));
    }
}
