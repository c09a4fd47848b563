use std::collections::BTreeMap;

use serde::Deserialize;

/// 教师复核请求
///
/// rubric_scores 缺省时保留自动评分给出的各维度得分。
/// 同一结构也用于教师对未经自动评分的提交直接人工评分。
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewFeedbackRequest {
    pub teacher_score: i32,
    pub teacher_comments: Option<String>,
    pub rubric_scores: Option<BTreeMap<String, i32>>,
}

/// 自动评分结果落库数据，由提交流程从 Oracle 响应转换而来
#[derive(Debug, Clone)]
pub struct NewAiFeedback {
    pub ai_score: i32,
    pub ai_comments: super::entities::AiComments,
    pub rubric_scores: BTreeMap<String, i32>,
}
