use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// 自动评分产生的结构化评语
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AiComments {
    // 亮点
    pub strengths: Vec<String>,
    // 待改进点
    pub improvements: Vec<String>,
    // 总评
    pub comments: String,
}

/// 评语与成绩，每个提交至多一条
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feedback {
    pub id: i64,
    // 关联提交 ID（1:1）
    pub submission_id: i64,
    // 自动评分 (0-100)
    pub ai_score: Option<i32>,
    // 教师评分 (0-100)，存在时覆盖自动评分
    pub teacher_score: Option<i32>,
    pub ai_comments: Option<AiComments>,
    pub teacher_comments: Option<String>,
    // 各评分维度的得分
    pub rubric_scores: BTreeMap<String, i32>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Feedback {
    /// 生效成绩：教师评分优先，其次自动评分
    pub fn effective_score(&self) -> Option<i32> {
        self.teacher_score.or(self.ai_score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feedback(ai_score: Option<i32>, teacher_score: Option<i32>) -> Feedback {
        Feedback {
            id: 1,
            submission_id: 1,
            ai_score,
            teacher_score,
            ai_comments: None,
            teacher_comments: None,
            rubric_scores: BTreeMap::new(),
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_effective_score_prefers_teacher() {
        assert_eq!(feedback(Some(85), Some(90)).effective_score(), Some(90));
    }

    #[test]
    fn test_effective_score_falls_back_to_ai() {
        assert_eq!(feedback(Some(85), None).effective_score(), Some(85));
    }

    #[test]
    fn test_effective_score_absent() {
        assert_eq!(feedback(None, None).effective_score(), None);
        // 教师打了 0 分也是有效成绩，不能被自动评分覆盖
        assert_eq!(feedback(Some(85), Some(0)).effective_score(), Some(0));
    }
}
