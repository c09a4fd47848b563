use serde::Serialize;

use super::entities::Submission;
use crate::models::feedbacks::entities::Feedback;

/// 提交详情（附学生姓名、作业标题与评语）
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionWithDetails {
    #[serde(flatten)]
    pub submission: Submission,
    pub student_name: String,
    pub assignment_title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<Feedback>,
}

/// 提交操作的结果
///
/// Oracle 失败不回滚提交：grading_pending 为 true 表示提交已入库、
/// 自动评分未完成，等待重试或教师人工评分。
#[derive(Debug, Clone, Serialize)]
pub struct SubmitOutcome {
    pub submission: Submission,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<Feedback>,
    pub grading_pending: bool,
}
