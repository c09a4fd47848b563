//! 评语存储操作
//!
//! "写入评语 + 推进提交状态"必须是同一原子单元：读者绝不能看到
//! ai_graded 的提交没有评语，也不能看到评语挂在仍是 submitted 的
//! 提交上。本实现依靠表级写锁保证这一点。

use std::collections::BTreeMap;

use super::MemoryStorage;
use crate::errors::{GradeFlowError, Result};
use crate::models::feedbacks::{
    entities::Feedback,
    requests::{NewAiFeedback, ReviewFeedbackRequest},
};
use crate::models::submissions::entities::SubmissionStatus;

impl MemoryStorage {
    /// 自动评分结果落库
    pub(crate) async fn apply_grade_result_impl(
        &self,
        submission_id: i64,
        result: NewAiFeedback,
    ) -> Result<Feedback> {
        let mut tables = self.inner.write().await;

        if !tables.submissions.contains_key(&submission_id) {
            return Err(GradeFlowError::not_found(format!(
                "提交不存在: {submission_id}"
            )));
        }
        // 每个提交至多一条评语
        if tables.feedback_by_submission.contains_key(&submission_id) {
            return Err(GradeFlowError::conflict(format!(
                "提交 {submission_id} 已有评语"
            )));
        }

        let id = tables.next_feedback_id;
        tables.next_feedback_id += 1;

        let now = chrono::Utc::now();
        let feedback = Feedback {
            id,
            submission_id,
            ai_score: Some(result.ai_score),
            teacher_score: None,
            ai_comments: Some(result.ai_comments),
            teacher_comments: None,
            rubric_scores: result.rubric_scores,
            created_at: now,
            updated_at: now,
        };
        tables.feedbacks.insert(id, feedback.clone());
        tables.feedback_by_submission.insert(submission_id, id);

        // 状态只前进：教师已复核的提交不会被迟到的结果拉回
        if let Some(submission) = tables.submissions.get_mut(&submission_id) {
            if submission.status.can_advance_to(SubmissionStatus::AiGraded) {
                submission.status = SubmissionStatus::AiGraded;
            }
        }

        Ok(feedback)
    }

    /// 教师对无评语的提交直接人工评分
    pub(crate) async fn create_teacher_feedback_impl(
        &self,
        submission_id: i64,
        review: ReviewFeedbackRequest,
    ) -> Result<Feedback> {
        let mut tables = self.inner.write().await;

        if !tables.submissions.contains_key(&submission_id) {
            return Err(GradeFlowError::not_found(format!(
                "提交不存在: {submission_id}"
            )));
        }
        if tables.feedback_by_submission.contains_key(&submission_id) {
            return Err(GradeFlowError::conflict(format!(
                "提交 {submission_id} 已有评语，请使用复核接口"
            )));
        }

        let id = tables.next_feedback_id;
        tables.next_feedback_id += 1;

        let now = chrono::Utc::now();
        let feedback = Feedback {
            id,
            submission_id,
            ai_score: None,
            teacher_score: Some(review.teacher_score),
            ai_comments: None,
            teacher_comments: review.teacher_comments,
            rubric_scores: review.rubric_scores.unwrap_or_else(BTreeMap::new),
            created_at: now,
            updated_at: now,
        };
        tables.feedbacks.insert(id, feedback.clone());
        tables.feedback_by_submission.insert(submission_id, id);

        if let Some(submission) = tables.submissions.get_mut(&submission_id) {
            submission.status = SubmissionStatus::TeacherReviewed;
        }

        Ok(feedback)
    }

    /// 教师复核：浅合并教师字段并推进提交状态
    pub(crate) async fn update_feedback_review_impl(
        &self,
        feedback_id: i64,
        review: ReviewFeedbackRequest,
    ) -> Result<Option<Feedback>> {
        let mut tables = self.inner.write().await;

        let merged = match tables.feedbacks.get_mut(&feedback_id) {
            Some(feedback) => {
                feedback.teacher_score = Some(review.teacher_score);
                // 浅合并：请求未携带的字段保持原值
                if let Some(comments) = review.teacher_comments {
                    feedback.teacher_comments = Some(comments);
                }
                if let Some(rubric_scores) = review.rubric_scores {
                    feedback.rubric_scores = rubric_scores;
                }
                feedback.updated_at = chrono::Utc::now();
                feedback.clone()
            }
            None => return Ok(None),
        };

        // 复核可以从 submitted 或 ai_graded 任一状态推进，且幂等
        if let Some(submission) = tables.submissions.get_mut(&merged.submission_id) {
            submission.status = SubmissionStatus::TeacherReviewed;
        }

        Ok(Some(merged))
    }

    /// 通过 ID 获取评语
    pub(crate) async fn get_feedback_by_id_impl(
        &self,
        feedback_id: i64,
    ) -> Result<Option<Feedback>> {
        let tables = self.inner.read().await;
        Ok(tables.feedbacks.get(&feedback_id).cloned())
    }

    /// 通过提交 ID 获取评语
    pub(crate) async fn get_feedback_by_submission_impl(
        &self,
        submission_id: i64,
    ) -> Result<Option<Feedback>> {
        let tables = self.inner.read().await;
        Ok(tables
            .feedback_by_submission
            .get(&submission_id)
            .and_then(|id| tables.feedbacks.get(id))
            .cloned())
    }
}
