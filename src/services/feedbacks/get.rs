use super::FeedbackService;
use crate::errors::{GradeFlowError, Result};
use crate::models::feedbacks::entities::Feedback;
use crate::models::users::entities::Identity;

pub(super) async fn get_for_submission(
    service: &FeedbackService,
    caller: &Identity,
    submission_id: i64,
) -> Result<Feedback> {
    service
        .policy
        .ensure_can_read_feedback(caller, submission_id)
        .await?;
    // 提交存在但尚未评分时返回 NotFound，与提交不存在可区分
    service
        .storage
        .get_feedback_by_submission(submission_id)
        .await?
        .ok_or_else(|| GradeFlowError::not_found(format!("提交 {submission_id} 尚未评分")))
}
