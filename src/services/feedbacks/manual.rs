use tracing::info;

use super::FeedbackService;
use crate::errors::Result;
use crate::models::feedbacks::{entities::Feedback, requests::ReviewFeedbackRequest};
use crate::models::users::entities::Identity;

/// 教师对没有评语的提交直接人工评分
///
/// 覆盖自动评分从未完成（Oracle 失败，提交停在 submitted）的场景。
/// 已有评语的提交走复核接口，这里会收到冲突错误。
pub(super) async fn grade_manually(
    service: &FeedbackService,
    caller: &Identity,
    submission_id: i64,
    data: ReviewFeedbackRequest,
) -> Result<Feedback> {
    super::review::validate_review(&data)?;

    service
        .policy
        .ensure_can_review_submission(caller, submission_id)
        .await?;

    let feedback = service
        .storage
        .create_teacher_feedback(submission_id, data)
        .await?;
    info!(
        "Submission {} graded manually by teacher {}, score {:?}",
        submission_id, caller.id, feedback.teacher_score
    );
    Ok(feedback)
}
