use tracing::info;

use super::FeedbackService;
use crate::errors::{GradeFlowError, Result};
use crate::models::feedbacks::{entities::Feedback, requests::ReviewFeedbackRequest};
use crate::models::users::entities::Identity;
use crate::utils::validate::{FieldErrors, check_score_range};

pub(super) async fn review(
    service: &FeedbackService,
    caller: &Identity,
    feedback_id: i64,
    data: ReviewFeedbackRequest,
) -> Result<Feedback> {
    validate_review(&data)?;

    let feedback = service
        .storage
        .get_feedback_by_id(feedback_id)
        .await?
        .ok_or_else(|| GradeFlowError::not_found(format!("评语不存在: {feedback_id}")))?;

    // 沿 feedback → submission → assignment → class 链确认归属
    service
        .policy
        .ensure_can_review_submission(caller, feedback.submission_id)
        .await?;

    let merged = service
        .storage
        .update_feedback_review(feedback_id, data)
        .await?
        .ok_or_else(|| GradeFlowError::not_found(format!("评语不存在: {feedback_id}")))?;
    info!(
        "Feedback {} reviewed by teacher {}, teacher score {:?}",
        feedback_id, caller.id, merged.teacher_score
    );
    Ok(merged)
}

/// 复核与人工评分共用的字段校验
pub(super) fn validate_review(data: &ReviewFeedbackRequest) -> Result<()> {
    let mut errors = FieldErrors::new();
    check_score_range(&mut errors, "teacher_score", data.teacher_score);
    if let Some(rubric_scores) = &data.rubric_scores {
        for (name, score) in rubric_scores {
            check_score_range(&mut errors, &format!("rubric_scores.{name}"), *score);
        }
    }
    errors.into_result()
}
