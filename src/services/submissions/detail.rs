use super::SubmissionService;
use crate::errors::{GradeFlowError, Result};
use crate::models::submissions::{entities::Submission, responses::SubmissionWithDetails};
use crate::models::users::entities::Identity;

pub(super) async fn get_submission(
    service: &SubmissionService,
    caller: &Identity,
    submission_id: i64,
) -> Result<SubmissionWithDetails> {
    service
        .policy
        .ensure_can_read_submission(caller, submission_id)
        .await?;

    let submission = service
        .storage
        .get_submission_by_id(submission_id)
        .await?
        .ok_or_else(|| GradeFlowError::not_found(format!("提交不存在: {submission_id}")))?;
    enrich(service, submission).await
}

/// 拼装学生姓名、作业标题与评语
pub(super) async fn enrich(
    service: &SubmissionService,
    submission: Submission,
) -> Result<SubmissionWithDetails> {
    let student_name = service
        .storage
        .get_user_by_id(submission.student_id)
        .await?
        .map(|user| user.full_name())
        .unwrap_or_else(|| "Unknown Student".to_string());
    let assignment_title = service
        .storage
        .get_assignment_by_id(submission.assignment_id)
        .await?
        .map(|assignment| assignment.title)
        .unwrap_or_else(|| "Unknown Assignment".to_string());
    let feedback = service
        .storage
        .get_feedback_by_submission(submission.id)
        .await?;

    Ok(SubmissionWithDetails {
        submission,
        student_name,
        assignment_title,
        feedback,
    })
}
