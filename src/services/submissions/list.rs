use super::{SubmissionService, detail};
use crate::errors::{GradeFlowError, Result};
use crate::models::submissions::responses::SubmissionWithDetails;
use crate::models::users::entities::Identity;

/// 某作业的提交列表。教师（班级拥有者）看到全部行；
/// 学生只看到自己的行——靠按身份过滤查询构造，而非抛出拒绝。
pub(super) async fn list_for_assignment(
    service: &SubmissionService,
    caller: &Identity,
    assignment_id: i64,
) -> Result<Vec<SubmissionWithDetails>> {
    let assignment = service
        .storage
        .get_assignment_by_id(assignment_id)
        .await?
        .ok_or_else(|| GradeFlowError::not_found(format!("作业不存在: {assignment_id}")))?;

    if caller.is_teacher() {
        service
            .policy
            .ensure_can_manage_class(caller, assignment.class_id)
            .await?;
    } else {
        service
            .policy
            .ensure_can_read_assignment(caller, assignment_id)
            .await?;
    }

    let submissions = service
        .storage
        .list_submissions_by_assignment(assignment_id)
        .await?;

    let mut rows = Vec::new();
    for submission in submissions {
        if caller.is_student() && submission.student_id != caller.id {
            continue;
        }
        rows.push(detail::enrich(service, submission).await?);
    }
    Ok(rows)
}
