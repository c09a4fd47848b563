use super::AssignmentService;
use crate::errors::{GradeFlowError, Result};
use crate::models::assignments::entities::Assignment;
use crate::models::users::entities::Identity;

pub(super) async fn get_assignment(
    service: &AssignmentService,
    caller: &Identity,
    assignment_id: i64,
) -> Result<Assignment> {
    service
        .policy
        .ensure_can_read_assignment(caller, assignment_id)
        .await?;
    service
        .storage
        .get_assignment_by_id(assignment_id)
        .await?
        .ok_or_else(|| GradeFlowError::not_found(format!("作业不存在: {assignment_id}")))
}
