use tracing::info;

use super::AssignmentService;
use crate::errors::Result;
use crate::models::assignments::{
    entities::Assignment,
    requests::{CreateAssignmentRequest, NewAssignment},
};
use crate::models::users::entities::Identity;
use crate::utils::validate::{FieldErrors, parse_rfc3339, require_non_empty};

pub(super) async fn create_assignment(
    service: &AssignmentService,
    caller: &Identity,
    data: CreateAssignmentRequest,
) -> Result<Assignment> {
    // 字段校验先行，汇总所有问题一次性返回
    let mut errors = FieldErrors::new();
    require_non_empty(&mut errors, "title", &data.title);
    require_non_empty(&mut errors, "description", &data.description);
    let due_date = match parse_rfc3339(&data.due_date) {
        Ok(date) => Some(date),
        Err(problem) => {
            errors.push("due_date", problem);
            None
        }
    };
    errors.into_result()?;

    // 只有班级拥有者教师可以布置作业
    service
        .policy
        .ensure_can_manage_class(caller, data.class_id)
        .await?;

    let assignment = service
        .storage
        .create_assignment(NewAssignment {
            class_id: data.class_id,
            title: data.title,
            description: data.description,
            kind: data.kind,
            due_date: due_date.expect("validated above"),
            status: data.status,
            rubric: data.rubric,
        })
        .await?;
    info!(
        "Assignment {} ({}) created in class {} by teacher {}",
        assignment.id, assignment.title, assignment.class_id, caller.id
    );
    Ok(assignment)
}
