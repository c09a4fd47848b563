use super::AssignmentService;
use crate::errors::Result;
use crate::models::assignments::entities::Assignment;
use crate::models::users::entities::Identity;

/// 教师看自己班级的作业，学生看选修班级的作业
pub(super) async fn list_assignments(
    service: &AssignmentService,
    caller: &Identity,
) -> Result<Vec<Assignment>> {
    let classes = if caller.is_teacher() {
        service.storage.list_classes_by_teacher(caller.id).await?
    } else {
        service.storage.list_classes_for_student(caller.id).await?
    };

    let mut assignments = Vec::new();
    for class in classes {
        assignments.extend(service.storage.list_assignments_by_class(class.id).await?);
    }
    Ok(assignments)
}
