use super::AssignmentService;
use crate::errors::{GradeFlowError, Result};
use crate::models::assignments::responses::AssignmentWithStats;
use crate::models::users::entities::Identity;

/// 教师工作台：最新布置的作业，附班级名、提交数与班级人数。
/// 每次调用实时计算，不做缓存。
pub(super) async fn recent_assignments(
    service: &AssignmentService,
    caller: &Identity,
    limit: usize,
) -> Result<Vec<AssignmentWithStats>> {
    if !caller.is_teacher() {
        return Err(GradeFlowError::forbidden("仅教师可以查看作业概览"));
    }

    let classes = service.storage.list_classes_by_teacher(caller.id).await?;

    let mut rows = Vec::new();
    for class in &classes {
        for assignment in service.storage.list_assignments_by_class(class.id).await? {
            rows.push((assignment, class.name.clone()));
        }
    }

    // 最新创建的排前面，同一时刻按 ID 倒序
    rows.sort_by(|a, b| {
        b.0.created_at
            .cmp(&a.0.created_at)
            .then(b.0.id.cmp(&a.0.id))
    });
    rows.truncate(limit);

    let mut result = Vec::with_capacity(rows.len());
    for (assignment, class_name) in rows {
        let submission_count = service
            .storage
            .list_submissions_by_assignment(assignment.id)
            .await?
            .len();
        let total_students = service
            .storage
            .list_students_in_class(assignment.class_id)
            .await?
            .len();
        result.push(AssignmentWithStats {
            assignment,
            class_name,
            submission_count,
            total_students,
        });
    }
    Ok(result)
}
