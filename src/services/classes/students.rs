use super::ClassService;
use crate::errors::Result;
use crate::models::users::entities::{Identity, User};

/// 班级花名册，仅班级拥有者教师可见
pub(super) async fn class_students(
    service: &ClassService,
    caller: &Identity,
    class_id: i64,
) -> Result<Vec<User>> {
    service
        .policy
        .ensure_can_manage_class(caller, class_id)
        .await?;
    service.storage.list_students_in_class(class_id).await
}
