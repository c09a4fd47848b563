use super::ClassService;
use crate::errors::{GradeFlowError, Result};
use crate::models::classes::entities::Class;
use crate::models::users::entities::Identity;

pub(super) async fn get_class(
    service: &ClassService,
    caller: &Identity,
    class_id: i64,
) -> Result<Class> {
    service.policy.ensure_can_read_class(caller, class_id).await?;
    service
        .storage
        .get_class_by_id(class_id)
        .await?
        .ok_or_else(|| GradeFlowError::not_found(format!("班级不存在: {class_id}")))
}
