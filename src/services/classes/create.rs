use tracing::info;

use super::ClassService;
use crate::errors::{GradeFlowError, Result};
use crate::models::classes::{entities::Class, requests::CreateClassRequest};
use crate::models::users::entities::Identity;
use crate::utils::validate::{FieldErrors, require_non_empty};

pub(super) async fn create_class(
    service: &ClassService,
    caller: &Identity,
    data: CreateClassRequest,
) -> Result<Class> {
    // 权限校验：只有教师可以建班，且只能为自己建
    if !caller.is_teacher() {
        return Err(GradeFlowError::forbidden("仅教师可以创建班级"));
    }

    let mut errors = FieldErrors::new();
    require_non_empty(&mut errors, "name", &data.name);
    errors.into_result()?;

    let class = service.storage.create_class(caller.id, data).await?;
    info!(
        "Class {} ({}) created by teacher {}",
        class.id, class.name, caller.id
    );
    Ok(class)
}
