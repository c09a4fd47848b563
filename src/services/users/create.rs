use tracing::info;

use super::UserService;
use crate::errors::Result;
use crate::models::users::{entities::User, requests::CreateUserRequest};
use crate::utils::validate::{FieldErrors, require_non_empty, validate_username};

pub(super) async fn create_user(service: &UserService, data: CreateUserRequest) -> Result<User> {
    // 字段校验
    let mut errors = FieldErrors::new();
    if let Err(problem) = validate_username(&data.username) {
        errors.push("username", problem);
    }
    require_non_empty(&mut errors, "first_name", &data.first_name);
    require_non_empty(&mut errors, "last_name", &data.last_name);
    errors.into_result()?;

    let user = service.storage.create_user(data).await?;
    info!(
        "User {} registered (username: {}, role: {})",
        user.id, user.username, user.role
    );
    Ok(user)
}
