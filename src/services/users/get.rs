use super::UserService;
use crate::errors::{GradeFlowError, Result};
use crate::models::users::entities::User;

pub(super) async fn get_user(service: &UserService, user_id: i64) -> Result<User> {
    service
        .storage
        .get_user_by_id(user_id)
        .await?
        .ok_or_else(|| GradeFlowError::not_found(format!("用户不存在: {user_id}")))
}
