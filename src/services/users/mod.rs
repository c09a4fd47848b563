pub mod create;
pub mod get;

use std::sync::Arc;

use crate::errors::Result;
use crate::models::users::{entities::User, requests::CreateUserRequest};
use crate::storage::Storage;

pub struct UserService {
    pub(crate) storage: Arc<dyn Storage>,
}

impl UserService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    // 注册用户
    pub async fn create_user(&self, data: CreateUserRequest) -> Result<User> {
        create::create_user(self, data).await
    }

    // 根据用户 ID 获取用户信息
    pub async fn get_user(&self, user_id: i64) -> Result<User> {
        get::get_user(self, user_id).await
    }
}
