//! 用户存储操作

use super::MemoryStorage;
use crate::errors::{GradeFlowError, Result};
use crate::models::users::{entities::User, requests::CreateUserRequest};

impl MemoryStorage {
    /// 创建用户
    pub(crate) async fn create_user_impl(&self, req: CreateUserRequest) -> Result<User> {
        let mut tables = self.inner.write().await;

        // 用户名唯一
        if tables.users.values().any(|u| u.username == req.username) {
            return Err(GradeFlowError::conflict(format!(
                "用户名已存在: {}",
                req.username
            )));
        }

        let id = tables.next_user_id;
        tables.next_user_id += 1;

        let user = User {
            id,
            username: req.username,
            first_name: req.first_name,
            last_name: req.last_name,
            role: req.role,
            department: req.department,
            created_at: chrono::Utc::now(),
        };
        tables.users.insert(id, user.clone());
        Ok(user)
    }

    /// 通过 ID 获取用户
    pub(crate) async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let tables = self.inner.read().await;
        Ok(tables.users.get(&id).cloned())
    }

    /// 通过用户名获取用户
    pub(crate) async fn get_user_by_username_impl(&self, username: &str) -> Result<Option<User>> {
        let tables = self.inner.read().await;
        Ok(tables
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }
}
