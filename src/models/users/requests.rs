use serde::Deserialize;

use super::entities::UserRole;

/// 创建用户请求
///
/// 角色在创建后不可变更。
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    pub department: Option<String>,
}
