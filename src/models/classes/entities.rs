use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Class {
    // 班级ID
    pub id: i64,
    // 班级名称
    pub name: String,
    // 班级描述
    pub description: Option<String>,
    // 授课教师ID，每个班级有且只有一位
    pub teacher_id: i64,
    // 创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
}
