use serde::{Deserialize, Serialize};

/// 学生-班级多对多关系
///
/// (student_id, class_id) 对在存储层保证唯一，重复选课会被拒绝。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: i64,
    pub student_id: i64,
    pub class_id: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
