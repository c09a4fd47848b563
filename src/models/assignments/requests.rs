use serde::Deserialize;

use super::entities::{AssignmentKind, AssignmentStatus, Rubric};

/// 创建作业请求
///
/// due_date 接受 RFC3339 字符串，解析失败作为字段校验错误返回。
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAssignmentRequest {
    pub class_id: i64,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: AssignmentKind,
    pub due_date: String,
    #[serde(default)]
    pub status: AssignmentStatus,
    pub rubric: Option<Rubric>,
}

/// 作业概览查询参数
#[derive(Debug, Clone, Deserialize)]
pub struct RecentAssignmentsQuery {
    pub limit: Option<usize>,
}

/// 校验完成后交给存储层的作业数据
#[derive(Debug, Clone)]
pub struct NewAssignment {
    pub class_id: i64,
    pub title: String,
    pub description: String,
    pub kind: AssignmentKind,
    pub due_date: chrono::DateTime<chrono::Utc>,
    pub status: AssignmentStatus,
    pub rubric: Option<Rubric>,
}
