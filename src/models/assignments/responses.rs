use serde::Serialize;

use super::entities::Assignment;

/// 教师工作台的作业概览项
#[derive(Debug, Clone, Serialize)]
pub struct AssignmentWithStats {
    #[serde(flatten)]
    pub assignment: Assignment,
    // 所属班级名称
    pub class_name: String,
    // 已收到的提交数
    pub submission_count: usize,
    // 班级在读学生数
    pub total_students: usize,
}
