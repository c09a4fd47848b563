use serde::Serialize;

/// 学生工作台统计
#[derive(Debug, Clone, Serialize)]
pub struct StudentStats {
    // 尚未提交的作业数
    pub pending_assignments: usize,
    // 已完成（自动评分或教师复核）的提交数
    pub completed_assignments: usize,
    // 生效成绩均值，四舍五入取整；无已评分提交时为空
    pub average_score: Option<i32>,
}
