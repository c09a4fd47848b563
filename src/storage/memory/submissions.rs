//! 提交存储操作

use super::MemoryStorage;
use crate::errors::{GradeFlowError, Result};
use crate::models::submissions::entities::{Submission, SubmissionStatus};
use crate::models::users::entities::UserRole;

impl MemoryStorage {
    /// 创建提交，初始状态恒为 submitted
    pub(crate) async fn create_submission_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
        content: String,
    ) -> Result<Submission> {
        let mut tables = self.inner.write().await;

        let class_id = match tables.assignments.get(&assignment_id) {
            Some(assignment) => assignment.class_id,
            None => {
                return Err(GradeFlowError::not_found(format!(
                    "作业不存在: {assignment_id}"
                )));
            }
        };
        match tables.users.get(&student_id) {
            None => {
                return Err(GradeFlowError::not_found(format!(
                    "学生不存在: {student_id}"
                )));
            }
            Some(user) if user.role != UserRole::Student => {
                return Err(GradeFlowError::validation(format!(
                    "student_id: 用户 {student_id} 不是学生"
                )));
            }
            Some(_) => {}
        }
        // 引用完整性：提交者必须选修该作业所在班级
        if !tables.enrollment_pairs.contains(&(student_id, class_id)) {
            return Err(GradeFlowError::validation(format!(
                "student_id: 学生 {student_id} 未选修班级 {class_id}"
            )));
        }

        let id = tables.next_submission_id;
        tables.next_submission_id += 1;

        let submission = Submission {
            id,
            assignment_id,
            student_id,
            content,
            status: SubmissionStatus::Submitted,
            submitted_at: chrono::Utc::now(),
        };
        tables.submissions.insert(id, submission.clone());
        tables
            .submissions_by_assignment
            .entry(assignment_id)
            .or_default()
            .push(id);
        tables
            .submissions_by_student
            .entry(student_id)
            .or_default()
            .push(id);
        Ok(submission)
    }

    /// 通过 ID 获取提交
    pub(crate) async fn get_submission_by_id_impl(
        &self,
        submission_id: i64,
    ) -> Result<Option<Submission>> {
        let tables = self.inner.read().await;
        Ok(tables.submissions.get(&submission_id).cloned())
    }

    /// 某作业收到的全部提交
    pub(crate) async fn list_submissions_by_assignment_impl(
        &self,
        assignment_id: i64,
    ) -> Result<Vec<Submission>> {
        let tables = self.inner.read().await;
        let ids = tables
            .submissions_by_assignment
            .get(&assignment_id)
            .map(Vec::as_slice)
            .unwrap_or_default();
        Ok(ids
            .iter()
            .filter_map(|id| tables.submissions.get(id).cloned())
            .collect())
    }

    /// 某学生的全部提交
    pub(crate) async fn list_submissions_by_student_impl(
        &self,
        student_id: i64,
    ) -> Result<Vec<Submission>> {
        let tables = self.inner.read().await;
        let ids = tables
            .submissions_by_student
            .get(&student_id)
            .map(Vec::as_slice)
            .unwrap_or_default();
        Ok(ids
            .iter()
            .filter_map(|id| tables.submissions.get(id).cloned())
            .collect())
    }
}
