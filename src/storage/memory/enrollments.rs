//! 选课关系存储操作

use super::MemoryStorage;
use crate::errors::{GradeFlowError, Result};
use crate::models::enrollments::entities::Enrollment;
use crate::models::users::entities::{User, UserRole};

impl MemoryStorage {
    /// 学生加入班级
    pub(crate) async fn enroll_student_impl(
        &self,
        student_id: i64,
        class_id: i64,
    ) -> Result<Enrollment> {
        let mut tables = self.inner.write().await;

        if !tables.classes.contains_key(&class_id) {
            return Err(GradeFlowError::not_found(format!("班级不存在: {class_id}")));
        }
        match tables.users.get(&student_id) {
            None => {
                return Err(GradeFlowError::not_found(format!(
                    "学生不存在: {student_id}"
                )));
            }
            // 选课关系只能关联学生
            Some(user) if user.role != UserRole::Student => {
                return Err(GradeFlowError::validation(format!(
                    "student_id: 用户 {student_id} 不是学生"
                )));
            }
            Some(_) => {}
        }
        if tables.enrollment_pairs.contains(&(student_id, class_id)) {
            return Err(GradeFlowError::conflict(format!(
                "学生 {student_id} 已在班级 {class_id} 中"
            )));
        }

        let id = tables.next_enrollment_id;
        tables.next_enrollment_id += 1;

        let enrollment = Enrollment {
            id,
            student_id,
            class_id,
            created_at: chrono::Utc::now(),
        };
        tables.enrollments.insert(id, enrollment.clone());
        tables.enrollment_pairs.insert((student_id, class_id));
        tables
            .classes_by_student
            .entry(student_id)
            .or_default()
            .push(class_id);
        tables
            .students_by_class
            .entry(class_id)
            .or_default()
            .push(student_id);
        Ok(enrollment)
    }

    /// 班级在读学生名单
    pub(crate) async fn list_students_in_class_impl(&self, class_id: i64) -> Result<Vec<User>> {
        let tables = self.inner.read().await;
        let ids = tables
            .students_by_class
            .get(&class_id)
            .map(Vec::as_slice)
            .unwrap_or_default();
        Ok(ids
            .iter()
            .filter_map(|id| tables.users.get(id))
            .filter(|u| u.role == UserRole::Student)
            .cloned()
            .collect())
    }

    pub(crate) async fn is_class_owner_impl(&self, teacher_id: i64, class_id: i64) -> Result<bool> {
        let tables = self.inner.read().await;
        Ok(tables
            .classes
            .get(&class_id)
            .is_some_and(|c| c.teacher_id == teacher_id))
    }

    pub(crate) async fn is_enrolled_impl(&self, student_id: i64, class_id: i64) -> Result<bool> {
        let tables = self.inner.read().await;
        Ok(tables.enrollment_pairs.contains(&(student_id, class_id)))
    }
}
