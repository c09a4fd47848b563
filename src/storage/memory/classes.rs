//! 班级存储操作

use super::MemoryStorage;
use crate::errors::{GradeFlowError, Result};
use crate::models::classes::{entities::Class, requests::CreateClassRequest};
use crate::models::users::entities::UserRole;

impl MemoryStorage {
    /// 创建班级
    pub(crate) async fn create_class_impl(
        &self,
        teacher_id: i64,
        req: CreateClassRequest,
    ) -> Result<Class> {
        let mut tables = self.inner.write().await;

        // 班级拥有者必须是教师
        match tables.users.get(&teacher_id) {
            None => {
                return Err(GradeFlowError::not_found(format!(
                    "教师不存在: {teacher_id}"
                )));
            }
            Some(user) if user.role != UserRole::Teacher => {
                return Err(GradeFlowError::validation(format!(
                    "teacher_id: 用户 {teacher_id} 不是教师"
                )));
            }
            Some(_) => {}
        }

        let id = tables.next_class_id;
        tables.next_class_id += 1;

        let class = Class {
            id,
            name: req.name,
            description: req.description,
            teacher_id,
            created_at: chrono::Utc::now(),
        };
        tables.classes.insert(id, class.clone());
        tables
            .classes_by_teacher
            .entry(teacher_id)
            .or_default()
            .push(id);
        Ok(class)
    }

    /// 通过 ID 获取班级
    pub(crate) async fn get_class_by_id_impl(&self, class_id: i64) -> Result<Option<Class>> {
        let tables = self.inner.read().await;
        Ok(tables.classes.get(&class_id).cloned())
    }

    /// 某教师拥有的全部班级
    pub(crate) async fn list_classes_by_teacher_impl(&self, teacher_id: i64) -> Result<Vec<Class>> {
        let tables = self.inner.read().await;
        let ids = tables
            .classes_by_teacher
            .get(&teacher_id)
            .map(Vec::as_slice)
            .unwrap_or_default();
        Ok(ids
            .iter()
            .filter_map(|id| tables.classes.get(id).cloned())
            .collect())
    }

    /// 某学生选修的全部班级
    pub(crate) async fn list_classes_for_student_impl(
        &self,
        student_id: i64,
    ) -> Result<Vec<Class>> {
        let tables = self.inner.read().await;
        let ids = tables
            .classes_by_student
            .get(&student_id)
            .map(Vec::as_slice)
            .unwrap_or_default();
        Ok(ids
            .iter()
            .filter_map(|id| tables.classes.get(id).cloned())
            .collect())
    }
}
