//! 作业存储操作

use super::MemoryStorage;
use crate::errors::{GradeFlowError, Result};
use crate::models::assignments::{entities::Assignment, requests::NewAssignment};

impl MemoryStorage {
    /// 创建作业
    pub(crate) async fn create_assignment_impl(&self, req: NewAssignment) -> Result<Assignment> {
        let mut tables = self.inner.write().await;

        if !tables.classes.contains_key(&req.class_id) {
            return Err(GradeFlowError::not_found(format!(
                "班级不存在: {}",
                req.class_id
            )));
        }

        let id = tables.next_assignment_id;
        tables.next_assignment_id += 1;

        let assignment = Assignment {
            id,
            class_id: req.class_id,
            title: req.title,
            description: req.description,
            kind: req.kind,
            due_date: req.due_date,
            status: req.status,
            rubric: req.rubric,
            created_at: chrono::Utc::now(),
        };
        tables.assignments.insert(id, assignment.clone());
        tables
            .assignments_by_class
            .entry(req.class_id)
            .or_default()
            .push(id);
        Ok(assignment)
    }

    /// 通过 ID 获取作业
    pub(crate) async fn get_assignment_by_id_impl(
        &self,
        assignment_id: i64,
    ) -> Result<Option<Assignment>> {
        let tables = self.inner.read().await;
        Ok(tables.assignments.get(&assignment_id).cloned())
    }

    /// 班级内全部作业
    pub(crate) async fn list_assignments_by_class_impl(
        &self,
        class_id: i64,
    ) -> Result<Vec<Assignment>> {
        let tables = self.inner.read().await;
        let ids = tables
            .assignments_by_class
            .get(&class_id)
            .map(Vec::as_slice)
            .unwrap_or_default();
        Ok(ids
            .iter()
            .filter_map(|id| tables.assignments.get(id).cloned())
            .collect())
    }
}
