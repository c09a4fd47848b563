pub mod create;
pub mod get;
pub mod list;
pub mod recent;

use std::sync::Arc;

use crate::errors::Result;
use crate::models::assignments::{
    entities::Assignment, requests::CreateAssignmentRequest, responses::AssignmentWithStats,
};
use crate::models::users::entities::Identity;
use crate::policy::AccessPolicy;
use crate::storage::Storage;

pub struct AssignmentService {
    pub(crate) storage: Arc<dyn Storage>,
    pub(crate) policy: AccessPolicy,
}

impl AssignmentService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            policy: AccessPolicy::new(storage.clone()),
            storage,
        }
    }

    // 创建作业
    pub async fn create_assignment(
        &self,
        caller: &Identity,
        data: CreateAssignmentRequest,
    ) -> Result<Assignment> {
        create::create_assignment(self, caller, data).await
    }

    // 根据作业 ID 获取作业信息
    pub async fn get_assignment(&self, caller: &Identity, assignment_id: i64) -> Result<Assignment> {
        get::get_assignment(self, caller, assignment_id).await
    }

    // 按调用者身份列出可见作业
    pub async fn list_assignments(&self, caller: &Identity) -> Result<Vec<Assignment>> {
        list::list_assignments(self, caller).await
    }

    // 教师工作台：最近作业概览
    pub async fn recent_assignments(
        &self,
        caller: &Identity,
        limit: usize,
    ) -> Result<Vec<AssignmentWithStats>> {
        recent::recent_assignments(self, caller, limit).await
    }
}
