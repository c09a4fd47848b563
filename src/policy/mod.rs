//! 访问策略
//!
//! 所有读写权限规则集中在这一个组件里（而不是散落在各路由中），
//! 供服务层在执行任何操作前调用。每次拒绝都是一个带原因的显式
//! Forbidden 错误，绝不静默过滤；列表类视图的行级隔离由服务层
//! 按调用者身份构造查询来保证。
//!
//! 规则：
//! - 教师可以读写追溯到（classId/assignmentId/submissionId 链）
//!   自己班级的班级/作业/提交/评语；不可改写学生的提交内容。
//! - 学生只能读自己的提交，只能读（不能写）自己提交的评语；
//!   只能读自己选修班级的班级/作业信息。

use std::sync::Arc;

use crate::errors::{GradeFlowError, Result};
use crate::models::users::entities::Identity;
use crate::storage::Storage;

pub struct AccessPolicy {
    storage: Arc<dyn Storage>,
}

impl AccessPolicy {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// 读班级：拥有者教师，或选修该班级的学生
    pub async fn ensure_can_read_class(&self, caller: &Identity, class_id: i64) -> Result<()> {
        if self.storage.get_class_by_id(class_id).await?.is_none() {
            return Err(GradeFlowError::not_found(format!("班级不存在: {class_id}")));
        }
        if caller.is_teacher() {
            if self.storage.is_class_owner(caller.id, class_id).await? {
                return Ok(());
            }
            return Err(GradeFlowError::forbidden("您不是该班级的授课教师"));
        }
        if self.storage.is_enrolled(caller.id, class_id).await? {
            return Ok(());
        }
        Err(GradeFlowError::forbidden("您未选修该班级"))
    }

    /// 管理班级（加学生、建作业）：仅拥有者教师
    pub async fn ensure_can_manage_class(&self, caller: &Identity, class_id: i64) -> Result<()> {
        if !caller.is_teacher() {
            return Err(GradeFlowError::forbidden("仅教师可以管理班级"));
        }
        if self.storage.get_class_by_id(class_id).await?.is_none() {
            return Err(GradeFlowError::not_found(format!("班级不存在: {class_id}")));
        }
        if self.storage.is_class_owner(caller.id, class_id).await? {
            return Ok(());
        }
        Err(GradeFlowError::forbidden("您不是该班级的授课教师"))
    }

    /// 读作业：沿 assignment → class 链套用班级读规则
    pub async fn ensure_can_read_assignment(
        &self,
        caller: &Identity,
        assignment_id: i64,
    ) -> Result<()> {
        let assignment = self
            .storage
            .get_assignment_by_id(assignment_id)
            .await?
            .ok_or_else(|| GradeFlowError::not_found(format!("作业不存在: {assignment_id}")))?;
        self.ensure_can_read_class(caller, assignment.class_id).await
    }

    /// 提交作业：仅选修了作业所在班级的学生
    pub async fn ensure_can_submit(&self, caller: &Identity, assignment_id: i64) -> Result<()> {
        if !caller.is_student() {
            return Err(GradeFlowError::forbidden("仅学生可以提交作业"));
        }
        let assignment = self
            .storage
            .get_assignment_by_id(assignment_id)
            .await?
            .ok_or_else(|| GradeFlowError::not_found(format!("作业不存在: {assignment_id}")))?;
        if self
            .storage
            .is_enrolled(caller.id, assignment.class_id)
            .await?
        {
            return Ok(());
        }
        Err(GradeFlowError::forbidden("您未选修该作业所在的班级"))
    }

    /// 读提交：班级拥有者教师，或提交者本人
    pub async fn ensure_can_read_submission(
        &self,
        caller: &Identity,
        submission_id: i64,
    ) -> Result<()> {
        let submission = self
            .storage
            .get_submission_by_id(submission_id)
            .await?
            .ok_or_else(|| GradeFlowError::not_found(format!("提交不存在: {submission_id}")))?;

        if caller.is_student() {
            if submission.student_id == caller.id {
                return Ok(());
            }
            return Err(GradeFlowError::forbidden("只能查看自己的提交"));
        }
        self.ensure_submission_in_own_class(caller, submission.assignment_id)
            .await
    }

    /// 复核/人工评分某提交：仅其作业所在班级的拥有者教师
    pub async fn ensure_can_review_submission(
        &self,
        caller: &Identity,
        submission_id: i64,
    ) -> Result<()> {
        if !caller.is_teacher() {
            return Err(GradeFlowError::forbidden("仅教师可以评分"));
        }
        let submission = self
            .storage
            .get_submission_by_id(submission_id)
            .await?
            .ok_or_else(|| GradeFlowError::not_found(format!("提交不存在: {submission_id}")))?;
        self.ensure_submission_in_own_class(caller, submission.assignment_id)
            .await
    }

    /// 读评语：班级拥有者教师，或提交者本人（学生对评语只读）
    pub async fn ensure_can_read_feedback(
        &self,
        caller: &Identity,
        submission_id: i64,
    ) -> Result<()> {
        self.ensure_can_read_submission(caller, submission_id).await
    }

    /// 沿 assignment → class → teacher_id 链确认归属
    async fn ensure_submission_in_own_class(
        &self,
        caller: &Identity,
        assignment_id: i64,
    ) -> Result<()> {
        let assignment = self
            .storage
            .get_assignment_by_id(assignment_id)
            .await?
            .ok_or_else(|| GradeFlowError::not_found(format!("作业不存在: {assignment_id}")))?;
        if self
            .storage
            .is_class_owner(caller.id, assignment.class_id)
            .await?
        {
            return Ok(());
        }
        Err(GradeFlowError::forbidden("该提交不属于您的班级"))
    }
}
