pub mod detail;
pub mod list;
pub mod pending;
pub mod submit;

use std::sync::Arc;

use crate::errors::Result;
use crate::models::submissions::{
    requests::SubmitRequest,
    responses::{SubmissionWithDetails, SubmitOutcome},
};
use crate::models::users::entities::Identity;
use crate::oracle::GradingOracle;
use crate::policy::AccessPolicy;
use crate::storage::Storage;

pub struct SubmissionService {
    pub(crate) storage: Arc<dyn Storage>,
    pub(crate) policy: AccessPolicy,
    pub(crate) oracle: Arc<dyn GradingOracle>,
}

impl SubmissionService {
    pub fn new(storage: Arc<dyn Storage>, oracle: Arc<dyn GradingOracle>) -> Self {
        Self {
            policy: AccessPolicy::new(storage.clone()),
            storage,
            oracle,
        }
    }

    /// 学生提交作业并触发自动评分
    pub async fn submit(
        &self,
        caller: &Identity,
        assignment_id: i64,
        data: SubmitRequest,
    ) -> Result<SubmitOutcome> {
        submit::submit(self, caller, assignment_id, data).await
    }

    /// 获取提交详情
    pub async fn get_submission(
        &self,
        caller: &Identity,
        submission_id: i64,
    ) -> Result<SubmissionWithDetails> {
        detail::get_submission(self, caller, submission_id).await
    }

    /// 某作业收到的提交列表
    pub async fn list_for_assignment(
        &self,
        caller: &Identity,
        assignment_id: i64,
    ) -> Result<Vec<SubmissionWithDetails>> {
        list::list_for_assignment(self, caller, assignment_id).await
    }

    /// 教师的待复核队列
    pub async fn pending_reviews(&self, caller: &Identity) -> Result<Vec<SubmissionWithDetails>> {
        pending::pending_reviews(self, caller).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::errors::GradeFlowError;
    use crate::models::submissions::entities::SubmissionStatus;
    use crate::oracle::testing::ScriptedOracle;
    use crate::services::testing::{good_outcome, harness};

    #[tokio::test]
    async fn test_submit_with_successful_grading() {
        let h = harness().await;
        let oracle = Arc::new(ScriptedOracle::succeeding(good_outcome(85)));
        let service = SubmissionService::new(h.storage.clone(), oracle.clone());

        let outcome = service
            .submit(
                &h.student,
                h.assignment_id,
                SubmitRequest {
                    content: "my essay".to_string(),
                },
            )
            .await
            .unwrap();

        assert!(!outcome.grading_pending);
        assert_eq!(outcome.submission.status, SubmissionStatus::AiGraded);
        let feedback = outcome.feedback.expect("feedback should exist");
        assert_eq!(feedback.ai_score, Some(85));
        assert_eq!(feedback.submission_id, outcome.submission.id);

        // 进入教师的待复核队列
        let pending = service.pending_reviews(&h.teacher).await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].submission.id, outcome.submission.id);
        assert_eq!(pending[0].student_name, "Alice Chen");
        assert_eq!(pending[0].assignment_title, "Essay 1");
    }

    #[tokio::test]
    async fn test_submit_survives_oracle_failure() {
        let h = harness().await;
        let oracle = Arc::new(ScriptedOracle::failing());
        let service = SubmissionService::new(h.storage.clone(), oracle.clone());

        let outcome = service
            .submit(
                &h.student,
                h.assignment_id,
                SubmitRequest {
                    content: "my essay".to_string(),
                },
            )
            .await
            .unwrap();

        // 提交成功入库，评分挂起
        assert!(outcome.grading_pending);
        assert!(outcome.feedback.is_none());
        assert_eq!(outcome.submission.status, SubmissionStatus::Submitted);

        // Oracle 只被尝试一次，生命周期层零重试
        assert_eq!(oracle.call_count(), 1);

        // 未评分的提交不出现在待复核队列
        let pending = service.pending_reviews(&h.teacher).await.unwrap();
        assert!(pending.is_empty());

        // 无评语行
        assert!(
            h.storage
                .get_feedback_by_submission(outcome.submission.id)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_unenrolled_student_is_forbidden() {
        let h = harness().await;
        let oracle = Arc::new(ScriptedOracle::succeeding(good_outcome(85)));
        let service = SubmissionService::new(h.storage.clone(), oracle.clone());

        let err = service
            .submit(
                &h.outsider,
                h.assignment_id,
                SubmitRequest {
                    content: "sneaky essay".to_string(),
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, GradeFlowError::Forbidden(_)));
        // 拒绝发生在落库之前，Oracle 也不会被调用
        assert_eq!(oracle.call_count(), 0);
        assert!(
            h.storage
                .list_submissions_by_assignment(h.assignment_id)
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_empty_content_is_a_validation_error() {
        let h = harness().await;
        let oracle = Arc::new(ScriptedOracle::succeeding(good_outcome(85)));
        let service = SubmissionService::new(h.storage.clone(), oracle);

        let err = service
            .submit(
                &h.student,
                h.assignment_id,
                SubmitRequest {
                    content: "   ".to_string(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, GradeFlowError::Validation(_)));
    }

    #[tokio::test]
    async fn test_students_only_see_their_own_rows() {
        let h = harness().await;
        let oracle = Arc::new(ScriptedOracle::succeeding(good_outcome(85)));
        let service = SubmissionService::new(h.storage.clone(), oracle);

        service
            .submit(
                &h.student,
                h.assignment_id,
                SubmitRequest {
                    content: "alice's essay".to_string(),
                },
            )
            .await
            .unwrap();
        service
            .submit(
                &h.classmate,
                h.assignment_id,
                SubmitRequest {
                    content: "bob's essay".to_string(),
                },
            )
            .await
            .unwrap();

        // 教师看到全部提交
        let all = service
            .list_for_assignment(&h.teacher, h.assignment_id)
            .await
            .unwrap();
        assert_eq!(all.len(), 2);

        // 学生只看到自己的行，靠查询构造保证而非事后过滤
        let own = service
            .list_for_assignment(&h.student, h.assignment_id)
            .await
            .unwrap();
        assert_eq!(own.len(), 1);
        assert_eq!(own[0].submission.student_id, h.student.id);

        // 学生不能读同学的提交详情
        let foreign = all
            .iter()
            .find(|row| row.submission.student_id != h.student.id)
            .unwrap();
        let err = service
            .get_submission(&h.student, foreign.submission.id)
            .await
            .unwrap_err();
        assert!(matches!(err, GradeFlowError::Forbidden(_)));
    }
}
