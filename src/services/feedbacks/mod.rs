pub mod get;
pub mod manual;
pub mod review;

use std::sync::Arc;

use crate::errors::Result;
use crate::models::feedbacks::{entities::Feedback, requests::ReviewFeedbackRequest};
use crate::models::users::entities::Identity;
use crate::policy::AccessPolicy;
use crate::storage::Storage;

pub struct FeedbackService {
    pub(crate) storage: Arc<dyn Storage>,
    pub(crate) policy: AccessPolicy,
}

impl FeedbackService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            policy: AccessPolicy::new(storage.clone()),
            storage,
        }
    }

    /// 教师复核已有评语（覆盖自动评分）
    pub async fn review(
        &self,
        caller: &Identity,
        feedback_id: i64,
        data: ReviewFeedbackRequest,
    ) -> Result<Feedback> {
        review::review(self, caller, feedback_id, data).await
    }

    /// 教师对没有评语的提交直接人工评分（自动评分从未完成时）
    pub async fn grade_manually(
        &self,
        caller: &Identity,
        submission_id: i64,
        data: ReviewFeedbackRequest,
    ) -> Result<Feedback> {
        manual::grade_manually(self, caller, submission_id, data).await
    }

    /// 查询某提交的评语
    pub async fn get_for_submission(
        &self,
        caller: &Identity,
        submission_id: i64,
    ) -> Result<Feedback> {
        get::get_for_submission(self, caller, submission_id).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::errors::GradeFlowError;
    use crate::models::submissions::{entities::SubmissionStatus, requests::SubmitRequest};
    use crate::oracle::testing::ScriptedOracle;
    use crate::services::SubmissionService;
    use crate::services::testing::{good_outcome, harness, review_request};

    #[tokio::test]
    async fn test_review_overrides_ai_score() {
        let h = harness().await;
        let submissions = SubmissionService::new(
            h.storage.clone(),
            Arc::new(ScriptedOracle::succeeding(good_outcome(85))),
        );
        let feedbacks = FeedbackService::new(h.storage.clone());

        let outcome = submissions
            .submit(
                &h.student,
                h.assignment_id,
                SubmitRequest {
                    content: "my essay".to_string(),
                },
            )
            .await
            .unwrap();
        let feedback_id = outcome.feedback.unwrap().id;

        let reviewed = feedbacks
            .review(&h.teacher, feedback_id, review_request(90, "nice"))
            .await
            .unwrap();
        assert_eq!(reviewed.teacher_score, Some(90));
        assert_eq!(reviewed.ai_score, Some(85));
        assert_eq!(reviewed.effective_score(), Some(90));

        let submission = h
            .storage
            .get_submission_by_id(outcome.submission.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(submission.status, SubmissionStatus::TeacherReviewed);

        // 复核后退出待复核队列
        let pending = submissions.pending_reviews(&h.teacher).await.unwrap();
        assert!(pending.is_empty());
    }

    #[tokio::test]
    async fn test_review_twice_is_idempotent() {
        let h = harness().await;
        let submissions = SubmissionService::new(
            h.storage.clone(),
            Arc::new(ScriptedOracle::succeeding(good_outcome(85))),
        );
        let feedbacks = FeedbackService::new(h.storage.clone());

        let outcome = submissions
            .submit(
                &h.student,
                h.assignment_id,
                SubmitRequest {
                    content: "my essay".to_string(),
                },
            )
            .await
            .unwrap();
        let feedback_id = outcome.feedback.unwrap().id;

        let first = feedbacks
            .review(&h.teacher, feedback_id, review_request(90, "nice"))
            .await
            .unwrap();
        let second = feedbacks
            .review(&h.teacher, feedback_id, review_request(90, "nice"))
            .await
            .unwrap();

        assert_eq!(first.teacher_score, second.teacher_score);
        assert_eq!(first.teacher_comments, second.teacher_comments);
        assert_eq!(first.rubric_scores, second.rubric_scores);
        let submission = h
            .storage
            .get_submission_by_id(outcome.submission.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(submission.status, SubmissionStatus::TeacherReviewed);
    }

    #[tokio::test]
    async fn test_manual_grading_when_oracle_never_completed() {
        let h = harness().await;
        let submissions =
            SubmissionService::new(h.storage.clone(), Arc::new(ScriptedOracle::failing()));
        let feedbacks = FeedbackService::new(h.storage.clone());

        let outcome = submissions
            .submit(
                &h.student,
                h.assignment_id,
                SubmitRequest {
                    content: "my essay".to_string(),
                },
            )
            .await
            .unwrap();
        assert!(outcome.grading_pending);

        // 教师绕过自动评分直接人工评分
        let feedback = feedbacks
            .grade_manually(&h.teacher, outcome.submission.id, review_request(88, "solid"))
            .await
            .unwrap();
        assert_eq!(feedback.ai_score, None);
        assert_eq!(feedback.effective_score(), Some(88));

        let submission = h
            .storage
            .get_submission_by_id(outcome.submission.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(submission.status, SubmissionStatus::TeacherReviewed);

        // 已有评语后再走人工评分入口被拒绝
        let err = feedbacks
            .grade_manually(&h.teacher, outcome.submission.id, review_request(70, "again"))
            .await
            .unwrap_err();
        assert!(matches!(err, GradeFlowError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_review_permission_and_validation() {
        let h = harness().await;
        let submissions = SubmissionService::new(
            h.storage.clone(),
            Arc::new(ScriptedOracle::succeeding(good_outcome(85))),
        );
        let feedbacks = FeedbackService::new(h.storage.clone());

        let outcome = submissions
            .submit(
                &h.student,
                h.assignment_id,
                SubmitRequest {
                    content: "my essay".to_string(),
                },
            )
            .await
            .unwrap();
        let feedback_id = outcome.feedback.unwrap().id;

        // 非本班教师被拒绝
        let err = feedbacks
            .review(&h.other_teacher, feedback_id, review_request(50, "meh"))
            .await
            .unwrap_err();
        assert!(matches!(err, GradeFlowError::Forbidden(_)));

        // 学生不能复核自己的评语
        let err = feedbacks
            .review(&h.student, feedback_id, review_request(100, "me"))
            .await
            .unwrap_err();
        assert!(matches!(err, GradeFlowError::Forbidden(_)));

        // 分数越界是字段校验错误
        let err = feedbacks
            .review(&h.teacher, feedback_id, review_request(130, "too much"))
            .await
            .unwrap_err();
        assert!(matches!(err, GradeFlowError::Validation(_)));

        // 不存在的评语是 NotFound
        let err = feedbacks
            .review(&h.teacher, 999, review_request(90, "ghost"))
            .await
            .unwrap_err();
        assert!(matches!(err, GradeFlowError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_student_can_read_own_feedback_only() {
        let h = harness().await;
        let submissions = SubmissionService::new(
            h.storage.clone(),
            Arc::new(ScriptedOracle::succeeding(good_outcome(85))),
        );
        let feedbacks = FeedbackService::new(h.storage.clone());

        let outcome = submissions
            .submit(
                &h.student,
                h.assignment_id,
                SubmitRequest {
                    content: "my essay".to_string(),
                },
            )
            .await
            .unwrap();
        let submission_id = outcome.submission.id;

        // 本人可读
        let feedback = feedbacks
            .get_for_submission(&h.student, submission_id)
            .await
            .unwrap();
        assert_eq!(feedback.ai_score, Some(85));

        // 同班同学不可读
        let err = feedbacks
            .get_for_submission(&h.classmate, submission_id)
            .await
            .unwrap_err();
        assert!(matches!(err, GradeFlowError::Forbidden(_)));
    }
}
