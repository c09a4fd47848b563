pub mod student;

use std::sync::Arc;

use crate::errors::Result;
use crate::models::stats::responses::StudentStats;
use crate::models::users::entities::Identity;
use crate::storage::Storage;

pub struct StatsService {
    pub(crate) storage: Arc<dyn Storage>,
}

impl StatsService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    // 学生工作台统计
    pub async fn student_stats(&self, caller: &Identity) -> Result<StudentStats> {
        student::student_stats(self, caller).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::errors::GradeFlowError;
    use crate::models::submissions::requests::SubmitRequest;
    use crate::oracle::testing::ScriptedOracle;
    use crate::services::testing::{good_outcome, harness, review_request};
    use crate::services::{FeedbackService, SubmissionService};

    #[tokio::test]
    async fn test_student_stats_after_review() {
        let h = harness().await;
        let submissions = SubmissionService::new(
            h.storage.clone(),
            Arc::new(ScriptedOracle::succeeding(good_outcome(85))),
        );
        let feedbacks = FeedbackService::new(h.storage.clone());
        let stats = StatsService::new(h.storage.clone());

        // 现场共两份作业；学生完成其中一份并被教师复核为 90 分
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
        feedbacks
            .review(
                &h.teacher,
                outcome.feedback.unwrap().id,
                review_request(90, "nice"),
            )
            .await
            .unwrap();

        let result = stats.student_stats(&h.student).await.unwrap();
        assert_eq!(result.completed_assignments, 1);
        assert_eq!(result.average_score, Some(90));
        // 未提交的作业 = 总作业数 - 1
        assert_eq!(result.pending_assignments, 1);
    }

    #[tokio::test]
    async fn test_student_stats_with_no_graded_work() {
        let h = harness().await;
        let submissions =
            SubmissionService::new(h.storage.clone(), Arc::new(ScriptedOracle::failing()));
        let stats = StatsService::new(h.storage.clone());

        // 评分挂起的提交既不算完成，也不参与均分
        submissions
            .submit(
                &h.student,
                h.assignment_id,
                SubmitRequest {
                    content: "my essay".to_string(),
                },
            )
            .await
            .unwrap();

        let result = stats.student_stats(&h.student).await.unwrap();
        assert_eq!(result.completed_assignments, 0);
        assert_eq!(result.average_score, None);
        // 已提交的作业不再算待完成
        assert_eq!(result.pending_assignments, 1);
    }

    #[tokio::test]
    async fn test_average_rounds_to_nearest_integer() {
        let h = harness().await;
        let stats = StatsService::new(h.storage.clone());

        // 两份提交分别得 85 与 90，均值 87.5 → 88
        let submissions_a = SubmissionService::new(
            h.storage.clone(),
            Arc::new(ScriptedOracle::succeeding(good_outcome(85))),
        );
        submissions_a
            .submit(
                &h.student,
                h.assignment_id,
                SubmitRequest {
                    content: "essay one".to_string(),
                },
            )
            .await
            .unwrap();
        let submissions_b = SubmissionService::new(
            h.storage.clone(),
            Arc::new(ScriptedOracle::succeeding(good_outcome(90))),
        );
        submissions_b
            .submit(
                &h.student,
                h.second_assignment_id,
                SubmitRequest {
                    content: "essay two".to_string(),
                },
            )
            .await
            .unwrap();

        let result = stats.student_stats(&h.student).await.unwrap();
        assert_eq!(result.completed_assignments, 2);
        assert_eq!(result.average_score, Some(88));
        assert_eq!(result.pending_assignments, 0);
    }

    #[tokio::test]
    async fn test_teacher_cannot_request_student_stats() {
        let h = harness().await;
        let stats = StatsService::new(h.storage.clone());
        let err = stats.student_stats(&h.teacher).await.unwrap_err();
        assert!(matches!(err, GradeFlowError::Forbidden(_)));
    }
}
