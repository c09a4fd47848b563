//! 提交生命周期的入口
//!
//! 顺序是契约的核心："先落库，后评分"。提交在 Oracle 调用之前就
//! 已持久化为 submitted 状态；评分期间不持有任何存储锁；评分结果
//! 的落库是第二个独立的原子步骤。Oracle 失败只意味着评分挂起，
//! 提交本身已经成功。

use tracing::{info, warn};

use super::SubmissionService;
use crate::errors::{GradeFlowError, Result};
use crate::models::feedbacks::requests::NewAiFeedback;
use crate::models::submissions::{requests::SubmitRequest, responses::SubmitOutcome};
use crate::models::users::entities::Identity;
use crate::oracle::{AssignmentContext, default_rubric};
use crate::utils::validate::{FieldErrors, require_non_empty};

pub(super) async fn submit(
    service: &SubmissionService,
    caller: &Identity,
    assignment_id: i64,
    data: SubmitRequest,
) -> Result<SubmitOutcome> {
    let mut errors = FieldErrors::new();
    require_non_empty(&mut errors, "content", &data.content);
    errors.into_result()?;

    // 权限：仅选修了该班级的学生
    service
        .policy
        .ensure_can_submit(caller, assignment_id)
        .await?;

    let assignment = service
        .storage
        .get_assignment_by_id(assignment_id)
        .await?
        .ok_or_else(|| GradeFlowError::not_found(format!("作业不存在: {assignment_id}")))?;

    // 第一步：提交落库，状态 submitted
    let submission = service
        .storage
        .create_submission(assignment_id, caller.id, data.content)
        .await?;
    info!(
        "Submission {} created by student {} for assignment {}",
        submission.id, caller.id, assignment_id
    );

    let context = AssignmentContext {
        title: assignment.title.clone(),
        description: assignment.description.clone(),
        kind: assignment.kind,
        rubric: assignment.rubric.clone().unwrap_or_else(default_rubric),
    };

    // 第二步：调用 Oracle 评分。一次尝试，零重试。
    match service.oracle.grade(&submission.content, &context).await {
        Ok(outcome) => {
            let applied = service
                .storage
                .apply_grade_result(
                    submission.id,
                    NewAiFeedback {
                        ai_score: outcome.score,
                        ai_comments: outcome.feedback,
                        rubric_scores: outcome.rubric_scores,
                    },
                )
                .await;

            match applied {
                Ok(feedback) => {
                    info!(
                        "Submission {} graded by oracle, score {}",
                        submission.id, outcome.score
                    );
                    let submission = service
                        .storage
                        .get_submission_by_id(submission.id)
                        .await?
                        .ok_or_else(|| {
                            GradeFlowError::storage(format!("提交 {} 消失", submission.id))
                        })?;
                    Ok(SubmitOutcome {
                        submission,
                        feedback: Some(feedback),
                        grading_pending: false,
                    })
                }
                // 评分期间教师已人工评分等冲突：弃用本次结果，返回当前状态
                Err(e) => {
                    warn!(
                        "Discarding oracle result for submission {}: {}",
                        submission.id, e
                    );
                    let submission = service
                        .storage
                        .get_submission_by_id(submission.id)
                        .await?
                        .ok_or_else(|| {
                            GradeFlowError::storage(format!("提交 {} 消失", submission.id))
                        })?;
                    let feedback = service
                        .storage
                        .get_feedback_by_submission(submission.id)
                        .await?;
                    Ok(SubmitOutcome {
                        grading_pending: feedback.is_none(),
                        submission,
                        feedback,
                    })
                }
            }
        }
        // Oracle 失败：提交保持 submitted，错误上报但不失败整个请求
        Err(e) if e.is_oracle_error() => {
            warn!(
                "Oracle grading failed for submission {}: {}",
                submission.id, e
            );
            Ok(SubmitOutcome {
                submission,
                feedback: None,
                grading_pending: true,
            })
        }
        Err(e) => Err(e),
    }
}
