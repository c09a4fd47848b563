use super::{SubmissionService, detail};
use crate::errors::{GradeFlowError, Result};
use crate::models::submissions::{entities::SubmissionStatus, responses::SubmissionWithDetails};
use crate::models::users::entities::Identity;

/// 教师的待复核队列：自己班级中状态恰为 ai_graded 的提交。
/// submitted（评分挂起）与 teacher_reviewed（已复核）都不在其中。
pub(super) async fn pending_reviews(
    service: &SubmissionService,
    caller: &Identity,
) -> Result<Vec<SubmissionWithDetails>> {
    if !caller.is_teacher() {
        return Err(GradeFlowError::forbidden("仅教师可以查看待复核队列"));
    }

    let classes = service.storage.list_classes_by_teacher(caller.id).await?;

    let mut rows = Vec::new();
    for class in classes {
        for assignment in service.storage.list_assignments_by_class(class.id).await? {
            for submission in service
                .storage
                .list_submissions_by_assignment(assignment.id)
                .await?
            {
                if submission.status == SubmissionStatus::AiGraded {
                    rows.push(detail::enrich(service, submission).await?);
                }
            }
        }
    }
    Ok(rows)
}
