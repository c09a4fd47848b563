use std::collections::HashSet;

use super::StatsService;
use crate::errors::{GradeFlowError, Result};
use crate::models::stats::responses::StudentStats;
use crate::models::submissions::entities::SubmissionStatus;
use crate::models::users::entities::Identity;

/// 学生工作台统计，每次调用实时计算
pub(super) async fn student_stats(
    service: &StatsService,
    caller: &Identity,
) -> Result<StudentStats> {
    if !caller.is_student() {
        return Err(GradeFlowError::forbidden("仅学生可以查看个人统计"));
    }

    // 选修班级内的全部作业
    let classes = service.storage.list_classes_for_student(caller.id).await?;
    let mut assignments = Vec::new();
    for class in classes {
        assignments.extend(service.storage.list_assignments_by_class(class.id).await?);
    }

    let submissions = service.storage.list_submissions_by_student(caller.id).await?;

    // 待完成 = 尚无任何提交的作业
    let submitted_assignment_ids: HashSet<i64> =
        submissions.iter().map(|s| s.assignment_id).collect();
    let pending_assignments = assignments
        .iter()
        .filter(|a| !submitted_assignment_ids.contains(&a.id))
        .count();

    // 已完成 = 自动评分或教师复核过的提交
    let completed: Vec<_> = submissions
        .iter()
        .filter(|s| s.status != SubmissionStatus::Submitted)
        .collect();

    // 均分取生效成绩（教师评分优先），四舍五入取整
    let mut total = 0i64;
    let mut graded = 0u32;
    for submission in &completed {
        if let Some(feedback) = service
            .storage
            .get_feedback_by_submission(submission.id)
            .await?
        {
            if let Some(score) = feedback.effective_score() {
                total += i64::from(score);
                graded += 1;
            }
        }
    }
    let average_score = if graded > 0 {
        Some((total as f64 / f64::from(graded)).round() as i32)
    } else {
        None
    };

    Ok(StudentStats {
        pending_assignments,
        completed_assignments: completed.len(),
        average_score,
    })
}
