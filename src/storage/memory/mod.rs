//! 内存存储实现
//!
//! 参考实现：所有表位于同一把读写锁之后，写操作串行执行，任何一次
//! 变更（包括"写评语 + 推进提交状态"这类两步操作）对读者都是
//! 全有或全无。关系查询走随写维护的二级索引而非全表扫描。
//! 生产部署可用满足同一 Storage 契约的 SQL 适配器替换本实现。

mod assignments;
mod classes;
mod enrollments;
mod feedbacks;
mod submissions;
mod users;

use std::collections::{HashMap, HashSet};

use tokio::sync::RwLock;

use crate::models::{
    assignments::entities::Assignment, classes::entities::Class,
    enrollments::entities::Enrollment, feedbacks::entities::Feedback,
    submissions::entities::Submission, users::entities::User,
};

/// 全部实体表、每表自增主键计数器与二级索引
///
/// 计数器从 1 开始、只增不减，ID 永不复用。
pub(crate) struct Tables {
    pub(crate) users: HashMap<i64, User>,
    pub(crate) classes: HashMap<i64, Class>,
    pub(crate) enrollments: HashMap<i64, Enrollment>,
    pub(crate) assignments: HashMap<i64, Assignment>,
    pub(crate) submissions: HashMap<i64, Submission>,
    pub(crate) feedbacks: HashMap<i64, Feedback>,

    pub(crate) next_user_id: i64,
    pub(crate) next_class_id: i64,
    pub(crate) next_enrollment_id: i64,
    pub(crate) next_assignment_id: i64,
    pub(crate) next_submission_id: i64,
    pub(crate) next_feedback_id: i64,

    // 二级索引，与主表在同一写临界区内维护
    pub(crate) classes_by_teacher: HashMap<i64, Vec<i64>>,
    pub(crate) classes_by_student: HashMap<i64, Vec<i64>>,
    pub(crate) students_by_class: HashMap<i64, Vec<i64>>,
    pub(crate) assignments_by_class: HashMap<i64, Vec<i64>>,
    pub(crate) submissions_by_assignment: HashMap<i64, Vec<i64>>,
    pub(crate) submissions_by_student: HashMap<i64, Vec<i64>>,
    pub(crate) enrollment_pairs: HashSet<(i64, i64)>,
    pub(crate) feedback_by_submission: HashMap<i64, i64>,
}

impl Tables {
    fn new() -> Self {
        Self {
            users: HashMap::new(),
            classes: HashMap::new(),
            enrollments: HashMap::new(),
            assignments: HashMap::new(),
            submissions: HashMap::new(),
            feedbacks: HashMap::new(),
            next_user_id: 1,
            next_class_id: 1,
            next_enrollment_id: 1,
            next_assignment_id: 1,
            next_submission_id: 1,
            next_feedback_id: 1,
            classes_by_teacher: HashMap::new(),
            classes_by_student: HashMap::new(),
            students_by_class: HashMap::new(),
            assignments_by_class: HashMap::new(),
            submissions_by_assignment: HashMap::new(),
            submissions_by_student: HashMap::new(),
            enrollment_pairs: HashSet::new(),
            feedback_by_submission: HashMap::new(),
        }
    }
}

/// 内存存储实例
pub struct MemoryStorage {
    pub(crate) inner: RwLock<Tables>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Tables::new()),
        }
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

// Storage trait 实现
use crate::errors::Result;
use crate::models::{
    assignments::requests::NewAssignment,
    classes::requests::CreateClassRequest,
    feedbacks::requests::{NewAiFeedback, ReviewFeedbackRequest},
    users::requests::CreateUserRequest,
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for MemoryStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username_impl(username).await
    }

    // 班级模块
    async fn create_class(&self, teacher_id: i64, class: CreateClassRequest) -> Result<Class> {
        self.create_class_impl(teacher_id, class).await
    }

    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<Class>> {
        self.get_class_by_id_impl(class_id).await
    }

    async fn list_classes_by_teacher(&self, teacher_id: i64) -> Result<Vec<Class>> {
        self.list_classes_by_teacher_impl(teacher_id).await
    }

    async fn list_classes_for_student(&self, student_id: i64) -> Result<Vec<Class>> {
        self.list_classes_for_student_impl(student_id).await
    }

    // 选课模块
    async fn enroll_student(&self, student_id: i64, class_id: i64) -> Result<Enrollment> {
        self.enroll_student_impl(student_id, class_id).await
    }

    async fn list_students_in_class(&self, class_id: i64) -> Result<Vec<User>> {
        self.list_students_in_class_impl(class_id).await
    }

    async fn is_class_owner(&self, teacher_id: i64, class_id: i64) -> Result<bool> {
        self.is_class_owner_impl(teacher_id, class_id).await
    }

    async fn is_enrolled(&self, student_id: i64, class_id: i64) -> Result<bool> {
        self.is_enrolled_impl(student_id, class_id).await
    }

    // 作业模块
    async fn create_assignment(&self, assignment: NewAssignment) -> Result<Assignment> {
        self.create_assignment_impl(assignment).await
    }

    async fn get_assignment_by_id(&self, assignment_id: i64) -> Result<Option<Assignment>> {
        self.get_assignment_by_id_impl(assignment_id).await
    }

    async fn list_assignments_by_class(&self, class_id: i64) -> Result<Vec<Assignment>> {
        self.list_assignments_by_class_impl(class_id).await
    }

    // 提交模块
    async fn create_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
        content: String,
    ) -> Result<Submission> {
        self.create_submission_impl(assignment_id, student_id, content)
            .await
    }

    async fn get_submission_by_id(&self, submission_id: i64) -> Result<Option<Submission>> {
        self.get_submission_by_id_impl(submission_id).await
    }

    async fn list_submissions_by_assignment(&self, assignment_id: i64) -> Result<Vec<Submission>> {
        self.list_submissions_by_assignment_impl(assignment_id)
            .await
    }

    async fn list_submissions_by_student(&self, student_id: i64) -> Result<Vec<Submission>> {
        self.list_submissions_by_student_impl(student_id).await
    }

    // 评语模块
    async fn apply_grade_result(
        &self,
        submission_id: i64,
        result: NewAiFeedback,
    ) -> Result<Feedback> {
        self.apply_grade_result_impl(submission_id, result).await
    }

    async fn create_teacher_feedback(
        &self,
        submission_id: i64,
        review: ReviewFeedbackRequest,
    ) -> Result<Feedback> {
        self.create_teacher_feedback_impl(submission_id, review)
            .await
    }

    async fn update_feedback_review(
        &self,
        feedback_id: i64,
        review: ReviewFeedbackRequest,
    ) -> Result<Option<Feedback>> {
        self.update_feedback_review_impl(feedback_id, review).await
    }

    async fn get_feedback_by_id(&self, feedback_id: i64) -> Result<Option<Feedback>> {
        self.get_feedback_by_id_impl(feedback_id).await
    }

    async fn get_feedback_by_submission(&self, submission_id: i64) -> Result<Option<Feedback>> {
        self.get_feedback_by_submission_impl(submission_id).await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Arc;

    use super::*;
    use crate::errors::GradeFlowError;
    use crate::models::{
        assignments::entities::{AssignmentKind, AssignmentStatus},
        feedbacks::entities::AiComments,
        submissions::entities::SubmissionStatus,
        users::entities::UserRole,
    };

    fn user_req(username: &str, role: UserRole) -> CreateUserRequest {
        CreateUserRequest {
            username: username.to_string(),
            first_name: "Test".to_string(),
            last_name: username.to_string(),
            role,
            department: None,
        }
    }

    fn ai_feedback(score: i32) -> NewAiFeedback {
        NewAiFeedback {
            ai_score: score,
            ai_comments: AiComments {
                strengths: vec!["clear".to_string()],
                improvements: vec!["depth".to_string()],
                comments: "good".to_string(),
            },
            rubric_scores: BTreeMap::from([("content".to_string(), score)]),
        }
    }

    fn review_req(score: i32) -> ReviewFeedbackRequest {
        ReviewFeedbackRequest {
            teacher_score: score,
            teacher_comments: Some("nice".to_string()),
            rubric_scores: None,
        }
    }

    /// 建好一个教师 + 学生 + 班级 + 选课 + 作业的基础现场
    async fn seed(storage: &MemoryStorage) -> (i64, i64, i64, i64) {
        let teacher = storage
            .create_user(user_req("teacher1", UserRole::Teacher))
            .await
            .unwrap();
        let student = storage
            .create_user(user_req("student1", UserRole::Student))
            .await
            .unwrap();
        let class = storage
            .create_class(
                teacher.id,
                CreateClassRequest {
                    name: "Literature 101".to_string(),
                    description: None,
                },
            )
            .await
            .unwrap();
        storage.enroll_student(student.id, class.id).await.unwrap();
        let assignment = storage
            .create_assignment(NewAssignment {
                class_id: class.id,
                title: "Essay 1".to_string(),
                description: "Write an essay".to_string(),
                kind: AssignmentKind::Essay,
                due_date: chrono::Utc::now() + chrono::TimeDelta::days(7),
                status: AssignmentStatus::Open,
                rubric: None,
            })
            .await
            .unwrap();
        (teacher.id, student.id, class.id, assignment.id)
    }

    #[tokio::test]
    async fn test_concurrent_submission_ids_are_unique() {
        let storage = Arc::new(MemoryStorage::new());
        let (_, student_id, _, assignment_id) = seed(&storage).await;

        let mut handles = Vec::new();
        for i in 0..16 {
            let storage = storage.clone();
            handles.push(tokio::spawn(async move {
                storage
                    .create_submission(assignment_id, student_id, format!("essay {i}"))
                    .await
                    .unwrap()
                    .id
            }));
        }

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 16);
    }

    #[tokio::test]
    async fn test_submission_starts_submitted_and_monotonic_ids_start_at_one() {
        let storage = MemoryStorage::new();
        let (_, student_id, _, assignment_id) = seed(&storage).await;

        let submission = storage
            .create_submission(assignment_id, student_id, "my essay".to_string())
            .await
            .unwrap();
        assert_eq!(submission.id, 1);
        assert_eq!(submission.status, SubmissionStatus::Submitted);
    }

    #[tokio::test]
    async fn test_grade_result_is_atomic_and_unique() {
        let storage = MemoryStorage::new();
        let (_, student_id, _, assignment_id) = seed(&storage).await;
        let submission = storage
            .create_submission(assignment_id, student_id, "my essay".to_string())
            .await
            .unwrap();

        // 落库前：无评语、状态 submitted
        assert!(
            storage
                .get_feedback_by_submission(submission.id)
                .await
                .unwrap()
                .is_none()
        );

        let feedback = storage
            .apply_grade_result(submission.id, ai_feedback(85))
            .await
            .unwrap();
        assert_eq!(feedback.ai_score, Some(85));

        let reloaded = storage
            .get_submission_by_id(submission.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(reloaded.status, SubmissionStatus::AiGraded);

        // 同一提交的第二条评语被拒绝
        let err = storage
            .apply_grade_result(submission.id, ai_feedback(70))
            .await
            .unwrap_err();
        assert!(matches!(err, GradeFlowError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_status_never_moves_backward() {
        let storage = MemoryStorage::new();
        let (_, student_id, _, assignment_id) = seed(&storage).await;
        let submission = storage
            .create_submission(assignment_id, student_id, "my essay".to_string())
            .await
            .unwrap();

        // Oracle 未完成时教师先行人工评分
        storage
            .create_teacher_feedback(submission.id, review_req(92))
            .await
            .unwrap();
        let reviewed = storage
            .get_submission_by_id(submission.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(reviewed.status, SubmissionStatus::TeacherReviewed);

        // 迟到的 Oracle 结果不会把状态拉回 ai_graded
        let err = storage
            .apply_grade_result(submission.id, ai_feedback(60))
            .await
            .unwrap_err();
        assert!(matches!(err, GradeFlowError::Conflict(_)));
        let still_reviewed = storage
            .get_submission_by_id(submission.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(still_reviewed.status, SubmissionStatus::TeacherReviewed);
    }

    #[tokio::test]
    async fn test_review_merge_is_idempotent() {
        let storage = MemoryStorage::new();
        let (_, student_id, _, assignment_id) = seed(&storage).await;
        let submission = storage
            .create_submission(assignment_id, student_id, "my essay".to_string())
            .await
            .unwrap();
        let feedback = storage
            .apply_grade_result(submission.id, ai_feedback(85))
            .await
            .unwrap();

        let first = storage
            .update_feedback_review(feedback.id, review_req(90))
            .await
            .unwrap()
            .unwrap();
        let second = storage
            .update_feedback_review(feedback.id, review_req(90))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(first.teacher_score, second.teacher_score);
        assert_eq!(first.teacher_comments, second.teacher_comments);
        assert_eq!(first.ai_score, second.ai_score);
        assert_eq!(first.effective_score(), Some(90));
        // rubric_scores 未在复核中给出时保留自动评分的维度得分
        assert_eq!(second.rubric_scores.get("content"), Some(&85));

        let reloaded = storage
            .get_submission_by_id(submission.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(reloaded.status, SubmissionStatus::TeacherReviewed);
    }

    #[tokio::test]
    async fn test_duplicate_enrollment_is_rejected() {
        let storage = MemoryStorage::new();
        let (_, student_id, class_id, _) = seed(&storage).await;

        let err = storage
            .enroll_student(student_id, class_id)
            .await
            .unwrap_err();
        assert!(matches!(err, GradeFlowError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_enrollment_links_students_only() {
        let storage = MemoryStorage::new();
        let (teacher_id, _, class_id, _) = seed(&storage).await;

        let err = storage
            .enroll_student(teacher_id, class_id)
            .await
            .unwrap_err();
        assert!(matches!(err, GradeFlowError::Validation(_)));
    }

    #[tokio::test]
    async fn test_class_owner_must_be_teacher() {
        let storage = MemoryStorage::new();
        let student = storage
            .create_user(user_req("student9", UserRole::Student))
            .await
            .unwrap();

        let err = storage
            .create_class(
                student.id,
                CreateClassRequest {
                    name: "Bogus".to_string(),
                    description: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, GradeFlowError::Validation(_)));
    }

    #[tokio::test]
    async fn test_missing_entity_is_distinct_from_empty_result() {
        let storage = MemoryStorage::new();
        let (_, _, _, assignment_id) = seed(&storage).await;

        // 实体不存在 → None
        assert!(storage.get_submission_by_id(999).await.unwrap().is_none());
        // 实体存在但没有关联行 → 空列表
        let rows = storage
            .list_submissions_by_assignment(assignment_id)
            .await
            .unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_relationship_predicates() {
        let storage = MemoryStorage::new();
        let (teacher_id, student_id, class_id, _) = seed(&storage).await;

        assert!(storage.is_class_owner(teacher_id, class_id).await.unwrap());
        assert!(!storage.is_class_owner(student_id, class_id).await.unwrap());
        assert!(storage.is_enrolled(student_id, class_id).await.unwrap());
        assert!(!storage.is_enrolled(teacher_id, class_id).await.unwrap());

        let students = storage.list_students_in_class(class_id).await.unwrap();
        assert_eq!(students.len(), 1);
        assert_eq!(students[0].id, student_id);
    }

    #[tokio::test]
    async fn test_duplicate_username_is_rejected() {
        let storage = MemoryStorage::new();
        storage
            .create_user(user_req("dupuser", UserRole::Student))
            .await
            .unwrap();
        let err = storage
            .create_user(user_req("dupuser", UserRole::Teacher))
            .await
            .unwrap_err();
        assert!(matches!(err, GradeFlowError::Conflict(_)));
    }
}
