use std::sync::Arc;

use crate::models::{
    assignments::{entities::Assignment, requests::NewAssignment},
    classes::{entities::Class, requests::CreateClassRequest},
    enrollments::entities::Enrollment,
    feedbacks::{
        entities::Feedback,
        requests::{NewAiFeedback, ReviewFeedbackRequest},
    },
    submissions::entities::Submission,
    users::{entities::User, requests::CreateUserRequest},
};

use crate::errors::Result;

pub mod memory;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户（角色创建后不可变）
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名获取用户信息
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;

    /// 班级管理方法
    // 创建班级，归属指定教师
    async fn create_class(&self, teacher_id: i64, class: CreateClassRequest) -> Result<Class>;
    // 通过ID获取班级信息
    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<Class>>;
    // 某教师拥有的全部班级
    async fn list_classes_by_teacher(&self, teacher_id: i64) -> Result<Vec<Class>>;
    // 某学生选修的全部班级
    async fn list_classes_for_student(&self, student_id: i64) -> Result<Vec<Class>>;

    /// 选课关系方法
    // 学生加入班级，(student_id, class_id) 重复时报冲突
    async fn enroll_student(&self, student_id: i64, class_id: i64) -> Result<Enrollment>;
    // 班级在读学生名单
    async fn list_students_in_class(&self, class_id: i64) -> Result<Vec<User>>;
    // 权限判定用谓词
    async fn is_class_owner(&self, teacher_id: i64, class_id: i64) -> Result<bool>;
    async fn is_enrolled(&self, student_id: i64, class_id: i64) -> Result<bool>;

    /// 作业管理方法
    async fn create_assignment(&self, assignment: NewAssignment) -> Result<Assignment>;
    async fn get_assignment_by_id(&self, assignment_id: i64) -> Result<Option<Assignment>>;
    async fn list_assignments_by_class(&self, class_id: i64) -> Result<Vec<Assignment>>;

    /// 提交管理方法
    // 创建提交，初始状态恒为 submitted
    async fn create_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
        content: String,
    ) -> Result<Submission>;
    async fn get_submission_by_id(&self, submission_id: i64) -> Result<Option<Submission>>;
    async fn list_submissions_by_assignment(&self, assignment_id: i64) -> Result<Vec<Submission>>;
    async fn list_submissions_by_student(&self, student_id: i64) -> Result<Vec<Submission>>;

    /// 评语管理方法
    // 自动评分结果落库：写入 Feedback 并推进状态到 ai_graded，二者同一原子单元
    async fn apply_grade_result(
        &self,
        submission_id: i64,
        result: NewAiFeedback,
    ) -> Result<Feedback>;
    // 教师对无评语的提交直接人工评分：写入 Feedback 并推进状态到 teacher_reviewed
    async fn create_teacher_feedback(
        &self,
        submission_id: i64,
        review: ReviewFeedbackRequest,
    ) -> Result<Feedback>;
    // 教师复核：浅合并教师字段、刷新 updated_at 并推进提交状态到 teacher_reviewed
    async fn update_feedback_review(
        &self,
        feedback_id: i64,
        review: ReviewFeedbackRequest,
    ) -> Result<Option<Feedback>>;
    async fn get_feedback_by_id(&self, feedback_id: i64) -> Result<Option<Feedback>>;
    async fn get_feedback_by_submission(&self, submission_id: i64) -> Result<Option<Feedback>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = memory::MemoryStorage::new();
    Ok(Arc::new(storage))
}
