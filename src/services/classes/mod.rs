pub mod create;
pub mod enroll;
pub mod get;
pub mod list;
pub mod students;

use std::sync::Arc;

use crate::errors::Result;
use crate::models::classes::{
    entities::Class,
    requests::{CreateClassRequest, EnrollStudentRequest},
};
use crate::models::enrollments::entities::Enrollment;
use crate::models::users::entities::{Identity, User};
use crate::policy::AccessPolicy;
use crate::storage::Storage;

pub struct ClassService {
    pub(crate) storage: Arc<dyn Storage>,
    pub(crate) policy: AccessPolicy,
}

impl ClassService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            policy: AccessPolicy::new(storage.clone()),
            storage,
        }
    }

    // 创建班级
    pub async fn create_class(&self, caller: &Identity, data: CreateClassRequest) -> Result<Class> {
        create::create_class(self, caller, data).await
    }

    // 按调用者身份列出可见班级
    pub async fn list_classes(&self, caller: &Identity) -> Result<Vec<Class>> {
        list::list_classes(self, caller).await
    }

    // 根据班级 ID 获取班级信息
    pub async fn get_class(&self, caller: &Identity, class_id: i64) -> Result<Class> {
        get::get_class(self, caller, class_id).await
    }

    // 教师将学生加入班级
    pub async fn enroll_student(
        &self,
        caller: &Identity,
        class_id: i64,
        data: EnrollStudentRequest,
    ) -> Result<Enrollment> {
        enroll::enroll_student(self, caller, class_id, data).await
    }

    // 班级在读学生名单
    pub async fn class_students(&self, caller: &Identity, class_id: i64) -> Result<Vec<User>> {
        students::class_students(self, caller, class_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::GradeFlowError;
    use crate::services::testing::harness;

    #[tokio::test]
    async fn test_student_cannot_create_class() {
        let h = harness().await;
        let service = ClassService::new(h.storage.clone());

        let err = service
            .create_class(
                &h.student,
                CreateClassRequest {
                    name: "Student Class".to_string(),
                    description: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, GradeFlowError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_enroll_requires_class_owner() {
        let h = harness().await;
        let service = ClassService::new(h.storage.clone());

        // 非拥有者教师被拒绝
        let err = service
            .enroll_student(
                &h.other_teacher,
                h.class_id,
                EnrollStudentRequest {
                    student_id: h.outsider.id,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, GradeFlowError::Forbidden(_)));

        // 拥有者可以加人
        service
            .enroll_student(
                &h.teacher,
                h.class_id,
                EnrollStudentRequest {
                    student_id: h.outsider.id,
                },
            )
            .await
            .unwrap();

        // 重复选课是冲突
        let err = service
            .enroll_student(
                &h.teacher,
                h.class_id,
                EnrollStudentRequest {
                    student_id: h.outsider.id,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, GradeFlowError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_list_classes_by_identity() {
        let h = harness().await;
        let service = ClassService::new(h.storage.clone());

        let teacher_view = service.list_classes(&h.teacher).await.unwrap();
        assert_eq!(teacher_view.len(), 1);
        assert_eq!(teacher_view[0].id, h.class_id);

        let student_view = service.list_classes(&h.student).await.unwrap();
        assert_eq!(student_view.len(), 1);

        // 未选课学生与其他教师各自看到空列表
        assert!(service.list_classes(&h.outsider).await.unwrap().is_empty());
        assert!(
            service
                .list_classes(&h.other_teacher)
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_roster_visible_to_owner_only() {
        let h = harness().await;
        let service = ClassService::new(h.storage.clone());

        let roster = service.class_students(&h.teacher, h.class_id).await.unwrap();
        assert_eq!(roster.len(), 2);

        let err = service
            .class_students(&h.other_teacher, h.class_id)
            .await
            .unwrap_err();
        assert!(matches!(err, GradeFlowError::Forbidden(_)));

        let err = service
            .get_class(&h.outsider, h.class_id)
            .await
            .unwrap_err();
        assert!(matches!(err, GradeFlowError::Forbidden(_)));
    }
}
