use tracing::info;

use super::ClassService;
use crate::errors::Result;
use crate::models::classes::requests::EnrollStudentRequest;
use crate::models::enrollments::entities::Enrollment;
use crate::models::users::entities::Identity;

pub(super) async fn enroll_student(
    service: &ClassService,
    caller: &Identity,
    class_id: i64,
    data: EnrollStudentRequest,
) -> Result<Enrollment> {
    // 只有班级拥有者教师可以加人；重复选课由存储层拒绝
    service
        .policy
        .ensure_can_manage_class(caller, class_id)
        .await?;

    let enrollment = service
        .storage
        .enroll_student(data.student_id, class_id)
        .await?;
    info!(
        "Student {} enrolled in class {} by teacher {}",
        data.student_id, class_id, caller.id
    );
    Ok(enrollment)
}
