use super::ClassService;
use crate::errors::Result;
use crate::models::classes::entities::Class;
use crate::models::users::entities::Identity;

/// 教师看自己拥有的班级，学生看自己选修的班级。
/// 行级隔离由查询方式本身保证，不做事后过滤。
pub(super) async fn list_classes(service: &ClassService, caller: &Identity) -> Result<Vec<Class>> {
    if caller.is_teacher() {
        service.storage.list_classes_by_teacher(caller.id).await
    } else {
        service.storage.list_classes_for_student(caller.id).await
    }
}
