use serde::Deserialize;

/// 创建班级请求，班级归属于发起请求的教师
#[derive(Debug, Clone, Deserialize)]
pub struct CreateClassRequest {
    pub name: String,
    pub description: Option<String>,
}

/// 教师将学生加入班级
#[derive(Debug, Clone, Deserialize)]
pub struct EnrollStudentRequest {
    pub student_id: i64,
}
