use serde::Deserialize;

/// 学生提交作业请求
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitRequest {
    pub content: String,
}
