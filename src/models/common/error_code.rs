use crate::errors::GradeFlowError;

/// 业务错误码，随 ApiResponse 返回给客户端
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 请求类错误
    Validation = 1001,
    Unauthorized = 1002,
    Forbidden = 1003,
    NotFound = 1004,
    Conflict = 1005,

    // 评分 Oracle 错误（提交本身不受影响）
    OracleUnavailable = 2001,

    InternalServerError = 5000,
}

impl From<&GradeFlowError> for ErrorCode {
    fn from(err: &GradeFlowError) -> Self {
        match err {
            GradeFlowError::Validation(_) | GradeFlowError::DateParse(_) => ErrorCode::Validation,
            GradeFlowError::Unauthenticated(_) => ErrorCode::Unauthorized,
            GradeFlowError::Forbidden(_) => ErrorCode::Forbidden,
            GradeFlowError::NotFound(_) => ErrorCode::NotFound,
            GradeFlowError::Conflict(_) => ErrorCode::Conflict,
            GradeFlowError::OracleUnavailable(_) | GradeFlowError::OracleResponseParse(_) => {
                ErrorCode::OracleUnavailable
            }
            GradeFlowError::Storage(_) | GradeFlowError::Serialization(_) => {
                ErrorCode::InternalServerError
            }
        }
    }
}
