pub mod require_identity;
pub mod require_role;

pub use require_identity::RequireIdentity;
pub use require_role::RequireRole;

use actix_web::{HttpResponse, http::StatusCode};

use crate::models::{ApiResponse, ErrorCode};

// 辅助函数：创建中间件层的错误响应
pub(crate) fn create_error_response(
    status: StatusCode,
    code: ErrorCode,
    message: &str,
) -> HttpResponse {
    HttpResponse::build(status).json(ApiResponse::<()>::error_empty(code, message))
}
