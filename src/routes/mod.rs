pub mod assignments;

pub mod classes;

pub mod feedbacks;

pub mod stats;

pub mod submissions;

pub mod users;

pub use assignments::configure_assignments_routes;
pub use classes::configure_classes_routes;
pub use feedbacks::configure_feedbacks_routes;
pub use stats::configure_stats_routes;
pub use submissions::configure_submissions_routes;
pub use users::configure_user_routes;

use actix_web::{HttpRequest, HttpResponse};

use crate::errors::GradeFlowError;
use crate::middlewares::RequireIdentity;
use crate::models::users::entities::Identity;
use crate::models::{ApiResponse, ErrorCode};

/// 提取调用者身份；RequireIdentity 中间件未命中时兜底返回 401
pub(crate) fn require_caller(req: &HttpRequest) -> Result<Identity, HttpResponse> {
    RequireIdentity::extract_identity(req).ok_or_else(|| {
        HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Authentication required",
        ))
    })
}

/// 领域错误到 HTTP 响应的唯一映射点
///
/// 每种错误保留可区分的错误码与详情，绝不坍缩成笼统的 500。
pub(crate) fn error_response(err: &GradeFlowError) -> HttpResponse {
    let code = ErrorCode::from(err);
    let message = err.message().to_string();
    match err {
        GradeFlowError::Validation(_) | GradeFlowError::DateParse(_) => {
            HttpResponse::BadRequest().json(ApiResponse::error_empty(code, message))
        }
        GradeFlowError::Unauthenticated(_) => {
            HttpResponse::Unauthorized().json(ApiResponse::error_empty(code, message))
        }
        GradeFlowError::Forbidden(_) => {
            HttpResponse::Forbidden().json(ApiResponse::error_empty(code, message))
        }
        GradeFlowError::NotFound(_) => {
            HttpResponse::NotFound().json(ApiResponse::error_empty(code, message))
        }
        GradeFlowError::Conflict(_) => {
            HttpResponse::Conflict().json(ApiResponse::error_empty(code, message))
        }
        GradeFlowError::OracleUnavailable(_) | GradeFlowError::OracleResponseParse(_) => {
            HttpResponse::BadGateway().json(ApiResponse::error_empty(code, message))
        }
        GradeFlowError::Storage(_) | GradeFlowError::Serialization(_) => {
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(code, message))
        }
    }
}
