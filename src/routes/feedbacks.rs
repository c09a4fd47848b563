use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use crate::middlewares;
use crate::models::ApiResponse;
use crate::models::feedbacks::requests::ReviewFeedbackRequest;
use crate::models::users::entities::UserRole;
use crate::services::AppServices;

use super::{error_response, require_caller};

// HTTP处理程序
pub async fn review_feedback(
    req: HttpRequest,
    services: web::Data<AppServices>,
    feedback_id: web::Path<i64>,
    review_data: web::Json<ReviewFeedbackRequest>,
) -> ActixResult<HttpResponse> {
    let caller = match require_caller(&req) {
        Ok(caller) => caller,
        Err(resp) => return Ok(resp),
    };
    match services
        .feedbacks
        .review(&caller, feedback_id.into_inner(), review_data.into_inner())
        .await
    {
        Ok(feedback) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(feedback, "Feedback reviewed")))
        }
        Err(e) => Ok(error_response(&e)),
    }
}

// 配置路由
pub fn configure_feedbacks_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/feedbacks")
            .wrap(middlewares::RequireIdentity)
            .service(
                web::resource("/{feedback_id}").route(
                    web::put()
                        .to(review_feedback)
                        // 教师复核，归属校验在 AccessPolicy
                        .wrap(middlewares::RequireRole::new(&UserRole::Teacher)),
                ),
            ),
    );
}
