use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use crate::middlewares;
use crate::models::ApiResponse;
use crate::models::feedbacks::requests::ReviewFeedbackRequest;
use crate::models::users::entities::UserRole;
use crate::services::AppServices;

use super::{error_response, require_caller};

// HTTP处理程序
pub async fn pending_reviews(
    req: HttpRequest,
    services: web::Data<AppServices>,
) -> ActixResult<HttpResponse> {
    let caller = match require_caller(&req) {
        Ok(caller) => caller,
        Err(resp) => return Ok(resp),
    };
    match services.submissions.pending_reviews(&caller).await {
        Ok(rows) => Ok(HttpResponse::Ok().json(ApiResponse::success(rows, "查询成功"))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn get_submission(
    req: HttpRequest,
    services: web::Data<AppServices>,
    submission_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    let caller = match require_caller(&req) {
        Ok(caller) => caller,
        Err(resp) => return Ok(resp),
    };
    match services
        .submissions
        .get_submission(&caller, submission_id.into_inner())
        .await
    {
        Ok(row) => Ok(HttpResponse::Ok().json(ApiResponse::success(row, "查询成功"))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn get_submission_feedback(
    req: HttpRequest,
    services: web::Data<AppServices>,
    submission_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    let caller = match require_caller(&req) {
        Ok(caller) => caller,
        Err(resp) => return Ok(resp),
    };
    match services
        .feedbacks
        .get_for_submission(&caller, submission_id.into_inner())
        .await
    {
        Ok(feedback) => Ok(HttpResponse::Ok().json(ApiResponse::success(feedback, "查询成功"))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn grade_submission_manually(
    req: HttpRequest,
    services: web::Data<AppServices>,
    submission_id: web::Path<i64>,
    review_data: web::Json<ReviewFeedbackRequest>,
) -> ActixResult<HttpResponse> {
    let caller = match require_caller(&req) {
        Ok(caller) => caller,
        Err(resp) => return Ok(resp),
    };
    match services
        .feedbacks
        .grade_manually(&caller, submission_id.into_inner(), review_data.into_inner())
        .await
    {
        Ok(feedback) => {
            Ok(HttpResponse::Created().json(ApiResponse::success(feedback, "Submission graded")))
        }
        Err(e) => Ok(error_response(&e)),
    }
}

// 配置路由
pub fn configure_submissions_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/submissions")
            .wrap(middlewares::RequireIdentity)
            .service(
                // 待复核队列：状态恰为 ai_graded 的提交
                web::resource("/pending").route(
                    web::get()
                        .to(pending_reviews)
                        .wrap(middlewares::RequireRole::new(&UserRole::Teacher)),
                ),
            )
            .service(web::resource("/{submission_id}").route(web::get().to(get_submission)))
            .service(
                web::resource("/{submission_id}/feedback")
                    .route(web::get().to(get_submission_feedback))
                    .route(
                        web::post()
                            .to(grade_submission_manually)
                            // 自动评分未完成时教师直接人工评分
                            .wrap(middlewares::RequireRole::new(&UserRole::Teacher)),
                    ),
            ),
    );
}
