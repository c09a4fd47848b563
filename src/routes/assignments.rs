use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use crate::middlewares;
use crate::models::ApiResponse;
use crate::models::assignments::requests::{CreateAssignmentRequest, RecentAssignmentsQuery};
use crate::models::submissions::requests::SubmitRequest;
use crate::models::users::entities::UserRole;
use crate::services::AppServices;

use super::{error_response, require_caller};

const DEFAULT_RECENT_LIMIT: usize = 5;

// HTTP处理程序
pub async fn list_assignments(
    req: HttpRequest,
    services: web::Data<AppServices>,
) -> ActixResult<HttpResponse> {
    let caller = match require_caller(&req) {
        Ok(caller) => caller,
        Err(resp) => return Ok(resp),
    };
    match services.assignments.list_assignments(&caller).await {
        Ok(assignments) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(assignments, "查询成功")))
        }
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn create_assignment(
    req: HttpRequest,
    services: web::Data<AppServices>,
    assignment_data: web::Json<CreateAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    let caller = match require_caller(&req) {
        Ok(caller) => caller,
        Err(resp) => return Ok(resp),
    };
    match services
        .assignments
        .create_assignment(&caller, assignment_data.into_inner())
        .await
    {
        Ok(assignment) => Ok(HttpResponse::Created()
            .json(ApiResponse::success(assignment, "Assignment created successfully"))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn recent_assignments(
    req: HttpRequest,
    services: web::Data<AppServices>,
    query: web::Query<RecentAssignmentsQuery>,
) -> ActixResult<HttpResponse> {
    let caller = match require_caller(&req) {
        Ok(caller) => caller,
        Err(resp) => return Ok(resp),
    };
    let limit = query.limit.unwrap_or(DEFAULT_RECENT_LIMIT);
    match services.assignments.recent_assignments(&caller, limit).await {
        Ok(rows) => Ok(HttpResponse::Ok().json(ApiResponse::success(rows, "查询成功"))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn get_assignment(
    req: HttpRequest,
    services: web::Data<AppServices>,
    assignment_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    let caller = match require_caller(&req) {
        Ok(caller) => caller,
        Err(resp) => return Ok(resp),
    };
    match services
        .assignments
        .get_assignment(&caller, assignment_id.into_inner())
        .await
    {
        Ok(assignment) => Ok(HttpResponse::Ok().json(ApiResponse::success(assignment, "查询成功"))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn list_submissions(
    req: HttpRequest,
    services: web::Data<AppServices>,
    assignment_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    let caller = match require_caller(&req) {
        Ok(caller) => caller,
        Err(resp) => return Ok(resp),
    };
    match services
        .submissions
        .list_for_assignment(&caller, assignment_id.into_inner())
        .await
    {
        Ok(rows) => Ok(HttpResponse::Ok().json(ApiResponse::success(rows, "查询成功"))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn submit_assignment(
    req: HttpRequest,
    services: web::Data<AppServices>,
    assignment_id: web::Path<i64>,
    submit_data: web::Json<SubmitRequest>,
) -> ActixResult<HttpResponse> {
    let caller = match require_caller(&req) {
        Ok(caller) => caller,
        Err(resp) => return Ok(resp),
    };
    match services
        .submissions
        .submit(&caller, assignment_id.into_inner(), submit_data.into_inner())
        .await
    {
        // 评分挂起也是成功的提交（部分成功语义）
        Ok(outcome) => {
            let message = if outcome.grading_pending {
                "Submission saved, automated grading pending"
            } else {
                "Submission saved and graded"
            };
            Ok(HttpResponse::Created().json(ApiResponse::success(outcome, message)))
        }
        Err(e) => Ok(error_response(&e)),
    }
}

// 配置路由
pub fn configure_assignments_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/assignments")
            .wrap(middlewares::RequireIdentity)
            .service(
                web::resource("").route(web::get().to(list_assignments)).route(
                    web::post()
                        .to(create_assignment)
                        // 仅教师可以布置作业
                        .wrap(middlewares::RequireRole::new(&UserRole::Teacher)),
                ),
            )
            .service(
                web::resource("/recent").route(
                    web::get()
                        .to(recent_assignments)
                        // 教师工作台概览
                        .wrap(middlewares::RequireRole::new(&UserRole::Teacher)),
                ),
            )
            .service(web::resource("/{assignment_id}").route(web::get().to(get_assignment)))
            .service(
                web::resource("/{assignment_id}/submissions")
                    .route(web::get().to(list_submissions))
                    .route(
                        web::post()
                            .to(submit_assignment)
                            // 仅学生可以提交作业
                            .wrap(middlewares::RequireRole::new(&UserRole::Student)),
                    ),
            ),
    );
}
