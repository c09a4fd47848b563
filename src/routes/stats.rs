use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use crate::middlewares;
use crate::models::ApiResponse;
use crate::models::users::entities::UserRole;
use crate::services::AppServices;

use super::{error_response, require_caller};

// HTTP处理程序
pub async fn student_stats(
    req: HttpRequest,
    services: web::Data<AppServices>,
) -> ActixResult<HttpResponse> {
    let caller = match require_caller(&req) {
        Ok(caller) => caller,
        Err(resp) => return Ok(resp),
    };
    match services.stats.student_stats(&caller).await {
        Ok(stats) => Ok(HttpResponse::Ok().json(ApiResponse::success(stats, "查询成功"))),
        Err(e) => Ok(error_response(&e)),
    }
}

// 配置路由
pub fn configure_stats_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/stats")
            .wrap(middlewares::RequireIdentity)
            .service(
                web::resource("/student").route(
                    web::get()
                        .to(student_stats)
                        .wrap(middlewares::RequireRole::new(&UserRole::Student)),
                ),
            ),
    );
}
