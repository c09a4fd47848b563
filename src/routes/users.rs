use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use crate::middlewares;
use crate::models::ApiResponse;
use crate::models::users::requests::CreateUserRequest;
use crate::services::AppServices;

use super::{error_response, require_caller};

// HTTP处理程序
pub async fn register_user(
    services: web::Data<AppServices>,
    user_data: web::Json<CreateUserRequest>,
) -> ActixResult<HttpResponse> {
    match services.users.create_user(user_data.into_inner()).await {
        Ok(user) => {
            Ok(HttpResponse::Created().json(ApiResponse::success(user, "User registered")))
        }
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn get_user(
    req: HttpRequest,
    services: web::Data<AppServices>,
    user_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    if let Err(resp) = require_caller(&req) {
        return Ok(resp);
    }
    match services.users.get_user(user_id.into_inner()).await {
        Ok(user) => Ok(HttpResponse::Ok().json(ApiResponse::success(user, "查询成功"))),
        Err(e) => Ok(error_response(&e)),
    }
}

// 配置路由
pub fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/users")
            // 注册不要求已有身份，由部署环境的认证网关控制开放程度
            .service(web::resource("").route(web::post().to(register_user)))
            .service(
                web::resource("/{user_id}")
                    .wrap(middlewares::RequireIdentity)
                    .route(web::get().to(get_user)),
            ),
    );
}
