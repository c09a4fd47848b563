use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use crate::middlewares;
use crate::models::ApiResponse;
use crate::models::classes::requests::{CreateClassRequest, EnrollStudentRequest};
use crate::models::users::entities::UserRole;
use crate::services::AppServices;

use super::{error_response, require_caller};

// HTTP处理程序
pub async fn list_classes(
    req: HttpRequest,
    services: web::Data<AppServices>,
) -> ActixResult<HttpResponse> {
    let caller = match require_caller(&req) {
        Ok(caller) => caller,
        Err(resp) => return Ok(resp),
    };
    match services.classes.list_classes(&caller).await {
        Ok(classes) => Ok(HttpResponse::Ok().json(ApiResponse::success(classes, "查询成功"))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn create_class(
    req: HttpRequest,
    services: web::Data<AppServices>,
    class_data: web::Json<CreateClassRequest>,
) -> ActixResult<HttpResponse> {
    let caller = match require_caller(&req) {
        Ok(caller) => caller,
        Err(resp) => return Ok(resp),
    };
    match services
        .classes
        .create_class(&caller, class_data.into_inner())
        .await
    {
        Ok(class) => {
            Ok(HttpResponse::Created().json(ApiResponse::success(class, "Class created successfully")))
        }
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn get_class(
    req: HttpRequest,
    services: web::Data<AppServices>,
    class_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    let caller = match require_caller(&req) {
        Ok(caller) => caller,
        Err(resp) => return Ok(resp),
    };
    match services
        .classes
        .get_class(&caller, class_id.into_inner())
        .await
    {
        Ok(class) => Ok(HttpResponse::Ok().json(ApiResponse::success(class, "查询成功"))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn enroll_student(
    req: HttpRequest,
    services: web::Data<AppServices>,
    class_id: web::Path<i64>,
    enroll_data: web::Json<EnrollStudentRequest>,
) -> ActixResult<HttpResponse> {
    let caller = match require_caller(&req) {
        Ok(caller) => caller,
        Err(resp) => return Ok(resp),
    };
    match services
        .classes
        .enroll_student(&caller, class_id.into_inner(), enroll_data.into_inner())
        .await
    {
        Ok(enrollment) => {
            Ok(HttpResponse::Created().json(ApiResponse::success(enrollment, "Student enrolled")))
        }
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn class_students(
    req: HttpRequest,
    services: web::Data<AppServices>,
    class_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    let caller = match require_caller(&req) {
        Ok(caller) => caller,
        Err(resp) => return Ok(resp),
    };
    match services
        .classes
        .class_students(&caller, class_id.into_inner())
        .await
    {
        Ok(students) => Ok(HttpResponse::Ok().json(ApiResponse::success(students, "查询成功"))),
        Err(e) => Ok(error_response(&e)),
    }
}

// 配置路由
pub fn configure_classes_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/classes")
            .wrap(middlewares::RequireIdentity)
            .service(
                // 教师看自己的班级，学生看选修的班级
                web::resource("").route(web::get().to(list_classes)).route(
                    web::post()
                        .to(create_class)
                        // 仅教师可以创建班级
                        .wrap(middlewares::RequireRole::new(&UserRole::Teacher)),
                ),
            )
            .service(web::resource("/{class_id}").route(web::get().to(get_class)))
            .service(
                web::resource("/{class_id}/enroll").route(
                    web::post()
                        .to(enroll_student)
                        // 仅班级拥有者教师可以加学生，归属校验在 AccessPolicy
                        .wrap(middlewares::RequireRole::new(&UserRole::Teacher)),
                ),
            )
            .service(
                web::resource("/{class_id}/students").route(
                    web::get()
                        .to(class_students)
                        .wrap(middlewares::RequireRole::new(&UserRole::Teacher)),
                ),
            ),
    );
}
