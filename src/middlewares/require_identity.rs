/*!
 * 调用者身份中间件
 *
 * 核心只关心"调用者有一个角色和一个 ID"。会话/令牌的签发与校验
 * 属于部署环境的认证网关（边界适配层），网关验证通过后以
 * `X-User-Id` / `X-User-Role` 头把身份传给本服务。
 *
 * ## 使用方法
 *
 * 1. 在路由上应用中间件：
 * ```rust,ignore
 * web::scope("/api/v1/classes")
 *     .wrap(RequireIdentity)
 *     .route("", web::get().to(list_classes))
 * ```
 *
 * 2. 在处理程序中提取身份：
 * ```rust,ignore
 * if let Some(caller) = RequireIdentity::extract_identity(&req) {
 *     // caller.id / caller.role
 * }
 * ```
 *
 * 头缺失或非法时返回 401（Unauthenticated，区别于 403 Forbidden）。
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpRequest,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use std::str::FromStr;
use tracing::debug;

use crate::models::ErrorCode;
use crate::models::users::entities::{Identity, UserRole};

use super::create_error_response;

const USER_ID_HEADER: &str = "X-User-Id";
const USER_ROLE_HEADER: &str = "X-User-Role";

#[derive(Clone)]
pub struct RequireIdentity;

impl RequireIdentity {
    /// 从请求扩展中提取调用者身份
    pub fn extract_identity(req: &HttpRequest) -> Option<Identity> {
        req.extensions().get::<Identity>().copied()
    }

    /// 从请求扩展中提取调用者角色
    pub fn extract_user_role(req: &HttpRequest) -> Option<UserRole> {
        Self::extract_identity(req).map(|identity| identity.role)
    }

    // 辅助函数：解析身份头
    fn parse_identity(req: &ServiceRequest) -> Result<Identity, String> {
        let id = req
            .headers()
            .get(USER_ID_HEADER)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| format!("Missing {USER_ID_HEADER} header"))?
            .parse::<i64>()
            .map_err(|_| format!("Invalid {USER_ID_HEADER} header"))?;

        let role = req
            .headers()
            .get(USER_ROLE_HEADER)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| format!("Missing {USER_ROLE_HEADER} header"))?;
        let role = UserRole::from_str(role)
            .map_err(|_| format!("Invalid {USER_ROLE_HEADER} header"))?;

        Ok(Identity { id, role })
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireIdentity
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireIdentityMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireIdentityMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireIdentityMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireIdentityMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();

        Box::pin(async move {
            match RequireIdentity::parse_identity(&req) {
                Ok(identity) => {
                    // 身份存入请求扩展，供处理程序与后续中间件读取
                    req.extensions_mut().insert(identity);
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err(reason) => {
                    debug!("Identity check failed: {}", reason);
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            "Authentication required",
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}
