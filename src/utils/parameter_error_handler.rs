//! 请求参数反序列化错误处理器
//!
//! 把 Actix 默认的纯文本 400 替换为统一的 ApiResponse 结构。

use actix_web::error::{InternalError, JsonPayloadError, QueryPayloadError};
use actix_web::{Error, HttpRequest, HttpResponse};

use crate::models::{ApiResponse, ErrorCode};

pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> Error {
    let detail = err.to_string();
    let response = HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::Validation,
        format!("请求体解析失败: {detail}"),
    ));
    InternalError::from_response(err, response).into()
}

pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> Error {
    let detail = err.to_string();
    let response = HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::Validation,
        format!("查询参数解析失败: {detail}"),
    ));
    InternalError::from_response(err, response).into()
}
