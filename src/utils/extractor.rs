//! 路径参数安全提取器
//!
//! 在进入 handler 之前完成格式校验，非法参数直接返回统一的 400 响应。

use std::future::{Ready, ready};

use actix_web::{
    Error, FromRequest, HttpRequest, HttpResponse, dev::Payload, error::InternalError,
};

use crate::models::{ApiResponse, ErrorCode};
use crate::utils::student_id::is_valid_student_id;
use crate::utils::validate::{validate_course_name, validate_quiz_id};

fn path_param_error(message: &str) -> Error {
    let response =
        HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, message));
    InternalError::from_response(message.to_string(), response).into()
}

/// 路径参数 `{student_id}`，格式必须为 CL + 6 位数字
pub struct SafeStudentId(pub String);

impl FromRequest for SafeStudentId {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let raw = req.match_info().get("student_id").unwrap_or_default();
        ready(if is_valid_student_id(raw) {
            Ok(SafeStudentId(raw.to_string()))
        } else {
            Err(path_param_error("Invalid student ID format"))
        })
    }
}

/// 路径参数 `{quiz_id}`，只允许字母、数字、下划线和连字符
pub struct SafeQuizId(pub String);

impl FromRequest for SafeQuizId {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let raw = req.match_info().get("quiz_id").unwrap_or_default();
        ready(match validate_quiz_id(raw) {
            Ok(()) => Ok(SafeQuizId(raw.to_string())),
            Err(msg) => Err(path_param_error(msg)),
        })
    }
}

/// 路径参数 `{course}`，经 URL 解码后的课程名
pub struct SafeCourseName(pub String);

impl FromRequest for SafeCourseName {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let raw = req.match_info().get("course").unwrap_or_default();
        ready(match validate_course_name(raw) {
            Ok(()) => Ok(SafeCourseName(raw.to_string())),
            Err(msg) => Err(path_param_error(msg)),
        })
    }
}

/// 路径参数 `{id}`，必须为正整数的资料 ID
pub struct SafeMaterialIdI64(pub i64);

impl FromRequest for SafeMaterialIdI64 {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let raw = req.match_info().get("id").unwrap_or_default();
        ready(match raw.parse::<i64>() {
            Ok(id) if id > 0 => Ok(SafeMaterialIdI64(id)),
            _ => Err(path_param_error("Invalid material ID")),
        })
    }
}
