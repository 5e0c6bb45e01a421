use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::VerificationService;
use crate::models::{
    ApiResponse, ErrorCode,
    verification::{requests::CheckCodeRequest, responses::CheckCodeResponse},
};
use crate::utils::validate::validate_email;

pub async fn check_code(
    service: &VerificationService,
    data: CheckCodeRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_email(&data.email) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::InvalidEmailFormat, msg)));
    }

    let storage = service.get_storage(request);

    let entry = match storage.get_verification_by_email(&data.email).await {
        Ok(Some(entry)) => entry,
        Ok(None) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::CodeExpiredOrInvalid,
                "Verification code is expired or invalid",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to check verification code: {e}"),
                )),
            );
        }
    };

    // 过期、错码、已验证过一律同一应答，不区分失败原因
    if !entry.accepts(&data.code, chrono::Utc::now()) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::CodeExpiredOrInvalid,
            "Verification code is expired or invalid",
        )));
    }

    match storage.mark_email_verified(&data.email).await {
        Ok(_) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            CheckCodeResponse {
                email: data.email.clone(),
                verified: true,
            },
            "邮箱验证成功",
        ))),
        Err(e) => {
            error!("更新验证状态失败: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to mark email verified: {e}"),
                )),
            )
        }
    }
}
