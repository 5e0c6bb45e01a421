use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::VerificationService;
use crate::models::{
    ApiResponse, ErrorCode,
    verification::{
        entities::VerificationEntry, requests::IssueCodeRequest, responses::IssueCodeResponse,
    },
};
use crate::utils::random_code::generate_numeric_code;
use crate::utils::validate::validate_email;

pub async fn issue_code(
    service: &VerificationService,
    data: IssueCodeRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    // 验证邮箱格式
    if let Err(msg) = validate_email(&data.email) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::InvalidEmailFormat, msg)));
    }

    let storage = service.get_storage(request);
    let notifier = service.get_notifier(request);

    let code = generate_numeric_code(6);

    // 重发即覆盖，旧码窗口立即作废
    let entry = match storage.upsert_verification(&data.email, &code).await {
        Ok(entry) => entry,
        Err(e) => {
            error!("写入验证码失败: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to issue verification code: {e}"),
                )),
            );
        }
    };

    // 码面只交给通知通道，响应不回显
    if let Err(e) = notifier.deliver(&data.email, &code).await {
        error!("验证码投递失败: {}", e);
        return Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to deliver verification code: {e}"),
            )),
        );
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        IssueCodeResponse {
            email: entry.email,
            issued_at: entry.issued_at,
            expires_in_secs: VerificationEntry::VALIDITY_SECS,
        },
        "验证码已发送",
    )))
}
