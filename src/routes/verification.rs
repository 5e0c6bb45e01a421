use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::verification::requests::{CheckCodeRequest, IssueCodeRequest};
use crate::services::VerificationService;

// 懒加载的全局 VerificationService 实例
static VERIFICATION_SERVICE: Lazy<VerificationService> = Lazy::new(VerificationService::new_lazy);

pub async fn issue_code(
    req: HttpRequest,
    data: web::Json<IssueCodeRequest>,
) -> ActixResult<HttpResponse> {
    VERIFICATION_SERVICE.issue_code(data.into_inner(), &req).await
}

pub async fn check_code(
    req: HttpRequest,
    data: web::Json<CheckCodeRequest>,
) -> ActixResult<HttpResponse> {
    VERIFICATION_SERVICE.check_code(data.into_inner(), &req).await
}

// 配置路由
pub fn configure_verification_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/verification")
            .service(
                web::resource("/codes")
                    // 发送验证码 - 按 IP 限速，防止邮箱轰炸
                    .route(
                        web::post()
                            .to(issue_code)
                            .wrap(middlewares::RateLimit::issue_code()),
                    ),
            )
            .service(
                web::resource("/check")
                    // 校验验证码 - 按 IP 限速，防止暴力枚举
                    .route(
                        web::post()
                            .to(check_code)
                            .wrap(middlewares::RateLimit::check_code()),
                    ),
            ),
    );
}
