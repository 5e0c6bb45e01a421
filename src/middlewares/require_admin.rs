/*!
 * 管理员鉴权中间件
 *
 * 管理侧的写操作（登记学生、上传资料、发布测验等）要求请求头携带
 * `Authorization: Bearer <ADMIN_TOKEN>`。令牌由部署方通过配置或环境变量
 * 注入，校验逻辑抽象为 AdminAuthenticator，便于替换为真正的身份系统。
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * use actix_web::{web, App};
 * use crate::middlewares::RequireAdmin;
 *
 * App::new()
 *     .service(
 *         web::scope("/api/v1/students")
 *             .wrap(RequireAdmin)
 *             .route("", web::post().to(register_student))
 *     )
 * ```
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    http::header::CONTENT_TYPE,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::info;

use crate::models::{ApiResponse, ErrorCode};

const BEARER_PREFIX: &str = "Bearer ";
const AUTHORIZATION_HEADER: &str = "Authorization";

/// 管理员凭证校验接口
pub trait AdminAuthenticator: Send + Sync {
    // 判断给定令牌是否具有管理员身份
    fn is_admin(&self, token: &str) -> bool;
}

/// 基于共享密钥的默认实现
pub struct SharedSecretAuthenticator {
    secret: String,
}

impl SharedSecretAuthenticator {
    pub fn new(secret: String) -> Self {
        Self { secret }
    }
}

impl AdminAuthenticator for SharedSecretAuthenticator {
    fn is_admin(&self, token: &str) -> bool {
        constant_time_eq(token.as_bytes(), self.secret.as_bytes())
    }
}

// 常数时间比较，长度不同直接返回 false
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

#[derive(Clone)]
pub struct RequireAdmin;

// 辅助函数：创建错误响应
fn create_error_response(status: StatusCode, message: &str) -> HttpResponse {
    match status {
        StatusCode::NO_CONTENT => HttpResponse::build(status)
            .insert_header((CONTENT_TYPE, "text/plain; charset=utf-8"))
            .finish(),
        _ => HttpResponse::build(status)
            .insert_header((CONTENT_TYPE, "application/json; charset=utf-8"))
            .json(ApiResponse::error_empty(
                ErrorCode::AdminTokenInvalid,
                message,
            )),
    }
}

// 辅助函数：提取 Bearer 令牌
fn extract_bearer_token(req: &ServiceRequest) -> Option<&str> {
    req.headers()
        .get(AUTHORIZATION_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix(BEARER_PREFIX))
}

impl<S, B> Transform<S, ServiceRequest> for RequireAdmin
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireAdminMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireAdminMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireAdminMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireAdminMiddleware<S>
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
            // 处理 OPTIONS 请求
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(req.into_response(
                    create_error_response(StatusCode::NO_CONTENT, "").map_into_right_body(),
                ));
            }

            let authenticator = req
                .app_data::<actix_web::web::Data<Arc<dyn AdminAuthenticator>>>()
                .expect("AdminAuthenticator not found in app data")
                .get_ref()
                .clone();

            let authorized = extract_bearer_token(&req)
                .map(|token| authenticator.is_admin(token))
                .unwrap_or(false);

            if authorized {
                let res = srv.call(req).await?.map_into_left_body();
                Ok(res)
            } else {
                info!("Admin authentication failed for request to {}", req.path());
                Ok(req.into_response(
                    create_error_response(
                        StatusCode::UNAUTHORIZED,
                        "Unauthorized: missing or invalid admin token",
                    )
                    .map_into_right_body(),
                ))
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_secret_match() {
        let auth = SharedSecretAuthenticator::new("s3cret-token".to_string());
        assert!(auth.is_admin("s3cret-token"));
        assert!(!auth.is_admin("s3cret-tokeN"));
        assert!(!auth.is_admin(""));
        assert!(!auth.is_admin("s3cret-token-extra"));
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"abc", b"abc"));
        assert!(!constant_time_eq(b"abc", b"abd"));
        assert!(!constant_time_eq(b"abc", b"ab"));
        assert!(constant_time_eq(b"", b""));
    }
}
