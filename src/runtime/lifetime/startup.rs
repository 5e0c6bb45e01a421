use crate::config::AppConfig;
use crate::middlewares::{AdminAuthenticator, SharedSecretAuthenticator};
use crate::notify::{Notifier, create_notifier};
use crate::storage::Storage;
use std::sync::Arc;
use tracing::warn;

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub notifier: Arc<dyn Notifier>,
    pub authenticator: Arc<dyn AdminAuthenticator>,
}

/// 生成随机令牌
fn generate_random_token(length: usize) -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::rng();
    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// 解析管理员令牌
/// 优先使用配置值（可由 ADMIN_TOKEN 环境变量覆盖），否则生成随机令牌
fn resolve_admin_token() -> String {
    let config = AppConfig::get();
    if let Some(ref token) = config.admin.token
        && !token.trim().is_empty()
    {
        return token.clone();
    }

    let token = generate_random_token(32);
    warn!("==========================================================");
    warn!("  ADMIN TOKEN NOT SET - USING GENERATED TOKEN");
    warn!("  Generated admin token: {}", token);
    warn!("  Please save this token or set ADMIN_TOKEN env var");
    warn!("==========================================================");
    token
}

/// 准备服务器启动的上下文
/// 包括存储、验证码投递通道和管理员鉴权
pub async fn prepare_server_startup() -> StartupContext {
    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized and migrations completed");

    let notifier = create_notifier();

    let authenticator: Arc<dyn AdminAuthenticator> =
        Arc::new(SharedSecretAuthenticator::new(resolve_admin_token()));
    warn!("Admin authenticator initialized");

    StartupContext {
        storage,
        notifier,
        authenticator,
    }
}
