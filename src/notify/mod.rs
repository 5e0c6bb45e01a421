//! 验证码投递通道
//!
//! 核心只负责生成和存储验证码，真正的投递方式由外部注入。

use std::sync::Arc;

use tracing::info;

use crate::errors::Result;

#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    // 把验证码投递给邮箱持有者
    async fn deliver(&self, email: &str, code: &str) -> Result<()>;
}

/// 把验证码写入日志的投递实现，适用于开发环境和自部署场景
pub struct LogNotifier;

#[async_trait::async_trait]
impl Notifier for LogNotifier {
    async fn deliver(&self, email: &str, code: &str) -> Result<()> {
        info!("Verification code for {email}: {code}");
        Ok(())
    }
}

pub fn create_notifier() -> Arc<dyn Notifier> {
    Arc::new(LogNotifier)
}
