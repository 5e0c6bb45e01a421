use serde::Serialize;
use ts_rs::TS;

// 发码响应，码面只走通知通道不回显
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/verification.ts")]
pub struct IssueCodeResponse {
    pub email: String,
    pub issued_at: chrono::DateTime<chrono::Utc>,
    pub expires_in_secs: i64,
}

// 验码响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/verification.ts")]
pub struct CheckCodeResponse {
    pub email: String,
    pub verified: bool,
}
