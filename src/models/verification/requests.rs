use serde::Deserialize;
use ts_rs::TS;

// 发码请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/verification.ts")]
pub struct IssueCodeRequest {
    pub email: String,
}

// 验码请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/verification.ts")]
pub struct CheckCodeRequest {
    pub email: String,
    pub code: String,
}
