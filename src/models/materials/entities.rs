use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 课程资料元数据，列表与发布响应用
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/material.ts")]
pub struct MaterialInfo {
    pub id: i64,
    pub course: String,
    pub title: String,
    pub description: Option<String>,
    pub file_name: String,
    pub content_type: String,
    pub file_size: i64,
    pub uploaded_at: chrono::DateTime<chrono::Utc>,
}

// 课程资料全量，含原始字节，仅下载通道内部流转
#[derive(Debug, Clone)]
pub struct CourseMaterial {
    pub id: i64,
    pub course: String,
    pub title: String,
    pub description: Option<String>,
    pub file_name: String,
    pub content_type: String,
    pub file_size: i64,
    pub content: Vec<u8>,
    pub uploaded_at: chrono::DateTime<chrono::Utc>,
}
