use super::entities::MaterialInfo;
use crate::models::common::PaginationInfo;
use serde::Serialize;
use ts_rs::TS;

// 资料发布响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/material.ts")]
pub struct MaterialUploadResponse {
    pub material: MaterialInfo,
}

// 资料列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/material.ts")]
pub struct MaterialListResponse {
    pub items: Vec<MaterialInfo>,
    pub pagination: PaginationInfo,
}
