use crate::models::common::PaginationQuery;
use serde::Deserialize;
use ts_rs::TS;

// 资料查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/material.ts")]
pub struct MaterialListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub course: Option<String>,
}

// 资料列表查询参数（用于存储层）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/material.ts")]
pub struct MaterialListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub course: Option<String>,
}
