use std::collections::BTreeMap;

use super::entities::{OptionLabel, QuizQuestion};
use crate::models::common::PaginationQuery;
use serde::Deserialize;
use ts_rs::TS;

// 测验创建请求，quiz_id 由调用方指定且全局唯一
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct CreateQuizRequest {
    pub quiz_id: String,
    pub title: String,
    pub course: String,
    pub duration_minutes: i32,
    pub questions: Vec<QuizQuestion>,
}

// 作答提交请求，键为题号
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct SubmitQuizRequest {
    pub student_id: String,
    pub answers: BTreeMap<usize, OptionLabel>,
}

// 测验查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct QuizListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub course: Option<String>,
    pub include_inactive: Option<bool>,
}

// 测验列表查询参数（用于存储层）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct QuizListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub course: Option<String>,
    pub include_inactive: Option<bool>,
}
