use super::entities::{Quiz, QuizResult};
use crate::models::common::PaginationInfo;
use serde::Serialize;
use ts_rs::TS;

// 测验响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct QuizResponse {
    pub quiz: Quiz,
}

// 测验列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct QuizListResponse {
    pub items: Vec<Quiz>,
    pub pagination: PaginationInfo,
}

// 可作答测验列表，按学生选课求并集，集合有界不分页
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct EligibleQuizzesResponse {
    pub items: Vec<Quiz>,
}

// 作答提交响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct QuizResultResponse {
    pub result: QuizResult,
}

// 学生成绩单条目，读侧拼上测验标题与课程便于展示
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct StudentResultItem {
    pub id: i64,
    pub quiz_id: String,
    pub quiz_title: String,
    pub course: String,
    pub score: i32,
    pub total_questions: i32,
    pub percentage: f64,
    pub completed_at: chrono::DateTime<chrono::Utc>,
}

// 学生成绩单响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct StudentResultsResponse {
    pub items: Vec<StudentResultItem>,
    pub pagination: PaginationInfo,
}
