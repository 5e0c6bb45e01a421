use super::entities::{CourseProgress, GradeLabel, StudentStatus};
use crate::models::common::PaginationQuery;
use serde::Deserialize;
use ts_rs::TS;

// 学生注册请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct RegisterStudentRequest {
    pub name: String,
    pub age: i32,
    pub email: String,
    pub phone: Option<String>,
    pub courses: Vec<String>,
}

// 学生资料更新请求，email 与 student_id 不可变更
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct UpdateStudentRequest {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub phone: Option<String>,
    pub status: Option<StudentStatus>,
}

// 加选课程请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct AddCourseRequest {
    pub course: String,
}

// 课程进度更新请求，grade 可选且独立于 progress
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct UpdateProgressRequest {
    pub progress: CourseProgress,
    pub grade: Option<GradeLabel>,
}

// 缴费状态更新请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct UpdateFeeRequest {
    pub paid: bool,
}

// 学生查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub course: Option<String>,
    pub status: Option<StudentStatus>,
    pub fee_paid: Option<bool>,
    pub search: Option<String>,
}

// 学生导出参数
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentExportParams {
    pub course: Option<String>,
    pub status: Option<StudentStatus>,
    pub fee_paid: Option<bool>,
    pub search: Option<String>,
}

// 学生列表查询参数（用于存储层）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub course: Option<String>,
    pub status: Option<StudentStatus>,
    pub fee_paid: Option<bool>,
    pub search: Option<String>,
}
