//! 业务模型定义
//!
//! 按领域分目录，每个领域拆分 entities / requests / responses。

pub mod common;
pub mod materials;
pub mod quizzes;
pub mod students;
pub mod verification;

pub use common::{ApiResponse, ErrorCode, PaginationInfo, PaginationQuery};
