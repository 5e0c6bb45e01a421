pub mod extractor;
pub mod parameter_error_handler;
pub mod random_code;
pub mod sql;
pub mod student_id;
pub mod validate;

pub use extractor::{SafeCourseName, SafeMaterialIdI64, SafeQuizId, SafeStudentId};
pub use parameter_error_handler::json_error_handler;
pub use parameter_error_handler::query_error_handler;
pub use sql::escape_like_pattern;
