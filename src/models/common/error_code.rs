//! API 错误码定义
//!
//! 数值段按 HTTP 状态码 x100 划分，0 表示成功。

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Success = 0,

    // 400xx 参数与格式错误
    BadRequest = 40000,
    InvalidEmailFormat = 40001,
    InvalidAge = 40002,
    NameRequired = 40003,
    CoursesRequired = 40004,
    InvalidQuizStructure = 40005,
    CodeExpiredOrInvalid = 40010,

    // 401xx 未授权
    Unauthorized = 40100,
    AdminTokenInvalid = 40101,

    // 403xx 禁止访问
    Forbidden = 40300,

    // 404xx 资源不存在
    NotFound = 40400,
    StudentNotFound = 40401,
    QuizNotFound = 40402,
    MaterialNotFound = 40403,
    CourseNotEnrolled = 40404,
    QuizNotAvailable = 40405,

    // 409xx 资源冲突
    Conflict = 40900,
    EmailAlreadyRegistered = 40901,
    CourseAlreadyEnrolled = 40902,
    QuizIdTaken = 40903,

    // 429xx 频率限制
    RateLimitExceeded = 42900,

    // 500xx 服务端错误
    InternalServerError = 50000,
    StudentCreationFailed = 50001,
    AllocationExhausted = 50002,
    MaterialUploadFailed = 50003,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success as i32, 0);
        assert_eq!(ErrorCode::InvalidEmailFormat as i32, 40001);
        assert_eq!(ErrorCode::CodeExpiredOrInvalid as i32, 40010);
        assert_eq!(ErrorCode::StudentNotFound as i32, 40401);
        assert_eq!(ErrorCode::CourseAlreadyEnrolled as i32, 40902);
        assert_eq!(ErrorCode::AllocationExhausted as i32, 50002);
    }
}
