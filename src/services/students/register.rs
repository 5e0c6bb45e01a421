use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashSet;
use tracing::error;

use super::StudentService;
use crate::models::{
    ApiResponse, ErrorCode,
    students::{requests::RegisterStudentRequest, responses::StudentResponse},
};
use crate::utils::student_id::allocate_student_id;
use crate::utils::validate::{
    validate_age, validate_course_name, validate_email, validate_student_name,
};

pub async fn register_student(
    service: &StudentService,
    mut student_data: RegisterStudentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    // 验证姓名
    if let Err(msg) = validate_student_name(&student_data.name) {
        return Ok(
            HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::NameRequired, msg))
        );
    }

    // 验证年龄
    if let Err(msg) = validate_age(student_data.age) {
        return Ok(
            HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::InvalidAge, msg))
        );
    }

    // 验证邮箱
    if let Err(msg) = validate_email(&student_data.email) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::InvalidEmailFormat, msg)));
    }

    // 至少选一门课
    if student_data.courses.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::CoursesRequired,
            "At least one course is required",
        )));
    }

    for course in &student_data.courses {
        if let Err(msg) = validate_course_name(course) {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::BadRequest, msg)));
        }
    }

    // 重复课程静默去重，保留首次出现的顺序
    let mut seen = HashSet::new();
    student_data.courses.retain(|course| seen.insert(course.clone()));

    let storage = service.get_storage(request);

    // 邮箱占用先行检查，给出明确的冲突应答
    match storage.get_student_by_email(&student_data.email).await {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::EmailAlreadyRegistered,
                "Email already registered",
            )));
        }
        Ok(None) => {}
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to check email: {e}"),
                )),
            );
        }
    }

    let student_id = match allocate_student_id(&storage).await {
        Ok(id) => id,
        Err(e) => {
            error!("学号分配失败: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::AllocationExhausted,
                    format!("Student id allocation failed: {e}"),
                )),
            );
        }
    };

    // 注册前已完成邮箱验证的直接带入已验证状态
    let email_verified = match storage.get_verification_by_email(&student_data.email).await {
        Ok(entry) => entry.map(|e| e.verified).unwrap_or(false),
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to check verification state: {e}"),
                )),
            );
        }
    };

    match storage
        .create_student(student_data, student_id, email_verified)
        .await
    {
        Ok(student) => Ok(HttpResponse::Created()
            .json(ApiResponse::success(StudentResponse { student }, "学生注册成功"))),
        Err(e) => {
            let msg = format!("Student registration failed: {e}");
            error!("{}", msg);
            // 判断是否唯一约束冲突
            if msg.contains("UNIQUE constraint failed") {
                Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                    ErrorCode::EmailAlreadyRegistered,
                    "Email already registered",
                )))
            } else {
                Ok(HttpResponse::InternalServerError()
                    .json(ApiResponse::error_empty(ErrorCode::StudentCreationFailed, msg)))
            }
        }
    }
}
