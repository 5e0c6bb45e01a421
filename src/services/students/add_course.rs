use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::StudentService;
use crate::models::{
    ApiResponse, ErrorCode,
    students::{requests::AddCourseRequest, responses::StudentResponse},
};
use crate::utils::validate::validate_course_name;

pub async fn add_course(
    service: &StudentService,
    student_id: String,
    course_data: AddCourseRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_course_name(&course_data.course) {
        return Ok(
            HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, msg))
        );
    }

    let course = course_data.course.trim().to_string();
    let storage = service.get_storage(request);

    // 先取学生，区分「学生不存在」与「课程已加选」
    let student = match storage.get_student_by_student_id(&student_id).await {
        Ok(Some(student)) => student,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::StudentNotFound,
                "Student not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get student: {e}"),
                )),
            );
        }
    };

    if student.is_enrolled(&course) {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::CourseAlreadyEnrolled,
            "Course already enrolled",
        )));
    }

    match storage.add_course(&student_id, &course).await {
        Ok(Some(student)) => Ok(HttpResponse::Created()
            .json(ApiResponse::success(StudentResponse { student }, "课程已加选"))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::StudentNotFound,
            "Student not found",
        ))),
        Err(e) => {
            let msg = format!("Course enrollment failed: {e}");
            error!("{}", msg);
            // 并发加选撞上唯一约束
            if msg.contains("UNIQUE constraint failed") {
                Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                    ErrorCode::CourseAlreadyEnrolled,
                    "Course already enrolled",
                )))
            } else {
                Ok(HttpResponse::InternalServerError()
                    .json(ApiResponse::error_empty(ErrorCode::InternalServerError, msg)))
            }
        }
    }
}
