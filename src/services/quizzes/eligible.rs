use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::QuizService;
use crate::models::quizzes::responses::EligibleQuizzesResponse;
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_eligible_quizzes(
    service: &QuizService,
    student_id: String,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

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

    // 可作答集合 = 学生所选课程下仍在用的测验
    let courses: Vec<String> = student.courses.iter().map(|c| c.course.clone()).collect();

    match storage.list_eligible_quizzes(&courses).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            EligibleQuizzesResponse { items },
            "Eligible quizzes retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve eligible quizzes: {e}"),
            )),
        ),
    }
}
