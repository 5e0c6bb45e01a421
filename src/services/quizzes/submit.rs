use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::QuizService;
use crate::models::{
    ApiResponse, ErrorCode,
    quizzes::{requests::SubmitQuizRequest, responses::QuizResultResponse},
};
use crate::utils::student_id::is_valid_student_id;

pub async fn submit_quiz(
    service: &QuizService,
    quiz_id: String,
    submission: SubmitQuizRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if !is_valid_student_id(&submission.student_id) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Student id format is invalid",
        )));
    }

    let storage = service.get_storage(request);

    let quiz = match storage.get_quiz_by_quiz_id(&quiz_id).await {
        Ok(Some(quiz)) => quiz,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::QuizNotFound,
                "Quiz not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get quiz: {e}"),
                )),
            );
        }
    };

    // 已下架的测验不再收卷
    if !quiz.is_active {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::QuizNotAvailable,
            "Quiz is not available",
        )));
    }

    let student = match storage
        .get_student_by_student_id(&submission.student_id)
        .await
    {
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

    if !student.is_enrolled(&quiz.course) {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::CourseNotEnrolled,
            "Student is not enrolled in this course",
        )));
    }

    // 纯函数计分：缺答与越界题号一律判错，时长只作提示不拒迟交
    let outcome = quiz.grade(&submission.answers);

    match storage
        .insert_quiz_result(
            &quiz.quiz_id,
            &submission.student_id,
            outcome,
            &submission.answers,
        )
        .await
    {
        Ok(result) => Ok(HttpResponse::Created()
            .json(ApiResponse::success(QuizResultResponse { result }, "作答已计分"))),
        Err(e) => {
            error!("写入成绩失败: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to record quiz result: {e}"),
                )),
            )
        }
    }
}
