use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::QuizService;
use crate::models::quizzes::responses::QuizResponse;
use crate::models::{ApiResponse, ErrorCode};

pub async fn get_quiz(
    service: &QuizService,
    quiz_id: String,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 已下架的测验仍可查看，便于核对历史成绩
    match storage.get_quiz_by_quiz_id(&quiz_id).await {
        Ok(Some(quiz)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            QuizResponse { quiz },
            "Quiz retrieved successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::QuizNotFound,
            "Quiz not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to get quiz: {e}"),
            )),
        ),
    }
}
