use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::QuizService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn deactivate_quiz(
    service: &QuizService,
    quiz_id: String,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 软删除：测验下架，已有成绩全部保留
    match storage.deactivate_quiz(&quiz_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("测验已下架"))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::QuizNotFound,
            "Quiz not found",
        ))),
        Err(e) => {
            error!("下架测验失败: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to deactivate quiz: {e}"),
                )),
            )
        }
    }
}
