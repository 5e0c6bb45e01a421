use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::QuizService;
use crate::models::{
    ApiResponse, ErrorCode,
    quizzes::requests::{QuizListParams, QuizListQuery},
};

pub async fn list_quizzes(
    service: &QuizService,
    query: QuizListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let list_query = QuizListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        course: query.course,
        include_inactive: query.include_inactive,
    };

    match storage.list_quizzes_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Quiz list retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve quiz list: {e}"),
            )),
        ),
    }
}
