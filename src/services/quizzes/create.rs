use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::QuizService;
use crate::models::{
    ApiResponse, ErrorCode,
    quizzes::{requests::CreateQuizRequest, responses::QuizResponse},
};
use crate::utils::validate::{validate_course_name, validate_quiz_id, validate_quiz_questions};

pub async fn create_quiz(
    service: &QuizService,
    quiz_data: CreateQuizRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    // 验证测验编号
    if let Err(msg) = validate_quiz_id(&quiz_data.quiz_id) {
        return Ok(
            HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, msg))
        );
    }

    if quiz_data.title.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Quiz title is required",
        )));
    }

    if let Err(msg) = validate_course_name(&quiz_data.course) {
        return Ok(
            HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, msg))
        );
    }

    if quiz_data.duration_minutes <= 0 {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Duration must be positive",
        )));
    }

    // 验证题目结构：题数、选项数、正确项位置
    if let Err(msg) = validate_quiz_questions(&quiz_data.questions) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::InvalidQuizStructure, msg)));
    }

    let storage = service.get_storage(request);

    match storage.create_quiz(quiz_data).await {
        Ok(quiz) => Ok(HttpResponse::Created()
            .json(ApiResponse::success(QuizResponse { quiz }, "测验创建成功"))),
        Err(e) => {
            let msg = format!("Quiz creation failed: {e}");
            error!("{}", msg);
            // 判断是否唯一约束冲突
            if msg.contains("UNIQUE constraint failed") {
                Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                    ErrorCode::QuizIdTaken,
                    "Quiz id already taken",
                )))
            } else {
                Ok(HttpResponse::InternalServerError()
                    .json(ApiResponse::error_empty(ErrorCode::InternalServerError, msg)))
            }
        }
    }
}
