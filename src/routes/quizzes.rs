use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::common::PaginationQuery;
use crate::models::quizzes::requests::{CreateQuizRequest, QuizListParams, SubmitQuizRequest};
use crate::services::QuizService;
use crate::utils::{SafeQuizId, SafeStudentId};

// 懒加载的全局 QuizService 实例
static QUIZ_SERVICE: Lazy<QuizService> = Lazy::new(QuizService::new_lazy);

// HTTP处理程序
pub async fn create_quiz(
    req: HttpRequest,
    quiz_data: web::Json<CreateQuizRequest>,
) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.create_quiz(quiz_data.into_inner(), &req).await
}

pub async fn list_quizzes(
    req: HttpRequest,
    query: web::Query<QuizListParams>,
) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.list_quizzes(query.into_inner(), &req).await
}

pub async fn get_quiz(req: HttpRequest, quiz_id: SafeQuizId) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.get_quiz(quiz_id.0, &req).await
}

pub async fn deactivate_quiz(req: HttpRequest, quiz_id: SafeQuizId) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.deactivate_quiz(quiz_id.0, &req).await
}

pub async fn submit_quiz(
    req: HttpRequest,
    quiz_id: SafeQuizId,
    submission: web::Json<SubmitQuizRequest>,
) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE
        .submit_quiz(quiz_id.0, submission.into_inner(), &req)
        .await
}

pub async fn list_eligible_quizzes(
    req: HttpRequest,
    student_id: SafeStudentId,
) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.list_eligible_quizzes(student_id.0, &req).await
}

pub async fn list_student_results(
    req: HttpRequest,
    student_id: SafeStudentId,
    query: web::Query<PaginationQuery>,
) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE
        .list_student_results(student_id.0, query.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_quiz_routes(cfg: &mut web::ServiceConfig) {
    // 学生子路由的前缀比 /api/v1/students 更深，必须先于学生路由注册
    cfg.service(
        web::scope("/api/v1/students/{student_id}/quizzes")
            // 列出学生可作答的测验
            .route("", web::get().to(list_eligible_quizzes)),
    );
    cfg.service(
        web::scope("/api/v1/students/{student_id}/results")
            // 获取学生成绩单
            .route("", web::get().to(list_student_results)),
    );
    cfg.service(
        web::scope("/api/v1/quizzes")
            .service(
                web::resource("")
                    // 列出测验
                    .route(web::get().to(list_quizzes))
                    // 创建测验 - 仅管理员
                    .route(web::post().to(create_quiz).wrap(middlewares::RequireAdmin)),
            )
            .service(
                web::resource("/{quiz_id}")
                    // 获取测验详情（含已下架）
                    .route(web::get().to(get_quiz))
                    // 下架测验 - 仅管理员
                    .route(
                        web::delete()
                            .to(deactivate_quiz)
                            .wrap(middlewares::RequireAdmin),
                    ),
            )
            .service(
                web::resource("/{quiz_id}/submissions")
                    // 提交作答 - 按 IP 限速
                    .route(
                        web::post()
                            .to(submit_quiz)
                            .wrap(middlewares::RateLimit::quiz_submission()),
                    ),
            ),
    );
}
