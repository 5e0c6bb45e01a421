pub mod create;
pub mod deactivate;
pub mod eligible;
pub mod get;
pub mod list;
pub mod results;
pub mod submit;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::common::PaginationQuery;
use crate::models::quizzes::requests::{CreateQuizRequest, QuizListParams, SubmitQuizRequest};
use crate::storage::Storage;

pub struct QuizService {
    storage: Option<Arc<dyn Storage>>,
}

impl QuizService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 创建测验
    pub async fn create_quiz(
        &self,
        quiz_data: CreateQuizRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_quiz(self, quiz_data, request).await
    }

    // 根据编号获取测验
    pub async fn get_quiz(
        &self,
        quiz_id: String,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::get_quiz(self, quiz_id, request).await
    }

    // 获取测验列表
    pub async fn list_quizzes(
        &self,
        query: QuizListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_quizzes(self, query, request).await
    }

    // 下架测验
    pub async fn deactivate_quiz(
        &self,
        quiz_id: String,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        deactivate::deactivate_quiz(self, quiz_id, request).await
    }

    // 列出学生可作答的测验
    pub async fn list_eligible_quizzes(
        &self,
        student_id: String,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        eligible::list_eligible_quizzes(self, student_id, request).await
    }

    // 提交作答并计分
    pub async fn submit_quiz(
        &self,
        quiz_id: String,
        submission: SubmitQuizRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        submit::submit_quiz(self, quiz_id, submission, request).await
    }

    // 获取学生成绩单
    pub async fn list_student_results(
        &self,
        student_id: String,
        pagination: PaginationQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        results::list_student_results(self, student_id, pagination, request).await
    }
}
