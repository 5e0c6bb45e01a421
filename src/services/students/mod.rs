pub mod add_course;
pub mod export;
pub mod get;
pub mod list;
pub mod register;
pub mod update;
pub mod update_fees;
pub mod update_progress;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::students::requests::{
    AddCourseRequest, RegisterStudentRequest, StudentExportParams, StudentListParams,
    UpdateFeeRequest, UpdateProgressRequest, UpdateStudentRequest,
};
use crate::storage::Storage;

pub struct StudentService {
    storage: Option<Arc<dyn Storage>>,
}

impl StudentService {
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

    // 登记学生
    pub async fn register_student(
        &self,
        student_data: RegisterStudentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        register::register_student(self, student_data, request).await
    }

    // 根据学号获取学生
    pub async fn get_student(
        &self,
        student_id: String,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::get_student(self, student_id, request).await
    }

    // 获取学生列表
    pub async fn list_students(
        &self,
        query: StudentListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_students(self, query, request).await
    }

    // 更新学生资料
    pub async fn update_student(
        &self,
        student_id: String,
        update_data: UpdateStudentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_student(self, student_id, update_data, request).await
    }

    // 加选课程
    pub async fn add_course(
        &self,
        student_id: String,
        course_data: AddCourseRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        add_course::add_course(self, student_id, course_data, request).await
    }

    // 更新课程进度与成绩
    pub async fn update_progress(
        &self,
        student_id: String,
        course: String,
        progress_data: UpdateProgressRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update_progress::update_progress(self, student_id, course, progress_data, request).await
    }

    // 更新课程缴费状态
    pub async fn update_fees(
        &self,
        student_id: String,
        course: String,
        fee_data: UpdateFeeRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update_fees::update_fees(self, student_id, course, fee_data, request).await
    }

    // 导出学生列表
    pub async fn export_students(
        &self,
        params: StudentExportParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        export::export_students(self, params, request).await
    }
}
