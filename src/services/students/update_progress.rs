use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::StudentService;
use crate::models::{
    ApiResponse, ErrorCode,
    students::{requests::UpdateProgressRequest, responses::StudentResponse},
};

pub async fn update_progress(
    service: &StudentService,
    student_id: String,
    course: String,
    progress_data: UpdateProgressRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 先取学生，区分「学生不存在」与「未加选该课程」
    match storage.get_student_by_student_id(&student_id).await {
        Ok(Some(_)) => {}
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
    }

    match storage
        .update_course_progress(&student_id, &course, progress_data)
        .await
    {
        Ok(Some(student)) => Ok(HttpResponse::Ok()
            .json(ApiResponse::success(StudentResponse { student }, "课程进度已更新"))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::CourseNotEnrolled,
            "Student is not enrolled in this course",
        ))),
        Err(e) => {
            error!("更新课程进度失败: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to update course progress: {e}"),
                )),
            )
        }
    }
}
