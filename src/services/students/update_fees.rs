use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::StudentService;
use crate::models::{
    ApiResponse, ErrorCode,
    students::{requests::UpdateFeeRequest, responses::StudentResponse},
};

pub async fn update_fees(
    service: &StudentService,
    student_id: String,
    course: String,
    fee_data: UpdateFeeRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

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
        .update_course_fee(&student_id, &course, fee_data.paid)
        .await
    {
        Ok(Some(student)) => Ok(HttpResponse::Ok()
            .json(ApiResponse::success(StudentResponse { student }, "缴费状态已更新"))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::CourseNotEnrolled,
            "Student is not enrolled in this course",
        ))),
        Err(e) => {
            error!("更新缴费状态失败: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to update fee status: {e}"),
                )),
            )
        }
    }
}
