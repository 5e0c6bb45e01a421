use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::students::requests::{
    AddCourseRequest, RegisterStudentRequest, StudentExportParams, StudentListParams,
    UpdateFeeRequest, UpdateProgressRequest, UpdateStudentRequest,
};
use crate::services::StudentService;
use crate::utils::{SafeCourseName, SafeStudentId};

// 懒加载的全局 StudentService 实例
static STUDENT_SERVICE: Lazy<StudentService> = Lazy::new(StudentService::new_lazy);

// HTTP处理程序
pub async fn register_student(
    req: HttpRequest,
    student_data: web::Json<RegisterStudentRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .register_student(student_data.into_inner(), &req)
        .await
}

pub async fn list_students(
    req: HttpRequest,
    query: web::Query<StudentListParams>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .list_students(query.into_inner(), &req)
        .await
}

pub async fn export_students(
    req: HttpRequest,
    query: web::Query<StudentExportParams>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .export_students(query.into_inner(), &req)
        .await
}

pub async fn get_student(
    req: HttpRequest,
    student_id: SafeStudentId,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.get_student(student_id.0, &req).await
}

pub async fn update_student(
    req: HttpRequest,
    student_id: SafeStudentId,
    update_data: web::Json<UpdateStudentRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .update_student(student_id.0, update_data.into_inner(), &req)
        .await
}

pub async fn add_course(
    req: HttpRequest,
    student_id: SafeStudentId,
    course_data: web::Json<AddCourseRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .add_course(student_id.0, course_data.into_inner(), &req)
        .await
}

pub async fn update_progress(
    req: HttpRequest,
    student_id: SafeStudentId,
    course: SafeCourseName,
    progress_data: web::Json<UpdateProgressRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .update_progress(student_id.0, course.0, progress_data.into_inner(), &req)
        .await
}

pub async fn update_fees(
    req: HttpRequest,
    student_id: SafeStudentId,
    course: SafeCourseName,
    fee_data: web::Json<UpdateFeeRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .update_fees(student_id.0, course.0, fee_data.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_student_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/students")
            // 静态段放在 /{student_id} 之前，避免被动态段捕获
            .service(
                web::resource("/export")
                    // 导出学生名册 CSV - 仅管理员
                    .route(
                        web::get()
                            .to(export_students)
                            .wrap(middlewares::RequireAdmin),
                    ),
            )
            .service(
                web::resource("")
                    // 列出学生（分页、筛选）
                    .route(web::get().to(list_students))
                    // 登记学生 - 仅管理员
                    .route(
                        web::post()
                            .to(register_student)
                            .wrap(middlewares::RequireAdmin),
                    ),
            )
            .service(
                web::resource("/{student_id}")
                    // 获取学生详情
                    .route(web::get().to(get_student))
                    // 更新学生资料 - 仅管理员
                    .route(
                        web::put()
                            .to(update_student)
                            .wrap(middlewares::RequireAdmin),
                    ),
            )
            .service(
                web::resource("/{student_id}/courses")
                    // 加选课程 - 仅管理员
                    .route(web::post().to(add_course).wrap(middlewares::RequireAdmin)),
            )
            .service(
                web::resource("/{student_id}/courses/{course}")
                    // 更新课程进度与成绩 - 仅管理员
                    .route(
                        web::put()
                            .to(update_progress)
                            .wrap(middlewares::RequireAdmin),
                    ),
            )
            .service(
                web::resource("/{student_id}/courses/{course}/fees")
                    // 更新缴费状态 - 仅管理员
                    .route(web::put().to(update_fees).wrap(middlewares::RequireAdmin)),
            ),
    );
}
