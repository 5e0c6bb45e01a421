//! 学生导出服务

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::StudentService;
use crate::models::students::entities::Student;
use crate::models::students::requests::StudentExportParams;
use crate::models::{ApiResponse, ErrorCode};

/// 导出学生列表
pub async fn export_students(
    service: &StudentService,
    params: StudentExportParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 最多导出 10000 条
    let students = match storage
        .list_students_for_export_filtered(
            10000,
            params.course,
            params.status,
            params.fee_paid,
            params.search.as_deref(),
        )
        .await
    {
        Ok(students) => students,
        Err(e) => {
            error!("导出学生失败: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("导出学生失败: {e}"),
                )),
            );
        }
    };

    export_csv(&students)
}

fn export_csv(students: &[Student]) -> ActixResult<HttpResponse> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    // 写入表头
    wtr.write_record([
        "student_id",
        "name",
        "age",
        "email",
        "phone",
        "status",
        "email_verified",
        "courses",
        "fees_paid",
        "registered_at",
    ])
    .map_err(|e| {
        error!("CSV 写入失败: {}", e);
        actix_web::error::ErrorInternalServerError(format!("CSV 写入失败: {e}"))
    })?;

    // 写入数据
    for student in students {
        wtr.write_record([
            student.student_id.clone(),
            student.name.clone(),
            student.age.to_string(),
            student.email.clone(),
            student.phone.clone().unwrap_or_default(),
            student.status.to_string(),
            student.email_verified.to_string(),
            format_courses(student),
            format_fee_summary(student),
            student.registered_at.to_rfc3339(),
        ])
        .map_err(|e| {
            error!("CSV 写入失败: {}", e);
            actix_web::error::ErrorInternalServerError(format!("CSV 写入失败: {e}"))
        })?;
    }

    let data = wtr.into_inner().map_err(|e| {
        error!("CSV 生成失败: {}", e);
        actix_web::error::ErrorInternalServerError(format!("CSV 生成失败: {e}"))
    })?;

    let filename = format!(
        "cre8learn_students_{}.csv",
        chrono::Utc::now().format("%Y%m%d")
    );

    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{filename}\""),
        ))
        .body(data))
}

// 选课展开为 课程:进度:成绩 的分号串
fn format_courses(student: &Student) -> String {
    student
        .courses
        .iter()
        .map(|c| format!("{}:{}:{}", c.course, c.progress, c.grade))
        .collect::<Vec<_>>()
        .join("; ")
}

// 缴费汇总为 已缴/总数
fn format_fee_summary(student: &Student) -> String {
    let paid = student.courses.iter().filter(|c| c.fee_paid).count();
    format!("{}/{}", paid, student.courses.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::students::entities::{
        CourseEnrollment, CourseProgress, GradeLabel, StudentStatus,
    };
    use chrono::Utc;

    fn sample_student() -> Student {
        Student {
            id: 1,
            student_id: "CL123456".to_string(),
            name: "Ada Lovelace".to_string(),
            age: 20,
            email: "ada@example.com".to_string(),
            phone: None,
            status: StudentStatus::Active,
            email_verified: true,
            courses: vec![
                CourseEnrollment {
                    course: "Web Development".to_string(),
                    grade: GradeLabel::A,
                    progress: CourseProgress::P50,
                    fee_paid: true,
                    enrolled_at: Utc::now(),
                },
                CourseEnrollment {
                    course: "Data Science".to_string(),
                    grade: GradeLabel::NotAssessed,
                    progress: CourseProgress::P0,
                    fee_paid: false,
                    enrolled_at: Utc::now(),
                },
            ],
            registered_at: Utc::now(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_format_courses_flattens_triples() {
        let student = sample_student();
        assert_eq!(
            format_courses(&student),
            "Web Development:50%:A; Data Science:0%:Not Assessed"
        );
    }

    #[test]
    fn test_format_fee_summary() {
        let student = sample_student();
        assert_eq!(format_fee_summary(&student), "1/2");
    }
}
