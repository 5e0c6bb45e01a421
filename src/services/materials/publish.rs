use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use futures_util::TryStreamExt;
use futures_util::stream::StreamExt;
use tracing::error;

use super::MaterialService;
use crate::config::AppConfig;
use crate::models::{
    ApiResponse, ErrorCode, materials::responses::MaterialUploadResponse,
};
use crate::utils::validate::validate_course_name;

pub async fn publish_material(
    service: &MaterialService,
    request: &HttpRequest,
    mut payload: Multipart,
) -> ActixResult<HttpResponse> {
    let config = AppConfig::get();
    let max_size = config.upload.max_size;

    let mut course = String::new();
    let mut title = String::new();
    let mut description = String::new();
    let mut file_name = String::new();
    let mut content_type = String::new();
    let mut content: Vec<u8> = Vec::new();
    let mut file_uploaded = false;

    while let Ok(Some(mut field)) = payload.try_next().await {
        let content_disposition = field.content_disposition();
        let name = content_disposition
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();

        match name.as_str() {
            "course" => course = read_text_field(&mut field).await?,
            "title" => title = read_text_field(&mut field).await?,
            "description" => description = read_text_field(&mut field).await?,
            "file" => {
                if file_uploaded {
                    return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                        ErrorCode::BadRequest,
                        "Only one file can be uploaded at a time",
                    )));
                }
                file_uploaded = true;

                file_name = content_disposition
                    .and_then(|cd| cd.get_filename())
                    .map(|s| s.to_string())
                    .unwrap_or_default();

                // MIME 类型原样入库，下载时原样回表
                content_type = field
                    .content_type()
                    .map(|ct| ct.to_string())
                    .unwrap_or_else(|| "application/octet-stream".to_string());

                while let Some(chunk) = field.next().await {
                    let data = chunk?;
                    if content.len() + data.len() > max_size {
                        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                            ErrorCode::BadRequest,
                            "File size exceeds the limit",
                        )));
                    }
                    content.extend_from_slice(&data);
                }
            }
            _ => {}
        }
    }

    if let Err(msg) = validate_course_name(&course) {
        return Ok(
            HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, msg))
        );
    }

    if title.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Material title is required",
        )));
    }

    if !file_uploaded {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "No file found in upload payload",
        )));
    }

    if file_name.is_empty() {
        file_name = format!("{title}.bin");
    }

    let description = if description.is_empty() {
        None
    } else {
        Some(description)
    };

    let storage = service.get_storage(request);

    match storage
        .create_material(&course, &title, description, &file_name, &content_type, content)
        .await
    {
        Ok(material) => Ok(HttpResponse::Created()
            .json(ApiResponse::success(MaterialUploadResponse { material }, "资料发布成功"))),
        Err(e) => {
            error!("发布资料失败: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::MaterialUploadFailed,
                    format!("Failed to publish material: {e}"),
                )),
            )
        }
    }
}

// 读出一个文本字段，前后空白一并去掉
async fn read_text_field(field: &mut actix_multipart::Field) -> actix_web::Result<String> {
    let mut buf = Vec::new();
    while let Some(chunk) = field.next().await {
        let data = chunk?;
        buf.extend_from_slice(&data);
    }
    Ok(String::from_utf8_lossy(&buf).trim().to_string())
}
