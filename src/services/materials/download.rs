use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::header};

use super::MaterialService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn download_material(
    service: &MaterialService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let material = match storage.get_material_by_id(id).await {
        Ok(Some(m)) => m,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::MaterialNotFound,
                "Material not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Material query failed: {e}"),
                )),
            );
        }
    };

    // 字节与 MIME 类型按发布时的原样回表
    Ok(HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, material.content_type))
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", material.file_name),
        ))
        .body(material.content))
}
