use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::MaterialService;
use crate::models::{
    ApiResponse, ErrorCode,
    materials::requests::{MaterialListParams, MaterialListQuery},
};

pub async fn list_materials(
    service: &MaterialService,
    query: MaterialListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let list_query = MaterialListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        course: query.course,
    };

    match storage.list_materials_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Material list retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve material list: {e}"),
            )),
        ),
    }
}
