use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, middleware, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::materials::requests::MaterialListParams;
use crate::services::MaterialService;
use crate::utils::SafeMaterialIdI64;

// 懒加载的全局 MaterialService 实例
static MATERIAL_SERVICE: Lazy<MaterialService> = Lazy::new(MaterialService::new_lazy);

pub async fn publish_material(
    request: HttpRequest,
    payload: actix_multipart::Multipart,
) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE.publish_material(&request, payload).await
}

pub async fn list_materials(
    req: HttpRequest,
    query: web::Query<MaterialListParams>,
) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE
        .list_materials(query.into_inner(), &req)
        .await
}

pub async fn download_material(
    req: HttpRequest,
    id: SafeMaterialIdI64,
) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE.download_material(id.0, &req).await
}

pub async fn delete_material(
    req: HttpRequest,
    id: SafeMaterialIdI64,
) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE.delete_material(id.0, &req).await
}

// 配置路由
pub fn configure_material_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/materials")
            .wrap(middleware::Compress::default())
            .service(
                web::resource("")
                    // 列出资料（分页、按课程筛选）
                    .route(web::get().to(list_materials))
                    // 发布资料 - 仅管理员
                    .route(
                        web::post()
                            .to(publish_material)
                            .wrap(middlewares::RequireAdmin),
                    ),
            )
            .service(
                web::resource("/{id}")
                    // 删除资料 - 仅管理员
                    .route(
                        web::delete()
                            .to(delete_material)
                            .wrap(middlewares::RequireAdmin),
                    ),
            )
            .service(
                web::resource("/{id}/download")
                    // 下载资料原文件
                    .route(web::get().to(download_material)),
            ),
    );
}
