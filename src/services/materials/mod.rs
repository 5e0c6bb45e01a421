pub mod delete;
pub mod download;
pub mod list;
pub mod publish;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::materials::requests::MaterialListParams;
use crate::storage::Storage;

pub struct MaterialService {
    storage: Option<Arc<dyn Storage>>,
}

impl MaterialService {
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

    // 发布课程资料
    pub async fn publish_material(
        &self,
        request: &HttpRequest,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        publish::publish_material(self, request, payload).await
    }

    // 获取资料列表
    pub async fn list_materials(
        &self,
        query: MaterialListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_materials(self, query, request).await
    }

    // 下载资料
    pub async fn download_material(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        download::download_material(self, id, request).await
    }

    // 删除资料
    pub async fn delete_material(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_material(self, id, request).await
    }
}
