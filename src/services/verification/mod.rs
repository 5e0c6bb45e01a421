pub mod check;
pub mod issue;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::verification::requests::{CheckCodeRequest, IssueCodeRequest};
use crate::notify::Notifier;
use crate::storage::Storage;

pub struct VerificationService {
    storage: Option<Arc<dyn Storage>>,
}

impl VerificationService {
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

    pub(crate) fn get_notifier(&self, request: &HttpRequest) -> Arc<dyn Notifier> {
        request
            .app_data::<actix_web::web::Data<Arc<dyn Notifier>>>()
            .expect("Notifier not found in app data")
            .get_ref()
            .clone()
    }

    // 发送验证码
    pub async fn issue_code(
        &self,
        data: IssueCodeRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        issue::issue_code(self, data, request).await
    }

    // 校验验证码
    pub async fn check_code(
        &self,
        data: CheckCodeRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        check::check_code(self, data, request).await
    }
}
