use std::fmt::Display;

use serde::Serialize;

use crate::endpoints;
use crate::error::SuiteResult;
use crate::http::{ApiClient, ApiRequest, ApiResponse, RequestExecutor};

#[derive(Debug, Clone)]
pub struct StoreService<E = ApiClient> {
    executor: E,
}

impl<E: RequestExecutor> StoreService<E> {
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    pub async fn inventory(&self) -> SuiteResult<ApiResponse> {
        self.executor
            .execute(ApiRequest::get(endpoints::store::INVENTORY))
            .await
    }

    pub async fn place_order<T: Serialize + Sync + ?Sized>(&self, order: &T) -> SuiteResult<ApiResponse> {
        let request = ApiRequest::post_json(endpoints::store::ORDER, order)?;
        self.executor.execute(request).await
    }

    pub async fn get_order(&self, id: impl Display) -> SuiteResult<ApiResponse> {
        let request = ApiRequest::get(endpoints::store::order_by_id(id));
        self.executor.execute(request).await
    }

    pub async fn delete_order(&self, id: impl Display) -> SuiteResult<ApiResponse> {
        let request = ApiRequest::delete(endpoints::store::order_by_id(id));
        self.executor.execute(request).await
    }
}
