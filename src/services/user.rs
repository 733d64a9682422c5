use serde::Serialize;

use crate::endpoints;
use crate::error::SuiteResult;
use crate::http::{ApiClient, ApiRequest, ApiResponse, RequestExecutor};

#[derive(Debug, Clone)]
pub struct UserService<E = ApiClient> {
    executor: E,
}

impl<E: RequestExecutor> UserService<E> {
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    pub async fn create<T: Serialize + Sync + ?Sized>(&self, user: &T) -> SuiteResult<ApiResponse> {
        let request = ApiRequest::post_json(endpoints::user::COLLECTION, user)?;
        self.executor.execute(request).await
    }

    /// Acknowledged by the server without any guarantee the users were stored.
    pub async fn create_with_array<T: Serialize + Sync>(&self, users: &[T]) -> SuiteResult<ApiResponse> {
        let request = ApiRequest::post_json(endpoints::user::CREATE_WITH_ARRAY, users)?;
        self.executor.execute(request).await
    }

    pub async fn create_with_list<T: Serialize + Sync>(&self, users: &[T]) -> SuiteResult<ApiResponse> {
        let request = ApiRequest::post_json(endpoints::user::CREATE_WITH_LIST, users)?;
        self.executor.execute(request).await
    }

    pub async fn get(&self, username: &str) -> SuiteResult<ApiResponse> {
        let request = ApiRequest::get(endpoints::user::by_username(username));
        self.executor.execute(request).await
    }

    pub async fn update<T: Serialize + Sync + ?Sized>(
        &self,
        username: &str,
        user: &T,
    ) -> SuiteResult<ApiResponse> {
        let request = ApiRequest::put_json(endpoints::user::by_username(username), user)?;
        self.executor.execute(request).await
    }

    pub async fn delete(&self, username: &str) -> SuiteResult<ApiResponse> {
        let request = ApiRequest::delete(endpoints::user::by_username(username));
        self.executor.execute(request).await
    }

    /// Credentials are passed through; nothing is stored from the reply.
    pub async fn login(&self, username: &str, password: &str) -> SuiteResult<ApiResponse> {
        let request = ApiRequest::get(endpoints::user::login(username, password));
        self.executor.execute(request).await
    }

    pub async fn logout(&self) -> SuiteResult<ApiResponse> {
        self.executor
            .execute(ApiRequest::get(endpoints::user::LOGOUT))
            .await
    }
}
