use serde::Serialize;

use crate::error::SuiteResult;

use super::method::HttpMethod;

/// One HTTP exchange to perform, relative to the configured base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    /// Path plus optional query string, without a leading slash (`pet/42`).
    pub path: String,
    pub body: RequestBody,
}

/// Body encodings used by the pet-store endpoints.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(serde_json::Value),
    /// `application/x-www-form-urlencoded`; only the listed pairs are sent.
    Form(Vec<(String, String)>),
    Multipart(MultipartBody),
}

/// `multipart/form-data` payload: one binary part plus free-text fields.
#[derive(Debug, Clone, PartialEq)]
pub struct MultipartBody {
    pub file: FilePart,
    pub fields: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilePart {
    pub field: String,
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            path: path.into(),
            body: RequestBody::Empty,
        }
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Delete,
            path: path.into(),
            body: RequestBody::Empty,
        }
    }

    pub fn post_json<T: Serialize + ?Sized>(path: impl Into<String>, body: &T) -> SuiteResult<Self> {
        Self::json(HttpMethod::Post, path, body)
    }

    pub fn put_json<T: Serialize + ?Sized>(path: impl Into<String>, body: &T) -> SuiteResult<Self> {
        Self::json(HttpMethod::Put, path, body)
    }

    pub fn post_form(path: impl Into<String>, fields: Vec<(String, String)>) -> Self {
        Self {
            method: HttpMethod::Post,
            path: path.into(),
            body: RequestBody::Form(fields),
        }
    }

    pub fn post_multipart(path: impl Into<String>, body: MultipartBody) -> Self {
        Self {
            method: HttpMethod::Post,
            path: path.into(),
            body: RequestBody::Multipart(body),
        }
    }

    fn json<T: Serialize + ?Sized>(
        method: HttpMethod,
        path: impl Into<String>,
        body: &T,
    ) -> SuiteResult<Self> {
        Ok(Self {
            method,
            path: path.into(),
            body: RequestBody::Json(serde_json::to_value(body)?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_body_is_captured_as_value() {
        let request = ApiRequest::post_json("pet", &json!({"name": "Buddy"})).unwrap();
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.path, "pet");
        assert_eq!(request.body, RequestBody::Json(json!({"name": "Buddy"})));
    }

    #[test]
    fn get_and_delete_have_no_body() {
        assert_eq!(ApiRequest::get("store/inventory").body, RequestBody::Empty);
        assert_eq!(ApiRequest::delete("pet/1").method, HttpMethod::Delete);
    }
}
