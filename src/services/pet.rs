use std::fmt::Display;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::endpoints;
use crate::error::{SuiteError, SuiteResult};
use crate::http::{ApiClient, ApiRequest, ApiResponse, FilePart, MultipartBody, RequestExecutor};

/// Sent in place of a fixture file that does not exist on disk.
pub const PLACEHOLDER_IMAGE: &[u8] = b"placeholder image content";
pub const PLACEHOLDER_FILE_NAME: &str = "placeholder.png";

const FILE_FIELD: &str = "file";
const METADATA_FIELD: &str = "additionalMetadata";

/// What to send to `pet/{id}/uploadImage`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadImage {
    /// Read from disk when it exists; otherwise [`PLACEHOLDER_IMAGE`] is sent under
    /// this file name.
    pub file: Option<PathBuf>,
    pub additional_metadata: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PetService<E = ApiClient> {
    executor: E,
}

impl<E: RequestExecutor> PetService<E> {
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    /// `POST pet`. Accepts any serializable body so malformed payloads can be sent.
    pub async fn create<T: Serialize + Sync + ?Sized>(&self, pet: &T) -> SuiteResult<ApiResponse> {
        let request = ApiRequest::post_json(endpoints::pet::COLLECTION, pet)?;
        self.executor.execute(request).await
    }

    pub async fn get(&self, id: impl Display) -> SuiteResult<ApiResponse> {
        let request = ApiRequest::get(endpoints::pet::by_id(id));
        self.executor.execute(request).await
    }

    /// `PUT pet`; the id travels in the body.
    pub async fn update<T: Serialize + Sync + ?Sized>(&self, pet: &T) -> SuiteResult<ApiResponse> {
        let request = ApiRequest::put_json(endpoints::pet::COLLECTION, pet)?;
        self.executor.execute(request).await
    }

    pub async fn delete(&self, id: impl Display) -> SuiteResult<ApiResponse> {
        let request = ApiRequest::delete(endpoints::pet::by_id(id));
        self.executor.execute(request).await
    }

    pub async fn find_by_status<S: AsRef<str>>(&self, statuses: &[S]) -> SuiteResult<ApiResponse> {
        let request = ApiRequest::get(endpoints::pet::find_by_status(statuses));
        self.executor.execute(request).await
    }

    /// Multipart upload. A missing file is replaced by an in-memory placeholder
    /// rather than failing; other read errors are returned.
    pub async fn upload_image(&self, id: impl Display, upload: &UploadImage) -> SuiteResult<ApiResponse> {
        let file = load_file_part(upload.file.as_deref()).await?;
        let fields = upload
            .additional_metadata
            .iter()
            .map(|metadata| (METADATA_FIELD.to_string(), metadata.clone()))
            .collect();

        let request = ApiRequest::post_multipart(
            endpoints::pet::upload_image(id),
            MultipartBody { file, fields },
        );
        self.executor.execute(request).await
    }

    /// Form-encoded `POST pet/{id}`. Only the fields given are encoded.
    pub async fn update_with_form(
        &self,
        id: impl Display,
        name: Option<&str>,
        status: Option<&str>,
    ) -> SuiteResult<ApiResponse> {
        let fields = [("name", name), ("status", status)]
            .into_iter()
            .filter_map(|(key, value)| value.map(|value| (key.to_string(), value.to_string())))
            .collect();

        let request = ApiRequest::post_form(endpoints::pet::by_id(id), fields);
        self.executor.execute(request).await
    }
}

async fn load_file_part(path: Option<&Path>) -> SuiteResult<FilePart> {
    let Some(path) = path else {
        return Ok(placeholder_part(PLACEHOLDER_FILE_NAME, "image/png"));
    };

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| PLACEHOLDER_FILE_NAME.to_string());
    let mime = mime_for(path);

    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(FilePart {
            field: FILE_FIELD.to_string(),
            file_name,
            mime: mime.to_string(),
            bytes,
        }),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(placeholder_part(&file_name, mime)),
        Err(err) => Err(SuiteError::io(path, err)),
    }
}

fn placeholder_part(file_name: &str, mime: &str) -> FilePart {
    FilePart {
        field: FILE_FIELD.to_string(),
        file_name: file_name.to_string(),
        mime: mime.to_string(),
        bytes: PLACEHOLDER_IMAGE.to_vec(),
    }
}

fn mime_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "txt" => "text/plain",
        "json" => "application/json",
        _ => "application/octet-stream",
    }
}
