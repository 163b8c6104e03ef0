//! HTTP client for the FactuPOS REST API
//!
//! [`HttpClient`] is the seam every API module is written against;
//! [`NetworkHttpClient`] is the `reqwest` implementation.

use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::ApiErrorBody;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::session::SessionContext;

/// A file sent as `multipart/form-data`
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    /// Guess the MIME type from the file extension (images only)
    pub fn image(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let ext = file_name
            .rsplit('.')
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        let mime = match ext.as_str() {
            "png" => "image/png",
            "jpg" | "jpeg" => "image/jpeg",
            "webp" => "image/webp",
            "gif" => "image/gif",
            "svg" => "image/svg+xml",
            _ => "application/octet-stream",
        };
        Self {
            file_name,
            mime: mime.to_string(),
            bytes,
        }
    }
}

/// HTTP client trait
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Authenticated GET
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T>;
    /// GET without the `Authorization` header
    async fn get_public<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T>;
    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    /// POST without the `Authorization` header
    async fn post_public<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T>;
    /// Multipart upload of a single file under the `file` field
    async fn upload<T: DeserializeOwned>(&self, path: &str, file: UploadFile) -> ClientResult<T>;
    fn session(&self) -> &SessionContext;
}

/// Network HTTP client
#[derive(Debug, Clone)]
pub struct NetworkHttpClient {
    client: Client,
    base_url: String,
    session: SessionContext,
}

impl NetworkHttpClient {
    pub fn new(config: &ClientConfig, session: SessionContext) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Replace the session (after login/logout)
    pub fn set_session(&mut self, session: SessionContext) {
        self.session = session;
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str, authenticated: bool) -> reqwest::RequestBuilder {
        let mut req = self.client.request(method, self.url(path));
        if authenticated && let Some(token) = self.session.token() {
            req = req.bearer_auth(token);
        }
        req
    }

    async fn send<T: DeserializeOwned>(
        &self,
        req: reqwest::RequestBuilder,
        method: &Method,
        path: &str,
    ) -> ClientResult<T> {
        let response = req.send().await?;
        tracing::debug!(%method, path, status = response.status().as_u16(), "API response");
        handle_response(response).await
    }
}

/// Map a response to `T` or to the matching [`ClientError`]
async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
    let status = response.status();
    let bytes = response.bytes().await?;

    if !status.is_success() {
        let body: ApiErrorBody = serde_json::from_slice(&bytes).unwrap_or_default();
        let message = body.message();
        tracing::warn!(status = status.as_u16(), detail = ?message, "API request failed");

        if status == StatusCode::FORBIDDEN && body.is_plan_limit() {
            return Err(ClientError::PlanLimit(message.unwrap_or_default()));
        }
        return Err(match status {
            StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
            StatusCode::FORBIDDEN => ClientError::Forbidden(message.unwrap_or_default()),
            StatusCode::NOT_FOUND => ClientError::NotFound(message.unwrap_or_default()),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                ClientError::Validation(message.unwrap_or_default())
            }
            _ => ClientError::Api {
                status: status.as_u16(),
                message,
            },
        });
    }

    // Some DELETE endpoints answer with an empty body
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(serde_json::from_slice(b"null")?);
    }
    serde_json::from_slice(&bytes)
        .map_err(|e| ClientError::InvalidResponse(format!("{e} (status {status})")))
}

#[async_trait]
impl HttpClient for NetworkHttpClient {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let req = self.request(Method::GET, path, true);
        self.send(req, &Method::GET, path).await
    }

    async fn get_public<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let req = self.request(Method::GET, path, false);
        self.send(req, &Method::GET, path).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let req = self.request(Method::POST, path, true).json(body);
        self.send(req, &Method::POST, path).await
    }

    async fn post_public<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let req = self.request(Method::POST, path, false).json(body);
        self.send(req, &Method::POST, path).await
    }

    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let req = self.request(Method::PUT, path, true).json(body);
        self.send(req, &Method::PUT, path).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let req = self.request(Method::DELETE, path, true);
        self.send(req, &Method::DELETE, path).await
    }

    async fn upload<T: DeserializeOwned>(&self, path: &str, file: UploadFile) -> ClientResult<T> {
        let part = reqwest::multipart::Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(&file.mime)?;
        let form = reqwest::multipart::Form::new().part("file", part);
        let req = self.request(Method::POST, path, true).multipart(form);
        self.send(req, &Method::POST, path).await
    }

    fn session(&self) -> &SessionContext {
        &self.session
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_join() {
        let client =
            NetworkHttpClient::new(&ClientConfig::new("https://api.example.com/"), SessionContext::new())
                .unwrap();
        assert_eq!(client.url("/api/tiendas"), "https://api.example.com/api/tiendas");
        assert_eq!(client.url("api/tpv"), "https://api.example.com/api/tpv");
    }

    #[test]
    fn test_upload_mime_guess() {
        assert_eq!(UploadFile::image("logo.PNG", vec![]).mime, "image/png");
        assert_eq!(UploadFile::image("logo.jpeg", vec![]).mime, "image/jpeg");
        assert_eq!(UploadFile::image("logo", vec![]).mime, "application/octet-stream");
    }
}
