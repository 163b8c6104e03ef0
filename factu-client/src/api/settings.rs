//! Receipt configuration and POS feature switches

use shared::models::{LogoKind, LogoUploadResponse, PosFeatures, ReceiptConfig};

use crate::error::ClientResult;
use crate::http::{HttpClient, UploadFile};

pub struct SettingsApi<'a, C> {
    http: &'a C,
}

impl<'a, C: HttpClient> SettingsApi<'a, C> {
    pub fn new(http: &'a C) -> Self {
        Self { http }
    }

    pub async fn receipt_config(&self) -> ClientResult<ReceiptConfig> {
        self.http.get("/api/config").await
    }

    pub async fn save_receipt_config(&self, config: &ReceiptConfig) -> ClientResult<()> {
        let _: serde_json::Value = self.http.put("/api/config", config).await?;
        Ok(())
    }

    /// Upload a logo image; the answer holds a backend-relative URL
    pub async fn upload_logo(&self, kind: LogoKind, file: UploadFile) -> ClientResult<String> {
        let path = format!("/api/config/upload-logo?tipo={}", kind.as_str());
        let response: LogoUploadResponse = self.http.upload(&path, file).await?;
        tracing::info!(kind = kind.as_str(), url = %response.url, "Logo uploaded");
        Ok(response.url)
    }

    pub async fn features(&self) -> ClientResult<PosFeatures> {
        self.http.get("/api/funciones").await
    }

    pub async fn save_features(&self, features: &PosFeatures) -> ClientResult<()> {
        let _: serde_json::Value = self.http.put("/api/funciones", features).await?;
        tracing::info!("POS features saved");
        Ok(())
    }
}
