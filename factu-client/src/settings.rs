//! Settings screens: receipt configuration and POS feature switches
//!
//! Both edit a local copy and send it whole on save. Like the CRUD screens
//! they are bound to a lifetime; responses landing after `close` are dropped.

use shared::models::{LogoKind, PosFeature, PosFeatures, ReceiptConfig};
use tokio_util::sync::CancellationToken;

use crate::api::SettingsApi;
use crate::config::ClientConfig;
use crate::crud::{Notifier, guarded};
use crate::http::{HttpClient, UploadFile};

pub struct ReceiptConfigScreen<C, N> {
    http: C,
    notifier: N,
    config: ReceiptConfig,
    lifetime: CancellationToken,
}

impl<C: HttpClient, N: Notifier> ReceiptConfigScreen<C, N> {
    pub fn new(http: C, notifier: N) -> Self {
        Self {
            http,
            notifier,
            config: ReceiptConfig::default(),
            lifetime: CancellationToken::new(),
        }
    }

    pub fn with_lifetime(mut self, parent: &CancellationToken) -> Self {
        self.lifetime = parent.child_token();
        self
    }

    pub fn config(&self) -> &ReceiptConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut ReceiptConfig {
        &mut self.config
    }

    pub fn is_closed(&self) -> bool {
        self.lifetime.is_cancelled()
    }

    pub fn close(&self) {
        self.lifetime.cancel();
    }

    pub async fn load(&mut self) -> bool {
        let api = SettingsApi::new(&self.http);
        let Some(result) = guarded(&self.lifetime, api.receipt_config()).await else {
            return false;
        };
        match result {
            Ok(config) => {
                self.config = config;
                true
            }
            Err(e) => {
                self.notifier
                    .error(&e.user_message("Error loading the receipt configuration"));
                false
            }
        }
    }

    pub async fn save(&mut self) -> bool {
        let api = SettingsApi::new(&self.http);
        let Some(result) = guarded(&self.lifetime, api.save_receipt_config(&self.config)).await
        else {
            return false;
        };
        match result {
            Ok(()) => {
                self.notifier.success("Receipt configuration saved");
                true
            }
            Err(e) => {
                self.notifier
                    .error(&e.user_message("Error saving the receipt configuration"));
                false
            }
        }
    }

    /// Upload a logo and point the local config at it (saved with [`save`](Self::save))
    pub async fn upload_logo(&mut self, kind: LogoKind, file: UploadFile, config: &ClientConfig) -> bool {
        let api = SettingsApi::new(&self.http);
        let Some(result) = guarded(&self.lifetime, api.upload_logo(kind, file)).await else {
            return false;
        };
        match result {
            Ok(url) => {
                self.config.set_logo(kind, config.resolve_url(&url));
                self.notifier.success("Logo uploaded");
                true
            }
            Err(e) => {
                self.notifier.error(&e.user_message("Error uploading the logo"));
                false
            }
        }
    }
}

pub struct FeaturesScreen<C, N> {
    http: C,
    notifier: N,
    features: PosFeatures,
    lifetime: CancellationToken,
}

impl<C: HttpClient, N: Notifier> FeaturesScreen<C, N> {
    pub fn new(http: C, notifier: N) -> Self {
        Self {
            http,
            notifier,
            features: PosFeatures::default(),
            lifetime: CancellationToken::new(),
        }
    }

    pub fn with_lifetime(mut self, parent: &CancellationToken) -> Self {
        self.lifetime = parent.child_token();
        self
    }

    pub fn features(&self) -> &PosFeatures {
        &self.features
    }

    pub fn is_closed(&self) -> bool {
        self.lifetime.is_cancelled()
    }

    pub fn close(&self) {
        self.lifetime.cancel();
    }

    pub async fn load(&mut self) -> bool {
        let api = SettingsApi::new(&self.http);
        let Some(result) = guarded(&self.lifetime, api.features()).await else {
            return false;
        };
        match result {
            Ok(features) => {
                self.features = features;
                true
            }
            Err(e) => {
                self.notifier
                    .error(&e.user_message("Error loading the POS features"));
                false
            }
        }
    }

    /// Flip a feature locally; refusals are notified and leave it unchanged
    pub fn toggle(&mut self, feature: PosFeature) -> Option<bool> {
        match self.features.toggle(feature) {
            Ok(enabled) => Some(enabled),
            Err(e) => {
                self.notifier.error(&e.to_string());
                None
            }
        }
    }

    pub async fn save(&mut self) -> bool {
        let api = SettingsApi::new(&self.http);
        let Some(result) = guarded(&self.lifetime, api.save_features(&self.features)).await else {
            return false;
        };
        match result {
            Ok(()) => {
                self.notifier.success("Configuration saved");
                true
            }
            Err(e) => {
                self.notifier
                    .error(&e.user_message("Error saving the configuration"));
                false
            }
        }
    }
}
