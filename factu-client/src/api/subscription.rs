//! Subscription checkout and billing

use async_trait::async_trait;
use shared::models::{
    CancelSubscriptionRequest, CheckoutRequest, CheckoutResponse, MessageResponse,
    PaymentCheckStatus, PaymentRecord, SubscriptionInfo,
};

use super::segment;
use crate::error::{ClientError, ClientResult};
use crate::http::HttpClient;
use crate::poller::PaymentStatusSource;

pub struct SubscriptionApi<'a, C> {
    http: &'a C,
}

impl<'a, C: HttpClient> SubscriptionApi<'a, C> {
    pub fn new(http: &'a C) -> Self {
        Self { http }
    }

    pub async fn current(&self) -> ClientResult<SubscriptionInfo> {
        self.http.get("/api/suscripcion/actual").await
    }

    /// Start a checkout; the caller opens the returned URL
    pub async fn create_checkout(
        &self,
        plan_id: &str,
        origin_url: &str,
    ) -> ClientResult<CheckoutResponse> {
        let request = CheckoutRequest {
            plan_id: plan_id.to_string(),
            origin_url: origin_url.to_string(),
        };
        let response: CheckoutResponse = self.http.post("/api/suscripcion/crear", &request).await?;
        if response.checkout_url.is_none() {
            return Err(ClientError::InvalidResponse(
                "checkout response carries no URL".into(),
            ));
        }
        tracing::info!(plan_id, session_id = ?response.session_id, "Checkout created");
        Ok(response)
    }

    /// Cancel at the end of the paid period
    pub async fn cancel(&self) -> ClientResult<MessageResponse> {
        let request = CancelSubscriptionRequest {
            cancel_at_period_end: true,
        };
        self.http.post("/api/suscripcion/cancelar", &request).await
    }

    pub async fn reactivate(&self) -> ClientResult<MessageResponse> {
        self.http
            .post("/api/suscripcion/reactivar", &serde_json::json!({}))
            .await
    }

    pub async fn payments(&self) -> ClientResult<Vec<PaymentRecord>> {
        self.http.get("/api/mis-pagos").await
    }

    pub async fn payment_status(&self, session_id: &str) -> ClientResult<PaymentCheckStatus> {
        let path = format!("/api/suscripcion/estado/{}", segment(session_id));
        self.http.get(&path).await
    }
}

#[async_trait]
impl<C: HttpClient> PaymentStatusSource for SubscriptionApi<'_, C> {
    async fn fetch_status(&self, session_id: &str) -> ClientResult<PaymentCheckStatus> {
        self.payment_status(session_id).await
    }
}
