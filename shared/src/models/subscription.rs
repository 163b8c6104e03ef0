//! Subscription Model
//!
//! Checkout, payment status and billing history records.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// `payment_status` value of a settled checkout
pub const PAYMENT_STATUS_PAID: &str = "paid";
/// `status` value of an abandoned checkout session
pub const SESSION_STATUS_EXPIRED: &str = "expired";

/// Payment status of a checkout session (`/api/suscripcion/estado/{session_id}`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentCheckStatus {
    #[serde(default)]
    pub session_id: Option<String>,
    /// `paid`, `unpaid`, `no_payment_required`, ...
    #[serde(default)]
    pub payment_status: Option<String>,
    /// `open`, `complete`, `expired`, ...
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub plan_id: Option<String>,
}

impl PaymentCheckStatus {
    pub fn is_paid(&self) -> bool {
        self.payment_status.as_deref() == Some(PAYMENT_STATUS_PAID)
    }

    pub fn is_expired(&self) -> bool {
        self.status.as_deref() == Some(SESSION_STATUS_EXPIRED)
    }
}

/// Subscription lifecycle state reported by the billing provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Active,
    Canceled,
    PastDue,
    Trialing,
    #[serde(other)]
    Unknown,
}

impl SubscriptionStatus {
    pub fn label(&self) -> &'static str {
        match self {
            SubscriptionStatus::Active => "Active",
            SubscriptionStatus::Canceled => "Cancelled",
            SubscriptionStatus::PastDue => "Payment pending",
            SubscriptionStatus::Trialing => "Trial",
            SubscriptionStatus::Unknown => "Unknown",
        }
    }
}

/// Current subscription (`/api/suscripcion/actual`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionInfo {
    #[serde(default)]
    pub has_subscription: bool,
    #[serde(default)]
    pub status: Option<SubscriptionStatus>,
    #[serde(default)]
    pub cancel_at_period_end: bool,
    #[serde(default)]
    pub current_period_end: Option<String>,
    #[serde(default)]
    pub days_remaining: Option<i64>,
    #[serde(default)]
    pub plan_id: Option<String>,
}

impl SubscriptionInfo {
    pub fn is_active(&self) -> bool {
        self.has_subscription && self.status == Some(SubscriptionStatus::Active)
    }
}

/// Start a checkout for a plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub plan_id: String,
    /// Origin the payment provider redirects back to
    pub origin_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutResponse {
    #[serde(default)]
    pub checkout_url: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelSubscriptionRequest {
    pub cancel_at_period_end: bool,
}

/// Generic `{"message": ...}` acknowledgement
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

/// A billing history entry (`/api/mis-pagos`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub id: String,
    #[serde(with = "rust_decimal::serde::float", default)]
    pub amount: Decimal,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    /// `subscription`, `renewal`, ...
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub plan_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_check_classification_fields() {
        let paid: PaymentCheckStatus =
            serde_json::from_str(r#"{"payment_status": "paid", "status": "complete"}"#).unwrap();
        assert!(paid.is_paid());
        assert!(!paid.is_expired());

        let expired: PaymentCheckStatus =
            serde_json::from_str(r#"{"payment_status": "unpaid", "status": "expired"}"#).unwrap();
        assert!(!expired.is_paid());
        assert!(expired.is_expired());

        let empty: PaymentCheckStatus = serde_json::from_str("{}").unwrap();
        assert!(!empty.is_paid() && !empty.is_expired());
    }

    #[test]
    fn test_subscription_unknown_status() {
        let info: SubscriptionInfo = serde_json::from_str(
            r#"{"has_subscription": true, "status": "incomplete", "cancel_at_period_end": false}"#,
        )
        .unwrap();
        assert_eq!(info.status, Some(SubscriptionStatus::Unknown));
        assert!(!info.is_active());
    }
}
