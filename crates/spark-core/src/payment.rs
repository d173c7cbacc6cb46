//! Payment collaborator interface.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// What is being purchased.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub tier_name: String,
    pub price: String,
}

/// Outcome reported by the payment processor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PaymentResult {
    pub fn approved(transaction_id: impl Into<String>) -> Self {
        Self {
            success: true,
            transaction_id: Some(transaction_id.into()),
            error: None,
        }
    }

    pub fn declined(error: Option<String>) -> Self {
        Self {
            success: false,
            transaction_id: None,
            error,
        }
    }
}

/// A payment provider.
///
/// Failures are part of [`PaymentResult`]; the processor itself never errors.
#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    async fn process(&self, request: PaymentRequest) -> PaymentResult;
}
