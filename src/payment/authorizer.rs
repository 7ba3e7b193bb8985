// src/payment/authorizer.rs
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

use super::card_input::last_four;
use crate::app_log;

pub const DEFAULT_AUTHORIZATION_DELAY: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PaymentError {
    #[error("Payment declined: {0}")]
    Declined(String),
}

/// What the processor needs to place a charge.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthorizationRequest {
    pub amount: u64,
    pub email: String,
    pub cardholder_name: String,
    pub card_number: String,
    pub expiry_date: String,
    pub cvv: String,
    pub description: String,
}

impl std::fmt::Debug for AuthorizationRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthorizationRequest")
            .field("amount", &self.amount)
            .field("email", &self.email)
            .field("cardholder_name", &self.cardholder_name)
            .field("card_last_four", &last_four(&self.card_number))
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub transaction_id: String,
    pub amount: u64,
    pub authorized_at: DateTime<Utc>,
}

/// Charge authorization. The checkout state machine only consumes the result.
#[async_trait]
pub trait Authorizer: Send + Sync {
    async fn authorize(&self, request: &AuthorizationRequest) -> Result<Receipt, PaymentError>;
}

/// Stand-in processor: waits, then approves every charge.
#[derive(Debug, Clone)]
pub struct SimulatedAuthorizer {
    delay: Duration,
}

impl SimulatedAuthorizer {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for SimulatedAuthorizer {
    fn default() -> Self {
        Self::new(DEFAULT_AUTHORIZATION_DELAY)
    }
}

#[async_trait]
impl Authorizer for SimulatedAuthorizer {
    async fn authorize(&self, request: &AuthorizationRequest) -> Result<Receipt, PaymentError> {
        app_log!(debug, "Simulating authorization of {}", request.amount);
        tokio::time::sleep(self.delay).await;

        let now = Utc::now();
        Ok(Receipt {
            transaction_id: transaction_id(now),
            amount: request.amount,
            authorized_at: now,
        })
    }
}

/// `TXN_<millis>_<9 uppercase alphanumerics>`
pub fn transaction_id(at: DateTime<Utc>) -> String {
    let suffix = Uuid::new_v4().simple().to_string()[..9].to_uppercase();
    format!("TXN_{}_{}", at.timestamp_millis(), suffix)
}
