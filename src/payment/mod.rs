// src/payment/mod.rs
//! Engagement pricing and the checkout flow.

pub mod authorizer;
pub mod card_input;
pub mod checkout;
pub mod flow;
pub mod quote;

pub use authorizer::{AuthorizationRequest, Authorizer, PaymentError, Receipt, SimulatedAuthorizer};
pub use checkout::{CheckoutError, CheckoutService, CheckoutView};
pub use flow::{CloseOutcome, PaymentField, PaymentFlow, PaymentForm, Step, SubmitOutcome};
pub use quote::{
    CostBreakdown, Engagement, QuoteError, DEFAULT_ESTIMATED_HOURS, DEFAULT_PROJECT_TITLE,
    MAX_ESTIMATED_HOURS,
};
