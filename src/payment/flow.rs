// src/payment/flow.rs
//! Checkout state machine: `details -> payment -> processing -> success`.
//!
//! The machine never talks to a processor itself. Submitting valid card
//! details yields an [`AuthorizationRequest`]; whoever owns the flow runs it
//! through an [`Authorizer`] and feeds the result back with
//! [`PaymentFlow::complete`]. While that is pending the flow sits in
//! `Processing` and refuses to close.

use serde::{Deserialize, Serialize};

use super::authorizer::{AuthorizationRequest, Authorizer, PaymentError, Receipt};
use super::card_input::{format_card_number, format_cvv, format_expiry_date, last_four};
use super::quote::Engagement;
use crate::notice::Notice;
use crate::utils::format_amount;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    Details,
    Payment,
    Processing,
    Success,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PaymentField {
    Email,
    CardNumber,
    ExpiryDate,
    Cvv,
    CardholderName,
}

#[derive(Clone, Default, PartialEq, Eq)]
pub struct PaymentForm {
    pub email: String,
    pub card_number: String,
    pub expiry_date: String,
    pub cvv: String,
    pub cardholder_name: String,
}

impl std::fmt::Debug for PaymentForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentForm")
            .field("email", &self.email)
            .field("card_last_four", &last_four(&self.card_number))
            .field("cardholder_name", &self.cardholder_name)
            .finish_non_exhaustive()
    }
}

impl PaymentForm {
    fn has_card_details(&self) -> bool {
        !self.card_number.is_empty()
            && !self.expiry_date.is_empty()
            && !self.cvv.is_empty()
            && !self.cardholder_name.is_empty()
    }

    /// Display-safe view: card number reduced to its last four digits, no CVV.
    pub fn masked(&self) -> MaskedPaymentForm {
        MaskedPaymentForm {
            email: self.email.clone(),
            cardholder_name: self.cardholder_name.clone(),
            card_last_four: last_four(&self.card_number),
            expiry_date: self.expiry_date.clone(),
            has_cvv: !self.cvv.is_empty(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaskedPaymentForm {
    pub email: String,
    pub cardholder_name: String,
    pub card_last_four: Option<String>,
    pub expiry_date: String,
    pub has_cvv: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; the flow did not move.
    Rejected(Notice),
    /// `details -> payment`.
    Advanced,
    /// `payment -> processing`. Authorize this and pass the result to `complete`.
    Authorize(AuthorizationRequest),
    /// Nothing to submit in the current state.
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    /// Closed. Call `reset` once the exit animation has finished.
    Closed,
    /// A charge is in flight; the flow stays open and untouched.
    Busy,
    AlreadyClosed,
}

#[derive(Debug, Clone)]
pub struct PaymentFlow {
    engagement: Engagement,
    step: Step,
    form: PaymentForm,
    open: bool,
    receipt: Option<Receipt>,
}

impl PaymentFlow {
    /// A closed flow for `engagement`, ready to `open`.
    pub fn new(engagement: Engagement) -> Self {
        Self {
            engagement,
            step: Step::Details,
            form: PaymentForm::default(),
            open: false,
            receipt: None,
        }
    }

    pub fn open(&mut self) {
        if !self.open {
            self.reset();
            self.open = true;
        }
    }

    pub fn engagement(&self) -> &Engagement {
        &self.engagement
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn form(&self) -> &PaymentForm {
        &self.form
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn receipt(&self) -> Option<&Receipt> {
        self.receipt.as_ref()
    }

    fn editable(&self) -> bool {
        self.open && matches!(self.step, Step::Details | Step::Payment)
    }

    /// Edit one field. Returns `false` when the flow does not accept input.
    pub fn update(&mut self, field: PaymentField, value: &str) -> bool {
        if !self.editable() {
            return false;
        }

        match field {
            PaymentField::Email => self.form.email = value.to_string(),
            PaymentField::CardNumber => self.form.card_number = format_card_number(value),
            PaymentField::ExpiryDate => self.form.expiry_date = format_expiry_date(value),
            PaymentField::Cvv => self.form.cvv = format_cvv(value),
            PaymentField::CardholderName => self.form.cardholder_name = value.to_string(),
        }
        true
    }

    pub fn submit(&mut self) -> SubmitOutcome {
        if !self.open {
            return SubmitOutcome::Ignored;
        }

        match self.step {
            Step::Details => {
                if self.form.email.is_empty() {
                    return SubmitOutcome::Rejected(Notice::destructive(
                        "Email required",
                        "Please enter your email address.",
                    ));
                }
                self.step = Step::Payment;
                SubmitOutcome::Advanced
            }
            Step::Payment => {
                if !self.form.has_card_details() {
                    return SubmitOutcome::Rejected(Notice::destructive(
                        "Missing information",
                        "Please fill in all payment details.",
                    ));
                }
                self.step = Step::Processing;
                SubmitOutcome::Authorize(AuthorizationRequest {
                    amount: self.engagement.grand_total(),
                    email: self.form.email.clone(),
                    cardholder_name: self.form.cardholder_name.clone(),
                    card_number: self.form.card_number.clone(),
                    expiry_date: self.form.expiry_date.clone(),
                    cvv: self.form.cvv.clone(),
                    description: self.engagement.project_title.clone(),
                })
            }
            Step::Processing | Step::Success => SubmitOutcome::Ignored,
        }
    }

    /// Apply the processor's answer. Ignored outside `Processing`.
    pub fn complete(&mut self, result: Result<Receipt, PaymentError>) -> Option<Notice> {
        if self.step != Step::Processing {
            return None;
        }

        match result {
            Ok(receipt) => {
                let notice = Notice::info(
                    "Payment Successful!",
                    format!(
                        "Payment of ${} has been processed successfully.",
                        format_amount(receipt.amount)
                    ),
                );
                self.receipt = Some(receipt);
                self.step = Step::Success;
                Some(notice)
            }
            Err(_) => {
                self.step = Step::Payment;
                Some(Notice::destructive(
                    "Payment Failed",
                    "There was an error processing your payment. Please try again.",
                ))
            }
        }
    }

    /// Submit and, when a charge is due, authorize it in one go.
    ///
    /// Suits a flow with a single owner. Shared flows should split the two
    /// halves so the authorization await does not hold their lock.
    pub async fn submit_with<A>(&mut self, authorizer: &A) -> Option<Notice>
    where
        A: Authorizer + ?Sized,
    {
        match self.submit() {
            SubmitOutcome::Rejected(notice) => Some(notice),
            SubmitOutcome::Authorize(request) => {
                let result = authorizer.authorize(&request).await;
                self.complete(result)
            }
            SubmitOutcome::Advanced | SubmitOutcome::Ignored => None,
        }
    }

    /// `payment -> details`, keeping what was typed.
    pub fn back(&mut self) -> bool {
        if self.open && self.step == Step::Payment {
            self.step = Step::Details;
            true
        } else {
            false
        }
    }

    pub fn close(&mut self) -> CloseOutcome {
        if !self.open {
            return CloseOutcome::AlreadyClosed;
        }
        if self.step == Step::Processing {
            return CloseOutcome::Busy;
        }
        self.open = false;
        CloseOutcome::Closed
    }

    /// Back to `details` with every field cleared.
    pub fn reset(&mut self) {
        if self.step == Step::Processing {
            return;
        }
        self.step = Step::Details;
        self.form = PaymentForm::default();
        self.receipt = None;
    }
}
