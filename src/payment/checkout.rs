// src/payment/checkout.rs
//! Server-held payment flows keyed by session id.

use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::authorizer::{Authorizer, Receipt};
use super::flow::{CloseOutcome, MaskedPaymentForm, PaymentField, PaymentFlow, Step, SubmitOutcome};
use super::quote::{CostBreakdown, Engagement};
use crate::app_log;
use crate::notice::Notice;

pub const DEFAULT_EXIT_DELAY: Duration = Duration::from_millis(300);
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("Checkout session {0} not found")]
    NotFound(Uuid),

    #[error("Payment is being processed")]
    PaymentInProgress,

    #[error("Checkout session {0} is closed")]
    Closed(Uuid),

    #[error("{}", .0.description)]
    Invalid(Notice),
}

/// What a client gets back after every checkout call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutView {
    pub session_id: Uuid,
    pub step: Step,
    pub open: bool,
    pub quote: CostBreakdown,
    pub form: MaskedPaymentForm,
    pub receipt: Option<Receipt>,
    pub notice: Option<Notice>,
}

impl CheckoutView {
    fn of(session_id: Uuid, flow: &PaymentFlow, notice: Option<Notice>) -> Self {
        Self {
            session_id,
            step: flow.step(),
            open: flow.is_open(),
            quote: flow.engagement().breakdown(),
            form: flow.form().masked(),
            receipt: flow.receipt().cloned(),
            notice,
        }
    }
}

struct Session {
    flow: PaymentFlow,
    touched: Instant,
}

impl Session {
    fn touch(&mut self) -> &mut PaymentFlow {
        self.touched = Instant::now();
        &mut self.flow
    }
}

type Sessions = HashMap<Uuid, Session>;

fn session_mut(sessions: &mut Sessions, session_id: Uuid) -> Result<&mut PaymentFlow, CheckoutError> {
    sessions
        .get_mut(&session_id)
        .map(Session::touch)
        .ok_or(CheckoutError::NotFound(session_id))
}

/// Drop sessions untouched for `idle_timeout`. A session mid-authorization is kept.
fn sweep(sessions: &mut Sessions, idle_timeout: Duration) -> usize {
    let before = sessions.len();
    sessions.retain(|_, session| {
        session.flow.step() == Step::Processing || session.touched.elapsed() < idle_timeout
    });
    before - sessions.len()
}

#[derive(Clone)]
pub struct CheckoutService {
    sessions: Arc<Mutex<Sessions>>,
    authorizer: Arc<dyn Authorizer>,
    exit_delay: Duration,
    idle_timeout: Duration,
}

impl CheckoutService {
    pub fn new(authorizer: Arc<dyn Authorizer>, exit_delay: Duration) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            authorizer,
            exit_delay,
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
        }
    }

    pub fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    pub async fn start(&self, engagement: Engagement) -> CheckoutView {
        let session_id = Uuid::new_v4();
        let mut flow = PaymentFlow::new(engagement);
        flow.open();

        let view = CheckoutView::of(session_id, &flow, None);
        {
            let mut sessions = self.sessions.lock().await;
            let expired = sweep(&mut sessions, self.idle_timeout);
            if expired > 0 {
                app_log!(debug, "Expired {} idle checkout sessions", expired);
            }
            sessions.insert(
                session_id,
                Session {
                    flow,
                    touched: Instant::now(),
                },
            );
        }

        app_log!(
            info,
            "Checkout {} started for consultant {} ({} total)",
            session_id,
            view.quote.consultant_id,
            view.quote.grand_total
        );
        view
    }

    pub async fn view(&self, session_id: Uuid) -> Result<CheckoutView, CheckoutError> {
        let mut sessions = self.sessions.lock().await;
        let flow = session_mut(&mut sessions, session_id)?;
        Ok(CheckoutView::of(session_id, flow, None))
    }

    /// Apply field edits in order. Fields the flow refuses are skipped.
    pub async fn update(
        &self,
        session_id: Uuid,
        changes: &[(PaymentField, String)],
    ) -> Result<CheckoutView, CheckoutError> {
        let mut sessions = self.sessions.lock().await;
        let flow = session_mut(&mut sessions, session_id)?;

        if flow.step() == Step::Processing {
            return Err(CheckoutError::PaymentInProgress);
        }
        if !flow.is_open() {
            return Err(CheckoutError::Closed(session_id));
        }

        for (field, value) in changes {
            flow.update(*field, value);
        }
        Ok(CheckoutView::of(session_id, flow, None))
    }

    /// Advance the flow. From `payment` this authorizes the charge; the
    /// session lock is released for the duration of the authorization.
    pub async fn submit(&self, session_id: Uuid) -> Result<CheckoutView, CheckoutError> {
        let request = {
            let mut sessions = self.sessions.lock().await;
            let flow = session_mut(&mut sessions, session_id)?;

            match flow.submit() {
                SubmitOutcome::Rejected(notice) => return Err(CheckoutError::Invalid(notice)),
                SubmitOutcome::Advanced => return Ok(CheckoutView::of(session_id, flow, None)),
                SubmitOutcome::Ignored => {
                    return match flow.step() {
                        Step::Processing => Err(CheckoutError::PaymentInProgress),
                        _ if !flow.is_open() => Err(CheckoutError::Closed(session_id)),
                        _ => Ok(CheckoutView::of(session_id, flow, None)),
                    }
                }
                SubmitOutcome::Authorize(request) => request,
            }
        };

        app_log!(info, "Authorizing {} for checkout {}", request.amount, session_id);
        let result = self.authorizer.authorize(&request).await;
        if let Err(e) = &result {
            app_log!(warn, "Authorization failed for checkout {}: {}", session_id, e);
        }

        let mut sessions = self.sessions.lock().await;
        let flow = session_mut(&mut sessions, session_id)?;
        let notice = flow.complete(result);
        Ok(CheckoutView::of(session_id, flow, notice))
    }

    pub async fn back(&self, session_id: Uuid) -> Result<CheckoutView, CheckoutError> {
        let mut sessions = self.sessions.lock().await;
        let flow = session_mut(&mut sessions, session_id)?;
        flow.back();
        Ok(CheckoutView::of(session_id, flow, None))
    }

    /// Close the session. Refused while a charge is in flight; otherwise the
    /// session is dropped once the exit delay has passed.
    pub async fn close(&self, session_id: Uuid) -> Result<CheckoutView, CheckoutError> {
        let view = {
            let mut sessions = self.sessions.lock().await;
            let flow = session_mut(&mut sessions, session_id)?;

            match flow.close() {
                CloseOutcome::Busy => return Err(CheckoutError::PaymentInProgress),
                CloseOutcome::AlreadyClosed => return Ok(CheckoutView::of(session_id, flow, None)),
                CloseOutcome::Closed => CheckoutView::of(session_id, flow, None),
            }
        };

        let sessions = Arc::clone(&self.sessions);
        let delay = self.exit_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut sessions = sessions.lock().await;
            if sessions.remove(&session_id).is_some() {
                app_log!(debug, "Checkout {} released", session_id);
            }
        });

        Ok(view)
    }

    pub async fn active_sessions(&self) -> usize {
        self.sessions.lock().await.len()
    }

    /// Remove idle sessions now. Returns how many were dropped.
    pub async fn expire_idle(&self) -> usize {
        sweep(&mut *self.sessions.lock().await, self.idle_timeout)
    }

    /// Sweep idle sessions every `interval` for as long as the service lives.
    pub fn spawn_sweeper(&self, interval: Duration) -> tokio::task::JoinHandle<()> {
        let service = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let expired = service.expire_idle().await;
                if expired > 0 {
                    app_log!(info, "Expired {} idle checkout sessions", expired);
                }
            }
        })
    }
}
