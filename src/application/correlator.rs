use crate::application::bridge::SharedState;
use crate::domain::notification::ActivityResult;
use crate::domain::outcome::{OutcomeStatus, PaymentOutcome, decode_payload};
use crate::domain::session::SessionStatus;
use serde_json::Value;
use tracing::{debug, info, warn};

/// What happened to an inbound notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Correlation {
    /// Tagged for some other external interaction.
    Foreign,
    /// A payment result with no session waiting for it (late or duplicate).
    Unclaimed,
    /// Completed the pending session with this status.
    Resolved(OutcomeStatus),
}

/// Routes payment-result notifications to the pending session.
///
/// Resolution takes the session out of the bridge's slot under the lock,
/// so a second notification for the same session finds nothing to resolve.
#[derive(Clone)]
pub struct ResultCorrelator {
    state: SharedState,
    request_code: i32,
}

impl ResultCorrelator {
    pub(crate) fn new(state: SharedState, request_code: i32) -> Self {
        Self {
            state,
            request_code,
        }
    }

    pub fn request_code(&self) -> i32 {
        self.request_code
    }

    pub async fn dispatch(&self, result: &ActivityResult) -> Correlation {
        self.on_external_result(result.request_code, result.payload.as_ref())
            .await
    }

    pub async fn on_external_result(&self, request_code: i32, payload: Option<&Value>) -> Correlation {
        if request_code != self.request_code {
            debug!(request_code, "ignoring notification for another request code");
            return Correlation::Foreign;
        }

        let mut state = self.state.lock().await;
        let Some(session) = state.session.take() else {
            warn!(request_code, "payment result arrived with no pending session");
            return Correlation::Unclaimed;
        };

        let outcome = match decode_payload(payload) {
            Ok(outcome) => {
                if outcome.transaction_id != session.transaction_id {
                    warn!(
                        expected = %session.transaction_id,
                        received = %outcome.transaction_id,
                        "payment result names a different transaction"
                    );
                }
                state.status = SessionStatus::Completed;
                outcome
            }
            Err(err) => {
                warn!(
                    transaction_id = %session.transaction_id,
                    error = %err,
                    "undecodable payment result"
                );
                state.status = SessionStatus::Failed;
                PaymentOutcome::error(session.transaction_id.clone(), err.to_string())
            }
        };

        let status = outcome.status;
        info!(
            transaction_id = %outcome.transaction_id,
            %status,
            elapsed_ms = session.age().num_milliseconds(),
            "payment session resolved"
        );
        // Sent before the lock is released so no other path can observe an
        // empty slot while the result is still in flight.
        if !session.resolve(outcome) {
            debug!("caller stopped waiting before the result arrived");
        }
        drop(state);
        Correlation::Resolved(status)
    }
}
