use crate::application::correlator::ResultCorrelator;
use crate::config::BridgeConfig;
use crate::domain::outcome::PaymentOutcome;
use crate::domain::params::{Environment, PaymentParams};
use crate::domain::ports::{HostContextBox, PaymentSdkBox};
use crate::domain::session::{PaymentSession, SessionResult, SessionStatus};
use crate::error::{InitError, LaunchError, SessionError};
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::oneshot::error::TryRecvError;
use tokio::sync::{Mutex, oneshot};
use tracing::{debug, error, info, warn};

/// Mutable bridge state. `session` is the single completion slot.
#[derive(Debug, Default)]
pub(crate) struct BridgeState {
    pub(crate) status: SessionStatus,
    pub(crate) merchant: Option<(String, Environment)>,
    pub(crate) session: Option<PaymentSession>,
    next_session_id: u64,
}

pub(crate) type SharedState = Arc<Mutex<BridgeState>>;

/// Bridges the external payment SDK into a single awaited outcome.
///
/// At most one session is pending at a time. A launched session is
/// completed by the `ResultCorrelator`, by host teardown, by its timeout,
/// or immediately when the SDK refuses to launch.
#[derive(Clone)]
pub struct PaymentBridge {
    inner: Arc<BridgeInner>,
}

struct BridgeInner {
    sdk: PaymentSdkBox,
    host: HostContextBox,
    config: BridgeConfig,
    state: SharedState,
}

impl PaymentBridge {
    /// Creates a new, uninitialized `PaymentBridge`.
    ///
    /// # Arguments
    ///
    /// * `sdk` - The external payment SDK.
    /// * `host` - The host surface the SDK attaches its UI to.
    /// * `config` - Request code and result timeout.
    pub fn new(sdk: PaymentSdkBox, host: HostContextBox, config: BridgeConfig) -> Self {
        Self {
            inner: Arc::new(BridgeInner {
                sdk,
                host,
                config,
                state: SharedState::default(),
            }),
        }
    }

    /// Configures the SDK for a merchant.
    ///
    /// Calling this again re-applies the configuration; the SDK has no
    /// teardown step.
    pub async fn initialize(
        &self,
        merchant_key: &str,
        environment: Environment,
    ) -> Result<(), InitError> {
        let screen = self
            .inner
            .host
            .foreground_screen()
            .ok_or(InitError::HostUnavailable)?;

        let mut state = self.inner.state.lock().await;
        self.inner.sdk.init(screen, merchant_key, environment)?;
        state.merchant = Some((merchant_key.to_string(), environment));
        if state.status == SessionStatus::Uninitialized {
            state.status = SessionStatus::Initialized;
        }
        info!(%environment, status = %state.status, "payment SDK initialized");
        Ok(())
    }

    /// Starts the external payment UI and returns a handle to its result.
    ///
    /// Rejections here are synchronous. Once a session is accepted every
    /// further failure, including the SDK refusing to launch, arrives
    /// through the returned `PendingPayment`.
    pub async fn launch(&self, params: PaymentParams) -> Result<PendingPayment, LaunchError> {
        let mut state = self.inner.state.lock().await;
        let Some((_, environment)) = &state.merchant else {
            return Err(LaunchError::NotInitialized);
        };
        let environment = *environment;
        if let Some(active) = state.session.as_ref().filter(|s| s.status.is_pending()) {
            warn!(
                transaction_id = %params.transaction_id,
                pending = %active.transaction_id,
                "rejecting launch while a payment session is pending"
            );
            return Err(LaunchError::SessionBusy);
        }
        let screen = self
            .inner
            .host
            .foreground_screen()
            .ok_or(LaunchError::HostUnavailable)?;

        state.next_session_id += 1;
        let session_id = state.next_session_id;
        let (mut session, receiver) = PaymentSession::open(
            session_id,
            self.inner.config.request_code,
            params.transaction_id.clone(),
        );
        state.status = SessionStatus::Launching;
        debug!(
            session_id,
            transaction_id = %session.transaction_id,
            request_code = session.request_code,
            %environment,
            "launching payment UI"
        );

        // The lock stays held across the SDK call so no result can be
        // correlated before the session is in place.
        match self.inner.sdk.launch_payment_ui(screen, &params) {
            Ok(()) => {
                session.status = SessionStatus::AwaitingResult;
                state.status = SessionStatus::AwaitingResult;
                info!(
                    session_id,
                    transaction_id = %session.transaction_id,
                    "awaiting payment result"
                );
                state.session = Some(session);
                if let Some(timeout) = self.inner.config.result_timeout {
                    tokio::spawn(expire_after(
                        Arc::downgrade(&self.inner.state),
                        session_id,
                        timeout,
                    ));
                }
            }
            Err(err) => {
                error!(
                    session_id,
                    transaction_id = %session.transaction_id,
                    error = %err,
                    "payment UI failed to launch"
                );
                state.status = SessionStatus::Failed;
                session.resolve(PaymentOutcome::error(
                    &params.transaction_id,
                    format!("failed to launch payment UI: {err}"),
                ));
            }
        }

        Ok(PendingPayment {
            session_id,
            transaction_id: params.transaction_id,
            receiver,
            ready: None,
            state: Arc::clone(&self.inner.state),
        })
    }

    /// Rejects the pending session, if any, because the host went away.
    ///
    /// Returns `true` when a session was cancelled.
    pub async fn on_host_destroyed(&self) -> bool {
        let mut state = self.inner.state.lock().await;
        cancel_pending(&mut state, "host was destroyed before the payment result arrived")
    }

    pub async fn status(&self) -> SessionStatus {
        self.inner.state.lock().await.status
    }

    /// The routing end of the bridge, to be wired to the platform's
    /// activity-result notifications.
    pub fn correlator(&self) -> ResultCorrelator {
        ResultCorrelator::new(
            Arc::clone(&self.inner.state),
            self.inner.config.request_code,
        )
    }
}

impl Drop for BridgeInner {
    fn drop(&mut self) {
        match self.state.try_lock() {
            Ok(mut state) => {
                cancel_pending(&mut state, "payment bridge was dropped");
            }
            Err(_) => warn!(
                "payment bridge dropped while its state was locked; \
                 a pending session ends only on its timeout or result"
            ),
        }
    }
}

fn cancel_pending(state: &mut BridgeState, reason: &str) -> bool {
    match state.session.take() {
        Some(session) => {
            warn!(
                transaction_id = %session.transaction_id,
                age_ms = session.age().num_milliseconds(),
                reason,
                "cancelling pending payment session"
            );
            state.status = SessionStatus::Failed;
            session.reject(SessionError::Cancelled(reason.to_string()));
            true
        }
        None => false,
    }
}

/// Enforces a session's deadline whether or not anyone awaits its outcome.
///
/// Only the session with `session_id` is expired; a later session in the
/// same slot is left alone.
async fn expire_after(state: Weak<Mutex<BridgeState>>, session_id: u64, timeout: Duration) {
    tokio::time::sleep(timeout).await;
    let Some(state) = state.upgrade() else {
        return;
    };
    let mut state = state.lock().await;
    if let Some(session) = take_session(&mut state, session_id) {
        warn!(
            transaction_id = %session.transaction_id,
            ?timeout,
            "payment session timed out"
        );
        session.reject(SessionError::Timeout(timeout));
    }
}

fn take_session(state: &mut BridgeState, session_id: u64) -> Option<PaymentSession> {
    if !state
        .session
        .as_ref()
        .is_some_and(|session| session.id == session_id)
    {
        return None;
    }
    state.status = SessionStatus::Failed;
    state.session.take()
}

/// A launched payment whose outcome has not been collected yet.
///
/// Dropping the handle before the outcome arrives abandons the session and
/// frees the bridge for the next launch.
#[derive(Debug)]
pub struct PendingPayment {
    session_id: u64,
    transaction_id: String,
    receiver: oneshot::Receiver<SessionResult>,
    ready: Option<SessionResult>,
    state: SharedState,
}

impl PendingPayment {
    pub fn transaction_id(&self) -> &str {
        &self.transaction_id
    }

    /// Non-blocking check. Once this returns `false` it stays `false`.
    pub fn is_pending(&mut self) -> bool {
        if self.ready.is_some() {
            return false;
        }
        match self.receiver.try_recv() {
            Ok(result) => {
                self.ready = Some(result);
                false
            }
            Err(TryRecvError::Empty) => true,
            Err(TryRecvError::Closed) => {
                self.ready = Some(Err(dropped()));
                false
            }
        }
    }

    /// Waits for the session's single terminal signal.
    ///
    /// Whoever takes the session out of the bridge (the correlator, the
    /// deadline or host teardown) sends exactly one result.
    pub async fn outcome(mut self) -> SessionResult {
        if let Some(result) = self.ready.take() {
            return result;
        }
        (&mut self.receiver)
            .await
            .unwrap_or_else(|_| Err(dropped()))
    }
}

impl Drop for PendingPayment {
    fn drop(&mut self) {
        let abandon = |state: &mut BridgeState, session_id: u64| {
            if let Some(session) = take_session(state, session_id) {
                info!(
                    transaction_id = %session.transaction_id,
                    "payment handle dropped before the result arrived"
                );
            }
        };

        match self.state.try_lock() {
            Ok(mut state) => abandon(&mut *state, self.session_id),
            Err(_) => match Handle::try_current() {
                Ok(handle) => {
                    let state = Arc::clone(&self.state);
                    let session_id = self.session_id;
                    handle.spawn(async move {
                        abandon(&mut *state.lock().await, session_id);
                    });
                }
                Err(_) => warn!(
                    transaction_id = %self.transaction_id,
                    "payment handle dropped outside a runtime; session stays pending"
                ),
            },
        }
    }
}

fn dropped() -> SessionError {
    SessionError::Cancelled("payment session ended without a result".to_string())
}
