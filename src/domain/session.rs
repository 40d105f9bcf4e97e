use crate::domain::outcome::PaymentOutcome;
use crate::error::SessionError;
use chrono::{DateTime, Utc};
use std::fmt;
use tokio::sync::oneshot;

pub type SessionResult = Result<PaymentOutcome, SessionError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionStatus {
    #[default]
    Uninitialized,
    Initialized,
    Launching,
    AwaitingResult,
    Completed,
    Failed,
}

impl SessionStatus {
    /// A session in either of these states owns the completion slot.
    pub fn is_pending(self) -> bool {
        matches!(self, Self::Launching | Self::AwaitingResult)
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Uninitialized => "uninitialized",
            Self::Initialized => "initialized",
            Self::Launching => "launching",
            Self::AwaitingResult => "awaiting_result",
            Self::Completed => "completed",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// One in-flight payment attempt.
///
/// The session exclusively owns the sender half of its completion channel.
/// `resolve` and `reject` consume the session, so a completed session
/// cannot be completed again.
#[derive(Debug)]
pub struct PaymentSession {
    pub id: u64,
    pub status: SessionStatus,
    pub request_code: i32,
    pub transaction_id: String,
    pub started_at: DateTime<Utc>,
    completion: oneshot::Sender<SessionResult>,
}

impl PaymentSession {
    pub fn open(
        id: u64,
        request_code: i32,
        transaction_id: impl Into<String>,
    ) -> (Self, oneshot::Receiver<SessionResult>) {
        let (completion, receiver) = oneshot::channel();
        let session = Self {
            id,
            status: SessionStatus::Launching,
            request_code,
            transaction_id: transaction_id.into(),
            started_at: Utc::now(),
            completion,
        };
        (session, receiver)
    }

    /// Returns `false` when the caller already dropped its handle.
    pub fn resolve(self, outcome: PaymentOutcome) -> bool {
        self.completion.send(Ok(outcome)).is_ok()
    }

    pub fn reject(self, error: SessionError) -> bool {
        self.completion.send(Err(error)).is_ok()
    }

    pub fn age(&self) -> chrono::Duration {
        Utc::now() - self.started_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_delivers_outcome() {
        let (session, mut receiver) = PaymentSession::open(1, 7, "T1");
        assert_eq!(session.status, SessionStatus::Launching);
        assert!(receiver.try_recv().is_err());

        assert!(session.resolve(PaymentOutcome::error("T1", "boom")));
        let delivered = receiver.try_recv().unwrap().unwrap();
        assert_eq!(delivered.transaction_id, "T1");
    }

    #[test]
    fn test_reject_after_receiver_dropped() {
        let (session, receiver) = PaymentSession::open(1, 7, "T1");
        drop(receiver);
        assert!(!session.reject(SessionError::Cancelled("gone".to_string())));
    }

    #[test]
    fn test_pending_states() {
        assert!(SessionStatus::Launching.is_pending());
        assert!(SessionStatus::AwaitingResult.is_pending());
        assert!(!SessionStatus::Completed.is_pending());
        assert!(!SessionStatus::Failed.is_pending());
        assert!(!SessionStatus::Initialized.is_pending());
    }
}
