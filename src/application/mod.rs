//! Application layer containing the payment bridge and its orchestration.
//!
//! `PaymentBridge` owns SDK initialization and the single pending session,
//! `ResultCorrelator` completes that session from platform notifications,
//! and `CheckoutFlow` strings both together with the parameter service.

pub mod bridge;
pub mod checkout;
pub mod correlator;
