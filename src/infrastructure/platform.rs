use crate::application::correlator::ResultCorrelator;
use crate::domain::notification::ActivityResult;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::trace;

/// The host's activity-result callback, as a channel.
pub fn notification_channel() -> (
    UnboundedSender<ActivityResult>,
    UnboundedReceiver<ActivityResult>,
) {
    mpsc::unbounded_channel()
}

/// Feeds every notification into `correlator` until all senders are gone.
pub fn spawn_result_dispatcher(
    mut notifications: UnboundedReceiver<ActivityResult>,
    correlator: ResultCorrelator,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(result) = notifications.recv().await {
            let correlation = correlator.dispatch(&result).await;
            trace!(request_code = result.request_code, ?correlation, "notification dispatched");
        }
    })
}
