//! Command-channel front end for a running container.

use tokio::sync::mpsc;

use super::event::RecordEvent;

/// Clonable dispatch handle for a container moved onto the runtime with
/// [`super::RecordStateContainer::spawn`].
///
/// Dispatch is fire-and-forget: there is no return value, and outcomes are
/// only observable through the emission stream. Events queue in dispatch
/// order and the container drains them one at a time.
#[derive(Clone)]
pub struct ContainerHandle {
    sender: mpsc::Sender<RecordEvent>,
}

impl ContainerHandle {
    pub(super) fn new(sender: mpsc::Sender<RecordEvent>) -> Self {
        Self { sender }
    }

    /// Queue `event` for the container. Waits only for queue space, never
    /// for the event to be handled.
    pub async fn dispatch(&self, event: RecordEvent) {
        if self.sender.send(event).await.is_err() {
            tracing::warn!("record container is gone; event dropped");
        }
    }
}
