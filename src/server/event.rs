//! In-process domain events.
//!
//! Handlers publish to the [`EventAggregator`] after their unit of work commits. Subscribers run
//! as separate tasks and never block the request.

use tokio::{sync::broadcast, task::JoinHandle};
use uuid::Uuid;

const CHANNEL_CAPACITY: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainEvent {
    /// An account became usable, through email activation or a first OpenID login.
    UserActivated { user_id: Uuid, user_name: String },
}

#[derive(Clone)]
pub struct EventAggregator {
    sender: broadcast::Sender<DomainEvent>,
}

impl Default for EventAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl EventAggregator {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    pub fn publish(&self, event: DomainEvent) {
        // Sending only fails when nobody subscribed
        if self.sender.send(event).is_err() {
            tracing::debug!("Domain event published without subscribers");
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.sender.subscribe()
    }

    /// Spawns a subscriber that logs every event.
    pub fn spawn_logger(&self) -> JoinHandle<()> {
        let mut receiver = self.subscribe();

        tokio::spawn(async move {
            loop {
                match receiver.recv().await {
                    Ok(DomainEvent::UserActivated { user_id, user_name }) => {
                        tracing::info!(%user_id, %user_name, "User activated");
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "Domain event logger fell behind");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        })
    }
}
