use async_trait::async_trait;
use dashmap::DashMap;
use dnsbench_application::ports::{BenchmarkEvent, EventPublisher, EventSubscription};
use tokio::sync::broadcast;

/// Events queued per run before the first subscriber arrives, and the margin
/// a slow subscriber gets before it starts missing intermediate events (§4.5).
const CHANNEL_CAPACITY: usize = 256;

/// C5. One broadcast channel per run, keyed by `run_id`. The channel is created
/// lazily on first publish or subscribe and removed once the run's scheduler
/// task drops its sender and all subscribers have drained the terminal event.
#[derive(Default)]
pub struct BroadcastEventBus {
    channels: DashMap<String, broadcast::Sender<BenchmarkEvent>>,
}

impl BroadcastEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    fn sender_for(&self, run_id: &str) -> broadcast::Sender<BenchmarkEvent> {
        self.channels
            .entry(run_id.to_string())
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0)
            .clone()
    }
}

#[async_trait]
impl EventPublisher for BroadcastEventBus {
    async fn publish(&self, event: BenchmarkEvent) {
        let run_id = event.run_id().to_string();
        let terminal = event.is_terminal();
        let sender = self.sender_for(&run_id);
        // No receivers is not an error: a run can complete before anyone subscribes.
        let _ = sender.send(event);
        if terminal {
            self.channels.remove(&run_id);
        }
    }

    async fn subscribe(&self, run_id: &str) -> Box<dyn EventSubscription> {
        let sender = self.sender_for(run_id);
        Box::new(BroadcastEventSubscription { receiver: sender.subscribe() })
    }
}

struct BroadcastEventSubscription {
    receiver: broadcast::Receiver<BenchmarkEvent>,
}

#[async_trait]
impl EventSubscription for BroadcastEventSubscription {
    async fn recv(&mut self) -> Option<BenchmarkEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => return Some(event),
                // Fell behind; intermediate events are allowed to drop (§4.5).
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}
