use std::sync::Mutex;
use tracing::info;

/// Fire-and-forget sink for queue-management events. Recording must never
/// block the wizard and failures are ignored.
pub trait EventSink {
    fn record(&self, event: &str);
}

/// Writes each event to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn record(&self, event: &str) {
        info!(target: "helpq::events", event, "queue management event");
    }
}

/// Collects events in memory so tests can assert on order and count.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<String> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

impl EventSink for MemorySink {
    fn record(&self, event: &str) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.to_string());
        }
    }
}
