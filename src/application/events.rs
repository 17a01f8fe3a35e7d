use crate::application::pipeline::RenderCoordinator;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;

/// Host notification classes that trigger a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    EditorChanged,
    SelectionChanged,
    DocumentChanged,
}

/// Pause before resolving context after an editor switch: the host may
/// still report the previous editor's cursor position right after the
/// switch. Selection and content changes carry an accurate cursor and get
/// no delay.
pub const EDITOR_SWITCH_SETTLE: Duration = Duration::from_millis(50);

/// Subscribes to host notifications and triggers pipeline runs.
///
/// The gate neither coalesces nor suppresses overlapping runs; a burst of
/// notifications produces a burst of concurrent runs and the surfaces'
/// staleness guards sort out which one lands. A failing run terminates in a
/// defined render state and never takes the listener down with it.
pub struct EventGate {
    coordinator: Arc<RenderCoordinator>,
}

impl EventGate {
    pub fn new(coordinator: Arc<RenderCoordinator>) -> Self {
        Self { coordinator }
    }

    /// Consume notifications until the channel closes. Each event spawns
    /// one run.
    pub async fn listen(&self, mut events: UnboundedReceiver<HostEvent>) {
        while let Some(event) = events.recv().await {
            let coordinator = Arc::clone(&self.coordinator);
            tokio::spawn(async move {
                if event == HostEvent::EditorChanged {
                    tokio::time::sleep(EDITOR_SWITCH_SETTLE).await;
                }
                coordinator.run().await;
            });
        }
    }
}
