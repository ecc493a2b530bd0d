//! Repository change notification.
//!
//! The repository publishes an event for every mutation; presentation layers
//! (tree, graph, calendar) hold a receiver and drain it once per frame
//! instead of being re-invoked imperatively after each operation.

use flume::{Receiver, Sender};

#[derive(Debug, Clone, PartialEq)]
pub enum RepoEvent {
    NoteCreated(String),
    NoteUpdated(String),
    NoteDeleted(String),
    NotebookCreated(String),
    ActiveNoteChanged(Option<String>),
    SettingsChanged,
    StoreSaved,
}

/// Unbounded channel for [`RepoEvent`]s. One consumer drains the stream
/// (receivers are competing, not broadcast); publishing never blocks.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: Sender<RepoEvent>,
    receiver: Receiver<RepoEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (sender, receiver) = flume::unbounded();
        Self { sender, receiver }
    }

    pub fn publish(&self, event: RepoEvent) {
        // A send only fails when every receiver is gone, which means nobody
        // is rendering anymore.
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> Receiver<RepoEvent> {
        self.receiver.clone()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn published_events_arrive_in_order() {
        let bus = EventBus::new();
        let rx = bus.subscribe();
        bus.publish(RepoEvent::NoteCreated("a".into()));
        bus.publish(RepoEvent::NoteDeleted("a".into()));

        let seen: Vec<_> = rx.try_iter().collect();
        assert_eq!(
            seen,
            vec![
                RepoEvent::NoteCreated("a".into()),
                RepoEvent::NoteDeleted("a".into())
            ]
        );
    }

    #[test]
    fn publishing_without_subscribers_does_not_panic() {
        let bus = EventBus::new();
        drop(bus.subscribe());
        bus.publish(RepoEvent::StoreSaved);
    }
}
