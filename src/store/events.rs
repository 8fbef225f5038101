//! In-process change notifications for presentation layers.

use parking_lot::Mutex;
use std::sync::mpsc::{channel, Receiver, Sender};

/// A single observable field of the store changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationEvent<T> {
    TabSelected { tab: T },
    StackChanged { tab: T, depth: usize },
    SheetsChanged { depth: usize },
    CoversChanged { depth: usize },
}

/// Fan-out of events to every live subscriber.
pub struct EventBus<T> {
    subscribers: Mutex<Vec<Sender<NavigationEvent<T>>>>,
}

impl<T> Default for EventBus<T> {
    fn default() -> Self {
        Self {
            subscribers: Mutex::new(Vec::new()),
        }
    }
}

impl<T: Clone> EventBus<T> {
    pub fn subscribe(&self) -> Receiver<NavigationEvent<T>> {
        let (sender, receiver) = channel();
        self.subscribers.lock().push(sender);
        receiver
    }

    /// Deliver `event`. Subscribers whose receiver was dropped are removed.
    pub fn emit(&self, event: NavigationEvent<T>) {
        let mut subscribers = self.subscribers.lock();
        subscribers.retain(|sender| sender.send(event.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().len()
    }

    /// Drop every sender so receivers observe disconnection.
    pub fn close(&self) {
        self.subscribers.lock().clear();
    }
}
