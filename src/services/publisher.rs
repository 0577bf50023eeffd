use std::sync::{Mutex, MutexGuard};

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Push-based signal with any number of subscribers.
///
/// Every published value reaches every live subscriber, in publish order.
/// Subscribers whose receiver was dropped are pruned on the next publish.
pub struct Publisher<T> {
    subscribers: Mutex<Vec<UnboundedSender<T>>>,
}

impl<T: Clone> Publisher<T> {
    pub fn new() -> Self {
        Self {
            subscribers: Mutex::new(Vec::new()),
        }
    }

    pub fn subscribe(&self) -> UnboundedReceiver<T> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.lock().push(tx);
        rx
    }

    pub fn publish(&self, value: T) {
        self.lock().retain(|tx| tx.send(value.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<UnboundedSender<T>>> {
        self.subscribers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<T: Clone> Default for Publisher<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_subscriber_gets_every_value() {
        let publisher = Publisher::new();
        let mut first = publisher.subscribe();
        let mut second = publisher.subscribe();

        publisher.publish(1);
        publisher.publish(1);
        publisher.publish(2);

        for rx in [&mut first, &mut second] {
            assert_eq!(rx.try_recv().unwrap(), 1);
            assert_eq!(rx.try_recv().unwrap(), 1);
            assert_eq!(rx.try_recv().unwrap(), 2);
            assert!(rx.try_recv().is_err());
        }
    }

    #[test]
    fn test_late_subscriber_only_sees_later_values() {
        let publisher = Publisher::new();
        publisher.publish("early");

        let mut rx = publisher.subscribe();
        publisher.publish("late");

        assert_eq!(rx.try_recv().unwrap(), "late");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_dropped_subscribers_are_pruned() {
        let publisher = Publisher::new();
        let kept = publisher.subscribe();
        let dropped = publisher.subscribe();
        assert_eq!(publisher.subscriber_count(), 2);

        drop(dropped);
        publisher.publish(());

        assert_eq!(publisher.subscriber_count(), 1);
        drop(kept);
    }
}
