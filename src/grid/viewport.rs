//! Terminal viewport notifications

use tokio::sync::watch;

/// Current drawable size in terminal cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Publishes viewport changes to every subscribed grid
pub struct ViewportBus {
    tx: watch::Sender<Viewport>,
}

impl ViewportBus {
    pub fn new(initial: Viewport) -> Self {
        let (tx, _) = watch::channel(initial);
        Self { tx }
    }

    /// Publish a new size; unchanged sizes do not wake subscribers
    pub fn publish(&self, viewport: Viewport) {
        self.tx.send_if_modified(|current| {
            if *current == viewport {
                false
            } else {
                *current = viewport;
                true
            }
        });
    }

    pub fn current(&self) -> Viewport {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> ViewportSubscription {
        ViewportSubscription {
            rx: self.tx.subscribe(),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

/// A grid's listener; dropping it unsubscribes
pub struct ViewportSubscription {
    rx: watch::Receiver<Viewport>,
}

impl ViewportSubscription {
    pub fn current(&self) -> Viewport {
        *self.rx.borrow()
    }

    /// Returns the new size if it changed since the last poll
    pub fn poll_changed(&mut self) -> Option<Viewport> {
        match self.rx.has_changed() {
            Ok(true) => Some(*self.rx.borrow_and_update()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscriber_sees_changes_once() {
        let bus = ViewportBus::new(Viewport::new(80, 24));
        let mut sub = bus.subscribe();
        assert_eq!(sub.current(), Viewport::new(80, 24));
        assert_eq!(sub.poll_changed(), None);

        bus.publish(Viewport::new(120, 40));
        assert_eq!(sub.poll_changed(), Some(Viewport::new(120, 40)));
        assert_eq!(sub.poll_changed(), None);
    }

    #[test]
    fn same_size_does_not_notify() {
        let bus = ViewportBus::new(Viewport::new(80, 24));
        let mut sub = bus.subscribe();
        bus.publish(Viewport::new(80, 24));
        assert_eq!(sub.poll_changed(), None);
    }

    #[test]
    fn dropping_subscription_releases_listener() {
        let bus = ViewportBus::new(Viewport::default());
        let sub = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 1);
        drop(sub);
        assert_eq!(bus.subscriber_count(), 0);
    }
}
