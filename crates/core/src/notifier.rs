//! Reload notification sent to the rendering host after configuration changes.

use crossbeam::channel::{self, Receiver, Sender};
use log::{debug, info, warn};

/// Fire-and-forget "configuration changed, re-read it" signal.
///
/// Implementations must not block and must not report delivery failures to
/// the caller.
pub trait ReloadNotifier: Send + Sync {
    fn notify(&self);
}

/// Type-erased notifier for dynamic dispatch
pub type BoxedNotifier = Box<dyn ReloadNotifier>;

/// Notifier that only records the request in the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl ReloadNotifier for LogNotifier {
    fn notify(&self) {
        info!("Reload requested for overlay host");
    }
}

/// Notifier that posts onto a channel, for in-process renderers and tests
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    sender: Sender<()>,
}

impl ChannelNotifier {
    /// Create a notifier together with the receiving end
    pub fn new() -> (Self, Receiver<()>) {
        let (sender, receiver) = channel::unbounded();
        (Self { sender }, receiver)
    }
}

impl ReloadNotifier for ChannelNotifier {
    fn notify(&self) {
        match self.sender.try_send(()) {
            Ok(()) => debug!("Reload notification posted"),
            Err(e) => warn!("Reload notification dropped: {}", e),
        }
    }
}

impl<T: ReloadNotifier + ?Sized> ReloadNotifier for std::sync::Arc<T> {
    fn notify(&self) {
        (**self).notify()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_notifier_delivers_each_signal() {
        let (notifier, receiver) = ChannelNotifier::new();
        notifier.notify();
        notifier.notify();
        assert_eq!(receiver.try_iter().count(), 2);
    }

    #[test]
    fn test_channel_notifier_survives_closed_receiver() {
        let (notifier, receiver) = ChannelNotifier::new();
        drop(receiver);
        notifier.notify();
    }
}
