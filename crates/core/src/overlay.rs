//! Switch for the running overlay.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// The process that draws widget sets on screen.
///
/// The store power-cycles an enabled host after creating a set so the new set
/// gets a window.
pub trait OverlayHost: Send + Sync {
    fn is_enabled(&self) -> bool;
    fn set_enabled(&self, enabled: bool);
}

/// Type-erased overlay host for dynamic dispatch
pub type BoxedOverlayHost = Box<dyn OverlayHost>;

/// In-process overlay switch that counts state changes
#[derive(Debug, Default)]
pub struct OverlayFlag {
    enabled: AtomicBool,
    transitions: AtomicUsize,
}

impl OverlayFlag {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled: AtomicBool::new(enabled),
            transitions: AtomicUsize::new(0),
        }
    }

    /// Number of times the flag actually changed value
    pub fn transitions(&self) -> usize {
        self.transitions.load(Ordering::SeqCst)
    }
}

impl OverlayHost for OverlayFlag {
    fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    fn set_enabled(&self, enabled: bool) {
        if self.enabled.swap(enabled, Ordering::SeqCst) != enabled {
            self.transitions.fetch_add(1, Ordering::SeqCst);
        }
    }
}

impl<T: OverlayHost + ?Sized> OverlayHost for std::sync::Arc<T> {
    fn is_enabled(&self) -> bool {
        (**self).is_enabled()
    }

    fn set_enabled(&self, enabled: bool) {
        (**self).set_enabled(enabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_flag_counts_real_changes() {
        let flag = OverlayFlag::new(false);
        flag.set_enabled(false);
        assert_eq!(flag.transitions(), 0);
        flag.set_enabled(true);
        flag.set_enabled(true);
        assert!(flag.is_enabled());
        assert_eq!(flag.transitions(), 1);
    }
}
