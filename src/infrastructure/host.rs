use crate::domain::ports::{HostContext, ScreenId};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// A host with one screen that can move in and out of the foreground.
///
/// Clones share the same foreground flag.
#[derive(Debug, Clone)]
pub struct ForegroundHost {
    screen: ScreenId,
    attached: Arc<AtomicBool>,
}

impl ForegroundHost {
    pub fn new(screen: ScreenId) -> Self {
        Self {
            screen,
            attached: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn attach(&self) {
        self.attached.store(true, Ordering::SeqCst);
    }

    pub fn detach(&self) {
        self.attached.store(false, Ordering::SeqCst);
    }
}

impl HostContext for ForegroundHost {
    fn foreground_screen(&self) -> Option<ScreenId> {
        self.attached
            .load(Ordering::SeqCst)
            .then_some(self.screen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_foreground_state() {
        let host = ForegroundHost::new(ScreenId(3));
        let clone = host.clone();
        assert_eq!(clone.foreground_screen(), Some(ScreenId(3)));

        host.detach();
        assert_eq!(clone.foreground_screen(), None);

        clone.attach();
        assert_eq!(host.foreground_screen(), Some(ScreenId(3)));
    }
}
