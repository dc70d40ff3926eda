//! Shared left-panel visibility flag.
//!
//! The flag flips only on `mobile` breakpoint transitions; everything else
//! (layout shell, diagnostics fingerprint) is a reader.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cheaply-cloneable handle on the `left_panel_disabled` flag.
#[derive(Debug, Clone, Default)]
pub struct PanelVisibility {
    disabled: Arc<AtomicBool>,
}

impl PanelVisibility {
    /// Starts enabled (`false`) until the first breakpoint evaluation.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled.load(Ordering::Relaxed)
    }

    /// Single write path: wired to the `mobile` state's enter hook.
    pub fn on_mobile_enter(&self) {
        self.set(true);
    }

    /// Single write path: wired to the `mobile` state's leave hook.
    pub fn on_mobile_leave(&self) {
        self.set(false);
    }

    fn set(&self, disabled: bool) {
        self.disabled.store(disabled, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::breakpoint::{BreakpointManager, StateDef};

    fn wired() -> (BreakpointManager, PanelVisibility) {
        let panel = PanelVisibility::new();
        let enter = panel.clone();
        let leave = panel.clone();
        let mut mgr = BreakpointManager::new();
        mgr.register(
            StateDef::new("mobile", 0, Some(768))
                .on_enter(move || enter.on_mobile_enter())
                .on_leave(move || leave.on_mobile_leave()),
        )
        .unwrap();
        mgr.register(StateDef::new("rest", 768, None)).unwrap();
        (mgr, panel)
    }

    #[test]
    fn starts_enabled_before_first_evaluation() {
        let (_, panel) = wired();
        assert!(!panel.is_disabled());
    }

    #[test]
    fn tracks_mobile_enter_and_leave() {
        let (mut mgr, panel) = wired();
        mgr.start(500).unwrap();
        assert!(panel.is_disabled());
        mgr.evaluate(900).unwrap();
        assert!(!panel.is_disabled());
        mgr.evaluate(300).unwrap();
        assert!(panel.is_disabled());
    }

    #[test]
    fn unrelated_transitions_leave_the_flag_alone() {
        let (mut mgr, panel) = wired();
        mgr.start(900).unwrap();
        assert!(!panel.is_disabled());
        mgr.evaluate(2000).unwrap();
        assert!(!panel.is_disabled());
    }
}
