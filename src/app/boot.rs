//! Application bootstrap: breakpoint wiring, the uncaught-error hook, and
//! the fixed-delay deferrals (startup resize settle, logout redirect).

use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use cosmic::app::Task;

use crate::core::breakpoint::{BreakpointManager, StateDef};
use crate::core::links;
use crate::core::panel::PanelVisibility;
use crate::core::remote::{should_report, Diagnostics, ErrorReport};
use crate::core::scroll::ScrollRegion;

use super::{AppModel, Message};

/// Breakpoint boundaries in px; intervals are half-open `[min, max)`.
pub const MOBILE_MAX_WIDTH: u32 = 768;
pub const TABLET_MAX_WIDTH: u32 = 1000;
pub const DESKTOP_MAX_WIDTH: u32 = 1400;

/// Layout re-evaluation settle time after startup.
pub const RESIZE_SETTLE_DELAY: Duration = Duration::from_millis(1000);
/// Navigation settle time after logout.
pub const LOGOUT_REDIRECT_DELAY: Duration = Duration::from_millis(100);

/// Width assumed when no resize event has arrived yet.
pub(crate) const DEFAULT_VIEWPORT_WIDTH: u32 = 1024;
/// Height of the status bar below the panes.
const STATUS_BAR_HEIGHT: f32 = 32.0;

/// Reported window width, with the pre-first-resize zero replaced by a
/// usable default so layout evaluation always runs.
pub(crate) fn effective_width(reported: u32) -> u32 {
    if reported == 0 {
        DEFAULT_VIEWPORT_WIDTH
    } else {
        reported
    }
}

/// Live UI-state snapshot the panic hook can read without touching the app
/// model.
#[derive(Debug)]
pub struct UiProbe {
    started: Instant,
    breakpoint: Mutex<String>,
    address: Mutex<String>,
    panel: PanelVisibility,
    folder_list_focused: AtomicBool,
}

impl UiProbe {
    pub fn new(panel: PanelVisibility) -> Self {
        Self {
            started: Instant::now(),
            breakpoint: Mutex::new(String::from("none")),
            address: Mutex::new(links::root()),
            panel,
            folder_list_focused: AtomicBool::new(false),
        }
    }

    pub fn set_breakpoint(&self, id: &str) {
        if let Ok(mut guard) = self.breakpoint.lock() {
            *guard = id.to_string();
        }
    }

    pub fn set_address(&self, address: &str) {
        if let Ok(mut guard) = self.address.lock() {
            *guard = address.to_string();
        }
    }

    pub fn set_folder_list_focused(&self, focused: bool) {
        self.folder_list_focused.store(focused, Ordering::Relaxed);
    }

    pub fn address(&self) -> String {
        self.address
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    pub fn uptime(&self) -> Duration {
        self.started.elapsed()
    }

    /// Compact state summary attached to error reports.
    pub fn fingerprint(&self) -> String {
        let breakpoint = self
            .breakpoint
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default();
        format!(
            "state-{} left-panel-disabled:{} folder-list-focused:{}",
            breakpoint,
            self.panel.is_disabled(),
            self.folder_list_focused.load(Ordering::Relaxed),
        )
    }
}

/// Register the four screen states. The `mobile` transitions are the single
/// write path for the left-panel flag; every enter also records the active
/// state on the probe.
pub fn register_breakpoints(
    mgr: &mut BreakpointManager,
    panel: &PanelVisibility,
    probe: &Arc<UiProbe>,
) -> Result<(), String> {
    let mobile_probe = probe.clone();
    let mobile_enter = panel.clone();
    let mobile_leave = panel.clone();
    mgr.register(
        StateDef::new("mobile", 0, Some(MOBILE_MAX_WIDTH))
            .on_enter(move || {
                mobile_probe.set_breakpoint("mobile");
                mobile_enter.on_mobile_enter();
            })
            .on_leave(move || mobile_leave.on_mobile_leave()),
    )?;

    for (id, min, max) in [
        ("tablet", MOBILE_MAX_WIDTH, Some(TABLET_MAX_WIDTH)),
        ("desktop", TABLET_MAX_WIDTH, Some(DESKTOP_MAX_WIDTH)),
        ("desktop-large", DESKTOP_MAX_WIDTH, None),
    ] {
        let enter_probe = probe.clone();
        mgr.register(
            StateDef::new(id, min, max).on_enter(move || enter_probe.set_breakpoint(id)),
        )?;
    }
    Ok(())
}

/// Forward uncaught panics to the diagnostics sink, with benign render noise
/// filtered out. The previous hook still runs afterwards.
pub fn install_panic_hook(probe: Arc<UiProbe>, sink: Arc<dyn Diagnostics>) {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let message = match info.payload().downcast_ref::<&str>() {
            Some(s) => (*s).to_string(),
            None => info
                .payload()
                .downcast_ref::<String>()
                .cloned()
                .unwrap_or_else(|| String::from("unknown panic")),
        };
        if should_report(&message) {
            let location = info
                .location()
                .map(|l| format!("{}:{}", l.file(), l.line()))
                .unwrap_or_default();
            sink.report(&ErrorReport {
                message,
                location,
                address: probe.address(),
                ui_fingerprint: probe.fingerprint(),
                uptime: probe.uptime(),
            });
        }
        previous(info);
    }));
}

impl AppModel {
    /// Schedule the startup layout re-evaluation. A later call supersedes any
    /// pending one.
    pub(super) fn arm_resize_settle(&mut self) -> Task<Message> {
        self.settle_generation += 1;
        let generation = self.settle_generation;
        cosmic::task::future(async move {
            tokio::time::sleep(RESIZE_SETTLE_DELAY).await;
            Message::ResizeSettled(generation)
        })
    }

    pub(super) fn handle_shell(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::ViewportResized { width, height } => {
                self.window_width = width;
                // The window geometry also seeds the sidebar scroll region,
                // so scroll-into-view works before the user ever scrolls.
                let offset = self.scroll_region.map_or(0.0, |r| r.offset);
                self.scroll_region = Some(ScrollRegion {
                    viewport_height: (height - STATUS_BAR_HEIGHT).max(0.0),
                    offset,
                });
                if let Err(e) = self.breakpoints.evaluate(width) {
                    log::error!("Screen state evaluation failed: {}", e);
                }
            }

            Message::ResizeSettled(generation) => {
                // Stale timers are ignored; a missing initial resize event
                // falls back to the default width.
                if generation == self.settle_generation {
                    let width = effective_width(self.window_width);
                    if let Err(e) = self.breakpoints.evaluate(width) {
                        log::error!("Screen state evaluation failed: {}", e);
                    }
                }
            }

            Message::ModifiersChanged(ctrl) => {
                self.ctrl_held = ctrl;
            }

            Message::OpenPopup(popup) => {
                if popup == super::Popup::Contacts && !self.config.contacts_allowed {
                    return Task::none();
                }
                self.open_popup = Some(popup);
            }
            Message::ClosePopup => {
                self.open_popup = None;
            }

            Message::Logout => {
                self.logout_generation += 1;
                let generation = self.logout_generation;
                self.status_message = "Signing out...".into();
                return cosmic::task::future(async move {
                    tokio::time::sleep(LOGOUT_REDIRECT_DELAY).await;
                    Message::LogoutRedirect(generation)
                });
            }

            Message::LogoutRedirect(generation) => {
                if generation == self.logout_generation {
                    let address = self
                        .config
                        .logout_address
                        .clone()
                        .unwrap_or_else(links::root);
                    log::info!("Logout redirect to {}", address);
                    self.reset_session(&address);
                }
            }

            _ => {}
        }
        Task::none()
    }

    fn reset_session(&mut self, address: &str) {
        self.folder_list.set_current_folder(None);
        self.folder_list.set_container_focused(false);
        self.probe.set_folder_list_focused(false);
        self.probe.set_address(address);
        self.messages.clear();
        self.open_message = None;
        self.content_hashes.clear();
        self.open_popup = None;
        self.status_message = "Signed out".into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wired() -> (BreakpointManager, PanelVisibility, Arc<UiProbe>) {
        let panel = PanelVisibility::new();
        let probe = Arc::new(UiProbe::new(panel.clone()));
        let mut mgr = BreakpointManager::new();
        register_breakpoints(&mut mgr, &panel, &probe).unwrap();
        (mgr, panel, probe)
    }

    #[test]
    fn registered_states_cover_every_width() {
        let (mut mgr, _, _) = wired();
        for width in [0, 767, 768, 999, 1000, 1399, 1400, 3840] {
            mgr.evaluate(width).unwrap();
        }
    }

    #[test]
    fn mobile_transitions_drive_the_panel_flag() {
        let (mut mgr, panel, probe) = wired();
        mgr.start(500).unwrap();
        assert!(panel.is_disabled());
        assert!(probe.fingerprint().starts_with("state-mobile"));

        mgr.evaluate(1200).unwrap();
        assert!(!panel.is_disabled());
        assert!(probe.fingerprint().starts_with("state-desktop "));
    }

    #[test]
    fn fingerprint_reflects_focus_and_panel_state() {
        let (mut mgr, _, probe) = wired();
        mgr.start(2000).unwrap();
        probe.set_folder_list_focused(true);
        assert_eq!(
            probe.fingerprint(),
            "state-desktop-large left-panel-disabled:false folder-list-focused:true"
        );
    }

    #[test]
    fn settle_width_falls_back_before_the_first_resize() {
        assert_eq!(effective_width(0), DEFAULT_VIEWPORT_WIDTH);
        assert_eq!(effective_width(900), 900);

        // Even with no resize event delivered, the settled evaluation lands
        // in a real state instead of leaving none active.
        let (mut mgr, _, probe) = wired();
        mgr.evaluate(effective_width(0)).unwrap();
        assert!(probe.fingerprint().starts_with("state-desktop "));
    }

    #[test]
    fn address_defaults_to_root() {
        let (_, _, probe) = wired();
        assert_eq!(probe.address(), "/");
        probe.set_address("mailbox/inbox");
        assert_eq!(probe.address(), "mailbox/inbox");
    }
}
