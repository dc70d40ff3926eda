//! Drag-and-drop move coordination: hover-to-expand timing plus translation
//! of a drop into a move/copy command.
//!
//! At most one hover timer is live at any moment. The coordinator never owns
//! a real timer; it hands the shell a [`HoverArm`] to schedule and swallows
//! completions whose generation no longer matches, so a timer cancelled by a
//! later `drag_enter`/`drag_leave` can still fire harmlessly.

use std::time::Duration;

use crate::core::folder_list::Effect;
use crate::core::models::Folder;
use crate::dnd_models::DraggedMessages;

/// Delay before a collapsed folder auto-expands under a hovering drag.
pub const HOVER_EXPAND_DELAY: Duration = Duration::from_millis(500);

/// Instruction to arm the single-shot hover timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoverArm {
    pub generation: u64,
    pub delay: Duration,
}

#[derive(Debug)]
struct PendingHover {
    hash: String,
    generation: u64,
}

#[derive(Debug, Default)]
pub struct MoveCoordinator {
    generation: u64,
    pending: Option<PendingHover>,
}

impl MoveCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// A drag moved over `folder`. Any pending hover is cancelled; a new one
    /// is armed only when the folder is collapsed.
    pub fn drag_enter(&mut self, folder: &Folder) -> Option<HoverArm> {
        self.pending = None;
        if !folder.collapsed {
            return None;
        }
        self.generation += 1;
        self.pending = Some(PendingHover {
            hash: folder.full_name_hash.clone(),
            generation: self.generation,
        });
        Some(HoverArm {
            generation: self.generation,
            delay: HOVER_EXPAND_DELAY,
        })
    }

    /// The drag left the folder area. Idempotent.
    pub fn drag_leave(&mut self) {
        self.pending = None;
    }

    /// A hover timer fired. Returns the folder hash to expand, or `None` for
    /// stale timers.
    pub fn hover_elapsed(&mut self, generation: u64) -> Option<String> {
        match self.pending.take() {
            Some(p) if p.generation == generation => Some(p.hash),
            other => {
                self.pending = other;
                None
            }
        }
    }

    /// Translate a drop into a move/copy command. `copy_held` is the shared
    /// modifier flag read at the moment of the drop. Drops with an empty
    /// source path or uid set did not originate from our own draggable rows
    /// and are silently ignored.
    pub fn drop_messages(
        &self,
        target: &Folder,
        payload: &DraggedMessages,
        copy_held: bool,
    ) -> Option<Effect> {
        if payload.source_folder.is_empty() || payload.uids.is_empty() {
            return None;
        }
        Some(Effect::MoveMessages {
            source: payload.source_folder.clone(),
            uids: payload.uids.clone(),
            target: target.full_name_raw.clone(),
            copy: copy_held,
        })
    }
}
