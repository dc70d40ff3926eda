//! Focus/selection/collapse state machine for the folder tree.
//!
//! Keyboard, pointer and drag input all funnel through the handlers here.
//! Every handler mutates local state first and only then reports what the
//! shell must do as a list of [`Effect`]s, so an observer of an effect always
//! sees final state. A missing or non-visible row is never an error; the
//! handler simply returns no effects.

use crate::core::links;
use crate::core::models::{FolderTree, PreviewMode};

/// Keys the folder list reacts to while it holds keyboard scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FolderKey {
    Up,
    Down,
    Enter,
    Space,
    Escape,
    Tab,
    ShiftTab,
    Right,
}

/// Commands handed to the layout shell and external collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Notify expansion persistence; `was_collapsed` is the pre-toggle value.
    PersistExpanded { hash: String, was_collapsed: bool },
    /// Request navigation to a canonical address.
    Navigate { address: String },
    /// Drop the cached content hash for a folder so reselecting refetches it.
    ClearCachedContent { folder: String },
    /// Dismiss the open message (layouts without a preview pane).
    ClearOpenMessage,
    /// Ask the mail-action collaborator to move or copy messages.
    MoveMessages {
        source: String,
        uids: Vec<String>,
        target: String,
        copy: bool,
    },
    /// A collapse change during a drag needs a layout recalculation.
    RequestReflow,
    /// Keyboard focus moved; bring the row back into view.
    ScrollToFocused,
}

pub struct FolderListState {
    pub tree: FolderTree,
    /// `full_name_hash` of the keyboard-focused row; at most one at a time.
    focus: Option<String>,
    /// Whether the tree container holds keyboard scope.
    focused: bool,
    /// `full_name_raw` of the open mailbox. Independent of `focus`.
    current_folder: Option<String>,
}

impl FolderListState {
    pub fn new(tree: FolderTree) -> Self {
        Self {
            tree,
            focus: None,
            focused: false,
            current_folder: None,
        }
    }

    pub fn focus(&self) -> Option<&str> {
        self.focus.as_deref()
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn current_folder(&self) -> Option<&str> {
        self.current_folder.as_deref()
    }

    /// Navigation echo: the shell tells us which mailbox ended up open.
    pub fn set_current_folder(&mut self, full_name_raw: Option<String>) {
        self.current_folder = full_name_raw;
    }

    /// Single keyboard dispatch entry point.
    pub fn handle_key(&mut self, key: FolderKey, layout: PreviewMode) -> Vec<Effect> {
        match key {
            FolderKey::Up | FolderKey::Down => self.move_focus(key),
            FolderKey::Enter => {
                let Some(hash) = self.focus.clone() else {
                    return Vec::new();
                };
                // Keyboard scope is released before the activation, exactly
                // like a pointer click on the row.
                self.set_container_focused(false);
                self.activate(&hash, layout)
            }
            FolderKey::Space => {
                let Some(hash) = self.focus.clone() else {
                    return Vec::new();
                };
                self.toggle_collapse(&hash)
            }
            FolderKey::Escape | FolderKey::Tab | FolderKey::ShiftTab | FolderKey::Right => {
                self.set_container_focused(false);
                Vec::new()
            }
        }
    }

    /// Pointer click on a row's expand/collapse affordance. Never touches the
    /// selection.
    pub fn toggle_collapse(&mut self, hash: &str) -> Vec<Effect> {
        let Some(folder) = self.tree.find_mut(hash) else {
            return Vec::new();
        };
        let was_collapsed = folder.collapsed;
        folder.collapsed = !was_collapsed;
        vec![Effect::PersistExpanded {
            hash: hash.to_string(),
            was_collapsed,
        }]
    }

    /// Pointer click on a row's selectable label. Does not move keyboard
    /// focus.
    pub fn select(&mut self, hash: &str, layout: PreviewMode) -> Vec<Effect> {
        self.activate(hash, layout)
    }

    /// Expand a folder under a hovering drag. No effects unless it was
    /// actually collapsed.
    pub fn expand_for_drop(&mut self, hash: &str) -> Vec<Effect> {
        let Some(folder) = self.tree.find_mut(hash) else {
            return Vec::new();
        };
        if !folder.collapsed {
            return Vec::new();
        }
        folder.collapsed = false;
        vec![
            Effect::PersistExpanded {
                hash: hash.to_string(),
                was_collapsed: true,
            },
            Effect::RequestReflow,
        ]
    }

    /// Container keyboard scope toggled. Gaining scope moves the focus marker
    /// onto the selected row (keyboard takeover of a pointer selection);
    /// losing it clears all focus markers.
    pub fn set_container_focused(&mut self, focused: bool) {
        self.focused = focused;
        if focused {
            self.focus = self
                .current_folder
                .as_ref()
                .and_then(|raw| self.tree.find_by_raw(raw))
                .map(|f| f.full_name_hash.clone());
        } else {
            self.focus = None;
        }
    }

    fn move_focus(&mut self, key: FolderKey) -> Vec<Effect> {
        let rows: Vec<String> = self
            .tree
            .visible_rows()
            .iter()
            .map(|r| r.folder.full_name_hash.clone())
            .collect();
        if rows.is_empty() {
            return Vec::new();
        }

        let index = self
            .focus
            .as_ref()
            .and_then(|hash| rows.iter().position(|r| r == hash));
        let next = match (key, index) {
            (FolderKey::Down, Some(i)) if i + 1 < rows.len() => i + 1,
            // Last visible row: focus stays put.
            (FolderKey::Down, Some(i)) => i,
            (FolderKey::Down, None) => 0,
            (FolderKey::Up, Some(i)) if i > 0 => i - 1,
            // First row: focus stays put.
            (FolderKey::Up, Some(i)) => i,
            (FolderKey::Up, None) => rows.len() - 1,
            _ => return Vec::new(),
        };

        self.focus = Some(rows[next].clone());
        vec![Effect::ScrollToFocused]
    }

    /// Default activation of a selectable row: in a no-preview layout the open
    /// message is dismissed; reselecting the open mailbox invalidates its
    /// cached content hash; either way navigation is requested.
    fn activate(&mut self, hash: &str, layout: PreviewMode) -> Vec<Effect> {
        let Some(folder) = self.tree.find(hash) else {
            return Vec::new();
        };
        if !folder.selectable {
            return Vec::new();
        }
        let raw = folder.full_name_raw.clone();

        let mut effects = Vec::new();
        if layout == PreviewMode::NoPreview {
            effects.push(Effect::ClearOpenMessage);
        }
        if self.current_folder.as_deref() == Some(raw.as_str()) {
            effects.push(Effect::ClearCachedContent { folder: raw });
        }
        effects.push(Effect::Navigate {
            address: links::mailbox(hash),
        });
        effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Folder;

    fn tree() -> FolderTree {
        let mut inbox = Folder::new("Inbox", "INBOX", "inbox");
        inbox.children = vec![
            Folder::new("Receipts", "INBOX.Receipts", "inbox-receipts"),
            Folder::new("Travel", "INBOX.Travel", "inbox-travel"),
        ];
        let mut archive = Folder::new("Archive", "Archive", "archive");
        archive.collapsed = true;
        archive.children = vec![Folder::new("2024", "Archive.2024", "archive-2024")];
        let trash = Folder::new("Trash", "Trash", "trash");
        FolderTree {
            roots: vec![inbox, archive, trash],
        }
    }

    fn state() -> FolderListState {
        FolderListState::new(tree())
    }

    #[test]
    fn down_with_no_focus_lands_on_first_visible_row() {
        let mut s = state();
        let effects = s.handle_key(FolderKey::Down, PreviewMode::Preview);
        assert_eq!(s.focus(), Some("inbox"));
        assert_eq!(effects, vec![Effect::ScrollToFocused]);
    }

    #[test]
    fn up_with_no_focus_lands_on_last_visible_row() {
        let mut s = state();
        s.handle_key(FolderKey::Up, PreviewMode::Preview);
        assert_eq!(s.focus(), Some("trash"));
    }

    #[test]
    fn down_walks_visible_rows_and_skips_collapsed_subtree() {
        let mut s = state();
        let mut seen = Vec::new();
        for _ in 0..5 {
            s.handle_key(FolderKey::Down, PreviewMode::Preview);
            seen.push(s.focus().unwrap().to_string());
        }
        // archive-2024 is hidden under the collapsed Archive row.
        assert_eq!(
            seen,
            vec!["inbox", "inbox-receipts", "inbox-travel", "archive", "trash"]
        );
    }

    #[test]
    fn down_at_last_row_is_a_no_op() {
        let mut s = state();
        s.handle_key(FolderKey::Up, PreviewMode::Preview);
        assert_eq!(s.focus(), Some("trash"));
        s.handle_key(FolderKey::Down, PreviewMode::Preview);
        assert_eq!(s.focus(), Some("trash"));
    }

    #[test]
    fn up_at_first_row_is_a_no_op() {
        let mut s = state();
        s.handle_key(FolderKey::Down, PreviewMode::Preview);
        s.handle_key(FolderKey::Up, PreviewMode::Preview);
        assert_eq!(s.focus(), Some("inbox"));
    }

    #[test]
    fn navigation_in_empty_tree_is_a_no_op() {
        let mut s = FolderListState::new(FolderTree::default());
        assert!(s.handle_key(FolderKey::Down, PreviewMode::Preview).is_empty());
        assert!(s.handle_key(FolderKey::Up, PreviewMode::Preview).is_empty());
        assert_eq!(s.focus(), None);
    }

    #[test]
    fn navigation_in_single_row_tree_stays_put() {
        let mut s = FolderListState::new(FolderTree {
            roots: vec![Folder::new("Inbox", "INBOX", "inbox")],
        });
        s.handle_key(FolderKey::Down, PreviewMode::Preview);
        s.handle_key(FolderKey::Down, PreviewMode::Preview);
        s.handle_key(FolderKey::Up, PreviewMode::Preview);
        assert_eq!(s.focus(), Some("inbox"));
    }

    #[test]
    fn space_toggles_collapse_and_persists_pre_toggle_value() {
        let mut s = state();
        // Focus the collapsed Archive row.
        for _ in 0..4 {
            s.handle_key(FolderKey::Down, PreviewMode::Preview);
        }
        assert_eq!(s.focus(), Some("archive"));
        let effects = s.handle_key(FolderKey::Space, PreviewMode::Preview);
        assert_eq!(
            effects,
            vec![Effect::PersistExpanded {
                hash: "archive".into(),
                was_collapsed: true,
            }]
        );
        assert!(!s.tree.find("archive").unwrap().collapsed);

        // Toggling back reports the new pre-toggle value.
        let effects = s.handle_key(FolderKey::Space, PreviewMode::Preview);
        assert_eq!(
            effects,
            vec![Effect::PersistExpanded {
                hash: "archive".into(),
                was_collapsed: false,
            }]
        );
        assert!(s.tree.find("archive").unwrap().collapsed);
    }

    #[test]
    fn space_without_focus_is_a_no_op() {
        let mut s = state();
        assert!(s.handle_key(FolderKey::Space, PreviewMode::Preview).is_empty());
    }

    #[test]
    fn pointer_collapse_toggle_matches_space_and_keeps_selection() {
        let mut s = state();
        s.set_current_folder(Some("INBOX".into()));
        let effects = s.toggle_collapse("inbox");
        assert_eq!(
            effects,
            vec![Effect::PersistExpanded {
                hash: "inbox".into(),
                was_collapsed: false,
            }]
        );
        assert!(s.tree.find("inbox").unwrap().collapsed);
        assert_eq!(s.current_folder(), Some("INBOX"));
    }

    #[test]
    fn enter_activates_focused_row_and_releases_keyboard_scope() {
        let mut s = state();
        s.set_container_focused(true);
        s.handle_key(FolderKey::Down, PreviewMode::Preview);
        let effects = s.handle_key(FolderKey::Enter, PreviewMode::Preview);
        assert_eq!(
            effects,
            vec![Effect::Navigate {
                address: "mailbox/inbox".into(),
            }]
        );
        assert_eq!(s.focus(), None);
        assert!(!s.is_focused());
    }

    #[test]
    fn enter_without_focus_is_a_no_op() {
        let mut s = state();
        assert!(s.handle_key(FolderKey::Enter, PreviewMode::Preview).is_empty());
    }

    #[test]
    fn enter_in_no_preview_layout_dismisses_open_message_first() {
        let mut s = state();
        s.handle_key(FolderKey::Down, PreviewMode::NoPreview);
        let effects = s.handle_key(FolderKey::Enter, PreviewMode::NoPreview);
        assert_eq!(
            effects,
            vec![
                Effect::ClearOpenMessage,
                Effect::Navigate {
                    address: "mailbox/inbox".into(),
                },
            ]
        );
    }

    #[test]
    fn reselecting_the_open_mailbox_clears_its_cached_content() {
        let mut s = state();
        s.set_current_folder(Some("INBOX".into()));
        let effects = s.select("inbox", PreviewMode::Preview);
        assert_eq!(
            effects,
            vec![
                Effect::ClearCachedContent {
                    folder: "INBOX".into(),
                },
                Effect::Navigate {
                    address: "mailbox/inbox".into(),
                },
            ]
        );
    }

    #[test]
    fn selecting_a_different_mailbox_keeps_caches_intact() {
        let mut s = state();
        s.set_current_folder(Some("INBOX".into()));
        let effects = s.select("trash", PreviewMode::Preview);
        assert_eq!(
            effects,
            vec![Effect::Navigate {
                address: "mailbox/trash".into(),
            }]
        );
    }

    #[test]
    fn selecting_a_non_selectable_row_is_a_no_op() {
        let mut s = state();
        s.tree.find_mut("archive").unwrap().selectable = false;
        assert!(s.select("archive", PreviewMode::Preview).is_empty());
    }

    #[test]
    fn escape_and_tab_clear_focus_entirely() {
        for key in [
            FolderKey::Escape,
            FolderKey::Tab,
            FolderKey::ShiftTab,
            FolderKey::Right,
        ] {
            let mut s = state();
            s.set_container_focused(true);
            s.handle_key(FolderKey::Down, PreviewMode::Preview);
            assert!(s.focus().is_some());
            assert!(s.handle_key(key, PreviewMode::Preview).is_empty());
            assert_eq!(s.focus(), None);
            assert!(!s.is_focused());
            // Double clear is safe.
            assert!(s.handle_key(key, PreviewMode::Preview).is_empty());
        }
    }

    #[test]
    fn gaining_keyboard_scope_focuses_the_selected_row() {
        let mut s = state();
        s.set_current_folder(Some("Trash".into()));
        s.set_container_focused(true);
        assert_eq!(s.focus(), Some("trash"));
        s.set_container_focused(false);
        assert_eq!(s.focus(), None);
    }

    #[test]
    fn pressing_outside_the_container_releases_keyboard_scope() {
        let mut s = state();
        s.set_current_folder(Some("INBOX".into()));
        s.set_container_focused(true);
        s.handle_key(FolderKey::Down, PreviewMode::Preview);
        assert!(s.is_focused());
        assert!(s.focus().is_some());

        // The shell reports focus loss when the user presses elsewhere; both
        // the scope flag and the row marker go with it.
        s.set_container_focused(false);
        assert!(!s.is_focused());
        assert_eq!(s.focus(), None);
        // Repeated focus-loss reports are safe.
        s.set_container_focused(false);
        assert!(!s.is_focused());
    }

    #[test]
    fn gaining_keyboard_scope_without_selection_leaves_no_focus() {
        let mut s = state();
        s.set_container_focused(true);
        assert_eq!(s.focus(), None);
    }

    #[test]
    fn expand_for_drop_only_fires_on_collapsed_folders() {
        let mut s = state();
        let effects = s.expand_for_drop("archive");
        assert_eq!(
            effects,
            vec![
                Effect::PersistExpanded {
                    hash: "archive".into(),
                    was_collapsed: true,
                },
                Effect::RequestReflow,
            ]
        );
        assert!(!s.tree.find("archive").unwrap().collapsed);
        assert!(s.expand_for_drop("archive").is_empty());
        assert!(s.expand_for_drop("missing").is_empty());
    }
}
