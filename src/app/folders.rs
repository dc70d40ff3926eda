//! Folder-list message handling: keyboard dispatch, pointer selection and
//! collapse, navigation, and execution of the effects the interaction core
//! reports.

use cosmic::app::Task;
use cosmic::iced::widget::scrollable::AbsoluteOffset;

use crate::core::folder_list::Effect;
use crate::core::links;
use crate::core::remote::{ExpandPersistence, MailActions};
use crate::core::scroll;
use crate::ui::folder_list::{row_top, scroll_id, ROW_HEIGHT};

use super::{AppModel, Message};

impl AppModel {
    pub(super) fn handle_folders(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::FolderKey(key) => {
                let effects = self.folder_list.handle_key(key, self.config.layout);
                self.probe
                    .set_folder_list_focused(self.folder_list.is_focused());
                self.run_effects(effects)
            }

            Message::FolderListFocus(focused) => {
                self.folder_list.set_container_focused(focused);
                self.probe.set_folder_list_focused(focused);
                Task::none()
            }

            Message::ToggleCollapse(hash) => {
                let effects = self.folder_list.toggle_collapse(&hash);
                self.run_effects(effects)
            }

            Message::SelectFolder(hash) => {
                let effects = self.folder_list.select(&hash, self.config.layout);
                self.run_effects(effects)
            }

            Message::FolderListScrolled {
                viewport_height,
                offset,
            } => {
                self.scroll_region = Some(scroll::ScrollRegion {
                    viewport_height,
                    offset,
                });
                Task::none()
            }

            _ => Task::none(),
        }
    }

    /// Apply the effects an interaction-core handler reported, in order.
    pub(super) fn run_effects(&mut self, effects: Vec<Effect>) -> Task<Message> {
        let mut tasks = Vec::new();
        for effect in effects {
            match effect {
                Effect::PersistExpanded {
                    hash,
                    was_collapsed,
                } => {
                    self.expand_store.set_folder_expanded(&hash, was_collapsed);
                }

                Effect::Navigate { address } => self.navigate_to(&address),

                Effect::ClearCachedContent { folder } => {
                    self.content_hashes.shift_remove(&folder);
                }

                Effect::ClearOpenMessage => {
                    self.open_message = None;
                }

                Effect::MoveMessages {
                    source,
                    uids,
                    target,
                    copy,
                } => {
                    self.mail.move_messages(&source, &uids, &target, copy);
                    if let Some(command) = &self.mail.last {
                        self.status_message = format!(
                            "{} {} message(s) to {}",
                            if command.copy { "Copied" } else { "Moved" },
                            command.uids.len(),
                            command.target
                        );
                    }
                }

                Effect::RequestReflow => {
                    let width = super::boot::effective_width(self.window_width);
                    if let Err(e) = self.breakpoints.evaluate(width) {
                        log::error!("Screen state evaluation failed: {}", e);
                    }
                }

                Effect::ScrollToFocused => {
                    if let Some(task) = self.scroll_to_focused_task() {
                        tasks.push(task);
                    }
                }
            }
        }
        cosmic::task::batch(tasks)
    }

    /// Open the mailbox behind a canonical address. Unroutable addresses are
    /// logged and dropped.
    fn navigate_to(&mut self, address: &str) {
        let Some(hash) = links::parse_mailbox(address) else {
            log::warn!("Unroutable address: {}", address);
            return;
        };
        let Some(folder) = self.folder_list.tree.find(hash) else {
            log::warn!("Address points at an unknown folder: {}", address);
            return;
        };
        let raw = folder.full_name_raw.clone();
        let name = folder.name.clone();

        self.folder_list.set_current_folder(Some(raw.clone()));
        self.probe.set_address(address);

        // A cached content hash means the mailbox content is still current.
        if !self.content_hashes.contains_key(&raw) {
            self.messages = self.mailboxes.get(&raw).cloned().unwrap_or_default();
            self.open_message = None;
            self.content_hashes
                .insert(raw, format!("{}:{}", hash, self.messages.len()));
        }
        self.status_message = name;
    }

    /// Minimal scroll bringing the keyboard-focused row into view, or `None`
    /// when no adjustment is needed.
    fn scroll_to_focused_task(&mut self) -> Option<Task<Message>> {
        let focus = self.folder_list.focus()?;
        let index = self
            .folder_list
            .tree
            .visible_rows()
            .iter()
            .position(|row| row.folder.full_name_hash == focus)?;

        let region = self.scroll_region?;
        let top = row_top(index) - region.offset;
        let y = scroll::scroll_to_focused(Some(region), top, ROW_HEIGHT)?;

        self.scroll_region = Some(scroll::ScrollRegion { offset: y, ..region });
        Some(cosmic::iced::widget::scrollable::scroll_to(
            scroll_id(),
            AbsoluteOffset { x: 0.0, y },
        ))
    }
}
