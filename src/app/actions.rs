//! Drag-and-drop message handling for message-to-folder moves.

use cosmic::app::Task;

use super::{AppModel, Message};

impl AppModel {
    pub(super) fn handle_drag(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::FolderDragEnter(hash) => {
                self.drag_target = Some(hash.clone());
                let arm = self
                    .folder_list
                    .tree
                    .find(&hash)
                    .and_then(|folder| self.coordinator.drag_enter(folder));
                if let Some(arm) = arm {
                    return cosmic::task::future(async move {
                        tokio::time::sleep(arm.delay).await;
                        Message::HoverElapsed(arm.generation)
                    });
                }
                Task::none()
            }

            Message::FolderDragLeave => {
                self.drag_target = None;
                self.coordinator.drag_leave();
                Task::none()
            }

            Message::HoverElapsed(generation) => {
                // Stale timers are swallowed by the coordinator.
                match self.coordinator.hover_elapsed(generation) {
                    Some(hash) => {
                        let effects = self.folder_list.expand_for_drop(&hash);
                        self.run_effects(effects)
                    }
                    None => Task::none(),
                }
            }

            Message::DropMessages { target, data } => {
                self.drag_target = None;
                self.coordinator.drag_leave();
                // The copy modifier is read now, at the moment of the drop.
                let effect = self
                    .folder_list
                    .tree
                    .find(&target)
                    .and_then(|folder| self.coordinator.drop_messages(folder, &data, self.ctrl_held));
                match effect {
                    Some(effect) => self.run_effects(vec![effect]),
                    None => Task::none(),
                }
            }

            _ => Task::none(),
        }
    }
}
