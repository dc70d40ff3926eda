use cosmic::iced::Length;
use cosmic::widget;
use cosmic::Element;

use crate::app::{Message, Popup};
use crate::core::folder_list::FolderListState;
use crate::dnd_models::DraggedMessages;

/// Fixed height of one folder row, used for scroll geometry.
pub const ROW_HEIGHT: f32 = 32.0;
/// Spacing between column children; `row_top` must stay in sync with the
/// layout in `view`.
const ROW_SPACING: u16 = 4;
const LIST_PADDING: u16 = 8;
/// Fixed height of the compose header above the first row.
const HEADER_HEIGHT: f32 = 48.0;

/// Content-relative top of visible row `index`.
pub fn row_top(index: usize) -> f32 {
    f32::from(LIST_PADDING)
        + HEADER_HEIGHT
        + f32::from(ROW_SPACING)
        + index as f32 * (ROW_HEIGHT + f32::from(ROW_SPACING))
}

pub fn scroll_id() -> cosmic::iced::widget::scrollable::Id {
    cosmic::iced::widget::scrollable::Id::new("folder-list")
}

/// Render the folder sidebar: compose button, the visible tree rows, and the
/// folder/contacts actions at the bottom.
pub fn view<'a>(
    state: &'a FolderListState,
    drag_target: Option<&str>,
    contacts_allowed: bool,
) -> Element<'a, Message> {
    let mut col = widget::column().spacing(ROW_SPACING).padding(LIST_PADDING);

    col = col.push(
        widget::container(
            widget::button::suggested("Compose")
                .on_press(Message::OpenPopup(Popup::Compose))
                .width(Length::Fill),
        )
        .height(Length::Fixed(HEADER_HEIGHT)),
    );

    let rows = state.tree.visible_rows();
    if rows.is_empty() {
        col = col.push(widget::text::body("No folders"));
    } else {
        for row in rows {
            let folder = row.folder;
            let hash = folder.full_name_hash.clone();

            let is_selected = state.current_folder() == Some(folder.full_name_raw.as_str());
            let is_focused = state.focus() == Some(hash.as_str());
            let is_drag_target = drag_target == Some(hash.as_str());

            let mut line = widget::row()
                .spacing(2)
                .align_y(cosmic::iced::Alignment::Center);

            if !folder.children.is_empty() {
                let sign = if folder.collapsed { "▶" } else { "▼" };
                line = line.push(
                    widget::button::text(sign)
                        .on_press(Message::ToggleCollapse(hash.clone()))
                        .padding(4)
                        .class(cosmic::theme::Button::Text),
                );
            }

            let label = if folder.unread_count > 0 {
                format!("{} ({})", folder.name, folder.unread_count)
            } else {
                folder.name.clone()
            };
            let mut btn = widget::button::text(label).width(Length::Fill);
            if folder.selectable {
                btn = btn.on_press(Message::SelectFolder(hash.clone()));
            }
            if is_selected || is_focused || is_drag_target {
                btn = btn.class(cosmic::theme::Button::Suggested);
            }

            let drop_hash = hash.clone();
            let enter_hash = hash.clone();
            let dest = widget::dnd_destination::dnd_destination_for_data::<DraggedMessages, _>(
                btn,
                move |data, _action| match data {
                    Some(data) => Message::DropMessages {
                        target: drop_hash.clone(),
                        data,
                    },
                    None => Message::Noop,
                },
            )
            .on_enter(move |_x, _y, _mimes| Message::FolderDragEnter(enter_hash.clone()))
            .on_leave(|| Message::FolderDragLeave);

            line = line.push(dest);

            let indent = (row.depth.min(4) as u16) * 16;
            col = col.push(
                widget::container(line)
                    .padding([0, 0, 0, indent])
                    .height(Length::Fixed(ROW_HEIGHT)),
            );
        }
    }

    col = col.push(widget::vertical_space().height(8));
    col = col.push(
        widget::button::standard("New Folder")
            .on_press(Message::OpenPopup(Popup::CreateFolder))
            .width(Length::Fill),
    );
    // Entry point only; the folder settings surface is external, so the
    // button stays inert until one is wired in.
    col = col.push(widget::button::standard("Folder Settings").width(Length::Fill));
    if contacts_allowed {
        col = col.push(
            widget::button::standard("Contacts")
                .on_press(Message::OpenPopup(Popup::Contacts))
                .width(Length::Fill),
        );
    }

    let scrollable_folders = widget::scrollable(col)
        .id(scroll_id())
        .on_scroll(|viewport| Message::FolderListScrolled {
            viewport_height: viewport.bounds().height,
            offset: viewport.absolute_offset().y,
        })
        .height(Length::Fill);

    // A press on the container itself (not on a row) hands the tree keyboard
    // scope.
    widget::mouse_area(
        widget::column()
            .push(scrollable_folders)
            .height(Length::Fill),
    )
    .on_press(Message::FolderListFocus(true))
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scroll::{self, ScrollRegion};

    #[test]
    fn first_row_sits_below_the_compose_header() {
        assert_eq!(
            row_top(0),
            f32::from(LIST_PADDING) + HEADER_HEIGHT + f32::from(ROW_SPACING)
        );
    }

    #[test]
    fn row_pitch_includes_column_spacing() {
        assert_eq!(row_top(1) - row_top(0), ROW_HEIGHT + f32::from(ROW_SPACING));
        assert_eq!(row_top(10) - row_top(9), row_top(1) - row_top(0));
    }

    #[test]
    fn focused_row_deep_in_a_fresh_list_gets_scrolled_to() {
        // Region as seeded from the window geometry, before any manual
        // scrolling has happened.
        let region = ScrollRegion {
            viewport_height: 400.0,
            offset: 0.0,
        };
        let top = row_top(20) - region.offset;
        let adjusted = scroll::scroll_to_focused(Some(region), top, ROW_HEIGHT).unwrap();
        assert!(adjusted > 0.0);
        // After the adjustment the row bottom rests on the margin.
        let new_top = row_top(20) - adjusted;
        assert_eq!(
            new_top + ROW_HEIGHT + scroll::FOCUS_MARGIN,
            region.viewport_height
        );
    }
}
