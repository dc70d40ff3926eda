use cosmic::iced::Length;
use cosmic::widget;
use cosmic::Element;

use crate::app::Message;
use crate::core::models::MessageRow;
use crate::dnd_models::DraggedMessages;

/// Render the message list for the open mailbox. Rows are drag sources for
/// message-to-folder moves.
pub fn view<'a>(
    messages: &'a [MessageRow],
    current_folder: Option<&str>,
    open_message: Option<usize>,
) -> Element<'a, Message> {
    let mut col = widget::column().spacing(2).padding(8);

    let Some(folder) = current_folder else {
        col = col.push(widget::text::body("Select a mailbox"));
        return widget::scrollable(col).height(Length::Fill).into();
    };

    if messages.is_empty() {
        col = col.push(widget::text::body("No messages"));
    } else {
        for (index, msg) in messages.iter().enumerate() {
            let subject = widget::text::body(&msg.subject);
            let meta = widget::text::caption(&msg.from);
            let row_content = widget::column().push(subject).push(meta).spacing(2);

            let mut btn = widget::button::custom(row_content)
                .on_press(Message::OpenMessage(index))
                .width(Length::Fill);
            if open_message == Some(index) {
                btn = btn.class(cosmic::theme::Button::Suggested);
            }

            let source_folder = folder.to_string();
            let uid = msg.uid.clone();
            let source = widget::dnd_source::<Message, DraggedMessages>(btn)
                .drag_content(move || DraggedMessages {
                    source_folder: source_folder.clone(),
                    uids: vec![uid.clone()],
                })
                .drag_threshold(8.0);

            col = col.push(source);
        }
    }

    widget::scrollable(col).height(Length::Fill).into()
}
