use cosmic::iced::Length;
use cosmic::widget;
use cosmic::Element;

use crate::app::Message;
use crate::core::models::MessageRow;

/// Render the preview pane for the open message, if any.
pub fn view(open: Option<&MessageRow>) -> Element<'_, Message> {
    let mut col = widget::column().spacing(8).padding(12);

    match open {
        Some(msg) => {
            col = col.push(widget::text::title4(&msg.subject));
            col = col.push(widget::text::caption(format!("From: {}", msg.from)));
            col = col.push(widget::divider::horizontal::default());
            col = col.push(widget::text::body(
                "Message bodies are supplied by the mail engine.",
            ));
        }
        None => {
            col = col.push(widget::text::body("No message open"));
        }
    }

    widget::scrollable(col).height(Length::Fill).into()
}
