use cosmic::widget;
use cosmic::Element;

use crate::app::{Message, Popup};

/// Render the open modal popup. The popups themselves are thin placeholders;
/// their real work belongs to the mail engine.
pub fn view<'a>(popup: Popup) -> Element<'a, Message> {
    let (title, body) = match popup {
        Popup::Compose => ("Compose", "Message composition is handled by the mail engine."),
        Popup::CreateFolder => ("New Folder", "Folder creation is handled by the mail engine."),
        Popup::Contacts => ("Contacts", "The contacts book is handled by the mail engine."),
    };

    widget::dialog()
        .title(title)
        .body(body)
        .primary_action(widget::button::suggested("Close").on_press(Message::ClosePopup))
        .into()
}
