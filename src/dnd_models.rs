use std::borrow::Cow;

use cosmic::iced::clipboard::mime::{AllowedMimeTypes, AsMimeTypes};
use serde::{Deserialize, Serialize};

/// Internal drag payload for message-to-folder moves.
///
/// `source_folder` is the `full_name_raw` of the origin mailbox. A payload
/// with an empty source or uid set is treated as a foreign drag and ignored
/// by the drop handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraggedMessages {
    pub source_folder: String,
    pub uids: Vec<String>,
}

const DRIFTMAIL_MESSAGES_MIME: &str = "application/x-driftmail-messages";

impl AsMimeTypes for DraggedMessages {
    fn available(&self) -> Cow<'static, [String]> {
        Cow::Owned(vec![DRIFTMAIL_MESSAGES_MIME.to_string()])
    }

    fn as_bytes(&self, mime_type: &str) -> Option<Cow<'static, [u8]>> {
        if mime_type == DRIFTMAIL_MESSAGES_MIME {
            serde_json::to_vec(self).ok().map(Cow::Owned)
        } else {
            None
        }
    }
}

impl AllowedMimeTypes for DraggedMessages {
    fn allowed() -> Cow<'static, [String]> {
        Cow::Owned(vec![DRIFTMAIL_MESSAGES_MIME.to_string()])
    }
}

impl TryFrom<(Vec<u8>, String)> for DraggedMessages {
    type Error = String;

    fn try_from((bytes, _mime): (Vec<u8>, String)) -> Result<Self, Self::Error> {
        serde_json::from_slice(&bytes).map_err(|e| e.to_string())
    }
}
