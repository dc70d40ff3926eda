pub mod folder_list;
pub mod message_list;
pub mod message_view;
pub mod popup;
