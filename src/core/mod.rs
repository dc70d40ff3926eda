pub mod breakpoint;
pub mod drop;
pub mod folder_list;
pub mod links;
pub mod models;
pub mod panel;
pub mod remote;
pub mod scroll;
pub mod store;
