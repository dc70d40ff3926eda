//! Canonical in-app addresses for navigation requests.

/// Address of a mailbox screen, keyed by the folder's stable hash.
pub fn mailbox(full_name_hash: &str) -> String {
    format!("mailbox/{full_name_hash}")
}

/// Extract the folder hash from a mailbox address.
pub fn parse_mailbox(address: &str) -> Option<&str> {
    address.strip_prefix("mailbox/").filter(|hash| !hash.is_empty())
}

/// Root address, used as the default post-logout target.
pub fn root() -> String {
    String::from("/")
}
