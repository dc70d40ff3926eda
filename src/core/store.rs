//! File-backed stores: per-folder expansion state, the crash log sink, and
//! the local folder/message fixtures the shell renders until a mail backend
//! supplies real data.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use indexmap::IndexMap;

use crate::core::models::{Folder, FolderTree, MessageRow};
use crate::core::remote::{Diagnostics, ErrorReport, ExpandPersistence};

fn data_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("driftmail")
}

/// Persisted collapsed/expanded state, keyed by folder hash. Saves are
/// fire-and-forget: a failed write is logged and forgotten.
pub struct ExpandStore {
    path: PathBuf,
    collapsed: IndexMap<String, bool>,
}

impl ExpandStore {
    pub fn default_path() -> PathBuf {
        data_dir().join("folders.json")
    }

    pub fn open(path: PathBuf) -> Self {
        let collapsed = match fs::read_to_string(&path) {
            Ok(data) => serde_json::from_str(&data).unwrap_or_else(|e| {
                log::warn!("Corrupt folder state file, starting fresh: {}", e);
                IndexMap::new()
            }),
            Err(_) => IndexMap::new(),
        };
        Self { path, collapsed }
    }

    pub fn collapsed(&self, full_name_hash: &str) -> Option<bool> {
        self.collapsed.get(full_name_hash).copied()
    }

    /// Overlay persisted collapsed flags onto a freshly loaded tree.
    pub fn apply(&self, tree: &mut FolderTree) {
        tree.for_each_mut(&mut |folder| {
            if let Some(collapsed) = self.collapsed(&folder.full_name_hash) {
                folder.collapsed = collapsed;
            }
        });
    }

    fn save(&self) {
        if let Some(parent) = self.path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                log::warn!("Cannot create folder state dir: {}", e);
                return;
            }
        }
        match serde_json::to_string_pretty(&self.collapsed) {
            Ok(data) => {
                if let Err(e) = fs::write(&self.path, data) {
                    log::warn!("Cannot save folder state: {}", e);
                }
            }
            Err(e) => log::warn!("Cannot serialize folder state: {}", e),
        }
    }
}

impl ExpandPersistence for ExpandStore {
    fn set_folder_expanded(&mut self, full_name_hash: &str, was_collapsed: bool) {
        self.collapsed
            .insert(full_name_hash.to_string(), !was_collapsed);
        self.save();
    }
}

/// Diagnostics sink appending one JSON line per report.
pub struct CrashLog {
    path: PathBuf,
}

impl CrashLog {
    pub fn default_path() -> PathBuf {
        data_dir().join("crash.log")
    }

    pub fn open(path: PathBuf) -> Self {
        Self { path }
    }
}

impl Diagnostics for CrashLog {
    fn report(&self, report: &ErrorReport) {
        log::error!("Uncaught error at {}: {}", report.location, report.message);
        let Ok(line) = serde_json::to_string(report) else {
            return;
        };
        if let Some(parent) = self.path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        let result = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut file| writeln!(file, "{line}"));
        if let Err(e) = result {
            log::warn!("Cannot write crash log: {}", e);
        }
    }
}

/// Load a folder tree from `folders_seed.json` next to the other state files,
/// if the user provided one.
pub fn load_folder_seed(path: &PathBuf) -> Result<Option<FolderTree>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let data = fs::read_to_string(path).map_err(|e| format!("read folder seed: {e}"))?;
    let tree = serde_json::from_str(&data).map_err(|e| format!("parse folder seed: {e}"))?;
    Ok(Some(tree))
}

pub fn folder_seed_path() -> PathBuf {
    data_dir().join("folders_seed.json")
}

/// Built-in folder set used until a seed file or mail backend supplies one.
pub fn builtin_tree() -> FolderTree {
    let mut inbox = Folder::new("Inbox", "INBOX", "inbox");
    inbox.unread_count = 2;
    inbox.children = vec![
        Folder::new("Receipts", "INBOX.Receipts", "inbox-receipts"),
        Folder::new("Travel", "INBOX.Travel", "inbox-travel"),
    ];

    let mut archive = Folder::new("Archive", "Archive", "archive");
    archive.collapsed = true;
    archive.children = vec![
        Folder::new("2024", "Archive.2024", "archive-2024"),
        Folder::new("2023", "Archive.2023", "archive-2023"),
    ];

    FolderTree {
        roots: vec![
            inbox,
            Folder::new("Drafts", "Drafts", "drafts"),
            Folder::new("Sent", "Sent", "sent"),
            Folder::new("Spam", "Spam", "spam"),
            Folder::new("Trash", "Trash", "trash"),
            archive,
        ],
    }
}

/// Built-in message fixtures, keyed by `full_name_raw`.
pub fn builtin_mailboxes() -> IndexMap<String, Vec<MessageRow>> {
    let mut boxes = IndexMap::new();
    boxes.insert(
        "INBOX".to_string(),
        vec![
            MessageRow {
                uid: "101".into(),
                subject: "Weekly report".into(),
                from: "reports@example.com".into(),
            },
            MessageRow {
                uid: "102".into(),
                subject: "Lunch on Thursday?".into(),
                from: "sam@example.com".into(),
            },
            MessageRow {
                uid: "103".into(),
                subject: "Invoice #4821".into(),
                from: "billing@example.com".into(),
            },
        ],
    );
    boxes.insert(
        "Sent".to_string(),
        vec![MessageRow {
            uid: "9".into(),
            subject: "Re: Weekly report".into(),
            from: "me@example.com".into(),
        }],
    );
    boxes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("driftmail-{}-{}", name, std::process::id()))
    }

    #[test]
    fn expansion_survives_a_reopen() {
        let path = temp_path("expand-reopen.json");
        let _ = fs::remove_file(&path);

        let mut store = ExpandStore::open(path.clone());
        // Folder was collapsed, user expanded it.
        store.set_folder_expanded("archive", true);

        let reopened = ExpandStore::open(path.clone());
        assert_eq!(reopened.collapsed("archive"), Some(false));
        assert_eq!(reopened.collapsed("unknown"), None);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn stored_value_is_the_negated_pre_toggle_value() {
        let path = temp_path("expand-negate.json");
        let _ = fs::remove_file(&path);

        let mut store = ExpandStore::open(path.clone());
        store.set_folder_expanded("inbox", false);
        assert_eq!(store.collapsed("inbox"), Some(true));
        store.set_folder_expanded("inbox", true);
        assert_eq!(store.collapsed("inbox"), Some(false));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn apply_overlays_saved_state_onto_a_fresh_tree() {
        let path = temp_path("expand-apply.json");
        let _ = fs::remove_file(&path);

        let mut store = ExpandStore::open(path.clone());
        store.set_folder_expanded("archive", true); // now expanded
        store.set_folder_expanded("inbox", false); // now collapsed

        let mut tree = builtin_tree();
        store.apply(&mut tree);
        assert!(!tree.find("archive").unwrap().collapsed);
        assert!(tree.find("inbox").unwrap().collapsed);
        // Untracked folders keep their construction default.
        assert!(!tree.find("trash").unwrap().collapsed);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn corrupt_state_file_starts_fresh() {
        let path = temp_path("expand-corrupt.json");
        fs::write(&path, "{not json").unwrap();
        let store = ExpandStore::open(path.clone());
        assert_eq!(store.collapsed("inbox"), None);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn builtin_tree_hashes_are_unique() {
        let tree = builtin_tree();
        let mut hashes = Vec::new();
        let mut clone = tree.clone();
        clone.for_each_mut(&mut |f| hashes.push(f.full_name_hash.clone()));
        let total = hashes.len();
        hashes.sort();
        hashes.dedup();
        assert_eq!(hashes.len(), total);
    }

    #[test]
    fn missing_folder_seed_is_not_an_error() {
        let path = temp_path("no-such-seed.json");
        let _ = fs::remove_file(&path);
        assert_eq!(load_folder_seed(&path).unwrap(), None);
    }
}
