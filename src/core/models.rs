use serde::{Deserialize, Serialize};

/// One row in the mail folder tree.
///
/// `full_name_raw` is the server-side path ("INBOX.Receipts");
/// `full_name_hash` is the stable opaque key used for expansion persistence
/// and address encoding. Hashes must be unique across the tree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Folder {
    pub name: String,
    pub full_name_raw: String,
    pub full_name_hash: String,
    #[serde(default)]
    pub collapsed: bool,
    /// Whether clicking the label opens the mailbox (placeholder parents are
    /// not selectable).
    #[serde(default = "default_true")]
    pub selectable: bool,
    /// Explicitly hidden rows are skipped by navigation along with their
    /// subtree.
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub unread_count: u32,
    #[serde(default)]
    pub children: Vec<Folder>,
}

fn default_true() -> bool {
    true
}

impl Folder {
    pub fn new(name: &str, full_name_raw: &str, full_name_hash: &str) -> Self {
        Self {
            name: name.to_string(),
            full_name_raw: full_name_raw.to_string(),
            full_name_hash: full_name_hash.to_string(),
            collapsed: false,
            selectable: true,
            hidden: false,
            unread_count: 0,
            children: Vec::new(),
        }
    }
}

/// A visible row produced by flattening the tree.
#[derive(Debug, Clone, Copy)]
pub struct RowRef<'a> {
    pub folder: &'a Folder,
    pub depth: usize,
}

/// Ordered folder hierarchy. Created by the external folder data source;
/// the interaction core only toggles `collapsed` and reads identity fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FolderTree {
    pub roots: Vec<Folder>,
}

impl FolderTree {
    /// Depth-first flatten of the rows a user can currently see: hidden rows
    /// are skipped with their subtree, and descendants of a collapsed row are
    /// skipped (the collapsed row itself stays visible).
    pub fn visible_rows(&self) -> Vec<RowRef<'_>> {
        fn walk<'a>(folders: &'a [Folder], depth: usize, out: &mut Vec<RowRef<'a>>) {
            for folder in folders {
                if folder.hidden {
                    continue;
                }
                out.push(RowRef { folder, depth });
                if !folder.collapsed {
                    walk(&folder.children, depth + 1, out);
                }
            }
        }
        let mut out = Vec::new();
        walk(&self.roots, 0, &mut out);
        out
    }

    pub fn find(&self, full_name_hash: &str) -> Option<&Folder> {
        fn walk<'a>(folders: &'a [Folder], hash: &str) -> Option<&'a Folder> {
            for folder in folders {
                if folder.full_name_hash == hash {
                    return Some(folder);
                }
                if let Some(found) = walk(&folder.children, hash) {
                    return Some(found);
                }
            }
            None
        }
        walk(&self.roots, full_name_hash)
    }

    pub fn find_mut(&mut self, full_name_hash: &str) -> Option<&mut Folder> {
        fn walk<'a>(folders: &'a mut [Folder], hash: &str) -> Option<&'a mut Folder> {
            for folder in folders {
                if folder.full_name_hash == hash {
                    return Some(folder);
                }
                if let Some(found) = walk(&mut folder.children, hash) {
                    return Some(found);
                }
            }
            None
        }
        walk(&mut self.roots, full_name_hash)
    }

    pub fn find_by_raw(&self, full_name_raw: &str) -> Option<&Folder> {
        fn walk<'a>(folders: &'a [Folder], raw: &str) -> Option<&'a Folder> {
            for folder in folders {
                if folder.full_name_raw == raw {
                    return Some(folder);
                }
                if let Some(found) = walk(&folder.children, raw) {
                    return Some(found);
                }
            }
            None
        }
        walk(&self.roots, full_name_raw)
    }

    pub fn for_each_mut(&mut self, f: &mut impl FnMut(&mut Folder)) {
        fn walk(folders: &mut [Folder], f: &mut impl FnMut(&mut Folder)) {
            for folder in folders {
                f(folder);
                walk(&mut folder.children, f);
            }
        }
        walk(&mut self.roots, f);
    }
}

/// Layout mode of the mailbox screen: with or without a preview pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PreviewMode {
    #[default]
    Preview,
    NoPreview,
}

/// Minimal message line for the list pane (the drag-source rows).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MessageRow {
    pub uid: String,
    pub subject: String,
    pub from: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> FolderTree {
        let mut inbox = Folder::new("Inbox", "INBOX", "inbox");
        inbox.children = vec![
            Folder::new("Receipts", "INBOX.Receipts", "inbox-receipts"),
            Folder::new("Travel", "INBOX.Travel", "inbox-travel"),
        ];
        let mut archive = Folder::new("Archive", "Archive", "archive");
        archive.collapsed = true;
        archive.children = vec![Folder::new("2024", "Archive.2024", "archive-2024")];
        let mut ghost = Folder::new("Ghost", "Ghost", "ghost");
        ghost.hidden = true;
        ghost.children = vec![Folder::new("Child", "Ghost.Child", "ghost-child")];
        FolderTree {
            roots: vec![inbox, archive, ghost],
        }
    }

    #[test]
    fn visible_rows_skip_collapsed_descendants() {
        let t = tree();
        let rows = t.visible_rows();
        let hashes: Vec<&str> = rows.iter().map(|r| r.folder.full_name_hash.as_str()).collect();
        assert_eq!(
            hashes,
            vec!["inbox", "inbox-receipts", "inbox-travel", "archive"]
        );
    }

    #[test]
    fn visible_rows_skip_hidden_subtrees() {
        let t = tree();
        let rows = t.visible_rows();
        assert!(!rows
            .iter()
            .any(|r| r.folder.full_name_hash.starts_with("ghost")));
    }

    #[test]
    fn visible_rows_track_depth() {
        let t = tree();
        let rows = t.visible_rows();
        assert_eq!(rows[0].depth, 0);
        assert_eq!(rows[1].depth, 1);
    }

    #[test]
    fn find_reaches_nested_and_hidden_folders() {
        let t = tree();
        assert!(t.find("archive-2024").is_some());
        assert!(t.find("ghost-child").is_some());
        assert!(t.find("nope").is_none());
        assert_eq!(t.find_by_raw("INBOX.Travel").unwrap().name, "Travel");
    }

    #[test]
    fn folder_defaults_from_json() {
        let folder: Folder = serde_json::from_str(
            r#"{"name":"Spam","full_name_raw":"Spam","full_name_hash":"spam"}"#,
        )
        .unwrap();
        assert!(!folder.collapsed);
        assert!(folder.selectable);
        assert!(!folder.hidden);
        assert!(folder.children.is_empty());
    }
}
