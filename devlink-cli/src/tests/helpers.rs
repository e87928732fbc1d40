//! Test helpers for writing snapshot and weights fixtures.

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

/// Evaluation instant matching the fixture timestamps.
pub(super) const FIXTURE_NOW: &str = "2025-01-15T12:00:00Z";

/// Four posts: an engaged one, a newcomer, and two copies of a promo.
pub(super) const SNAPSHOTS_JSON: &str = r#"[
  {
    "id": "engaged",
    "createdAt": "2025-01-15T10:00:00Z",
    "engagement": { "likes": 40, "replies": 6, "reposts": 3, "saves": 2 },
    "uniqueEngagers": 45,
    "author": { "followerCount": 1200, "accountAgeDays": 700 }
  },
  {
    "id": "newcomer",
    "createdAt": "2025-01-15T11:00:00Z",
    "engagement": { "likes": 4, "replies": 1 },
    "uniqueEngagers": 5,
    "author": { "followerCount": 30, "accountAgeDays": 12 }
  },
  {
    "id": "promo-a",
    "createdAt": "2025-01-15T09:00:00Z",
    "engagement": { "likes": 5, "replies": -2 },
    "author": { "followerCount": 800, "accountAgeDays": 400 },
    "content": "Limited offer: buy my course today"
  },
  {
    "id": "promo-b",
    "createdAt": "2025-01-15T09:30:00Z",
    "engagement": { "likes": 5 },
    "author": { "followerCount": 800, "accountAgeDays": 400 },
    "content": "  limited offer: BUY my course today"
  }
]"#;

/// Temporary workspace holding fixture files.
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root =
            Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }

    pub(super) fn write(&self, name: &str, contents: &str) -> Utf8PathBuf {
        let path = self.path(name);
        write_utf8(&path, contents.as_bytes());
        path
    }

    pub(super) fn snapshots(&self) -> Utf8PathBuf {
        self.write("snapshots.json", SNAPSHOTS_JSON)
    }
}

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    fs::write(path.as_std_path(), contents).expect("write fixture file");
}
