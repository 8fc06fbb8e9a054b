use super::hand::HandRecord;
use crate::error::Error;
use std::path::PathBuf;

/// Where hands come from. The pipelines only ever see this seam, so
/// tests can feed them an in-memory store instead of a directory.
pub trait HandStore {
    /// Every stored hand, sorted by hand id. Directory enumeration
    /// order is not stable across platforms; sorting makes runs
    /// reproducible.
    fn list(&self) -> Result<Vec<HandRecord>, Error>;
}

/// A directory of `*.txt` hand history files, one hand per file.
pub struct Folder(PathBuf);

impl From<PathBuf> for Folder {
    fn from(path: PathBuf) -> Self {
        Self(path)
    }
}

impl HandStore for Folder {
    fn list(&self) -> Result<Vec<HandRecord>, Error> {
        std::fs::create_dir_all(&self.0)?;
        let mut hands = Vec::new();
        for entry in std::fs::read_dir(&self.0)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("txt") {
                continue;
            }
            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            let text = std::fs::read_to_string(&path)?;
            hands.push(HandRecord::parse(&stem, &text));
        }
        hands.sort_by(|a, b| a.hand_id.cmp(&b.hand_id));
        Ok(hands)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("gto-hands-{}", uuid::Uuid::now_v7()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn lists_sorted_by_hand_id() {
        let dir = scratch();
        std::fs::write(dir.join("b.txt"), "Hand #222 - $1/$2 Holdem\nx").unwrap();
        std::fs::write(dir.join("a.txt"), "Hand #111 - $1/$2 Holdem\nx").unwrap();
        std::fs::write(dir.join("notes.md"), "not a hand").unwrap();
        let hands = Folder::from(dir.clone()).list().unwrap();
        assert_eq!(
            hands.iter().map(|h| h.hand_id.as_str()).collect::<Vec<_>>(),
            vec!["111", "222"]
        );
        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn empty_folder_lists_nothing() {
        let dir = scratch();
        assert!(Folder::from(dir.clone()).list().unwrap().is_empty());
        std::fs::remove_dir_all(dir).unwrap();
    }
}
