//! Recorded move logs loaded for replay.
//!
//! Files are validated locally: anything that fails here is reported to the
//! user and never forwarded to the remote authority.
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::Color;
use crate::error::ErrorSeverity;

/// Extension required for replay files.
pub const REPLAY_EXTENSION: &str = "json";

#[derive(Debug, Error)]
pub enum ReplayLoadError {
    #[error("please choose a .json file (got {})", .0.display())]
    WrongExtension(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid replay document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("no move history found in replay document")]
    EmptyHistory,
}

impl ReplayLoadError {
    pub const fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }
}

/// One recorded move, as stored by the remote authority.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub player: Color,
    pub piece_index: usize,
    /// `[row, col]`
    pub position: [usize; 2],
    /// Quarter turns clockwise.
    #[serde(default)]
    pub rotation: u8,
}

/// A complete move log. Unknown top-level fields are preserved and sent
/// back untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoveLog {
    pub move_history: Vec<MoveRecord>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl MoveLog {
    pub fn new(move_history: Vec<MoveRecord>) -> Self {
        Self {
            move_history,
            extra: serde_json::Map::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.move_history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.move_history.is_empty()
    }

    /// Parses and validates a replay document.
    pub fn parse(document: &str) -> Result<Self, ReplayLoadError> {
        let log: MoveLog = serde_json::from_str(document)?;
        log.validate()?;
        Ok(log)
    }

    /// Reads, parses, and validates a replay file.
    pub fn from_path(path: &Path) -> Result<Self, ReplayLoadError> {
        let has_extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(REPLAY_EXTENSION));
        if !has_extension {
            return Err(ReplayLoadError::WrongExtension(path.to_path_buf()));
        }

        let document = fs::read_to_string(path).map_err(|source| ReplayLoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&document)
    }

    pub fn validate(&self) -> Result<(), ReplayLoadError> {
        if self.move_history.is_empty() {
            return Err(ReplayLoadError::EmptyHistory);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    const DOCUMENT: &str = r#"{
        "winner": "R",
        "move_history": [
            {"player": "R", "piece_index": 0, "position": [3, 1], "rotation": 1},
            {"player": "B", "piece_index": 2, "position": [4, 4], "rotation": 0}
        ]
    }"#;

    #[test]
    fn parse_preserves_unknown_fields() {
        let log = MoveLog::parse(DOCUMENT).unwrap();
        assert_eq!(log.len(), 2);
        assert_eq!(log.move_history[0].position, [3, 1]);
        assert_eq!(log.extra["winner"], "R");

        let round = serde_json::to_value(&log).unwrap();
        assert_eq!(round["winner"], "R");
    }

    #[test]
    fn empty_history_is_rejected() {
        let err = MoveLog::parse(r#"{"move_history": []}"#).unwrap_err();
        assert!(matches!(err, ReplayLoadError::EmptyHistory));

        let err = MoveLog::parse(r#"{"moves": []}"#).unwrap_err();
        assert!(matches!(err, ReplayLoadError::Parse(_)));
    }

    #[test]
    fn from_path_checks_extension_before_reading() {
        let temp_dir = TempDir::new().unwrap();
        let bad = temp_dir.path().join("game.txt");
        let err = MoveLog::from_path(&bad).unwrap_err();
        assert!(matches!(err, ReplayLoadError::WrongExtension(_)));

        let good = temp_dir.path().join("game.json");
        let mut file = fs::File::create(&good).unwrap();
        file.write_all(DOCUMENT.as_bytes()).unwrap();
        assert_eq!(MoveLog::from_path(&good).unwrap().len(), 2);
    }

    #[test]
    fn from_path_reports_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.json");
        assert!(matches!(
            MoveLog::from_path(&missing),
            Err(ReplayLoadError::Read { .. })
        ));
    }
}
