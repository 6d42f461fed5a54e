//! Versioned session snapshot for persistence between runs.
//!
//! The snapshot captures what a resumed interview needs: the stage, the
//! question count, and the transcript so far. It is a convenience of the
//! outer surface, not part of the turn contract, and losing it only costs
//! the resume.
//!
//! # Version Compatibility
//!
//! The `version` field enables forward compatibility. If a newer build
//! writes a snapshot with a higher version number, older builds ignore the
//! persisted state and start fresh.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use coach_types::{InterviewStage, SessionId};

/// Who said a transcript line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeakerRole {
    Candidate,
    Coach,
}

/// One line of the interview transcript.
///
/// Candidate lines carry the score their answer earned; coach lines do not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub role: SpeakerRole,
    pub text: String,
    pub score: Option<u8>,
}

impl TranscriptEntry {
    #[must_use]
    pub fn candidate(text: impl Into<String>, score: u8) -> Self {
        Self {
            role: SpeakerRole::Candidate,
            text: text.into(),
            score: Some(score),
        }
    }

    #[must_use]
    pub fn coach(text: impl Into<String>) -> Self {
        Self {
            role: SpeakerRole::Coach,
            text: text.into(),
            score: None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("failed to read snapshot at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write snapshot at {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse snapshot at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Snapshot of one interview session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Schema version for forward compatibility.
    pub version: u32,
    pub session_id: SessionId,
    pub stage: InterviewStage,
    pub question_count: u8,
    pub history: Vec<TranscriptEntry>,
}

impl SessionSnapshot {
    /// Current schema version.
    pub const CURRENT_VERSION: u32 = 1;

    /// Filename for the snapshot file.
    pub const FILENAME: &'static str = "session.json";

    #[must_use]
    pub fn new(
        session_id: SessionId,
        stage: InterviewStage,
        question_count: u8,
        history: Vec<TranscriptEntry>,
    ) -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            session_id,
            stage,
            question_count,
            history,
        }
    }

    /// Check whether this snapshot was written by the current schema.
    #[must_use]
    pub fn is_compatible(&self) -> bool {
        self.version == Self::CURRENT_VERSION
    }

    /// Where snapshots live by default: `~/.coach/session.json`.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".coach").join(Self::FILENAME))
    }

    /// Write the snapshot, creating the parent directory if needed. The
    /// write goes through a sibling temp file so a crash mid-write cannot
    /// leave a truncated snapshot behind.
    pub fn save_to(&self, path: &Path) -> Result<(), SnapshotError> {
        let write_err = |source| SnapshotError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|source| SnapshotError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(write_err)?;
        fs::rename(&tmp, path).map_err(write_err)?;
        Ok(())
    }

    /// Load a snapshot if one exists and matches the current schema.
    ///
    /// A missing file and a version mismatch both load as `Ok(None)`; only
    /// an unreadable or unparseable file is an error.
    pub fn load_from(path: &Path) -> Result<Option<Self>, SnapshotError> {
        if !path.exists() {
            return Ok(None);
        }

        let data = fs::read_to_string(path).map_err(|source| SnapshotError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let snapshot: Self =
            serde_json::from_str(&data).map_err(|source| SnapshotError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        if !snapshot.is_compatible() {
            tracing::debug!(
                version = snapshot.version,
                "Snapshot version mismatch, starting fresh"
            );
            return Ok(None);
        }
        Ok(Some(snapshot))
    }
}

#[cfg(test)]
mod tests {
    use coach_types::{InterviewStage, SessionId};

    use super::{SessionSnapshot, SpeakerRole, TranscriptEntry};

    fn sample() -> SessionSnapshot {
        SessionSnapshot::new(
            SessionId::generate(),
            InterviewStage::Behavioral,
            2,
            vec![
                TranscriptEntry::candidate("I led the migration to the new platform", 76),
                TranscriptEntry::coach("Tell me more about your role in that migration."),
            ],
        )
    }

    #[test]
    fn new_snapshot_has_current_version() {
        assert_eq!(sample().version, SessionSnapshot::CURRENT_VERSION);
        assert!(sample().is_compatible());
    }

    #[test]
    fn older_versions_are_incompatible() {
        let mut snapshot = sample();
        snapshot.version = 0;
        assert!(!snapshot.is_compatible());
    }

    #[test]
    fn serialization_roundtrip() {
        let snapshot = sample();
        let json = serde_json::to_string_pretty(&snapshot).unwrap();
        let restored: SessionSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, snapshot);
    }

    #[test]
    fn candidate_entries_carry_scores() {
        let entry = TranscriptEntry::candidate("answer", 88);
        assert_eq!(entry.role, SpeakerRole::Candidate);
        assert_eq!(entry.score, Some(88));
        assert_eq!(TranscriptEntry::coach("prompt").score, None);
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SessionSnapshot::FILENAME);

        let snapshot = sample();
        snapshot.save_to(&path).unwrap();

        let restored = SessionSnapshot::load_from(&path).unwrap().unwrap();
        assert_eq!(restored, snapshot);
    }

    #[test]
    fn load_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        assert!(SessionSnapshot::load_from(&path).unwrap().is_none());
    }

    #[test]
    fn load_skips_incompatible_versions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SessionSnapshot::FILENAME);

        let mut snapshot = sample();
        snapshot.version = SessionSnapshot::CURRENT_VERSION + 1;
        let json = serde_json::to_string(&snapshot).unwrap();
        std::fs::write(&path, json).unwrap();

        assert!(SessionSnapshot::load_from(&path).unwrap().is_none());
    }

    #[test]
    fn load_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SessionSnapshot::FILENAME);
        std::fs::write(&path, "{ not json").unwrap();

        assert!(SessionSnapshot::load_from(&path).is_err());
    }

    #[test]
    fn save_creates_the_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(SessionSnapshot::FILENAME);

        sample().save_to(&path).unwrap();
        assert!(path.exists());
    }
}
