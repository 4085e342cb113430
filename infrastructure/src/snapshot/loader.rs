//! Session snapshot loader
//!
//! The persistence/sync layer is modeled as a channel that delivers full
//! session snapshots; this adapter reads one from a JSON file (the same
//! wire shape the synced store uses: camelCase keys, millisecond
//! timestamps) and can replay its votes into a vote store.

use clarity_application::ports::vote_store::VoteStorePort;
use clarity_domain::session::Session;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Errors raised while loading a session snapshot
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("failed to read session snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed session snapshot: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Load a full session snapshot from a JSON file
pub fn load_session(path: &Path) -> Result<Session, SnapshotError> {
    let raw = std::fs::read_to_string(path).map_err(|source| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let session: Session = serde_json::from_str(&raw)?;

    info!(
        session = %session.id,
        initiatives = session.initiatives.len(),
        members = session.team_members.len(),
        votes = session.votes.len(),
        "loaded session snapshot"
    );
    Ok(session)
}

/// Replay a snapshot's votes into a vote store
///
/// Each vote goes through `record_vote`, so the one-vote-per-pair
/// invariant and delete-on-abstain semantics hold no matter what the
/// snapshot contains; with duplicate pairs the later entry wins, matching
/// arrival-order semantics.
pub async fn seed_votes<S: VoteStorePort>(store: &S, session: &Session) {
    for vote in &session.votes {
        store
            .record_vote(&vote.initiative_id, &vote.member_id, vote.scores, vote.is_abstain)
            .await;
    }
}
