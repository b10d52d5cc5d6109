//! Friend leaderboard
//!
//! Purely additive: results only ever land in a [`LeaderboardCache`], never in
//! simulation state, and any failure reads as "no data".

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum number of entries kept for display
pub const MAX_ENTRIES: usize = 10;

/// Leaderboard backend failures
#[derive(Debug, Error)]
pub enum LeaderboardError {
    #[error("leaderboard service unavailable: {0}")]
    Unavailable(String),

    #[error("malformed leaderboard data: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// A single friend entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriendScore {
    pub name: String,
    pub score: u64,
}

impl FriendScore {
    pub fn new(name: impl Into<String>, score: u64) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}

/// Social backend (platform friend storage, a web service, ...)
pub trait SocialLeaderboard {
    fn fetch_friend_scores(&mut self) -> Result<Vec<FriendScore>, LeaderboardError>;

    /// Publish the player's best score. Backends without write support accept and ignore it.
    fn submit_score(&mut self, _score: u64) -> Result<(), LeaderboardError> {
        Ok(())
    }
}

/// Top friend scores, sorted descending
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaderboard {
    pub entries: Vec<FriendScore>,
}

impl Leaderboard {
    /// Drop zero scores, sort descending (ties by name), keep the top [`MAX_ENTRIES`]
    pub fn from_scores(scores: impl IntoIterator<Item = FriendScore>) -> Self {
        let mut entries: Vec<FriendScore> = scores.into_iter().filter(|e| e.score > 0).collect();
        entries.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.name.cmp(&b.name)));
        entries.truncate(MAX_ENTRIES);
        Self { entries }
    }

    /// Parse a JSON array of `{name, score}`
    pub fn from_json(json: &str) -> Result<Self, LeaderboardError> {
        let scores: Vec<FriendScore> = serde_json::from_str(json)?;
        Ok(Self::from_scores(scores))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Rank (1-indexed) `score` would take on this board, `None` if it wouldn't place
    pub fn rank_of(&self, score: u64) -> Option<usize> {
        if score == 0 {
            return None;
        }
        let rank = self
            .entries
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.entries.len())
            + 1;
        (rank <= MAX_ENTRIES).then_some(rank)
    }
}

/// Submit a score, logging failures. Returns whether the backend accepted it.
pub fn submit_best(source: &mut dyn SocialLeaderboard, score: u64) -> bool {
    match source.submit_score(score) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("Failed to submit score {}: {}", score, e);
            false
        }
    }
}

/// Last successfully fetched leaderboard
#[derive(Debug, Clone, Default)]
pub struct LeaderboardCache {
    board: Option<Leaderboard>,
}

impl LeaderboardCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Completion handler for a fetch. A failure clears the cache.
    pub fn apply(&mut self, result: Result<Vec<FriendScore>, LeaderboardError>) {
        match result {
            Ok(scores) => {
                let board = Leaderboard::from_scores(scores);
                log::info!("Leaderboard updated ({} entries)", board.len());
                self.board = Some(board);
            }
            Err(e) => {
                log::warn!("Leaderboard fetch failed: {}", e);
                self.board = None;
            }
        }
    }

    /// Fetch from `source` and store the result
    pub fn refresh(&mut self, source: &mut dyn SocialLeaderboard) {
        self.apply(source.fetch_friend_scores());
    }

    /// Leaderboard to display; `None` means "no data"
    pub fn board(&self) -> Option<&Leaderboard> {
        self.board.as_ref()
    }

    pub fn clear(&mut self) {
        self.board = None;
    }
}
