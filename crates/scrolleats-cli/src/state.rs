//! Local persistence of the whitelisted application state.
//!
//! The state file holds the signed-in user, ratings, favorites, the last
//! location and the last special-boom time as pretty JSON. A missing file is
//! an empty store; a corrupt one is an error rather than silently discarded.

use std::path::{Path, PathBuf};

use anyhow::Context;
use scrolleats_core::{AppStore, PersistedState, UserRating};

#[derive(Debug, Clone)]
pub(crate) struct StateFile {
    path: PathBuf,
}

impl StateFile {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or decoded.
    pub(crate) fn load(&self) -> anyhow::Result<AppStore> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no state file, starting empty");
            return Ok(AppStore::new());
        }
        let raw = std::fs::read_to_string(&self.path)
            .with_context(|| format!("reading {}", self.path.display()))?;
        let state = PersistedState::from_json(&raw)
            .with_context(|| format!("decoding {}", self.path.display()))?;
        Ok(AppStore::restore(state))
    }

    /// Writes the persisted slice of `store`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub(crate) fn save(&self, store: &AppStore) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let json = store.persisted().to_json()?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("writing {}", self.path.display()))?;
        tracing::debug!(path = %self.path.display(), "state saved");
        Ok(())
    }
}

/// Records a rating in `store`, replacing any earlier one for the restaurant.
///
/// # Errors
///
/// Returns an error if either score is out of range.
pub(crate) fn record_rating(
    store: &mut AppStore,
    user_id: &str,
    restaurant_id: &str,
    boom_score: u8,
    stars: u8,
    review: Option<String>,
) -> anyhow::Result<UserRating> {
    let mut rating = UserRating::new(user_id, restaurant_id, boom_score, stars)?;
    rating.review = review.filter(|r| !r.trim().is_empty());
    store.add_user_rating(rating.clone());
    Ok(rating)
}
