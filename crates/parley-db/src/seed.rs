use anyhow::{Context, Result};
use parley_types::models::Document;
use tracing::info;

use crate::Database;

const SAMPLE: &str = include_str!("../seed/messenger-sample.json");

/// The fixed dataset an empty store starts from.
pub fn dataset() -> Result<Document> {
    serde_json::from_str(SAMPLE).context("parsing embedded seed dataset")
}

impl Database {
    /// Install the seed dataset if the store is empty. Returns whether it did.
    pub(crate) fn install_seed(&self) -> Result<bool> {
        let seed = dataset()?;
        self.with_data_mut(|data| {
            if data.is_some() {
                return Ok(false);
            }

            info!(
                "Seeding store: {} users, {} conversations, {} messages",
                seed.users.len(),
                seed.conversations.len(),
                seed.messages.len()
            );
            *data = Some(seed);
            Ok(true)
        })
    }

    /// Undo an `install_seed` whose persist failed.
    pub(crate) fn clear(&self) -> Result<()> {
        self.with_data_mut(|data| {
            *data = None;
            Ok(())
        })
    }
}
