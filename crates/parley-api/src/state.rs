use std::sync::Arc;

use tracing::info;

use parley_db::Store;

use crate::error::ApiResult;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub store: Store,
}

impl AppStateInner {
    pub fn new(store: Store) -> AppState {
        Arc::new(Self { store })
    }
}

/// Fill an empty store with the seed dataset. A populated store is left
/// alone. Returns whether seeding happened.
pub async fn init_store(store: &Store) -> ApiResult<bool> {
    let seeded = store.seed_if_empty().await?;
    if seeded {
        info!("Store initialized from seed dataset");
    } else {
        info!("Store already populated, skipping seed");
    }
    Ok(seeded)
}
