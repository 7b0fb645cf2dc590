use std::sync::Arc;

use super::{config::Config, store::TermStore};

pub struct AppState {
    pub config: Config,
    pub store: TermStore,
}

impl AppState {
    pub fn new(config: Config) -> Arc<Self> {
        let store = TermStore::new(&config.data_path, &config.admin_password);

        Arc::new(Self { config, store })
    }
}
