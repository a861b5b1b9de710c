use std::path::Path;

use keywiz::config::app_config::AppConfig;
use keywiz::core::errors::Result;
use keywiz::core::models::outcome::ExportOutcome;
use keywiz::core::services::keystore_manager::KeystoreManager;

use crate::cli::{StoreArgs, WriteArgs};

/// Build a manager from the configuration and load the requested keystore.
pub fn open(config: &AppConfig, store: &StoreArgs) -> Result<KeystoreManager> {
    let mut manager = KeystoreManager::new(&config.to_manager_options());
    manager.load(&store.keystore, &store.password)?;
    Ok(manager)
}

/// Persist a mutated keystore, in place unless `--out` was given.
pub fn write_back(manager: &KeystoreManager, store: &StoreArgs, write: &WriteArgs) -> Result<ExportOutcome> {
    match (&write.out, &write.out_password) {
        (None, None) => manager.save(),
        (out, out_password) => {
            let path: &Path = out.as_deref().unwrap_or(store.keystore.as_path());
            let password = out_password.as_deref().unwrap_or(store.password.as_str());
            manager.export_keystore(path, password)
        }
    }
}
