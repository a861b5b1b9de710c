//! Open, inspect, edit and re-export JKS and PKCS#12 keystores.
//!
//! [`KeystoreManager`](core::services::keystore_manager::KeystoreManager) is the
//! entry point: load a keystore, list and mutate its certificate entries, then
//! export it atomically.

pub mod adapters;
pub mod config;
pub mod core;
