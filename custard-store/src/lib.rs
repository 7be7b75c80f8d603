// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Custard Store
//!
//! Host-side plumbing around the vendor adapters.
//!
//! This crate provides:
//!
//! - **Config**: Configured locations and poll intervals, persisted as JSON
//! - **FlavorStore**: Last good flavor and update state per location, with watch channels
//! - **UpdateCoordinator**: Polls one location and maps failures to host states
//! - **Presentation**: Flavor as an observable value plus attributes
//!
//! ## Usage
//!
//! ```ignore
//! use custard_store::{Config, FlavorStore, UpdateCoordinator};
//!
//! let config = Config::load_from(&Config::default_path()).await?;
//! let store = Arc::new(FlavorStore::new());
//!
//! let coordinator = UpdateCoordinator::new(provider, "kopps-glendale", interval, store.clone());
//! tokio::spawn(async move { coordinator.run(cancel).await });
//!
//! let mut rx = store.subscribe();
//! while rx.changed().await.is_ok() {
//!     println!("Flavors updated!");
//! }
//! ```

pub mod config;
pub mod error;
pub mod flavor_store;
pub mod persistence;
pub mod presentation;
pub mod scheduler;

pub use config::{
    Config, DEFAULT_UPDATE_INTERVAL_MINUTES, GeneralConfig, LocationEntry, UPDATE_INTERVAL_RANGE,
};
pub use error::StoreError;
pub use flavor_store::{FlavorStore, LocationStatus, UpdateState};
pub use persistence::{
    default_config_dir, default_config_path, ensure_dir, load_json, load_json_or_default, save_json,
};
pub use presentation::{UNKNOWN_FLAVOR, attributes, native_value};
pub use scheduler::{UpdateCoordinator, failure_state};
