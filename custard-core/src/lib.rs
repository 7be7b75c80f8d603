// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Custard Core
//!
//! Core types, models, and traits shared by every custard crate.
//!
//! ## Key Types
//!
//! ### Vendor Types
//! - [`ProviderKind`] - Closed set of supported vendors
//! - [`LocationKey`] - Identity of one configured store
//!
//! ### Data Types
//! - [`LocationInfo`] - A physical store
//! - [`FlavorInfo`] - Today's flavor for a store
//! - [`ScheduledFlavor`] - A flavor on a future date
//!
//! ### Contract
//! - [`FlavorProvider`] - Uniform adapter interface
//! - [`ProviderError`] - Failure taxonomy for adapter operations

pub mod error;
pub mod models;
pub mod traits;

// Re-export error types
pub use error::{BoxError, CommunicationError, CoreError, ErrorKind, ProviderError};

// Re-export all model types
pub use models::{
    Coordinates, FlavorInfo, LocationInfo, LocationKey, ProviderKind, ScheduledFlavor, region,
};

// Re-export traits
pub use traits::{DEFAULT_UPCOMING_DAYS, FlavorProvider};
