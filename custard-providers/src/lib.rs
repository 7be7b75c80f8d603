// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Custard Providers
//!
//! Vendor adapters implementing [`custard_core::FlavorProvider`].
//!
//! Each vendor module includes:
//!
//! - **Descriptor**: Static metadata and a factory
//! - **Strategies**: Ordered ways of reading today's flavor
//! - **Locations**: The store table, for vendors with only a few stores
//!
//! ## Supported Vendors
//!
//! | Vendor | Locations | Today's flavor | Upcoming |
//! |--------|-----------|----------------|----------|
//! | Culver's | Locator search | Locator JSON, page heading, `__NEXT_DATA__` | - |
//! | Kopp's | Fixed (3) | Monthly calendar page | Tomorrow |
//! | Oscar's | Fixed (2) | Home page weekday heading | - |
//! | Goodberry's | Fixed (9) | Home page flavor block | - |
//! | Leduc's | Fixed (1) | Home page date text, flavor selectors | Calendar page |
//!
//! ## Usage
//!
//! ```ignore
//! use custard_providers::ProviderRegistry;
//! use custard_fetch::ProviderConfig;
//! use tokio_util::sync::CancellationToken;
//!
//! let provider = ProviderRegistry::create(
//!     "kopps",
//!     client.clone(),
//!     &ProviderConfig::new(),
//!     &CancellationToken::new(),
//! )?;
//! let flavor = provider.get_current_flavor("kopps-glendale").await?;
//! ```

pub mod descriptor;
pub mod discovery;
mod extract;
pub mod fixed;
pub mod registry;

// Vendor modules (alphabetical)
pub mod culvers;
pub mod goodberrys;
pub mod kopps;
pub mod leducs;
pub mod oscars;

// Re-export key types
pub use descriptor::{
    LocationSource, ProviderDescriptor, ProviderFactory, ProviderMetadata, ProviderSetup,
};
pub use discovery::{ConfirmedLocation, Discovery, DiscoveryError, MIN_SEARCH_TERM_LENGTH};
pub use registry::ProviderRegistry;

// Re-export vendor descriptors
pub use culvers::culvers_descriptor;
pub use goodberrys::goodberrys_descriptor;
pub use kopps::kopps_descriptor;
pub use leducs::leducs_descriptor;
pub use oscars::oscars_descriptor;

// Re-export adapters
pub use culvers::CulversProvider;
pub use goodberrys::GoodberrysProvider;
pub use kopps::KoppsProvider;
pub use leducs::LeducsProvider;
pub use oscars::OscarsProvider;
