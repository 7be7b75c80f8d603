//! Domain models for custard.
//!
//! ## Submodules
//!
//! - [`provider`] - Vendor identity ([`ProviderKind`], [`LocationKey`])
//! - [`location`] - Store locations
//! - [`flavor`] - Current and scheduled flavors
//! - [`region`] - US state lookup used by location filters

mod flavor;
mod location;
mod provider;
pub mod region;

pub use flavor::{FlavorInfo, ScheduledFlavor};
pub use location::{Coordinates, LocationInfo};
pub use provider::{LocationKey, ProviderKind};
