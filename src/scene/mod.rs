//! Building proxies and picking.
//!
//! Every building is a [`BuildingProxy`] stored in the
//! [`BuildingRegistry`]. Menu navigation, scene clicks and hover
//! annotations all resolve ids through the same registry.

mod building;
mod picking;

pub use building::{BuildingProxy, BuildingRegistry};
pub use picking::{PickQuery, PickResolver, ProxyPicker, Ray};
