//! Effect catalog, construction and CPU kernels.

pub mod builder;
pub mod catalog;
pub mod effect;
pub mod filters;
pub(crate) mod kernel;
pub mod params;
