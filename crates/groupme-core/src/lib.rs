#![allow(clippy::pedantic)]
#![allow(clippy::nursery)]
#![deny(clippy::unwrap_used)]
#![allow(clippy::missing_errors_doc)]

pub mod aggregate;
pub mod api;
pub mod constants;
pub mod error;
pub mod gateway;
pub mod models;
pub mod mutate;
pub mod settings;
pub mod snapshot;
pub mod validation;

#[cfg(test)]
pub(crate) mod testing;

pub use crate::aggregate::*;
pub use crate::constants::*;
pub use crate::error::*;
pub use crate::gateway::*;
pub use crate::models::*;
pub use crate::mutate::*;
pub use crate::settings::*;
pub use crate::snapshot::*;
pub use crate::validation::*;
