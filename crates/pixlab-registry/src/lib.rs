//! pixlab-registry - Transform contract, registry, and manager
//!
//! This crate turns the point and spatial operations into named strategy
//! objects behind one contract:
//!
//! - [`Transform`]: validate parameters, derive absent ones from buffer
//!   statistics, apply, and describe the last application
//! - [`TransformParameters`]: named parameter sets with typed access
//! - [`TransformRegistry`]: name to constructor table, the only
//!   construction path for transforms
//! - [`TransformManager`]: long-lived instances plus an audit of the
//!   last application
//!
//! The built-in catalog in [`builtin`] covers every point transform and
//! spatial filter of the toolkit.

pub mod builtin;
mod error;
mod manager;
mod registry;
mod transform;

pub use error::{RegistryError, RegistryResult};
pub use manager::TransformManager;
pub use registry::{TransformFactory, TransformRegistry};
pub use transform::{ParamValue, Transform, TransformDescriptor, TransformParameters};
