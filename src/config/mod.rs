//! Configuration models for executor policies.

pub mod policy;

pub use policy::{PolicyConfig, PresentationConfig};
