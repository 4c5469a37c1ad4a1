//! Domains module containing business logic organized by bounded contexts.
//!
//! Currently a single domain: named static-resource providers and the
//! registry that looks resources up across them.

pub mod resources;
