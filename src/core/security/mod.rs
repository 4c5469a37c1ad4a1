// Security module for resource path validation
//
// Every filesystem lookup made on behalf of a provider goes through this
// module so that a requested resource path can never resolve to a file
// outside the provider's root directory.

pub mod path_validator;

pub use path_validator::{PathSecurityError, resolve_within_root};
