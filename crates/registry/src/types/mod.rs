mod errors;

pub use errors::{RegistryError, RegistryResult};
