#![deny(missing_docs)]
#![doc = "Shared error surface, provenance descriptors and canonical serialization for the Larmor pair estimator."]

pub mod errors;
pub mod hash;
pub mod provenance;
pub mod serde;

pub use errors::{ErrorInfo, LppError};
pub use hash::stable_hash_string;
pub use provenance::{commit_string, EstimateProvenance, SchemaVersion};
pub use self::serde::{from_json_slice, from_yaml_slice, to_canonical_json_bytes};
