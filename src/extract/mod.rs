//! Schema-free extraction of funding records from arbitrary JSON.
//!
//! The aggregator payload has no published schema, so records are located
//! heuristically:
//! - `walker`: pre-order iteration over every object node with its path
//! - `classifier`: fuzzy key matching for platform, symbol and rate fields
//! - `normalize`: rate unit coercion and base-symbol canonicalization
//! - `platform`: free-text venue label resolution

mod classifier;
mod normalize;
mod platform;
mod walker;

pub use classifier::{extract_candidate, is_platform_key, is_rate_key, is_symbol_key, Candidate};
pub use normalize::{base_from_symbol, coerce_rate, parse_decimal, MAX_HOURLY_RATE};
pub use platform::resolve_platform;
pub use walker::{object_nodes, JsonPath, ObjectNodes};
