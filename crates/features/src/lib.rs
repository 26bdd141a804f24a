//! Name features for organization matching.
//!
//! Provides pure functions used by the scorer:
//! - Name canonicalization (legal suffix stripping, abbreviation expansion)
//! - Edit-distance similarity ratio
//! - Best-name selection over current, alternate and former names

pub mod fuzzy;
pub mod matcher;
pub mod normalize;

pub use fuzzy::{fuzzy_ratio, indel_distance};
pub use matcher::{IndelRatio, NameMatch, NameMatcher, Similarity};
pub use normalize::{normalize_name, normalize_name_detailed, title_case, NormalizedName};
