//! Category cleanup: normalization against a mapping table and deny-list
//! filtering

pub mod filter;
pub mod normalizer;

pub use filter::CategoryFilter;
pub use normalizer::CategoryNormalizer;
