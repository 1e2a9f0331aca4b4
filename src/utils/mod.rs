pub mod cache;
pub mod normalizer;
