//! Core processing building blocks: band normalization, false-color compositing,
//! normalized difference indices, percentile stretching, water masking, the two
//! end-to-end pipelines, and save helpers. These are internal primitives consumed
//! by the high-level `api` module.
pub mod params;
pub mod processing;
