pub mod normalizer;

pub use normalizer::{try_build_date, Normalizer};
