//! Stimulus sampling for choice-based surveys.
//!
//! Assigns pool items to fixed-size trials so every item is used once per pass
//! before any repeats, shuffles without positional bias, and splices fixed
//! checkpoint elements into a sequence at even intervals.

pub mod error;
pub mod sampler;

pub use error::SamplerError;
pub use sampler::{Sampler, SamplingMode, fy_shuffle, insert_element, sample_random_elements};
