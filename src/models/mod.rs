//! Value types shared across the crate

mod group_version;
mod output_format;

pub use group_version::GroupVersion;
pub use output_format::OutputFormat;
