//! Domain logic - pure release rules independent of any subprocess

pub mod category;
pub mod commit;
pub mod version;

pub use category::{categorize, Category, CategoryBuckets};
pub use commit::{parse_log_output, Commit};
pub use version::{increment_version, is_semantic_tag, Version, VersionBump};
