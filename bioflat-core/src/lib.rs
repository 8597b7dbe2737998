//! # Core building blocks shared by the bioflat format crates.
//!
//! This crate holds the pieces that the FASTA, GFF3 and VCF crates have in common:
//!
//! - [`attributes`]: the `;`-separated, percent-escaped `key=value` grammar used by
//!   GFF3 column 9.
//! - [`errors`]: the line-level error taxonomy and the record of skipped lines.
//! - [`config`]: TOML-backed reader/writer/window settings.
//! - [`utils`]: gzip-aware readers and writers.
//!
pub mod attributes;
pub mod config;
pub mod errors;
pub mod utils;

// re-exports for cleaner imports
pub use attributes::{AttributeMap, RESERVED_ATTRIBUTES};
pub use config::{Config, ConfigError, ReaderConfig, WindowConfig, WriterConfig};
pub use errors::{ParseError, Result, SkippedLine};
