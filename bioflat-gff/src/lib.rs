//! # GFF3 annotations for bioflat
//!
//! Each tab-delimited line decodes into a [`Feature`]. A [`FeatureGraph`] owns the
//! features in file order and, once every line is decoded, links children to
//! parents through their `ID`/`Parent` attributes. Features can then be cut out
//! of a [`bioflat_fasta::SequenceStore`] with optional flanks.
//!
//! ```no_run
//! use std::path::Path;
//! use bioflat_gff::FeatureGraph;
//!
//! let graph = FeatureGraph::try_from(Path::new("annotations.gff3")).unwrap();
//! if let Some(gene) = graph.get_by_id("YAL069W") {
//!     for child in graph.children(gene) {
//!         println!("{}", child);
//!     }
//! }
//! ```

pub mod consts;
pub mod feature;
pub mod graph;
pub mod window;
pub mod writer;

pub use feature::{Feature, Phase, Strand};
pub use graph::FeatureGraph;
pub use window::{Window, extract_window};
pub use writer::{GffWrite, write_gff};
