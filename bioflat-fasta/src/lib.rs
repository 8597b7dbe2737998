//! # FASTA sequences for bioflat
//!
//! Parses `>id description` records with wrapped sequence lines, writes them back
//! wrapped at a fixed width, and keeps them in an ID-keyed [`SequenceStore`] that
//! the GFF3 window extractor reads from.

pub mod parser;
pub mod record;
pub mod store;
pub mod writer;

pub use parser::{parse_fasta_header, parse_fasta_reader, parse_fasta_str};
pub use record::FastaRecord;
pub use store::SequenceStore;
pub use writer::{FastaWrite, wrap_sequence, write_fasta};
