//! # bioflat
//!
//! Typed decoders for three genomic flat file formats, each in its own crate and
//! re-exported here behind a cargo feature:
//!
//! - [`fasta`]: sequences and the [`fasta::SequenceStore`].
//! - [`gff`]: GFF3 features linked into a parent/child [`gff::FeatureGraph`].
//! - [`vcf`]: variant calls typed by their own header.
//! - [`core`]: the attribute grammar, errors and configuration they share.

#[cfg(feature = "core")]
#[doc(inline)]
pub use bioflat_core as core;

#[cfg(feature = "fasta")]
#[doc(inline)]
pub use bioflat_fasta as fasta;

#[cfg(feature = "gff")]
#[doc(inline)]
pub use bioflat_gff as gff;

#[cfg(feature = "vcf")]
#[doc(inline)]
pub use bioflat_vcf as vcf;
