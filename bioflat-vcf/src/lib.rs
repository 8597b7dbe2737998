//! # VCF variant calls for bioflat
//!
//! A VCF file describes its own INFO and FORMAT columns in its header. The header
//! lines are collected into a [`MetadataRegistry`] first, then every data line is
//! decoded into a [`VariantRecord`] whose values are typed according to those
//! declarations. Anything the header does not declare, or that does not match its
//! declaration, is kept as an untyped string instead of failing the record.
//!
//! ```no_run
//! use std::path::Path;
//! use bioflat_vcf::VariantTable;
//!
//! let table = VariantTable::try_from(Path::new("calls.vcf.gz")).unwrap();
//! for record in &table {
//!     println!("{}:{} {:?}", record.chrom, record.pos, record.genotype(0, "GT"));
//! }
//! ```

pub mod consts;
pub mod decoder;
pub mod header;
pub mod record;
pub mod table;
pub mod types;
pub mod writer;

pub use decoder::{CoercionError, decode_or_string, decode_value};
pub use header::{FieldDescriptor, MetaLine, MetadataRegistry, MetadataRegistryBuilder};
pub use record::VariantRecord;
pub use table::VariantTable;
pub use types::{Number, TypedValue, ValueType};
pub use writer::{VcfWrite, write_vcf};
