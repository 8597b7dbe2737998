use std::fmt::{self, Display};

use bioflat_core::{ParseError, Result};
use indexmap::IndexMap;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::consts::{FILEFORMAT_CLASS, FORMAT_CLASS, INFO_CLASS, META_PREFIX};
use crate::types::{Number, ValueType};

/// `Key=Value` pairs inside `<...>`; a double-quoted value may contain commas.
static STRUCTURED_FIELD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(\w+)=("(?:[^"\\]|\\.)*"|[^,]*)(?:,|$)"#).unwrap());

///
/// One `##CLASS=VALUE` header line.
///
/// `value` is the raw text after the first `=`. When it is an angle-bracket
/// list, its `Key=Value` pairs are also split out into `fields` (quotes removed).
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaLine {
    pub class: String,
    pub value: String,
    pub fields: IndexMap<String, String>,
}

impl MetaLine {
    pub fn parse(line: &str) -> Result<MetaLine> {
        let Some(body) = line.strip_prefix(META_PREFIX) else {
            return Err(ParseError::InvalidHeader(format!(
                "metadata must start with {}: {}",
                META_PREFIX, line
            )));
        };
        let Some((class, value)) = body.split_once('=') else {
            return Err(ParseError::InvalidHeader(format!(
                "metadata is not ##field=value: {}",
                line
            )));
        };

        let fields = match value.strip_prefix('<').and_then(|v| v.strip_suffix('>')) {
            Some(inner) => parse_structured_fields(inner),
            None => IndexMap::new(),
        };

        Ok(MetaLine {
            class: class.to_string(),
            value: value.to_string(),
            fields,
        })
    }

    pub fn is_structured(&self) -> bool {
        !self.fields.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }
}

impl Display for MetaLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}={}", META_PREFIX, self.class, self.value)
    }
}

fn parse_structured_fields(inner: &str) -> IndexMap<String, String> {
    STRUCTURED_FIELD
        .captures_iter(inner)
        .map(|caps| {
            let value = &caps[2];
            let value = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .unwrap_or(value);
            (caps[1].to_string(), value.to_string())
        })
        .collect()
}

///
/// The declared schema of one INFO or FORMAT field.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub id: String,
    pub number: Number,
    pub value_type: ValueType,
    pub description: Option<String>,
    pub source: Option<String>,
    pub version: Option<String>,
    /// Any other tags, in declaration order.
    pub other: IndexMap<String, String>,
}

impl FieldDescriptor {
    pub fn new<S: Into<String>>(id: S, number: Number, value_type: ValueType) -> Self {
        FieldDescriptor {
            id: id.into(),
            number,
            value_type,
            description: None,
            source: None,
            version: None,
            other: IndexMap::new(),
        }
    }

    ///
    /// Build a descriptor from an `INFO` or `FORMAT` line. Returns `None` when the
    /// line has no `ID` tag.
    ///
    /// A missing `Type` means String and a missing `Number` means `.`.
    ///
    pub fn from_meta_line(meta: &MetaLine) -> Option<FieldDescriptor> {
        let id = meta.get("ID").filter(|id| !id.is_empty())?;
        let mut descriptor = FieldDescriptor::new(id, Number::Unknown, ValueType::String);

        for (key, value) in &meta.fields {
            match key.as_str() {
                "ID" => {}
                "Number" => descriptor.number = Number::from(value.as_str()),
                "Type" => {
                    descriptor.value_type = value.parse().unwrap_or_else(|e| {
                        debug!("{} in {}, using String", e, meta);
                        ValueType::String
                    })
                }
                "Description" => descriptor.description = Some(value.clone()),
                "Source" => descriptor.source = Some(value.clone()),
                "Version" => descriptor.version = Some(value.clone()),
                _ => {
                    descriptor.other.insert(key.clone(), value.clone());
                }
            }
        }

        Some(descriptor)
    }

    /// Flags are always a single presence marker, whatever their `Number`.
    pub fn is_scalar(&self) -> bool {
        self.value_type == ValueType::Flag || self.number.is_scalar()
    }
}

///
/// Collects header lines while the header is being read.
///
/// Call [`MetadataRegistryBuilder::build`] once the first data line is reached;
/// the resulting [`MetadataRegistry`] cannot be changed.
///
#[derive(Debug, Default)]
pub struct MetadataRegistryBuilder {
    fileformat: Option<String>,
    meta_lines: Vec<MetaLine>,
    info: IndexMap<String, FieldDescriptor>,
    format: IndexMap<String, FieldDescriptor>,
}

impl MetadataRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    ///
    /// Add one `##` header line. Every line is retained; `fileformat`, `INFO`
    /// and `FORMAT` lines also update the schema. A redeclared ID replaces the
    /// earlier descriptor.
    ///
    pub fn ingest_line(&mut self, line: &str) -> Result<()> {
        let meta = MetaLine::parse(line)?;

        match meta.class.as_str() {
            FILEFORMAT_CLASS => self.fileformat = Some(meta.value.clone()),
            INFO_CLASS => {
                if let Some(descriptor) = FieldDescriptor::from_meta_line(&meta) {
                    insert_descriptor(&mut self.info, descriptor, INFO_CLASS);
                }
            }
            FORMAT_CLASS => {
                if let Some(descriptor) = FieldDescriptor::from_meta_line(&meta) {
                    insert_descriptor(&mut self.format, descriptor, FORMAT_CLASS);
                }
            }
            _ => {}
        }

        self.meta_lines.push(meta);
        Ok(())
    }

    pub fn build(self) -> MetadataRegistry {
        MetadataRegistry {
            fileformat: self.fileformat,
            meta_lines: self.meta_lines,
            info: self.info,
            format: self.format,
        }
    }
}

fn insert_descriptor(table: &mut IndexMap<String, FieldDescriptor>, descriptor: FieldDescriptor, class: &str) {
    if let Some(previous) = table.insert(descriptor.id.clone(), descriptor) {
        debug!("{} {} redeclared, keeping the last declaration", class, previous.id);
    }
}

///
/// The schema declared by a VCF header: `INFO` and `FORMAT` field descriptors
/// keyed by ID, the `fileformat` value, and every header line in file order.
///
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataRegistry {
    fileformat: Option<String>,
    meta_lines: Vec<MetaLine>,
    info: IndexMap<String, FieldDescriptor>,
    format: IndexMap<String, FieldDescriptor>,
}

impl MetadataRegistry {
    pub fn fileformat(&self) -> Option<&str> {
        self.fileformat.as_deref()
    }

    pub fn meta_lines(&self) -> &[MetaLine] {
        &self.meta_lines
    }

    pub fn info(&self, id: &str) -> Option<&FieldDescriptor> {
        self.info.get(id)
    }

    pub fn format(&self, id: &str) -> Option<&FieldDescriptor> {
        self.format.get(id)
    }

    pub fn info_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.info.values()
    }

    pub fn format_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.format.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_parse_opaque_line() {
        let meta = MetaLine::parse("##source=myImputationProgramV3.1").unwrap();
        assert_eq!(meta.class, "source");
        assert_eq!(meta.value, "myImputationProgramV3.1");
        assert!(!meta.is_structured());
    }

    #[rstest]
    fn test_quoted_commas_do_not_split() {
        let meta = MetaLine::parse(
            r#"##INFO=<ID=AF,Number=A,Type=Float,Description="Allele Frequency, per ALT",Source="dbsnp",Version="138">"#,
        )
        .unwrap();
        assert_eq!(meta.get("ID"), Some("AF"));
        assert_eq!(meta.get("Description"), Some("Allele Frequency, per ALT"));
        assert_eq!(meta.get("Version"), Some("138"));
        assert_eq!(meta.fields.len(), 6);
    }

    #[rstest]
    fn test_display_reproduces_line() {
        let line = r#"##FORMAT=<ID=GT,Number=1,Type=String,Description="Genotype">"#;
        assert_eq!(MetaLine::parse(line).unwrap().to_string(), line);
    }

    #[rstest]
    #[case("#fileformat=VCFv4.2")]
    #[case("##fileformat")]
    fn test_invalid_meta_lines(#[case] line: &str) {
        assert!(matches!(MetaLine::parse(line), Err(ParseError::InvalidHeader(_))));
    }

    #[rstest]
    fn test_descriptor_from_line() {
        let meta = MetaLine::parse(
            r#"##INFO=<ID=DP,Number=1,Type=Integer,Description="Total Depth",IDX=3>"#,
        )
        .unwrap();
        let descriptor = FieldDescriptor::from_meta_line(&meta).unwrap();
        assert_eq!(descriptor.id, "DP");
        assert_eq!(descriptor.number, Number::Count(1));
        assert_eq!(descriptor.value_type, ValueType::Integer);
        assert_eq!(descriptor.description.as_deref(), Some("Total Depth"));
        assert_eq!(descriptor.other.get("IDX").map(String::as_str), Some("3"));
        assert!(descriptor.is_scalar());
    }

    #[rstest]
    fn test_type_before_number_is_order_independent() {
        let meta = MetaLine::parse("##INFO=<Type=Integer,ID=DP,Number=1>").unwrap();
        let descriptor = FieldDescriptor::from_meta_line(&meta).unwrap();
        assert!(descriptor.is_scalar());
        assert_eq!(descriptor.value_type, ValueType::Integer);
    }

    #[rstest]
    fn test_missing_type_and_number_defaults() {
        let meta = MetaLine::parse("##INFO=<ID=XX,Description=\"no type\">").unwrap();
        let descriptor = FieldDescriptor::from_meta_line(&meta).unwrap();
        assert_eq!(descriptor.value_type, ValueType::String);
        assert_eq!(descriptor.number, Number::Unknown);
    }

    #[rstest]
    fn test_flag_is_scalar_for_any_number() {
        let meta = MetaLine::parse("##INFO=<ID=DB,Number=0,Type=Flag>").unwrap();
        assert!(FieldDescriptor::from_meta_line(&meta).unwrap().is_scalar());
    }

    #[rstest]
    fn test_descriptor_without_id_is_not_registered() {
        let mut builder = MetadataRegistryBuilder::new();
        builder.ingest_line("##INFO=<Number=1,Type=Integer>").unwrap();
        let registry = builder.build();
        assert_eq!(registry.info_fields().count(), 0);
        assert_eq!(registry.meta_lines().len(), 1);
    }

    #[rstest]
    fn test_registry_collects_schema() {
        let mut builder = MetadataRegistryBuilder::new();
        for line in [
            "##fileformat=VCFv4.2",
            "##reference=file:///seq/references/1000GenomesPilot-NCBI36.fasta",
            "##INFO=<ID=DP,Number=1,Type=Integer,Description=\"Total Depth\">",
            "##FORMAT=<ID=GT,Number=1,Type=String,Description=\"Genotype\">",
            "##FORMAT=<ID=GP,Number=G,Type=Float,Description=\"Genotype Probabilities\">",
        ] {
            builder.ingest_line(line).unwrap();
        }
        let registry = builder.build();

        assert_eq!(registry.fileformat(), Some("VCFv4.2"));
        assert_eq!(registry.meta_lines().len(), 5);
        assert_eq!(registry.info("DP").unwrap().value_type, ValueType::Integer);
        assert_eq!(registry.format("GP").unwrap().number, Number::G);
        assert!(registry.info("GT").is_none());

        let format_ids: Vec<&str> = registry.format_fields().map(|d| d.id.as_str()).collect();
        assert_eq!(format_ids, vec!["GT", "GP"]);
    }

    #[rstest]
    fn test_redeclared_id_last_wins() {
        let mut builder = MetadataRegistryBuilder::new();
        builder.ingest_line("##INFO=<ID=DP,Number=1,Type=Integer>").unwrap();
        builder.ingest_line("##INFO=<ID=DP,Number=1,Type=Float>").unwrap();
        let registry = builder.build();

        assert_eq!(registry.info_fields().count(), 1);
        assert_eq!(registry.info("DP").unwrap().value_type, ValueType::Float);
        assert_eq!(registry.meta_lines().len(), 2);
    }
}
