use std::io::BufRead;
use std::path::Path;
use std::slice::Iter;
use std::str::FromStr;

use anyhow::Context;
use bioflat_core::utils::get_dynamic_reader;
use bioflat_core::{ParseError, ReaderConfig, Result, SkippedLine};
use bioflat_fasta::SequenceStore;
use log::{info, warn};

use crate::consts::{FASTA_DIRECTIVE, HEADER_LINE_PREFIX, META_PREFIX, VCF_FIXED_COLUMNS};
use crate::header::{MetadataRegistry, MetadataRegistryBuilder};
use crate::record::VariantRecord;

///
/// A decoded VCF file: the header schema, the sample names and every data
/// record in file order.
///
/// The header is read first and frozen into a [`MetadataRegistry`] at the first
/// data line. Header lines that show up after that point are not metadata any
/// more; they are decoded (and usually rejected) as data lines.
///
#[derive(Debug, Default)]
pub struct VariantTable {
    registry: MetadataRegistry,
    samples: Vec<String>,
    records: Vec<VariantRecord>,

    /// Sequences from a trailing `##FASTA` section.
    pub sequences: SequenceStore,
    /// Lines dropped because they could not be decoded.
    pub skipped: Vec<SkippedLine>,
}

impl VariantTable {
    ///
    /// Read a VCF document line by line.
    ///
    /// Data lines that fail to decode are recorded in [`VariantTable::skipped`],
    /// or abort the parse when `config.strict` is set.
    ///
    pub fn from_reader<R: BufRead>(reader: R, config: &ReaderConfig) -> Result<Self> {
        let mut table = VariantTable::default();
        let mut header = Some(MetadataRegistryBuilder::new());
        let mut fasta = String::new();
        let mut in_fasta = false;

        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let line_number = i + 1;

            if in_fasta {
                fasta.push_str(&line);
                fasta.push('\n');
                continue;
            }

            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if line.starts_with(FASTA_DIRECTIVE) {
                in_fasta = true;
                continue;
            }

            if let Some(builder) = header.as_mut() {
                if line.starts_with(HEADER_LINE_PREFIX) {
                    table.samples = line
                        .split('\t')
                        .skip(VCF_FIXED_COLUMNS + 1)
                        .map(str::to_string)
                        .collect();
                    continue;
                }
                if line.starts_with(META_PREFIX) {
                    if let Err(error) = builder.ingest_line(line) {
                        table.skip(line_number, error, config)?;
                    }
                    continue;
                }
                if line.starts_with('#') {
                    continue;
                }
            }

            // first data line: the header is complete
            if let Some(builder) = header.take() {
                table.registry = builder.build();
            }

            match VariantRecord::parse(line, &table.registry) {
                Ok(record) => table.records.push(record),
                Err(error) => table.skip(line_number, error, config)?,
            }
        }

        // header-only input
        if let Some(builder) = header.take() {
            table.registry = builder.build();
        }

        if !fasta.is_empty() {
            table.sequences = SequenceStore::from_reader(fasta.as_bytes())?;
        }

        Ok(table)
    }

    fn skip(&mut self, line_number: usize, error: ParseError, config: &ReaderConfig) -> Result<()> {
        if config.strict {
            return Err(error);
        }
        warn!("Skipping VCF line {}: {}", line_number, error);
        self.skipped.push(SkippedLine { line_number, error });
        Ok(())
    }

    ///
    /// Assemble a table from parts that are already decoded.
    ///
    pub fn from_parts(registry: MetadataRegistry, samples: Vec<String>, records: Vec<VariantRecord>) -> Self {
        VariantTable {
            registry,
            samples,
            records,
            ..Default::default()
        }
    }

    pub fn registry(&self) -> &MetadataRegistry {
        &self.registry
    }

    pub fn fileformat(&self) -> Option<&str> {
        self.registry.fileformat()
    }

    /// Sample names from the `#CHROM` line.
    pub fn samples(&self) -> &[String] {
        &self.samples
    }

    pub fn records(&self) -> &[VariantRecord] {
        &self.records
    }

    pub fn iter(&self) -> Iter<'_, VariantRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromStr for VariantTable {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self> {
        VariantTable::from_reader(s.as_bytes(), &ReaderConfig::default())
    }
}

impl TryFrom<&Path> for VariantTable {
    type Error = anyhow::Error;

    ///
    /// Create a new [VariantTable] from a (possibly gzip'd) VCF file, skipping
    /// lines that cannot be decoded.
    ///
    fn try_from(path: &Path) -> anyhow::Result<Self> {
        let reader = get_dynamic_reader(path)?;
        let table = VariantTable::from_reader(reader, &ReaderConfig::default())
            .with_context(|| format!("Failed to read VCF file: {:?}", path))?;
        info!(
            "Loaded {} records for {} samples ({} skipped lines) from {:?}",
            table.len(),
            table.samples.len(),
            table.skipped.len(),
            path
        );
        Ok(table)
    }
}

impl<'a> IntoIterator for &'a VariantTable {
    type Item = &'a VariantRecord;
    type IntoIter = Iter<'a, VariantRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
