use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use bioflat_core::WriterConfig;
use bioflat_core::utils::get_dynamic_writer;
use bioflat_fasta::write_fasta;

use crate::consts::{DEFAULT_FILEFORMAT, FASTA_DIRECTIVE, FIXED_HEADER, FORMAT_HEADER, META_PREFIX};
use crate::table::VariantTable;

///
/// Write a [`VariantTable`] back out as VCF.
///
/// Header lines are written in their original order, preceded by a
/// `##fileformat` line if the table has none. The `#CHROM` line carries a
/// FORMAT column when there are samples or any record has FORMAT keys.
///
pub fn write_vcf<W: Write>(table: &VariantTable, writer: &mut W, config: &WriterConfig) -> std::io::Result<()> {
    if table.fileformat().is_none() {
        writeln!(writer, "{}fileformat={}", META_PREFIX, DEFAULT_FILEFORMAT)?;
    }
    for meta in table.registry().meta_lines() {
        writeln!(writer, "{}", meta)?;
    }

    let mut header: Vec<&str> = FIXED_HEADER.to_vec();
    if !table.samples().is_empty() || table.iter().any(|r| r.format.is_some()) {
        header.push(FORMAT_HEADER);
        header.extend(table.samples().iter().map(String::as_str));
    }
    writeln!(writer, "{}", header.join("\t"))?;

    for record in table {
        writeln!(writer, "{}", record.to_line(config.float_precision))?;
    }

    if !table.sequences.is_empty() {
        writeln!(writer, "{}", FASTA_DIRECTIVE)?;
        write_fasta(table.sequences.iter(), writer, config.fasta_line_width)?;
    }

    Ok(())
}

pub trait VcfWrite {
    ///
    /// Write data to disk as a VCF file. The output is gzip'd when the path ends
    /// in `.gz`.
    ///
    /// # Arguments
    /// - path: the path to the file to dump to
    /// - config: QUAL precision and FASTA line width
    fn write_vcf<T: AsRef<Path>>(&self, path: T, config: &WriterConfig) -> Result<()>;
}

impl VcfWrite for VariantTable {
    fn write_vcf<T: AsRef<Path>>(&self, path: T, config: &WriterConfig) -> Result<()> {
        let path = path.as_ref();
        let mut writer = get_dynamic_writer(path)?;
        write_vcf(self, &mut writer, config).with_context(|| format!("Failed to write VCF file: {:?}", path))?;
        writer.flush()?;
        Ok(())
    }
}
