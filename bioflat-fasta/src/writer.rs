use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use bioflat_core::WriterConfig;
use bioflat_core::utils::get_dynamic_writer;

use crate::record::FastaRecord;
use crate::store::SequenceStore;

///
/// Split a sequence into lines of at most `width` characters.
///
pub fn wrap_sequence(sequence: &str, width: usize) -> Vec<&str> {
    let width = width.max(1);
    let mut lines = Vec::with_capacity(sequence.len() / width + 1);
    let mut rest = sequence;

    while !rest.is_empty() {
        let split = rest
            .char_indices()
            .nth(width)
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        let (line, tail) = rest.split_at(split);
        lines.push(line);
        rest = tail;
    }

    lines
}

///
/// Write records as FASTA, wrapping sequences at `width` characters.
///
pub fn write_fasta<'a, W, I>(records: I, writer: &mut W, width: usize) -> std::io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a FastaRecord>,
{
    for record in records {
        writeln!(writer, "{}", record.header())?;
        for line in wrap_sequence(&record.sequence, width) {
            writeln!(writer, "{}", line)?;
        }
    }
    Ok(())
}

pub trait FastaWrite {
    ///
    /// Write data to disk as a FASTA file. The output is gzip'd when the path
    /// ends in `.gz`.
    ///
    /// # Arguments
    /// - path: the path to the file to dump to
    /// - config: line width settings
    fn write_fasta<T: AsRef<Path>>(&self, path: T, config: &WriterConfig) -> Result<()>;
}

impl FastaWrite for [FastaRecord] {
    fn write_fasta<T: AsRef<Path>>(&self, path: T, config: &WriterConfig) -> Result<()> {
        let path = path.as_ref();
        let mut writer = get_dynamic_writer(path)?;
        write_fasta(self.iter(), &mut writer, config.fasta_line_width)
            .with_context(|| format!("Failed to write FASTA file: {:?}", path))?;
        writer.flush()?;
        Ok(())
    }
}

impl FastaWrite for SequenceStore {
    fn write_fasta<T: AsRef<Path>>(&self, path: T, config: &WriterConfig) -> Result<()> {
        let path = path.as_ref();
        let mut writer = get_dynamic_writer(path)?;
        write_fasta(self.iter(), &mut writer, config.fasta_line_width)
            .with_context(|| format!("Failed to write FASTA file: {:?}", path))?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    use crate::parser::parse_fasta_str;

    #[rstest]
    #[case("", 80, vec![])]
    #[case("ACGT", 80, vec!["ACGT"])]
    #[case("ACGTAC", 2, vec!["AC", "GT", "AC"])]
    #[case("ACGTA", 2, vec!["AC", "GT", "A"])]
    fn test_wrap_sequence(#[case] seq: &str, #[case] width: usize, #[case] expected: Vec<&str>) {
        assert_eq!(wrap_sequence(seq, width), expected);
    }

    #[rstest]
    fn test_write_wraps_at_width() {
        let records = vec![FastaRecord::new("chr1", "test", "A".repeat(170))];
        let mut out = Vec::new();
        write_fasta(records.iter(), &mut out, 80).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], ">chr1 test");
        assert_eq!(lines[1].len(), 80);
        assert_eq!(lines[2].len(), 80);
        assert_eq!(lines[3].len(), 10);
    }

    #[rstest]
    fn test_written_records_parse_back() {
        let records = vec![
            FastaRecord::new("a", "first one", "ACGT".repeat(50)),
            FastaRecord::new("b", "", "TTGGCCAA"),
        ];
        let mut out = Vec::new();
        write_fasta(records.iter(), &mut out, 60).unwrap();

        let parsed = parse_fasta_str(&String::from_utf8(out).unwrap()).unwrap();
        assert_eq!(parsed, records);
    }

    #[rstest]
    fn test_write_fasta_gz_to_disk() {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("out.fa.gz");
        let records = vec![FastaRecord::new("s", "", "ACGTACGT")];

        records.write_fasta(&path, &WriterConfig::default()).unwrap();

        let store = SequenceStore::try_from(path.as_path()).unwrap();
        assert_eq!(store.sequence("s"), Some("ACGTACGT"));
    }
}
