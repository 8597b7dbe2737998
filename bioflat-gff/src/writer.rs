use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use bioflat_core::WriterConfig;
use bioflat_core::utils::get_dynamic_writer;
use bioflat_fasta::write_fasta;

use crate::consts::{FASTA_DIRECTIVE, GFF_VERSION_DIRECTIVE};
use crate::graph::FeatureGraph;

///
/// Write a [`FeatureGraph`] back out as GFF3.
///
/// Preserved directives come first (a `##gff-version 3` line is added when the
/// graph has none), then one line per feature in file order, then a `##FASTA`
/// section when the graph carries sequences.
///
pub fn write_gff<W: Write>(graph: &FeatureGraph, writer: &mut W, config: &WriterConfig) -> std::io::Result<()> {
    if !graph.directives.iter().any(|d| d.starts_with("##gff-version")) {
        writeln!(writer, "{}", GFF_VERSION_DIRECTIVE)?;
    }
    for directive in &graph.directives {
        writeln!(writer, "{}", directive)?;
    }

    for feature in graph {
        writeln!(writer, "{}", feature.to_line(config.float_precision))?;
    }

    if !graph.sequences.is_empty() {
        writeln!(writer, "{}", FASTA_DIRECTIVE)?;
        write_fasta(graph.sequences.iter(), writer, config.fasta_line_width)?;
    }

    Ok(())
}

pub trait GffWrite {
    ///
    /// Write data to disk as a GFF3 file. The output is gzip'd when the path
    /// ends in `.gz`.
    ///
    /// # Arguments
    /// - path: the path to the file to dump to
    /// - config: score precision and FASTA line width
    fn write_gff<T: AsRef<Path>>(&self, path: T, config: &WriterConfig) -> Result<()>;
}

impl GffWrite for FeatureGraph {
    fn write_gff<T: AsRef<Path>>(&self, path: T, config: &WriterConfig) -> Result<()> {
        let path = path.as_ref();
        let mut writer = get_dynamic_writer(path)?;
        write_gff(self, &mut writer, config).with_context(|| format!("Failed to write GFF3 file: {:?}", path))?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::str::FromStr;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_version_directive_is_added() {
        let graph = FeatureGraph::from_str("ctg\t.\tgene\t1\t10\t2.5\t+\t.\tID=g1\n").unwrap();
        let mut out = Vec::new();
        write_gff(&graph, &mut out, &WriterConfig::default()).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "##gff-version 3\nctg\t.\tgene\t1\t10\t2.500000\t+\t.\tID=g1\n"
        );
    }

    #[rstest]
    fn test_directives_and_fasta_are_written() {
        let gff = "\
##gff-version 3.1.26
##sequence-region ctg 1 8
ctg\t.\tgene\t1\t8\t.\t-\t.\tID=g1;Note=a%3Bb
##FASTA
>ctg
ACGTACGT
";
        let graph = FeatureGraph::from_str(gff).unwrap();
        let config = WriterConfig {
            fasta_line_width: 4,
            float_precision: 2,
        };
        let mut out = Vec::new();
        write_gff(&graph, &mut out, &config).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "\
##gff-version 3.1.26
##sequence-region ctg 1 8
ctg\t.\tgene\t1\t8\t.\t-\t.\tID=g1;Note=a%3Bb
##FASTA
>ctg
ACGT
ACGT
"
        );
    }

    #[rstest]
    fn test_write_gff_to_disk_and_read_back() {
        let gff = "\
ctg\t.\tgene\t1\t100\t.\t+\t.\tID=g1
ctg\t.\tmRNA\t1\t100\t.\t+\t.\tID=m1;Parent=g1
";
        let graph = FeatureGraph::from_str(gff).unwrap();
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("out.gff3.gz");

        graph.write_gff(&path, &WriterConfig::default()).unwrap();

        let reread = FeatureGraph::try_from(path.as_path()).unwrap();
        assert_eq!(reread.features(), graph.features());
        assert_eq!(reread.directives, vec![GFF_VERSION_DIRECTIVE]);
    }
}
