pub const GFF_COLUMNS: usize = 9;
pub const GFF_VERSION_DIRECTIVE: &str = "##gff-version 3";
pub const FASTA_DIRECTIVE: &str = "##FASTA";
pub const GENE_TYPE: &str = "gene";
