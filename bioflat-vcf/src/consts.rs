/// CHROM through INFO; every data line needs at least these.
pub const VCF_FIXED_COLUMNS: usize = 8;

pub const META_PREFIX: &str = "##";
pub const HEADER_LINE_PREFIX: &str = "#CHROM";
pub const FIXED_HEADER: [&str; VCF_FIXED_COLUMNS] =
    ["#CHROM", "POS", "ID", "REF", "ALT", "QUAL", "FILTER", "INFO"];
pub const FORMAT_HEADER: &str = "FORMAT";

pub const FILEFORMAT_CLASS: &str = "fileformat";
pub const INFO_CLASS: &str = "INFO";
pub const FORMAT_CLASS: &str = "FORMAT";

pub const DEFAULT_FILEFORMAT: &str = "VCFv4.2";

/// Stands in for any absent column or sample value.
pub const MISSING_VALUE: &str = ".";

pub const FASTA_DIRECTIVE: &str = "##FASTA";
