use std::fmt::{self, Display};

/// Number of bases shown by the `Display` preview.
const PREVIEW_LENGTH: usize = 10;

///
/// A single FASTA sequence.
///
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FastaRecord {
    pub id: String,
    pub description: String,
    pub sequence: String,
}

impl FastaRecord {
    pub fn new<I: Into<String>, D: Into<String>, S: Into<String>>(
        id: I,
        description: D,
        sequence: S,
    ) -> Self {
        FastaRecord {
            id: id.into(),
            description: description.into(),
            sequence: sequence.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    ///
    /// Get the header line, without the trailing newline.
    ///
    pub fn header(&self) -> String {
        if self.description.is_empty() {
            format!(">{}", self.id)
        } else {
            format!(">{} {}", self.id, self.description)
        }
    }
}

impl Display for FastaRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.header())?;
        match self.sequence.get(..PREVIEW_LENGTH) {
            Some(preview) if self.sequence.len() > PREVIEW_LENGTH => write!(f, "{}...", preview),
            _ => write!(f, "{}", self.sequence),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_header_without_description() {
        let record = FastaRecord::new("chrI", "", "ACGT");
        assert_eq!(record.header(), ">chrI");
    }

    #[rstest]
    fn test_header_with_description() {
        let record = FastaRecord::new("seq1", "description of seq1", "ACGT");
        assert_eq!(record.header(), ">seq1 description of seq1");
    }

    #[rstest]
    fn test_display_truncates_long_sequences() {
        let record = FastaRecord::new("seq1", "", "ATGCGAGATAGATCATACTG");
        assert_eq!(record.to_string(), ">seq1\nATGCGAGATA...");
    }

    #[rstest]
    fn test_display_short_sequence() {
        let record = FastaRecord::new("seq1", "", "ATG");
        assert_eq!(record.to_string(), ">seq1\nATG");
    }
}
