use std::fmt::{self, Display};
use std::str::FromStr;

use bioflat_core::config::DEFAULT_FLOAT_PRECISION;
use bioflat_core::{AttributeMap, ParseError, Result};
use log::debug;

use crate::consts::{GENE_TYPE, GFF_COLUMNS};

/// Column 7 of a GFF3 line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Strand {
    Forward,
    Reverse,
    #[default]
    Unstranded,
    /// Strandedness matters but is not known (`?`).
    Unknown,
}

impl FromStr for Strand {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "+" => Ok(Strand::Forward),
            "-" => Ok(Strand::Reverse),
            "." => Ok(Strand::Unstranded),
            "?" => Ok(Strand::Unknown),
            _ => Err(ParseError::InvalidField {
                field: "strand",
                value: s.to_string(),
            }),
        }
    }
}

impl Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Strand::Forward => "+",
            Strand::Reverse => "-",
            Strand::Unstranded => ".",
            Strand::Unknown => "?",
        };
        write!(f, "{}", s)
    }
}

/// Column 8 of a GFF3 line: bases to skip to reach the next codon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Phase {
    Zero,
    One,
    Two,
    #[default]
    Unphased,
}

impl FromStr for Phase {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "0" => Ok(Phase::Zero),
            "1" => Ok(Phase::One),
            "2" => Ok(Phase::Two),
            "." => Ok(Phase::Unphased),
            _ => Err(ParseError::InvalidField {
                field: "phase",
                value: s.to_string(),
            }),
        }
    }
}

impl Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Phase::Zero => "0",
            Phase::One => "1",
            Phase::Two => "2",
            Phase::Unphased => ".",
        };
        write!(f, "{}", s)
    }
}

///
/// One GFF3 feature line.
///
/// The reserved attributes (`ID`, `Name`, `Parent`, ...) are mirrored from
/// [`Feature::attributes`] into dedicated fields whenever the attributes are set.
/// `children` is filled in by [`crate::FeatureGraph`] once every line is decoded.
///
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Feature {
    pub seq_id: String,
    pub source: String,
    pub feature_type: String,
    /// 1-based, inclusive.
    pub start: u64,
    /// 1-based, inclusive.
    pub end: u64,
    pub score: Option<f64>,
    pub strand: Strand,
    pub phase: Phase,
    pub attributes: AttributeMap,

    pub id: Option<String>,
    pub name: Option<String>,
    pub alias: Option<String>,
    pub parents: Vec<String>,
    pub target: Option<String>,
    pub gap: Option<String>,
    pub derives_from: Option<String>,
    pub note: Option<String>,
    pub dbxref: Option<String>,
    pub ontology_term: Option<String>,

    pub(crate) children: Vec<usize>,
}

impl Feature {
    pub fn new<S: Into<String>>(
        seq_id: S,
        source: S,
        feature_type: S,
        start: u64,
        end: u64,
    ) -> Self {
        Feature {
            seq_id: seq_id.into(),
            source: source.into(),
            feature_type: feature_type.into(),
            start,
            end,
            ..Default::default()
        }
    }

    ///
    /// Decode a single tab-delimited GFF3 line.
    ///
    /// Only the column count is enforced. Coordinates that are not unsigned
    /// integers decode to 0, an unparsable score is treated as absent, and
    /// unrecognized strand or phase values fall back to `?` and `.`.
    ///
    pub fn parse(line: &str) -> Result<Feature> {
        let line = line.trim_end_matches(['\n', '\r']);
        let parts: Vec<&str> = line.split('\t').collect();
        if parts.len() != GFF_COLUMNS {
            return Err(ParseError::MalformedLine {
                expected: GFF_COLUMNS,
                found: parts.len(),
            });
        }

        let mut feature = Feature::new(
            parts[0],
            parts[1],
            parts[2],
            parse_coordinate("start", parts[3]),
            parse_coordinate("end", parts[4]),
        );

        feature.score = match parts[5] {
            "." => None,
            s => s.parse::<f64>().ok(),
        };

        feature.strand = parts[6].parse().unwrap_or_else(|e| {
            debug!("{}, using '?'", e);
            Strand::Unknown
        });

        feature.phase = parts[7].parse().unwrap_or_else(|e| {
            debug!("{}, using '.'", e);
            Phase::Unphased
        });

        feature.set_attributes(AttributeMap::decode(parts[8]));

        Ok(feature)
    }

    ///
    /// Replace the attribute map and refresh the reserved-attribute fields.
    ///
    pub fn set_attributes(&mut self, attributes: AttributeMap) {
        let get = |key: &str| {
            attributes
                .get(key)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        self.id = get("ID");
        self.name = get("Name");
        self.alias = get("Alias");
        self.target = get("Target");
        self.gap = get("Gap");
        self.derives_from = get("Derives_from");
        self.note = get("Note");
        self.dbxref = get("Dbxref");
        self.ontology_term = get("Ontology_term");
        self.parents = attributes
            .get_values("Parent")
            .into_iter()
            .map(str::to_string)
            .collect();

        self.attributes = attributes;
    }

    pub fn is_gene(&self) -> bool {
        self.feature_type == GENE_TYPE
    }

    ///
    /// Get the identifier used when this feature is exported: its `ID`, or
    /// `{seqID}_{source}_{type}_{start}_{end}` when it has none.
    ///
    pub fn identifier(&self) -> String {
        match &self.id {
            Some(id) => id.clone(),
            None => format!(
                "{}_{}_{}_{}_{}",
                self.seq_id, self.source, self.feature_type, self.start, self.end
            ),
        }
    }

    /// Arena positions of the features that name this one as their parent.
    pub fn child_indices(&self) -> &[usize] {
        &self.children
    }

    ///
    /// Get the GFF3 line for this feature, with the score printed to
    /// `precision` decimals.
    ///
    pub fn to_line(&self, precision: usize) -> String {
        let score = match self.score {
            Some(score) => format!("{:.*}", precision, score),
            None => ".".to_string(),
        };
        format!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            self.seq_id,
            self.source,
            self.feature_type,
            self.start,
            self.end,
            score,
            self.strand,
            self.phase,
            self.attributes
        )
    }
}

fn parse_coordinate(field: &'static str, value: &str) -> u64 {
    value.parse::<u64>().unwrap_or_else(|_| {
        debug!("Invalid {} coordinate {:?}, using 0", field, value);
        0
    })
}

impl FromStr for Feature {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self> {
        Feature::parse(s)
    }
}

impl Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_line(DEFAULT_FLOAT_PRECISION))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_parse_telomere() {
        let feature = Feature::parse("chrI\tSGD\ttelomere\t1\t801\t.\t-\t.\tID=TEL01L;Name=TEL01L").unwrap();
        assert_eq!(feature.start, 1);
        assert_eq!(feature.end, 801);
        assert_eq!(feature.id.as_deref(), Some("TEL01L"));
        assert_eq!(feature.name.as_deref(), Some("TEL01L"));
        assert_eq!(feature.strand, Strand::Reverse);
        assert_eq!(feature.phase, Phase::Unphased);
        assert_eq!(feature.score, None);
        assert!(!feature.is_gene());
    }

    #[rstest]
    fn test_parse_cds_with_phase_and_score() {
        let feature =
            Feature::parse("chrI\tSGD\tCDS\t335\t649\t0.5\t+\t0\tParent=YAL069W_mRNA;Name=YAL069W_CDS;").unwrap();
        assert_eq!(feature.score, Some(0.5));
        assert_eq!(feature.phase, Phase::Zero);
        assert_eq!(feature.parents, vec!["YAL069W_mRNA"]);
        assert_eq!(feature.id, None);
    }

    #[rstest]
    fn test_multiple_parents() {
        let feature = Feature::parse("ctg\t.\texon\t1\t10\t.\t+\t.\tParent=t1,t2").unwrap();
        assert_eq!(feature.parents, vec!["t1", "t2"]);
    }

    #[rstest]
    #[case("chrI\tSGD\tgene\t1\t10")]
    #[case("chrI\tSGD\tgene\t1\t10\t.\t+\t.\tID=a\textra")]
    #[case("")]
    fn test_wrong_column_count_is_malformed(#[case] line: &str) {
        let result = Feature::parse(line);
        assert!(matches!(result, Err(ParseError::MalformedLine { expected: 9, .. })));
    }

    #[rstest]
    fn test_best_effort_columns() {
        let feature = Feature::parse("chrI\tSGD\tgene\tabc\t-4\tnope\t*\t7\t.").unwrap();
        assert_eq!(feature.start, 0);
        assert_eq!(feature.end, 0);
        assert_eq!(feature.score, None);
        assert_eq!(feature.strand, Strand::Unknown);
        assert_eq!(feature.phase, Phase::Unphased);
        assert!(feature.attributes.is_empty());
    }

    #[rstest]
    fn test_zero_length_insertion_site() {
        let feature = Feature::parse("ctg\t.\tinsertion_site\t100\t100\t.\t+\t.\tID=ins1").unwrap();
        assert_eq!(feature.start, 100);
        assert_eq!(feature.end, 100);
    }

    #[rstest]
    fn test_identifier_is_synthesized_without_id() {
        let feature = Feature::parse("chrI\tSGD\tCDS\t335\t649\t.\t+\t0\tParent=x").unwrap();
        assert_eq!(feature.identifier(), "chrI_SGD_CDS_335_649");
    }

    #[rstest]
    fn test_empty_id_counts_as_missing() {
        let feature = Feature::parse("chrI\tSGD\tCDS\t1\t2\t.\t+\t0\tID=").unwrap();
        assert_eq!(feature.id, None);
    }

    #[rstest]
    fn test_to_line_orders_reserved_attributes() {
        let feature =
            Feature::parse("chrI\tSGD\tmRNA\t335\t649\t3\t+\t.\tcolor=red;Parent=YAL069W;ID=m1").unwrap();
        assert_eq!(
            feature.to_string(),
            "chrI\tSGD\tmRNA\t335\t649\t3.000000\t+\t.\tID=m1;Parent=YAL069W;color=red"
        );
    }

    #[rstest]
    fn test_line_without_attributes_writes_dot() {
        let feature = Feature::new("ctg", ".", "region", 1, 5);
        assert_eq!(feature.to_line(2), "ctg\t.\tregion\t1\t5\t.\t.\t.\t.");
    }

    #[rstest]
    #[case("+", Strand::Forward)]
    #[case("-", Strand::Reverse)]
    #[case(".", Strand::Unstranded)]
    #[case("?", Strand::Unknown)]
    fn test_strand_round_trip(#[case] text: &str, #[case] strand: Strand) {
        assert_eq!(text.parse::<Strand>().unwrap(), strand);
        assert_eq!(strand.to_string(), text);
    }
}
