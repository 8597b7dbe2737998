use std::io::BufRead;
use std::path::Path;
use std::str::FromStr;

use anyhow::Context;
use bioflat_core::utils::get_dynamic_reader;
use indexmap::IndexMap;
use indexmap::map::Values;
use log::{info, warn};

use crate::parser::parse_fasta_reader;
use crate::record::FastaRecord;

///
/// Sequences keyed by FASTA ID, in file order.
///
/// The store is built once and never mutated by the annotation or variant
/// decoders that read from it.
///
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SequenceStore {
    records: IndexMap<String, FastaRecord>,
}

impl SequenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    ///
    /// Build a store from parsed records. A repeated ID replaces the earlier
    /// record.
    ///
    pub fn from_records<I: IntoIterator<Item = FastaRecord>>(records: I) -> Self {
        let mut store = SequenceStore::new();
        for record in records {
            if let Some(previous) = store.records.insert(record.id.clone(), record) {
                warn!("Duplicate FASTA ID {}, keeping the last record", previous.id);
            }
        }
        store
    }

    pub fn from_reader<R: BufRead>(reader: R) -> bioflat_core::Result<Self> {
        Ok(SequenceStore::from_records(parse_fasta_reader(reader)?))
    }

    pub fn get(&self, id: &str) -> Option<&FastaRecord> {
        self.records.get(id)
    }

    pub fn sequence(&self, id: &str) -> Option<&str> {
        self.records.get(id).map(|r| r.sequence.as_str())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.records.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    pub fn iter(&self) -> Values<'_, String, FastaRecord> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromStr for SequenceStore {
    type Err = bioflat_core::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SequenceStore::from_reader(s.as_bytes())
    }
}

impl TryFrom<&Path> for SequenceStore {
    type Error = anyhow::Error;

    ///
    /// Create a new [SequenceStore] from a (possibly gzip'd) FASTA file.
    ///
    fn try_from(path: &Path) -> anyhow::Result<Self> {
        let reader = get_dynamic_reader(path)?;
        let store = SequenceStore::from_reader(reader)
            .with_context(|| format!("Failed to read FASTA file: {:?}", path))?;
        info!("Loaded {} sequences from {:?}", store.len(), path);
        Ok(store)
    }
}

impl<'a> IntoIterator for &'a SequenceStore {
    type Item = &'a FastaRecord;
    type IntoIter = Values<'a, String, FastaRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[fixture]
    fn store() -> SequenceStore {
        SequenceStore::from_str(">chrI\nACGTACGTAC\n>chrII some text\nGGGG\n").unwrap()
    }

    #[rstest]
    fn test_lookup_by_id(store: SequenceStore) {
        assert_eq!(store.len(), 2);
        assert_eq!(store.sequence("chrI"), Some("ACGTACGTAC"));
        assert_eq!(store.get("chrII").unwrap().description, "some text");
        assert!(store.sequence("chrIII").is_none());
    }

    #[rstest]
    fn test_ids_keep_file_order(store: SequenceStore) {
        let ids: Vec<&str> = store.ids().collect();
        assert_eq!(ids, vec!["chrI", "chrII"]);
    }

    #[rstest]
    fn test_duplicate_ids_last_wins() {
        let store = SequenceStore::from_str(">a\nAAAA\n>a\nCCCC\n").unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.sequence("a"), Some("CCCC"));
    }

    #[rstest]
    fn test_open_from_path() {
        let path = Path::new("../tests/data/fasta/yeast_fragment.fa");
        let store = SequenceStore::try_from(path).unwrap();
        assert_eq!(store.len(), 2);
        assert!(store.contains("chrI"));
    }
}
