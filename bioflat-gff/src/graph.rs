use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;
use std::slice::Iter;
use std::str::FromStr;

use anyhow::Context;
use bioflat_core::utils::{get_dynamic_reader, trim_line_ending};
use bioflat_core::{ParseError, ReaderConfig, Result, SkippedLine};
use bioflat_fasta::SequenceStore;
use log::{debug, info, warn};

use crate::consts::FASTA_DIRECTIVE;
use crate::feature::Feature;

/// Marks the end of a group of forward-referenced features; not kept.
const RESOLUTION_DIRECTIVE: &str = "###";

///
/// Every feature of a GFF3 document, in file order, plus the parent/child
/// links declared through `ID` and `Parent` attributes.
///
/// Links are resolved only after all lines are decoded, so a child may appear
/// before its parent. A `Parent` naming an unknown ID is ignored. Cycles are
/// not detected.
///
#[derive(Debug, Default)]
pub struct FeatureGraph {
    features: Vec<Feature>,
    index: HashMap<String, usize>,

    /// `##` directive lines, in file order.
    pub directives: Vec<String>,
    /// Sequences from a trailing `##FASTA` section.
    pub sequences: SequenceStore,
    /// Lines dropped because they could not be decoded.
    pub skipped: Vec<SkippedLine>,
}

/// The raw pieces of a GFF3 document before feature decoding.
struct Sections {
    directives: Vec<String>,
    body: Vec<(usize, String)>,
    fasta: String,
}

fn split_sections<R: BufRead>(reader: R) -> Result<Sections> {
    let mut sections = Sections {
        directives: Vec::new(),
        body: Vec::new(),
        fasta: String::new(),
    };
    let mut in_fasta = false;

    for (i, line) in reader.lines().enumerate() {
        let line = line?;

        if in_fasta {
            sections.fasta.push_str(&line);
            sections.fasta.push('\n');
            continue;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if trimmed.starts_with(FASTA_DIRECTIVE) {
            in_fasta = true;
            continue;
        }

        // sequences may also follow the features without the directive
        if trimmed.starts_with('>') {
            in_fasta = true;
            sections.fasta.push_str(trimmed);
            sections.fasta.push('\n');
            continue;
        }

        if trimmed.starts_with('#') {
            if trimmed.starts_with("##") && trimmed != RESOLUTION_DIRECTIVE {
                sections.directives.push(trimmed.to_string());
            }
            continue;
        }

        sections.body.push((i + 1, trim_line_ending(&line).to_string()));
    }

    Ok(sections)
}

impl FeatureGraph {
    ///
    /// Read a GFF3 document line by line.
    ///
    /// Lines with the wrong number of columns are recorded in
    /// [`FeatureGraph::skipped`], or abort the parse when `config.strict` is set.
    /// Everything after `##FASTA` is handed to the FASTA parser.
    ///
    pub fn from_reader<R: BufRead>(reader: R, config: &ReaderConfig) -> Result<Self> {
        let sections = split_sections(reader)?;
        let decoded = sections
            .body
            .iter()
            .map(|(line_number, line)| (*line_number, Feature::parse(line)))
            .collect();

        FeatureGraph::assemble(sections.directives, decoded, &sections.fasta, config)
    }

    ///
    /// Like [`FeatureGraph::from_reader`], but decodes the feature lines on the
    /// rayon thread pool. Linking still runs once, after every line is decoded.
    ///
    #[cfg(feature = "parallel")]
    pub fn from_reader_parallel<R: BufRead>(reader: R, config: &ReaderConfig) -> Result<Self> {
        use rayon::prelude::*;

        let sections = split_sections(reader)?;
        let decoded = sections
            .body
            .par_iter()
            .map(|(line_number, line)| (*line_number, Feature::parse(line)))
            .collect();

        FeatureGraph::assemble(sections.directives, decoded, &sections.fasta, config)
    }

    fn assemble(
        directives: Vec<String>,
        decoded: Vec<(usize, Result<Feature>)>,
        fasta: &str,
        config: &ReaderConfig,
    ) -> Result<Self> {
        let mut graph = FeatureGraph {
            directives,
            ..Default::default()
        };

        for (line_number, result) in decoded {
            match result {
                Ok(feature) => graph.features.push(feature),
                Err(error) => {
                    if config.strict {
                        return Err(error);
                    }
                    warn!("Skipping GFF3 line {}: {}", line_number, error);
                    graph.skipped.push(SkippedLine { line_number, error });
                }
            }
        }

        if !fasta.is_empty() {
            graph.sequences = SequenceStore::from_reader(fasta.as_bytes())?;
        }

        graph.link();
        Ok(graph)
    }

    ///
    /// Build a [`FeatureGraph`] from features that are already decoded.
    ///
    pub fn from_features<I: IntoIterator<Item = Feature>>(features: I) -> Self {
        let mut graph = FeatureGraph {
            features: features.into_iter().collect(),
            ..Default::default()
        };
        graph.link();
        graph
    }

    ///
    /// Rebuild the `ID` index and every feature's children list.
    ///
    /// A repeated `ID` resolves to its last occurrence.
    ///
    fn link(&mut self) {
        self.index = self
            .features
            .iter()
            .enumerate()
            .filter_map(|(i, feature)| feature.id.clone().map(|id| (id, i)))
            .collect();

        // resolve every reference first, then mutate
        let mut links: Vec<(usize, usize)> = Vec::new();
        for (child, feature) in self.features.iter().enumerate() {
            let first_link = links.len();
            for parent_id in &feature.parents {
                match self.index.get(parent_id) {
                    Some(&parent) => {
                        // `Parent=a,a` links once
                        if !links[first_link..].contains(&(parent, child)) {
                            links.push((parent, child));
                        }
                    }
                    None => debug!(
                        "Parent {} of {} not found, leaving it unlinked",
                        parent_id,
                        feature.identifier()
                    ),
                }
            }
        }

        for feature in self.features.iter_mut() {
            feature.children.clear();
        }
        for (parent, child) in links {
            self.features[parent].children.push(child);
        }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn iter(&self) -> Iter<'_, Feature> {
        self.features.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Feature> {
        self.features.get(index)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn get_by_id(&self, id: &str) -> Option<&Feature> {
        self.index_of(id).map(|i| &self.features[i])
    }

    ///
    /// Get the features whose `Parent` names this feature, in file order.
    ///
    /// Child links are positions in the graph that linked `feature`; links that
    /// fall outside this graph are ignored.
    ///
    pub fn children<'a>(&'a self, feature: &'a Feature) -> impl Iterator<Item = &'a Feature> + 'a {
        feature.children.iter().filter_map(move |&i| self.features.get(i))
    }

    ///
    /// Get the parents of a feature that resolve to a feature in this graph.
    ///
    pub fn parents<'a>(&'a self, feature: &'a Feature) -> impl Iterator<Item = &'a Feature> + 'a {
        feature
            .parents
            .iter()
            .filter_map(move |id| self.get_by_id(id))
    }

    ///
    /// Get the features without any resolvable parent.
    ///
    pub fn roots(&self) -> impl Iterator<Item = &Feature> {
        self.features
            .iter()
            .filter(move |f| f.parents.iter().all(|id| !self.index.contains_key(id)))
    }

    pub fn features_of_type<'a>(&'a self, feature_type: &'a str) -> impl Iterator<Item = &'a Feature> + 'a {
        self.features
            .iter()
            .filter(move |f| f.feature_type == feature_type)
    }
}

impl FromStr for FeatureGraph {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self> {
        FeatureGraph::from_reader(s.as_bytes(), &ReaderConfig::default())
    }
}

impl TryFrom<&Path> for FeatureGraph {
    type Error = anyhow::Error;

    ///
    /// Create a new [FeatureGraph] from a (possibly gzip'd) GFF3 file, skipping
    /// malformed lines.
    ///
    fn try_from(path: &Path) -> anyhow::Result<Self> {
        let reader = get_dynamic_reader(path)?;
        let graph = FeatureGraph::from_reader(reader, &ReaderConfig::default())
            .with_context(|| format!("Failed to read GFF3 file: {:?}", path))?;
        info!(
            "Loaded {} features ({} skipped lines) from {:?}",
            graph.len(),
            graph.skipped.len(),
            path
        );
        Ok(graph)
    }
}

impl<'a> IntoIterator for &'a FeatureGraph {
    type Item = &'a Feature;
    type IntoIter = Iter<'a, Feature>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.iter()
    }
}
