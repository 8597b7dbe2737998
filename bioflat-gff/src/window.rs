use bioflat_core::WindowConfig;
use bioflat_fasta::{FastaRecord, SequenceStore};
use log::debug;

use crate::feature::Feature;
use crate::graph::FeatureGraph;

///
/// A slice of a reference sequence around one feature.
///
/// `start` and `end` are 0-based and half-open over the reference, already
/// clipped to it.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window {
    pub id: String,
    pub seq_id: String,
    pub start: usize,
    pub end: usize,
    pub sequence: String,
}

impl Window {
    /// `{seqID}:{start}..{end}` in 1-based coordinates.
    pub fn description(&self) -> String {
        format!("{}:{}..{}", self.seq_id, self.start + 1, self.end)
    }

    pub fn into_fasta_record(self) -> FastaRecord {
        let description = self.description();
        FastaRecord::new(self.id, description, self.sequence)
    }
}

///
/// Cut the sequence under `feature`, extended by `left_flank` bases before its
/// start and `right_flank` bases after its end.
///
/// Both window bounds are clamped to `[0, length - 1]` of the reference. Returns
/// `None` when the feature's seqID is not in the store.
///
pub fn extract_window(
    feature: &Feature,
    store: &SequenceStore,
    left_flank: usize,
    right_flank: usize,
) -> Option<Window> {
    let Some(target) = store.sequence(&feature.seq_id) else {
        debug!(
            "Sequence {} not found for feature {}",
            feature.seq_id,
            feature.identifier()
        );
        return None;
    };

    let last = target.len().saturating_sub(1);
    let feature_start = usize::try_from(feature.start).unwrap_or(usize::MAX);
    let feature_end = usize::try_from(feature.end).unwrap_or(usize::MAX);

    let end = feature_end.saturating_add(right_flank).min(last);
    let start = feature_start
        .saturating_sub(1)
        .saturating_sub(left_flank)
        .min(last)
        .min(end);

    let sequence = target.get(start..end)?.to_string();

    Some(Window {
        id: feature.identifier(),
        seq_id: feature.seq_id.clone(),
        start,
        end,
        sequence,
    })
}

impl FeatureGraph {
    ///
    /// Extract a window for every feature (optionally only those of
    /// `feature_type`) whose sequence is available.
    ///
    /// Sequences come from `store` when given, otherwise from the document's own
    /// `##FASTA` section.
    ///
    pub fn windows(
        &self,
        store: Option<&SequenceStore>,
        config: &WindowConfig,
        feature_type: Option<&str>,
    ) -> Vec<Window> {
        let store = store.unwrap_or(&self.sequences);
        self.iter()
            .filter(|f| feature_type.is_none_or(|t| f.feature_type == t))
            .filter_map(|f| extract_window(f, store, config.left_flank, config.right_flank))
            .collect()
    }
}
