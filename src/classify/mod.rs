//! Role classification of flattened outline entries.
//!
//! Each entry gets a [`Role`] from its depth alone, and an inclusion flag
//! from the optional index filter. The two are independent: an excluded
//! entry still has a role, which the document builder needs to keep its
//! heading ancestry accurate.

mod band;

pub use band::{classify, BandConfig, DepthBand, Role};

use serde::Serialize;

use crate::interval::IntervalSet;
use crate::outline::{FlatEntry, Flattened};

/// A flattened entry with its role and inclusion decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedEntry<'a> {
    pub entry: &'a FlatEntry,
    pub role: Role,

    /// False when the inclusion filter rejected the entry's index
    pub included: bool,
}

impl ClassifiedEntry<'_> {
    /// Whether the entry reaches the document builder as an item.
    pub fn is_emitted(&self) -> bool {
        self.included && self.role != Role::Unclassified
    }
}

/// Assigns roles and inclusion to flattened entries.
///
/// A classifier holds no state between entries, so classifying the same
/// stream twice yields the same result.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    band: Option<DepthBand>,
    inclusion: Option<IntervalSet<usize>>,
}

impl Classifier {
    /// Create a classifier. Without a band every entry is unclassified;
    /// without an inclusion set every entry is included.
    pub fn new(band: Option<DepthBand>, inclusion: Option<IntervalSet<usize>>) -> Self {
        // An empty set means "no filter", never "exclude everything".
        let inclusion = inclusion.filter(|set| !set.is_empty());
        Self { band, inclusion }
    }

    /// Classifier for a configuration state; only a `Ready` band is used.
    pub fn for_config(config: &BandConfig, inclusion: Option<IntervalSet<usize>>) -> Self {
        Self::new(config.ready().cloned(), inclusion)
    }

    pub fn band(&self) -> Option<&DepthBand> {
        self.band.as_ref()
    }

    /// Check an entry index against the inclusion filter.
    pub fn includes(&self, index: usize) -> bool {
        self.inclusion.as_ref().map_or(true, |set| set.has(index))
    }

    /// Classify one entry.
    pub fn classify_entry<'a>(&self, entry: &'a FlatEntry) -> ClassifiedEntry<'a> {
        ClassifiedEntry {
            entry,
            role: classify(entry.depth, self.band.as_ref()),
            included: self.includes(entry.index),
        }
    }

    /// Classify every entry, in traversal order.
    pub fn classify<'a>(
        &'a self,
        flat: &'a Flattened,
    ) -> impl Iterator<Item = ClassifiedEntry<'a>> + 'a {
        flat.iter().map(move |entry| self.classify_entry(entry))
    }

    /// Entries that survive filtering and carry a role.
    pub fn retained<'a>(
        &'a self,
        flat: &'a Flattened,
    ) -> impl Iterator<Item = ClassifiedEntry<'a>> + 'a {
        self.classify(flat).filter(|c| c.is_emitted())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::OutlineNode;
    use crate::outline::flatten;
    use crate::range::parse_inclusion;

    fn sample() -> Flattened {
        flatten(
            &OutlineNode::root().with_child(
                OutlineNode::labeled("A").with_child(
                    OutlineNode::labeled("B")
                        .with_child(OutlineNode::labeled("C"))
                        .with_child(OutlineNode::labeled("D")),
                ),
            ),
        )
    }

    fn roles(classifier: &Classifier, flat: &Flattened) -> Vec<Role> {
        classifier.classify(flat).map(|c| c.role).collect()
    }

    #[test]
    fn test_classify_sample() {
        let flat = sample();
        let band = DepthBand::single(1)
            .with_heading_span(Some(1))
            .with_checklist_span(Some(1));
        let classifier = Classifier::new(Some(band), None);
        assert_eq!(
            roles(&classifier, &flat),
            vec![Role::Heading, Role::Todo, Role::Checklist, Role::Checklist]
        );
    }

    #[test]
    fn test_classification_is_idempotent() {
        let flat = sample();
        let band = DepthBand::single(1).with_checklist_span(Some(1));
        let classifier = Classifier::new(Some(band), parse_inclusion("1-2"));

        let first: Vec<_> = classifier.classify(&flat).collect();
        let second: Vec<_> = classifier.classify(&flat).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_unconfigured_is_all_unclassified() {
        let flat = sample();
        let classifier = Classifier::for_config(&BandConfig::Unconfigured, None);
        assert!(roles(&classifier, &flat)
            .iter()
            .all(|r| *r == Role::Unclassified));
        assert_eq!(classifier.retained(&flat).count(), 0);
    }

    #[test]
    fn test_partial_config_is_not_used() {
        let flat = sample();
        let config = BandConfig::from_parts(Some(1..=1), None, None);
        let classifier = Classifier::for_config(&config, None);
        assert!(classifier.band().is_none());
        assert_eq!(classifier.retained(&flat).count(), 0);
    }

    #[test]
    fn test_inclusion_filter_keeps_indices_stable() {
        let flat = sample();
        let band = DepthBand::new(0, 2);
        let classifier = Classifier::new(Some(band), parse_inclusion("0-0"));

        let classified: Vec<_> = classifier.classify(&flat).collect();
        assert!(classified[0].included);
        assert_eq!(classified[1].entry.index, 1);
        assert_eq!(classified[1].entry.label, "B");
        assert!(!classified[1].included);
        // Role is still assigned to excluded entries.
        assert_eq!(classified[1].role, Role::Todo);

        let retained: Vec<&str> = classifier
            .retained(&flat)
            .map(|c| c.entry.label.as_str())
            .collect();
        assert_eq!(retained, vec!["A"]);
    }

    #[test]
    fn test_empty_inclusion_includes_everything() {
        let flat = sample();
        let classifier =
            Classifier::new(Some(DepthBand::new(0, 2)), Some(IntervalSet::new(vec![])));
        assert_eq!(classifier.retained(&flat).count(), 4);
    }
}
