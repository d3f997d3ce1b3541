//! Detection results from the external classifier.
//!
//! The classifier itself is out of scope; the domain only sees its output as
//! a set of labeled, confidence-scored hypotheses. Matching against target
//! names is a recall-favoring heuristic, not semantic equivalence - the same
//! image can yield different labels across calls and the engine tolerates
//! false negatives and positives.

use serde::{Deserialize, Serialize};

/// Default confidence below which labels are ignored when matching.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.5;

/// A labeled hypothesis from the classifier about what is in an image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    name: String,
    /// Confidence in [0, 1]; clamped at construction.
    confidence: f32,
}

impl Label {
    pub fn new(name: impl Into<String>, confidence: f32) -> Self {
        Self {
            name: name.into(),
            confidence: confidence.clamp(0.0, 1.0),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn confidence(&self) -> f32 {
        self.confidence
    }
}

/// The full output of one classification pass over one image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionSet {
    labels: Vec<Label>,
}

impl DetectionSet {
    pub fn new(labels: Vec<Label>) -> Self {
        Self { labels }
    }

    /// An empty set - the silent-degradation result when the classifier is
    /// unavailable.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Labels at or above the given confidence.
    pub fn above(&self, threshold: f32) -> impl Iterator<Item = &Label> {
        self.labels.iter().filter(move |l| l.confidence >= threshold)
    }

    /// Whether any sufficiently confident label matches the object name.
    ///
    /// Matching is case-insensitive and accepts, in order of looseness:
    /// exact equality, substring containment either way, or overlap on any
    /// word of the object name longer than three characters. Heuristic by
    /// design; favors recall over precision.
    pub fn matches(&self, object_name: &str, threshold: f32) -> bool {
        let target = object_name.trim().to_lowercase();
        if target.is_empty() {
            return false;
        }

        self.above(threshold).any(|label| {
            let found = label.name.trim().to_lowercase();
            if found.is_empty() {
                return false;
            }
            if found == target || found.contains(&target) || target.contains(&found) {
                return true;
            }
            // Token overlap: "light" should match "traffic light"
            target
                .split_whitespace()
                .filter(|w| w.len() > 3)
                .any(|w| found.split_whitespace().any(|f| f == w))
        })
    }
}

impl FromIterator<Label> for DetectionSet {
    fn from_iter<I: IntoIterator<Item = Label>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detections(pairs: &[(&str, f32)]) -> DetectionSet {
        pairs
            .iter()
            .map(|(name, conf)| Label::new(*name, *conf))
            .collect()
    }

    #[test]
    fn test_exact_match_case_insensitive() {
        let set = detections(&[("Traffic Cone", 0.9)]);
        assert!(set.matches("traffic cone", 0.5));
        assert!(set.matches("TRAFFIC CONE", 0.5));
    }

    #[test]
    fn test_substring_match_both_directions() {
        let set = detections(&[("cone", 0.8)]);
        assert!(set.matches("traffic cone", 0.5));

        let set = detections(&[("red traffic cone on road", 0.8)]);
        assert!(set.matches("traffic cone", 0.5));
    }

    #[test]
    fn test_token_overlap_match() {
        let set = detections(&[("street light pole", 0.8)]);
        assert!(set.matches("traffic light", 0.5));
    }

    #[test]
    fn test_below_threshold_is_ignored() {
        let set = detections(&[("stop sign", 0.3)]);
        assert!(!set.matches("stop sign", 0.5));
        assert!(set.matches("stop sign", 0.2));
    }

    #[test]
    fn test_no_match() {
        let set = detections(&[("cow", 0.95), ("barn", 0.7)]);
        assert!(!set.matches("ambulance", 0.5));
    }

    #[test]
    fn test_empty_set_never_matches() {
        assert!(!DetectionSet::empty().matches("church", 0.0));
    }

    #[test]
    fn test_confidence_clamped() {
        let label = Label::new("cow", 1.7);
        assert_eq!(label.confidence(), 1.0);
        let label = Label::new("cow", -0.2);
        assert_eq!(label.confidence(), 0.0);
    }
}
