/// One milestone of spoofable feature flags.
///
/// `display_name` is what the UI shows and what gets stored as the user's
/// selection; the flags themselves are always re-derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureSet {
    pub display_name: &'static str,
    pub feature_flags: &'static [&'static str],
}

impl FeatureSet {
    pub const fn new(display_name: &'static str, feature_flags: &'static [&'static str]) -> Self {
        Self {
            display_name,
            feature_flags,
        }
    }
}

/// Every known feature set.
///
/// Ordered by device release date: a feature level includes every entry up to
/// and including itself, so new entries go at the end.
pub static FEATURES: &[FeatureSet] = &[FeatureSet::new(
    "Galaxy S23+",
    &["com.samsung.android.feature.SemFloatingFeature"],
)];

/// Index of the entry named `level`, first match in catalog order.
pub(crate) fn level_index(features: &[FeatureSet], level: &str) -> Option<usize> {
    features.iter().position(|f| f.display_name == level)
}
