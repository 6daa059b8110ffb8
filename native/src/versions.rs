use std::collections::BTreeMap;
use std::fmt;

/// An Android release to report to the host app.
///
/// `label` is only shown to the user. `release` and `sdk` replace
/// `ro.build.version.release` and `ro.build.version.sdk`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AndroidVersion {
    pub label: &'static str,
    pub release: &'static str,
    pub sdk: i32,
}

/// Value written into a `Build.VERSION` field. `SDK_INT` is an `int`, the rest are strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionField {
    Text(String),
    Int(i32),
}

impl fmt::Display for VersionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionField::Text(s) => write!(f, "{:?}", s),
            VersionField::Int(i) => write!(f, "{}", i),
        }
    }
}

impl AndroidVersion {
    pub const fn new(label: &'static str, release: &'static str, sdk: i32) -> Self {
        Self { label, release, sdk }
    }

    /// `Build.VERSION` field name to spoofed value.
    pub fn as_map(&self) -> BTreeMap<&'static str, VersionField> {
        BTreeMap::from([
            ("RELEASE", VersionField::Text(self.release.to_string())),
            ("SDK_INT", VersionField::Int(self.sdk)),
            ("SDK", VersionField::Text(self.sdk.to_string())),
        ])
    }
}

pub const OREO_8_1: AndroidVersion = AndroidVersion::new("Oreo 8.1.0", "8.1.0", 27);
pub const PIE_9: AndroidVersion = AndroidVersion::new("Pie 9.0", "9", 28);
pub const Q_10: AndroidVersion = AndroidVersion::new("Q 10.0", "10", 29);
pub const R_11: AndroidVersion = AndroidVersion::new("R 11.0", "11", 30);
pub const S_12: AndroidVersion = AndroidVersion::new("S 12.0", "12", 31);
// Shipped as sdk 32 (12L) under the 13 label; kept as-is.
pub const T_13: AndroidVersion = AndroidVersion::new("T 13.0", "13", 32);

/// Major Android releases, oldest first.
pub static ANDROID_VERSIONS: &[AndroidVersion] = &[OREO_8_1, PIE_9, Q_10, R_11, S_12, T_13];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn as_map_carries_string_and_int_sdk() {
        let map = T_13.as_map();
        assert_eq!(map.len(), 3);
        assert_eq!(map["RELEASE"], VersionField::Text("13".into()));
        assert_eq!(map["SDK_INT"], VersionField::Int(32));
        assert_eq!(map["SDK"], VersionField::Text("32".into()));
    }

    #[test]
    fn sdk_levels_increase() {
        assert!(ANDROID_VERSIONS.windows(2).all(|w| w[0].sdk < w[1].sdk));
    }

    #[test]
    fn field_display() {
        assert_eq!(VersionField::Int(28).to_string(), "28");
        assert_eq!(VersionField::Text("9".into()).to_string(), "\"9\"");
    }
}
