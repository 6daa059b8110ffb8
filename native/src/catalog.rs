use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::sync::OnceLock;

use crate::config::DEFAULT_DEVICE_NAME;
use crate::devices::{DeviceEntry, DEVICES, NONE_DEVICE};
use crate::features::{level_index, FeatureSet, FEATURES};
use crate::versions::{AndroidVersion, ANDROID_VERSIONS};

/// The three read-only tables every lookup runs against.
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    pub features: &'static [FeatureSet],
    pub versions: &'static [AndroidVersion],
    pub devices: &'static [DeviceEntry],
}

impl Catalog {
    /// The tables compiled into the module.
    pub fn builtin() -> Catalog {
        Catalog {
            features: FEATURES,
            versions: ANDROID_VERSIONS,
            devices: DEVICES,
        }
    }

    /// Every feature set from the start of the catalog up to and including `level`.
    /// Empty when `level` is not a display name.
    pub fn features_up_to(&self, level: &str) -> Vec<FeatureSet> {
        match level_index(self.features, level) {
            Some(idx) => self.features[..=idx].to_vec(),
            None => {
                debug!("Feature level {:?} not in catalog", level);
                Vec::new()
            }
        }
    }

    pub fn version_from_label(&self, label: &str) -> Option<AndroidVersion> {
        self.versions.iter().find(|v| v.label == label).copied()
    }

    pub fn device_by_name(&self, name: Option<&str>) -> Option<&'static DeviceEntry> {
        let name = name?;
        let found = self.devices.iter().find(|d| d.device_name == name);
        if found.is_none() {
            debug!("Device {:?} not in catalog", name);
        }
        found
    }

    /// Display names of the feature sets a device reports.
    pub fn features_for_device(&self, name: Option<&str>) -> BTreeSet<&'static str> {
        self.device_by_name(name)
            .map(|device| {
                self.features_up_to(device.feature_level_name)
                    .iter()
                    .map(|f| f.display_name)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Flags behind the given display names, catalog order, no repeats.
    /// A display name resolves to its first entry, as in [`Catalog::features_up_to`].
    pub fn feature_flags_for<'a, I>(&self, display_names: I) -> Vec<&'static str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut picked: Vec<usize> = display_names
            .into_iter()
            .filter_map(|name| level_index(self.features, name))
            .collect();
        picked.sort_unstable();
        picked.dedup();

        let mut seen = HashSet::new();
        picked
            .into_iter()
            .flat_map(|idx| self.features[idx].feature_flags.iter().copied())
            .filter(|flag| seen.insert(*flag))
            .collect()
    }

    pub fn device_names(&self) -> Vec<&'static str> {
        self.devices.iter().map(|d| d.device_name).collect()
    }

    pub fn android_version_labels(&self) -> Vec<&'static str> {
        self.versions.iter().map(|v| v.label).collect()
    }

    pub fn feature_level_names(&self) -> Vec<&'static str> {
        self.features.iter().map(|f| f.display_name).collect()
    }

    /// Report table inconsistencies. Nothing is corrected here.
    pub fn check(&self, default_device: &str) -> Vec<CatalogIssue> {
        let mut issues = Vec::new();

        let mut names = HashSet::new();
        for f in self.features {
            if !names.insert(f.display_name) {
                issues.push(CatalogIssue::DuplicateFeatureLevel {
                    level: f.display_name,
                });
            }
        }

        let mut labels = HashSet::new();
        for v in self.versions {
            if !labels.insert(v.label) {
                issues.push(CatalogIssue::DuplicateVersionLabel { label: v.label });
            }
        }

        let mut devices = HashSet::new();
        for d in self.devices {
            if !devices.insert(d.device_name) {
                issues.push(CatalogIssue::DuplicateDevice {
                    device: d.device_name,
                });
            }

            let mut keys = HashSet::new();
            for &(key, _) in d.props {
                if !keys.insert(key) {
                    issues.push(CatalogIssue::DuplicateProp {
                        device: d.device_name,
                        key,
                    });
                }
            }

            if d.device_name != NONE_DEVICE
                && level_index(self.features, d.feature_level_name).is_none()
            {
                issues.push(CatalogIssue::UnknownFeatureLevel {
                    device: d.device_name,
                    level: d.feature_level_name,
                });
            }

            if let Some(version) = d.android_version {
                if !self.versions.contains(&version) {
                    issues.push(CatalogIssue::UnlistedVersion {
                        device: d.device_name,
                        label: version.label,
                    });
                }
            }
        }

        if self.device_by_name(Some(default_device)).is_none() {
            issues.push(CatalogIssue::UnknownDefaultDevice {
                name: default_device.to_string(),
            });
        }

        for issue in &issues {
            warn!("Catalog: {}", issue);
        }
        issues
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogIssue {
    UnknownFeatureLevel {
        device: &'static str,
        level: &'static str,
    },
    DuplicateDevice {
        device: &'static str,
    },
    DuplicateFeatureLevel {
        level: &'static str,
    },
    DuplicateVersionLabel {
        label: &'static str,
    },
    UnlistedVersion {
        device: &'static str,
        label: &'static str,
    },
    DuplicateProp {
        device: &'static str,
        key: &'static str,
    },
    UnknownDefaultDevice {
        name: String,
    },
}

impl fmt::Display for CatalogIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogIssue::UnknownFeatureLevel { device, level } => write!(
                f,
                "device {:?} points at feature level {:?}, which is not in the feature catalog",
                device, level
            ),
            CatalogIssue::DuplicateDevice { device } => {
                write!(f, "device {:?} listed twice", device)
            }
            CatalogIssue::DuplicateFeatureLevel { level } => {
                write!(f, "feature level {:?} listed twice", level)
            }
            CatalogIssue::DuplicateVersionLabel { label } => {
                write!(f, "android version {:?} listed twice", label)
            }
            CatalogIssue::UnlistedVersion { device, label } => write!(
                f,
                "device {:?} uses android version {:?}, which is not in the version catalog",
                device, label
            ),
            CatalogIssue::DuplicateProp { device, key } => {
                write!(f, "device {:?} sets prop {} twice", device, key)
            }
            CatalogIssue::UnknownDefaultDevice { name } => {
                write!(f, "default device {:?} is not in the device catalog", name)
            }
        }
    }
}

pub fn features_up_to(level: &str) -> Vec<FeatureSet> {
    Catalog::builtin().features_up_to(level)
}

pub fn version_from_label(label: &str) -> Option<AndroidVersion> {
    Catalog::builtin().version_from_label(label)
}

pub fn device_by_name(name: Option<&str>) -> Option<&'static DeviceEntry> {
    Catalog::builtin().device_by_name(name)
}

pub fn features_for_device(name: Option<&str>) -> BTreeSet<&'static str> {
    Catalog::builtin().features_for_device(name)
}

pub fn feature_flags_for<'a, I>(display_names: I) -> Vec<&'static str>
where
    I: IntoIterator<Item = &'a str>,
{
    Catalog::builtin().feature_flags_for(display_names)
}

pub fn device_names() -> Vec<&'static str> {
    Catalog::builtin().device_names()
}

pub fn android_version_labels() -> Vec<&'static str> {
    Catalog::builtin().android_version_labels()
}

pub fn feature_level_names() -> Vec<&'static str> {
    Catalog::builtin().feature_level_names()
}

/// Run [`Catalog::check`] on the builtin catalog with the configured default device.
pub fn check() -> Vec<CatalogIssue> {
    Catalog::builtin().check(DEFAULT_DEVICE_NAME)
}

pub fn default_device_name() -> &'static str {
    DEFAULT_DEVICE_NAME
}

/// Feature sets of the default device, derived once from the tables.
pub fn default_features() -> &'static [FeatureSet] {
    static DEFAULT_FEATURES: OnceLock<Vec<FeatureSet>> = OnceLock::new();
    DEFAULT_FEATURES.get_or_init(|| {
        let catalog = Catalog::builtin();
        catalog
            .device_by_name(Some(DEFAULT_DEVICE_NAME))
            .map(|device| catalog.features_up_to(device.feature_level_name))
            .unwrap_or_default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::versions::{PIE_9, Q_10, T_13};

    static PIXEL_FEATURES: &[FeatureSet] = &[
        FeatureSet::new("Pixel 2016", &["com.google.android.apps.photos.NEXUS_PRELOAD"]),
        FeatureSet::new("Pixel 2017", &["com.google.android.feature.PIXEL_2017_EXPERIENCE"]),
        FeatureSet::new(
            "Pixel 2018",
            &[
                "com.google.android.feature.PIXEL_2018_EXPERIENCE",
                "com.google.android.feature.PIXEL_2017_EXPERIENCE",
            ],
        ),
    ];

    static PIXEL_DEVICES: &[DeviceEntry] = &[
        DeviceEntry {
            device_name: "Pixel 2",
            props: &[("BRAND", "google"), ("MODEL", "Pixel 2")],
            feature_level_name: "Pixel 2017",
            android_version: Some(PIE_9),
        },
        DeviceEntry {
            device_name: "Pixel 3",
            props: &[("BRAND", "google"), ("BRAND", "google")],
            feature_level_name: "Pixel 2018",
            android_version: Some(T_13),
        },
        DeviceEntry {
            device_name: "Pixel 2",
            props: &[],
            feature_level_name: "Pixel 2030",
            android_version: None,
        },
    ];

    static PIXEL_VERSIONS: &[AndroidVersion] = &[PIE_9, Q_10, PIE_9];

    static REPEATED_FEATURES: &[FeatureSet] = &[
        FeatureSet::new("Pixel 2016", &["com.google.android.apps.photos.NEXUS_PRELOAD"]),
        FeatureSet::new("Pixel 2017", &["com.google.android.feature.PIXEL_2017_EXPERIENCE"]),
        FeatureSet::new("Pixel 2016", &["com.google.android.feature.PIXEL_EXPERIENCE"]),
    ];

    static REPEATED_VERSIONS: &[AndroidVersion] = &[
        AndroidVersion::new("Pie 9.0", "9", 28),
        Q_10,
        AndroidVersion::new("Pie 9.0", "9.0.1", 29),
    ];

    fn repeated_catalog() -> Catalog {
        Catalog {
            features: REPEATED_FEATURES,
            versions: REPEATED_VERSIONS,
            devices: PIXEL_DEVICES,
        }
    }

    fn pixel_catalog() -> Catalog {
        Catalog {
            features: PIXEL_FEATURES,
            versions: PIXEL_VERSIONS,
            devices: PIXEL_DEVICES,
        }
    }

    #[test]
    fn features_up_to_returns_prefix_ending_at_level() {
        let catalog = pixel_catalog();
        for (i, level) in PIXEL_FEATURES.iter().enumerate() {
            let prefix = catalog.features_up_to(level.display_name);
            assert_eq!(prefix.len(), i + 1);
            assert_eq!(prefix.as_slice(), &PIXEL_FEATURES[..=i]);
        }
        for (i, level) in FEATURES.iter().enumerate() {
            assert_eq!(features_up_to(level.display_name).len(), i + 1);
        }
    }

    #[test]
    fn features_up_to_unknown_level_is_empty() {
        assert!(features_up_to("nonexistent").is_empty());
        assert!(pixel_catalog().features_up_to("").is_empty());
    }

    #[test]
    fn repeated_level_resolves_to_first_entry() {
        let catalog = repeated_catalog();
        let prefix = catalog.features_up_to("Pixel 2016");
        assert_eq!(prefix.len(), 1);
        assert_eq!(prefix[0], REPEATED_FEATURES[0]);
        assert_eq!(catalog.features_up_to("Pixel 2017").len(), 2);
    }

    #[test]
    fn repeated_label_resolves_to_first_version() {
        let pie = repeated_catalog().version_from_label("Pie 9.0").unwrap();
        assert_eq!((pie.release, pie.sdk), ("9", 28));
    }

    #[test]
    fn repeated_level_flags_come_from_first_entry() {
        let catalog = repeated_catalog();
        assert_eq!(
            catalog.feature_flags_for(["Pixel 2016"]),
            vec!["com.google.android.apps.photos.NEXUS_PRELOAD"]
        );
        assert_eq!(
            catalog.feature_flags_for(["Pixel 2017", "Pixel 2016", "Pixel 2016"]),
            vec![
                "com.google.android.apps.photos.NEXUS_PRELOAD",
                "com.google.android.feature.PIXEL_2017_EXPERIENCE",
            ]
        );
    }

    #[test]
    fn version_lookup() {
        for v in ANDROID_VERSIONS {
            assert_eq!(version_from_label(v.label), Some(*v));
        }
        assert_eq!(version_from_label("U 14.0"), None);

        let t = version_from_label("T 13.0").unwrap();
        assert_eq!((t.release, t.sdk), ("13", 32));
    }

    #[test]
    fn none_device_spoofs_nothing() {
        let none = device_by_name(Some("None")).unwrap();
        assert!(none.props.is_empty());
        assert!(none.android_version.is_none());
    }

    #[test]
    fn unresolvable_devices() {
        assert!(device_by_name(None).is_none());
        assert!(device_by_name(Some("unknown")).is_none());
        assert!(features_for_device(None).is_empty());
        assert!(features_for_device(Some("unknown")).is_empty());
    }

    #[test]
    fn galaxy_s8_level_does_not_resolve() {
        assert!(features_for_device(Some("Galaxy S8")).is_empty());
        let s8 = device_by_name(Some("Galaxy S8")).unwrap();
        assert_eq!(s8.android_version, version_from_label("T 13.0"));
    }

    #[test]
    fn features_for_device_matches_level_prefix() {
        let catalog = pixel_catalog();
        let names = catalog.features_for_device(Some("Pixel 2"));
        assert_eq!(names, BTreeSet::from(["Pixel 2016", "Pixel 2017"]));

        for device in PIXEL_DEVICES {
            let expected: BTreeSet<_> = catalog
                .features_up_to(device.feature_level_name)
                .iter()
                .map(|f| f.display_name)
                .collect();
            // first match wins, so only check the entry a lookup actually returns
            if catalog.device_by_name(Some(device.device_name)) == Some(device) {
                assert_eq!(catalog.features_for_device(Some(device.device_name)), expected);
            }
        }
    }

    #[test]
    fn device_lookup_takes_first_match() {
        let catalog = pixel_catalog();
        let found = catalog.device_by_name(Some("Pixel 2")).unwrap();
        assert_eq!(found.feature_level_name, "Pixel 2017");
    }

    #[test]
    fn flags_follow_catalog_order_without_repeats() {
        let catalog = pixel_catalog();
        let flags = catalog.feature_flags_for(["Pixel 2018", "Pixel 2017", "Pixel 2099"]);
        assert_eq!(
            flags,
            vec![
                "com.google.android.feature.PIXEL_2017_EXPERIENCE",
                "com.google.android.feature.PIXEL_2018_EXPERIENCE",
            ]
        );
        assert!(catalog.feature_flags_for([] as [&str; 0]).is_empty());
        assert_eq!(
            feature_flags_for(["Galaxy S23+"]),
            vec!["com.samsung.android.feature.SemFloatingFeature"]
        );
    }

    #[test]
    fn enumerations_follow_catalog_order() {
        assert_eq!(device_names(), vec!["None", "Galaxy S8"]);
        assert_eq!(android_version_labels().first(), Some(&"Oreo 8.1.0"));
        assert_eq!(android_version_labels().last(), Some(&"T 13.0"));
        assert_eq!(feature_level_names(), vec!["Galaxy S23+"]);
    }

    #[test]
    fn defaults_stay_consistent() {
        assert!(device_by_name(Some(default_device_name())).is_some());
        let derived: BTreeSet<_> = default_features().iter().map(|f| f.display_name).collect();
        assert_eq!(features_for_device(Some(default_device_name())), derived);
    }

    #[test]
    fn builtin_check_flags_only_galaxy_s8_level() {
        assert_eq!(
            check(),
            vec![CatalogIssue::UnknownFeatureLevel {
                device: "Galaxy S8",
                level: "Galaxy S8",
            }]
        );
    }

    #[test]
    fn check_reports_every_kind() {
        let issues = pixel_catalog().check("Pixel 9");
        assert!(issues.contains(&CatalogIssue::DuplicateDevice { device: "Pixel 2" }));
        assert!(issues.contains(&CatalogIssue::DuplicateProp {
            device: "Pixel 3",
            key: "BRAND",
        }));
        assert!(issues.contains(&CatalogIssue::UnknownFeatureLevel {
            device: "Pixel 2",
            level: "Pixel 2030",
        }));
        assert!(issues.contains(&CatalogIssue::UnlistedVersion {
            device: "Pixel 3",
            label: "T 13.0",
        }));
        assert!(issues.contains(&CatalogIssue::DuplicateVersionLabel { label: "Pie 9.0" }));
        assert!(issues.contains(&CatalogIssue::UnknownDefaultDevice {
            name: "Pixel 9".into(),
        }));
        assert_eq!(issues.len(), 6);
    }

    #[test]
    fn issue_display_names_the_device() {
        let issue = CatalogIssue::UnknownFeatureLevel {
            device: "Galaxy S8",
            level: "Galaxy S8",
        };
        assert!(issue.to_string().starts_with("device \"Galaxy S8\""));
    }
}
