use std::collections::BTreeMap;

use crate::versions::{AndroidVersion, T_13};

/// A device that can be impersonated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceEntry {
    pub device_name: &'static str,
    /// `android.os.Build` field name to spoofed value. Keys are unique.
    pub props: &'static [(&'static str, &'static str)],
    /// Display name in `features::FEATURES` up to which flags are reported.
    pub feature_level_name: &'static str,
    pub android_version: Option<AndroidVersion>,
}

impl DeviceEntry {
    pub fn props_map(&self) -> BTreeMap<&'static str, &'static str> {
        self.props.iter().copied().collect()
    }
}

/// Placeholder entry meaning "spoof nothing".
pub const NONE_DEVICE: &str = "None";

pub static DEVICES: &[DeviceEntry] = &[
    DeviceEntry {
        device_name: NONE_DEVICE,
        props: &[],
        feature_level_name: NONE_DEVICE,
        android_version: None,
    },
    DeviceEntry {
        device_name: "Galaxy S8",
        props: &[
            ("BRAND", "samsung"),
            ("MANUFACTURER", "samsung"),
            ("DEVICE", "dreamlte"),
            ("PRODUCT", "dreamlte"),
            ("MODEL", "SM-G950F"),
            (
                "FINGERPRINT",
                "samsung/dreamltexx/dreamlte:7.0/NRD90M/G950FXXU1AQL5:user/release-keys",
            ),
            ("HARDWARE", "samsungexynos8895"),
            ("BOARD", "universal8895"),
            ("BOOTLOADER", "G950FXXU1AQL5"),
            ("RADIO", "G950FXXU1AQL5"),
            ("TIMA", "1"),
        ],
        // Not a display name in FEATURES; reported by Catalog::check.
        feature_level_name: "Galaxy S8",
        android_version: Some(T_13),
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn props_map_keeps_every_key() {
        for device in DEVICES {
            assert_eq!(device.props_map().len(), device.props.len(), "{}", device.device_name);
        }
    }

    #[test]
    fn galaxy_s8_identity() {
        let s8 = DEVICES.iter().find(|d| d.device_name == "Galaxy S8").unwrap();
        let props = s8.props_map();
        assert_eq!(props["BRAND"], "samsung");
        assert_eq!(props["MODEL"], "SM-G950F");
        assert_eq!(props["BOOTLOADER"], props["RADIO"]);
        assert_eq!(s8.android_version.map(|v| v.label), Some("T 13.0"));
    }
}
