// Fallback config used when a packaged src/config.rs is absent.
// A module build may drop in its own src/config.rs to retag logs or pick another default device.
#![allow(dead_code)]

use log::LevelFilter;

pub const LOG_TAG: &str = "SpoofCatalog";

pub const LOG_LEVEL: LevelFilter = LevelFilter::Debug;

/// Device preselected when nothing has been chosen yet. Must name an entry in `devices::DEVICES`.
pub const DEFAULT_DEVICE_NAME: &str = "Galaxy S8";
