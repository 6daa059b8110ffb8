//! Device catalog for build-prop and feature-flag spoofing.
//!
//! The Android side loads this as a native library: the selection UI lists
//! devices and versions through [`bridge`], and the hook installer fetches the
//! props, flags and `Build.VERSION` fields for the chosen device.

#[macro_use]
extern crate log;

mod config;
mod logging;

pub mod bridge;
pub mod catalog;
pub mod devices;
pub mod features;
pub mod versions;

pub use catalog::{
    android_version_labels, check, default_device_name, default_features, device_by_name,
    device_names, feature_flags_for, feature_level_names, features_for_device, features_up_to,
    version_from_label, Catalog, CatalogIssue,
};
pub use devices::DeviceEntry;
pub use features::FeatureSet;
pub use versions::{AndroidVersion, VersionField};

use jni::sys::{jint, JNI_VERSION_1_6};
use std::os::raw::c_void;

#[no_mangle]
pub extern "system" fn JNI_OnLoad(_vm: jni::JavaVM, _reserved: *mut c_void) -> jint {
    logging::init();
    info!(
        "Catalog loaded: {} devices, {} android versions, {} feature levels",
        devices::DEVICES.len(),
        versions::ANDROID_VERSIONS.len(),
        features::FEATURES.len()
    );

    let issues = check();
    if !issues.is_empty() {
        warn!("Catalog has {} consistency issue(s)", issues.len());
    }

    JNI_VERSION_1_6
}
