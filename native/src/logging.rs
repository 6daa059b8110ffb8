#[cfg(target_os = "android")]
pub fn init() {
    use crate::config::{LOG_LEVEL, LOG_TAG};
    use android_logger::Config;

    android_logger::init_once(
        Config::default()
            .with_tag(LOG_TAG)
            .with_max_level(LOG_LEVEL),
    );
}

// Host builds leave logger installation to the embedding binary.
#[cfg(not(target_os = "android"))]
pub fn init() {
    log::set_max_level(crate::config::LOG_LEVEL);
}
