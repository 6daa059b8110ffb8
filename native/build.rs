use std::env;
use std::fs;
use std::path::PathBuf;

const GENERATED: &str = "config.rs";
const DEFAULTS: &str = "config.defaults.rs";

fn main() {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR missing");
    let src_dir = PathBuf::from(manifest_dir).join("src");
    let generated = src_dir.join(GENERATED);
    let defaults = src_dir.join(DEFAULTS);

    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed={}", defaults.display());
    println!("cargo:rerun-if-changed={}", generated.display());

    // A packaged config.rs always wins over the checked-in defaults.
    if generated.exists() {
        return;
    }

    if !defaults.exists() {
        panic!("Missing catalog config template: {}", defaults.display());
    }

    fs::copy(&defaults, &generated).unwrap_or_else(|error| {
        panic!(
            "Failed to bootstrap {} from {}: {}",
            generated.display(),
            defaults.display(),
            error
        )
    });

    println!("cargo:warning=Catalog config bootstrapped from {}", DEFAULTS);
}
