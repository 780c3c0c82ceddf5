use std::env;

fn main() {
    // Version string shown by `boundreach --version`; overridable for packaged builds
    let version = env::var("BOUNDREACH_VERSION_OVERRIDE")
        .unwrap_or_else(|_| env::var("CARGO_PKG_VERSION").unwrap_or_default());
    println!("cargo:rustc-env=BOUNDREACH_VERSION={}", version);

    println!("cargo:rerun-if-env-changed=BOUNDREACH_VERSION_OVERRIDE");
    println!("cargo:rerun-if-changed=Cargo.toml");
}
