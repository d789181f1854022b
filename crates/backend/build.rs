use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// target/debug или target/release для текущей сборки
fn profile_dir() -> Option<PathBuf> {
    let out_dir = PathBuf::from(env::var("OUT_DIR").ok()?);
    let profile = env::var("PROFILE").ok()?;
    out_dir
        .ancestors()
        .find(|p| p.ends_with(&profile))
        .map(Path::to_path_buf)
}

fn main() {
    // config.toml рядом с Cargo.toml бэкенда (локальный, не в репозитории)
    let source = Path::new(env!("CARGO_MANIFEST_DIR")).join("config.toml");
    println!("cargo:rerun-if-changed={}", source.display());

    if !source.exists() {
        println!("cargo:warning=No config.toml next to the backend crate, the embedded default will be used");
        return;
    }
    let Some(target_dir) = profile_dir() else {
        println!("cargo:warning=Could not locate the target profile directory, config.toml not copied");
        return;
    };

    let dest = target_dir.join("config.toml");
    match fs::copy(&source, &dest) {
        Ok(_) => println!("cargo:warning=Copied config.toml to {}", dest.display()),
        Err(e) => println!("cargo:warning=Failed to copy config.toml: {}", e),
    }
}
