//! Build script for nasmon-simulator
//!
//! On Windows, links against a vendored SDL2 and places `SDL2.dll` next to the
//! built binary. Other platforms use the system SDL2 and need nothing here.

use std::path::{Path, PathBuf};
use std::{env, fs};

fn main() {
    if env::var("CARGO_CFG_TARGET_OS").unwrap_or_default() != "windows" {
        return;
    }

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());
    let sdl2_dir = manifest_dir.parent().unwrap().join("vendor").join("sdl2");
    println!("cargo:rerun-if-changed={}", sdl2_dir.display());

    if !sdl2_dir.exists() {
        println!("cargo:warning=SDL2 not found at {}", sdl2_dir.display());
        println!("cargo:warning=Put SDL2.lib and SDL2.dll into vendor/sdl2/ at the workspace root");
        return;
    }
    println!("cargo:rustc-link-search=native={}", sdl2_dir.display());

    if let Some(profile_dir) = env::var("OUT_DIR").ok().as_deref().and_then(profile_dir) {
        copy_dll(&sdl2_dir.join("SDL2.dll"), &profile_dir.join("SDL2.dll"));
    }
}

/// `target/<profile>` above `target/<profile>/build/<pkg>/out`.
fn profile_dir(out_dir: &str) -> Option<PathBuf> {
    Path::new(out_dir)
        .ancestors()
        .find(|p| p.file_name().is_some_and(|n| n == "release" || n == "debug"))
        .map(Path::to_path_buf)
}

fn copy_dll(
    src: &Path,
    dst: &Path,
) {
    if !src.exists() || dst.exists() {
        return;
    }
    if let Err(e) = fs::copy(src, dst) {
        println!("cargo:warning=Failed to copy SDL2.dll: {e}");
    }
}
