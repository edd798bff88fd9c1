//! Build script for nasmon-pico2
//!
//! Puts `memory.x` on the linker search path and adds the cortex-m-rt and
//! defmt linker scripts.

use std::env;
use std::fs;
use std::path::PathBuf;

fn main() {
    let Ok(out_dir) = env::var("OUT_DIR").map(PathBuf::from) else {
        panic!("OUT_DIR not set by cargo");
    };

    if let Err(e) = fs::write(out_dir.join("memory.x"), include_bytes!("memory.x")) {
        panic!("failed to write memory.x: {e}");
    }
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");

    // Only the firmware binary links for the target; host tooling skips this.
    if env::var("CARGO_CFG_TARGET_ARCH").as_deref() == Ok("arm") {
        println!("cargo:rustc-link-arg-bins=--nmagic");
        println!("cargo:rustc-link-arg-bins=-Tlink.x");
        println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    }
}
