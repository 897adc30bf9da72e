//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `blotter_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("blotter_core ping={}", blotter_core::ping());
    println!("blotter_core version={}", blotter_core::core_version());
}
