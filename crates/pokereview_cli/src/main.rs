//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `pokereview_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("pokereview_core ping={}", pokereview_core::ping());
    println!("pokereview_core version={}", pokereview_core::core_version());
    println!(
        "pokereview_core schema_version={}",
        pokereview_core::db::migrations::latest_version()
    );
}
