//! Commit and date stamped in by the build script.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// `pokeplay <date> (<commit>)`, as printed by `--version`.
pub fn version_line() -> String {
    format!("pokeplay {} ({})", BUILD_DATE, BUILD_COMMIT)
}
