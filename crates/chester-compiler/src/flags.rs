//! Closure Compiler flag files
//!
//! The build tool receives compiler options indirectly through
//! `--flagfile=<mode>.flags`, so the whole option set for a mode is written
//! to disk before compiling.

use crate::config::BuildConfig;
use chester_core::{ChesterResult, FileLists};
use std::fs;
use std::path::PathBuf;

/// Options shared by both modes, after the extern clauses
const COMMON_FLAGS: [&str; 6] = [
    "--language_in=ECMASCRIPT5_STRICT",
    "--warning_level=VERBOSE",
    "--jscomp_warning=checkTypes",
    "--summary_detail_level=3",
    "--externs deps.js",
    "--compilation_level ADVANCED_OPTIMIZATIONS",
];

/// Build the flag string for the configured mode.
///
/// Every clause is followed by a single space except the debug-only
/// `--source_map_format=V3`, which ends the string.
pub fn compiler_flags(config: &BuildConfig) -> String {
    let mut flags = String::new();
    let mut clause = |text: &str| {
        flags.push_str(text);
        flags.push(' ');
    };

    for name in FileLists::externs() {
        clause(&format!("--externs {}", config.extern_path(name)));
    }
    for flag in COMMON_FLAGS {
        clause(flag);
    }

    let source_map = format!("--create_source_map={}", config.source_map_file());
    if config.mode.is_debug() {
        clause("--formatting PRETTY_PRINT");
        clause("-D ENABLE_DEBUG=1");
        clause(&source_map);
        flags.push_str("--source_map_format=V3");
    } else {
        clause(&source_map);
    }

    flags
}

/// Write `<mode>.flags` into the working directory, replacing any previous
/// file. Returns the path written.
pub fn write_flag_file(config: &BuildConfig) -> ChesterResult<PathBuf> {
    let path = config.flag_file_path();
    let flags = compiler_flags(config);

    log::debug!("Compiler flags: {}", flags);
    fs::write(&path, flags.as_bytes())?;
    log::info!("Wrote flag file {:?}", path);

    Ok(path)
}
