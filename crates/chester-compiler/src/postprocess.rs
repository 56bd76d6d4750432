//! Output post-processing

use crate::config::BuildConfig;
use chester_core::ChesterResult;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

/// Source map reference appended to debug bundles, without a trailing newline
pub const SOURCE_MAP_COMMENT: &str = "//@ sourceMappingURL=chester.js.map";

/// Append the source map comment to the compiled bundle, creating the file
/// if the compiler did not.
pub fn append_source_map_comment(config: &BuildConfig) -> ChesterResult<PathBuf> {
    let path = config.resolve(&config.output_file());

    let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
    file.write_all(SOURCE_MAP_COMMENT.as_bytes())?;

    log::info!("Appended source map reference to {:?}", path);
    Ok(path)
}
