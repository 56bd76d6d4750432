//! Fixed file lists compiled into every build
//!
//! Neither list is discovered at run time. The source order is handed to the
//! dependency-aware build tool as-is, which reorders internally.

/// Third-party extern stubs fetched into the compiler directory
pub const EXTERNS: [&str; 4] = [
    "jquery-1.7.js",
    "webkit_console.js",
    "google_analytics_api.js",
    "json.js",
];

/// Project sources, in the order they are passed to the compiler
pub const SOURCES: [&str; 10] = [
    "chesterGL/core.js",
    "chesterGL/block.js",
    "chesterGL/blockFrames.js",
    "chesterGL/blockGroup.js",
    "chesterGL/actions.js",
    "chesterGL/tmxBlock.js",
    "chesterGL/GPUParticleSystem.js",
    "chesterGL/primitivesBlock.js",
    "chesterGL/labelBlock.js",
    "chesterGL/bmFontLabelBlock.js",
];

/// Documentation entry file, placed ahead of the sources for JSDoc
pub const DOCS_ENTRY: &str = "chesterGL/docs.js";

/// Accessors over the fixed lists
pub struct FileLists;

impl FileLists {
    pub fn externs() -> &'static [&'static str] {
        &EXTERNS
    }

    pub fn sources() -> &'static [&'static str] {
        &SOURCES
    }

    /// Files handed to the documentation generator: the docs entry file
    /// followed by every source in compile order.
    pub fn doc_sources() -> Vec<&'static str> {
        std::iter::once(DOCS_ENTRY)
            .chain(SOURCES.iter().copied())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doc_sources_prepend_entry() {
        let docs = FileLists::doc_sources();
        assert_eq!(docs.len(), SOURCES.len() + 1);
        assert_eq!(docs[0], "chesterGL/docs.js");
        assert_eq!(&docs[1..], FileLists::sources());
    }

    #[test]
    fn test_sources_are_project_relative() {
        assert!(FileLists::sources().iter().all(|s| s.starts_with("chesterGL/")));
        assert!(FileLists::externs().iter().all(|e| e.ends_with(".js")));
    }
}
