//! Extern stub downloads
//!
//! Each extern in the fixed list is fetched and written into the compiler
//! directory, replacing whatever was there. The first failure aborts the
//! whole fetch; nothing is retried or skipped.

use crate::config::BuildConfig;
use chester_core::{ChesterError, ChesterResult, FileLists};
use std::fs;
use std::io::Read;

/// Source of extern stub contents
pub trait ExternSource {
    /// Retrieve the full contents of the named extern
    fn fetch(&self, name: &str) -> ChesterResult<Vec<u8>>;

    /// Where the named extern comes from, for error reports
    fn location(&self, name: &str) -> String;
}

/// Downloads externs over HTTP with a blocking agent.
///
/// No timeout is configured, so an unresponsive server stalls the build.
pub struct HttpExternSource {
    base_url: String,
    agent: ureq::Agent,
}

impl HttpExternSource {
    pub fn new<S: Into<String>>(base_url: S) -> Self {
        Self {
            base_url: base_url.into(),
            agent: ureq::AgentBuilder::new().build(),
        }
    }

    /// Source pointed at the configured externs URL
    pub fn from_config(config: &BuildConfig) -> Self {
        Self::new(config.externs_url.clone())
    }

}

impl ExternSource for HttpExternSource {
    fn location(&self, name: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), name)
    }

    fn fetch(&self, name: &str) -> ChesterResult<Vec<u8>> {
        let url = self.location(name);
        log::debug!("GET {}", url);

        let response = self
            .agent
            .get(&url)
            .call()
            .map_err(|e| ChesterError::fetch(name, url.as_str(), e.to_string()))?;

        let mut body = Vec::new();
        response
            .into_reader()
            .read_to_end(&mut body)
            .map_err(|e| ChesterError::fetch(name, url.as_str(), e.to_string()))?;

        Ok(body)
    }
}

/// Fetch every extern into `<compiler_root>/<name>`, relative to the
/// working directory the compiler will run in.
///
/// Prints a `Downloaded:` notice per file and returns the names fetched.
pub fn fetch_externs<S: ExternSource + ?Sized>(config: &BuildConfig, source: &S) -> ChesterResult<Vec<String>> {
    let mut fetched = Vec::new();

    for name in FileLists::externs() {
        let bytes = source.fetch(name)?;
        let target = config.resolve(&config.extern_path(name));

        fs::write(&target, &bytes).map_err(|e| {
            ChesterError::fetch(*name, source.location(name), format!("cannot write {:?}: {}", target, e))
        })?;

        log::debug!("Stored {} bytes at {:?}", bytes.len(), target);
        println!("Downloaded: {}", name);
        fetched.push(name.to_string());
    }

    Ok(fetched)
}
