//! Closure Compiler build pipeline for ChesterGL
//!
//! This crate turns a [`BuildConfig`] into the flag file, compiler and JSDoc
//! invocations that produce `chester.js`, its source map and the API docs.

pub mod config;
pub mod externs;
pub mod flags;
pub mod pipeline;
pub mod postprocess;
pub mod tools;

pub use config::{BuildConfig, BuildMode};
pub use externs::{ExternSource, HttpExternSource};
pub use pipeline::{BuildPipeline, BuildReport, BuildStage};
pub use tools::{ProcessRunner, ToolInvocation, ToolRunner, ToolStatus};
