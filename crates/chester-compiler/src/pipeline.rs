//! Linear build pipeline for ChesterGL
//!
//! Stages run strictly in order: fetch externs (optional), write the flag
//! file, compile, append the source map comment (debug only), generate docs
//! (optional). Any failure ends the run; later stages never execute.

use crate::config::{BuildConfig, BuildMode};
use crate::externs::{fetch_externs, ExternSource, HttpExternSource};
use crate::flags::write_flag_file;
use crate::postprocess::append_source_map_comment;
use crate::tools::{compile_invocation, docs_invocation, ProcessRunner, ToolInvocation, ToolRunner};
use chester_core::{ChesterError, ChesterResult};
use std::fmt;
use std::path::PathBuf;

const RULE: &str = "================================";

/// Stages of a build, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStage {
    FetchExterns,
    WriteFlags,
    Compile,
    AppendSourceMap,
    GenerateDocs,
}

impl fmt::Display for BuildStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BuildStage::FetchExterns => "fetch externs",
            BuildStage::WriteFlags => "write flag file",
            BuildStage::Compile => "compile",
            BuildStage::AppendSourceMap => "append source map",
            BuildStage::GenerateDocs => "generate docs",
        };
        f.write_str(name)
    }
}

/// What a successful build produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub mode: BuildMode,
    pub externs_fetched: Vec<String>,
    pub flag_file: PathBuf,
    pub output_file: PathBuf,
    pub source_map_appended: bool,
    pub docs_dir: Option<PathBuf>,
    pub stages: Vec<BuildStage>,
}

/// Main build pipeline
pub struct BuildPipeline<R: ToolRunner, S: ExternSource> {
    config: BuildConfig,
    runner: R,
    source: S,
}

impl BuildPipeline<ProcessRunner, HttpExternSource> {
    /// Pipeline that spawns real processes and downloads over HTTP
    pub fn new(config: BuildConfig) -> Self {
        let runner = ProcessRunner::new(config.work_dir.clone());
        let source = HttpExternSource::from_config(&config);
        Self::with_parts(config, runner, source)
    }
}

impl<R: ToolRunner, S: ExternSource> BuildPipeline<R, S> {
    /// Create a pipeline with custom tool runner and extern source
    pub fn with_parts(config: BuildConfig, runner: R, source: S) -> Self {
        Self { config, runner, source }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Run every stage of the build
    pub fn run(&mut self) -> ChesterResult<BuildReport> {
        self.config.validate()?;

        let config = &self.config;
        log::info!("Starting {} build of ChesterGL", config.mode);

        let mut report = BuildReport {
            mode: config.mode,
            externs_fetched: Vec::new(),
            flag_file: config.flag_file_path(),
            output_file: config.resolve(&config.output_file()),
            source_map_appended: false,
            docs_dir: None,
            stages: Vec::new(),
        };

        if config.fetch_externs {
            log::info!("Stage: {}", BuildStage::FetchExterns);
            report.externs_fetched = fetch_externs(config, &self.source)?;
            report.stages.push(BuildStage::FetchExterns);
        } else {
            log::info!("Extern fetching disabled, using existing files in {:?}", config.compiler_root);
        }

        log::info!("Stage: {}", BuildStage::WriteFlags);
        report.flag_file = write_flag_file(config)?;
        report.stages.push(BuildStage::WriteFlags);

        log::info!("Stage: {}", BuildStage::Compile);
        run_tool(&mut self.runner, &compile_invocation(config))?;
        report.stages.push(BuildStage::Compile);

        if config.mode.is_debug() {
            log::info!("Stage: {}", BuildStage::AppendSourceMap);
            append_source_map_comment(config)?;
            report.source_map_appended = true;
            report.stages.push(BuildStage::AppendSourceMap);
        }

        if config.build_docs {
            log::info!("Stage: {}", BuildStage::GenerateDocs);
            run_tool(&mut self.runner, &docs_invocation(config))?;
            report.docs_dir = Some(config.resolve(&config.docs_dir()));
            report.stages.push(BuildStage::GenerateDocs);
        }

        println!("{}", RULE);
        println!("Completed.");
        log::info!("Build finished: {}", report.output_file.display());

        Ok(report)
    }
}

/// Run one tool, printing the build failure notice if it cannot be started
/// or exits unsuccessfully.
fn run_tool<R: ToolRunner>(runner: &mut R, invocation: &ToolInvocation) -> ChesterResult<()> {
    log::debug!("{}", invocation);

    let result = runner.run(invocation).and_then(|status| {
        if status.is_success() {
            Ok(())
        } else {
            Err(ChesterError::tool_failed(invocation.tool, status.code))
        }
    });

    if let Err(e) = &result {
        log::error!("{}", e);
        println!("{}", RULE);
        println!("We had an error during the compile process.");
    }

    result
}
