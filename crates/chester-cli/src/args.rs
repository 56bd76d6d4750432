//! Command-line options and their layering over the build configuration

use chester_compiler::{BuildConfig, BuildMode};
use chester_core::ChesterResult;
use clap::{Args, Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "chester-build")]
#[command(about = "Compiler for ChesterGL")]
#[command(version)]
#[command(long_about = "Fetches Closure externs, writes the compiler flag file and builds chester.js with closurebuilder, optionally generating JSDoc documentation")]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable quiet mode (suppress non-error output)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Set log level
    #[arg(long, global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    /// TOML file providing defaults for any option not given here
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub compile: CompileOptions,

    #[command(flatten)]
    pub dependencies: DependencyOptions,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeArg {
    /// Pretty-printed output with ENABLE_DEBUG defined
    Debug,
    /// Advanced optimizations only
    Release,
}

impl From<ModeArg> for BuildMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Debug => BuildMode::Debug,
            ModeArg::Release => BuildMode::Release,
        }
    }
}

#[derive(Args, Debug)]
#[command(next_help_heading = "Compile Options")]
pub struct CompileOptions {
    /// Set the flags for debug or release [default: release]
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Fetch externs (the default)
    #[arg(short = 'f', long, conflicts_with = "no_fetch")]
    pub fetch: bool,

    /// Use the externs already in the compiler directory
    #[arg(long)]
    pub no_fetch: bool,

    /// Build documents using JSDoc
    #[arg(long, conflicts_with = "no_docs")]
    pub docs: bool,

    /// Skip documentation even if the config file enables it
    #[arg(long)]
    pub no_docs: bool,

    /// Output directory [default: ./html]
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Base URL externs are downloaded from
    #[arg(long, value_name = "URL")]
    pub externs_url: Option<String>,

    /// Directory the flag file is written to and tools are run from [default: .]
    #[arg(long, value_name = "DIR")]
    pub work_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
#[command(next_help_heading = "Dependency Options")]
pub struct DependencyOptions {
    /// Location of python executable [default: python]
    #[arg(long, value_name = "PATH")]
    pub python: Option<PathBuf>,

    /// Location of java [default: java]
    #[arg(long, value_name = "PATH")]
    pub java: Option<PathBuf>,

    /// Location of JSDoc root directory [default: /Applications/jsdoc-toolkit]
    #[arg(long, value_name = "DIR")]
    pub jsdoc: Option<PathBuf>,

    /// Path to closure compiler folder [default: /Applications/closure-compiler]
    #[arg(long, value_name = "DIR")]
    pub ccompiler: Option<PathBuf>,

    /// Path to closure library folder [default: /Applications/closure-library]
    #[arg(long, value_name = "DIR")]
    pub clib: Option<PathBuf>,

    /// Filename to closure compiler jar [default: compiler.jar]
    #[arg(long, value_name = "FILE")]
    pub cjar: Option<String>,
}

impl Cli {
    /// Log level filter selected by --quiet, --verbose or --log-level
    pub fn level_filter(&self) -> log::LevelFilter {
        if self.quiet {
            log::LevelFilter::Error
        } else if self.verbose {
            log::LevelFilter::Debug
        } else {
            match self.log_level {
                Some(LogLevel::Error) => log::LevelFilter::Error,
                Some(LogLevel::Warn) => log::LevelFilter::Warn,
                Some(LogLevel::Info) => log::LevelFilter::Info,
                Some(LogLevel::Debug) => log::LevelFilter::Debug,
                Some(LogLevel::Trace) => log::LevelFilter::Trace,
                None => log::LevelFilter::Info,
            }
        }
    }

    /// Build the configuration: defaults, then the config file, then every
    /// option given on the command line.
    pub fn build_config(&self) -> ChesterResult<BuildConfig> {
        let mut config = match &self.config {
            Some(path) => BuildConfig::from_file(path)?,
            None => BuildConfig::default(),
        };

        self.apply_to(&mut config);
        config.validate()?;
        Ok(config)
    }

    fn apply_to(&self, config: &mut BuildConfig) {
        let compile = &self.compile;
        let deps = &self.dependencies;

        if let Some(mode) = compile.mode {
            config.mode = mode.into();
        }
        if compile.fetch {
            config.fetch_externs = true;
        }
        if compile.no_fetch {
            config.fetch_externs = false;
        }
        if compile.docs {
            config.build_docs = true;
        }
        if compile.no_docs {
            config.build_docs = false;
        }

        override_with(&mut config.output_dir, &compile.output);
        override_with(&mut config.externs_url, &compile.externs_url);
        override_with(&mut config.work_dir, &compile.work_dir);
        override_with(&mut config.python, &deps.python);
        override_with(&mut config.java, &deps.java);
        override_with(&mut config.jsdoc_root, &deps.jsdoc);
        override_with(&mut config.compiler_root, &deps.ccompiler);
        override_with(&mut config.library_root, &deps.clib);
        override_with(&mut config.compiler_jar, &deps.cjar);
    }
}

fn override_with<T: Clone>(field: &mut T, value: &Option<T>) {
    if let Some(value) = value {
        *field = value.clone();
    }
}
