//! External tool invocations
//!
//! Closure's `closurebuilder.py` and the JSDoc toolkit are run as blocking
//! child processes. Commands are built as argument vectors and spawned
//! directly, never through a shell, so configured paths reach the tools
//! exactly as given.

use crate::config::BuildConfig;
use chester_core::{ChesterError, ChesterResult, FileLists};
use std::fmt;
use std::path::PathBuf;
use std::process::Command;

/// A fully assembled external command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    /// Human-readable tool name used in logs and errors
    pub tool: &'static str,
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl ToolInvocation {
    pub fn new<P: Into<PathBuf>>(tool: &'static str, program: P) -> Self {
        Self {
            tool,
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg<S: Into<String>>(mut self, arg: S) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Values following each occurrence of a flag, e.g. the files after `-i`
    pub fn values_of(&self, flag: &str) -> Vec<&str> {
        self.args
            .windows(2)
            .filter(|pair| pair[0] == flag)
            .map(|pair| pair[1].as_str())
            .collect()
    }

    /// Build the process command, to be run from `work_dir`
    pub fn to_command(&self, work_dir: &std::path::Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args).current_dir(work_dir);
        cmd
    }
}

impl fmt::Display for ToolInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Exit status of a finished tool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolStatus {
    /// Exit code, or `None` if the process was killed by a signal
    pub code: Option<i32>,
}

impl ToolStatus {
    #[cfg(test)]
    pub fn success() -> Self {
        Self { code: Some(0) }
    }

    #[cfg(test)]
    pub fn failure(code: i32) -> Self {
        Self { code: Some(code) }
    }

    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs external tools to completion
pub trait ToolRunner {
    fn run(&mut self, invocation: &ToolInvocation) -> ChesterResult<ToolStatus>;
}

/// Spawns real child processes with inherited stdio
pub struct ProcessRunner {
    work_dir: PathBuf,
}

impl ProcessRunner {
    pub fn new<P: Into<PathBuf>>(work_dir: P) -> Self {
        Self {
            work_dir: work_dir.into(),
        }
    }
}

impl ToolRunner for ProcessRunner {
    fn run(&mut self, invocation: &ToolInvocation) -> ChesterResult<ToolStatus> {
        log::debug!("Executing {}: {}", invocation.tool, invocation);

        let status = invocation
            .to_command(&self.work_dir)
            .status()
            .map_err(|e| ChesterError::tool_launch(invocation.tool, e.to_string()))?;

        Ok(ToolStatus { code: status.code() })
    }
}

/// `closurebuilder.py` invocation producing `<output>/chester.js`.
///
/// The `-i` inputs follow the fixed source order for every mode.
pub fn compile_invocation(config: &BuildConfig) -> ToolInvocation {
    let library = config.library_root.display();

    ToolInvocation::new("closurebuilder", &config.python)
        .arg(format!("{}/closure/bin/build/closurebuilder.py", library))
        .arg("--root")
        .arg(library.to_string())
        .arg("--output_mode=compiled")
        .arg(format!("--output_file={}", config.output_file()))
        .arg(format!(
            "--compiler_jar={}/{}",
            config.compiler_root.display(),
            config.compiler_jar
        ))
        .arg("--root=chesterGL/")
        .arg(format!("--compiler_flags=--flagfile={}", config.mode.flag_file_name()))
        .args(FileLists::sources().iter().flat_map(|file| ["-i", *file]))
}

/// JSDoc toolkit invocation writing HTML into `<output>/docs`
pub fn docs_invocation(config: &BuildConfig) -> ToolInvocation {
    let jsdoc = config.jsdoc_root.display();

    ToolInvocation::new("jsdoc", &config.java)
        .arg("-jar")
        .arg(format!("{}/jsrun.jar", jsdoc))
        .arg(format!("{}/app/run.js", jsdoc))
        .args(["-w", "-version", "170", "-v", "-a"])
        .arg(format!("-t={}/templates/jsdoc", jsdoc))
        .args(FileLists::doc_sources())
        .arg(format!("-d={}", config.docs_dir()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BuildMode;
    use chester_core::sources::SOURCES;

    #[test]
    fn test_compile_invocation_release() {
        let invocation = compile_invocation(&BuildConfig::default());

        assert_eq!(invocation.program, PathBuf::from("python"));
        assert_eq!(
            &invocation.args[..8],
            [
                "/Applications/closure-library/closure/bin/build/closurebuilder.py",
                "--root",
                "/Applications/closure-library",
                "--output_mode=compiled",
                "--output_file=./html/chester.js",
                "--compiler_jar=/Applications/closure-compiler/compiler.jar",
                "--root=chesterGL/",
                "--compiler_flags=--flagfile=release.flags",
            ]
        );
    }

    #[test]
    fn test_compile_invocation_has_one_input_per_source() {
        for mode in [BuildMode::Debug, BuildMode::Release] {
            let config = BuildConfig {
                mode,
                ..BuildConfig::default()
            };
            let invocation = compile_invocation(&config);

            assert_eq!(invocation.args.iter().filter(|a| *a == "-i").count(), 10);
            assert_eq!(invocation.values_of("-i"), SOURCES);
            assert!(invocation
                .args
                .contains(&format!("--compiler_flags=--flagfile={}.flags", mode)));
        }
    }

    #[test]
    fn test_compile_invocation_display() {
        let config = BuildConfig {
            python: PathBuf::from("/usr/bin/python2"),
            ..BuildConfig::default()
        };
        let line = compile_invocation(&config).to_string();

        assert!(line.starts_with("/usr/bin/python2 /Applications/closure-library/closure/bin/build/closurebuilder.py --root "));
        assert!(line.ends_with("-i chesterGL/labelBlock.js -i chesterGL/bmFontLabelBlock.js"));
    }

    #[test]
    fn test_docs_invocation() {
        let config = BuildConfig {
            mode: BuildMode::Debug,
            build_docs: true,
            ..BuildConfig::default()
        };
        let invocation = docs_invocation(&config);

        assert_eq!(invocation.program, PathBuf::from("java"));
        assert_eq!(
            &invocation.args[..9],
            [
                "-jar",
                "/Applications/jsdoc-toolkit/jsrun.jar",
                "/Applications/jsdoc-toolkit/app/run.js",
                "-w",
                "-version",
                "170",
                "-v",
                "-a",
                "-t=/Applications/jsdoc-toolkit/templates/jsdoc",
            ]
        );

        let files = &invocation.args[9..invocation.args.len() - 1];
        assert_eq!(files[0], "chesterGL/docs.js");
        assert_eq!(&files[1..], SOURCES);
        assert_eq!(invocation.args.last().unwrap(), "-d=./html/docs");
    }

    #[test]
    fn test_tool_status() {
        assert!(ToolStatus::success().is_success());
        assert!(!ToolStatus::failure(1).is_success());
        assert!(!ToolStatus { code: None }.is_success());
    }

    #[cfg(unix)]
    #[test]
    fn test_process_runner_reports_exit_code() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut runner = ProcessRunner::new(dir.path());
        let invocation = ToolInvocation::new("sh", "sh").args(["-c", "exit 3"]);

        assert_eq!(runner.run(&invocation).unwrap(), ToolStatus::failure(3));
    }

    #[cfg(unix)]
    #[test]
    fn test_process_runner_missing_program() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut runner = ProcessRunner::new(dir.path());
        let invocation = ToolInvocation::new("closurebuilder", "/nonexistent/bin/python");

        match runner.run(&invocation).unwrap_err() {
            ChesterError::ToolLaunch { tool, .. } => assert_eq!(tool, "closurebuilder"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_process_runner_uses_work_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut runner = ProcessRunner::new(dir.path());
        let invocation = ToolInvocation::new("sh", "sh").args(["-c", "pwd > cwd.txt"]);

        assert!(runner.run(&invocation).unwrap().is_success());

        let reported = std::fs::read_to_string(dir.path().join("cwd.txt")).unwrap();
        assert_eq!(
            std::fs::canonicalize(reported.trim()).unwrap(),
            std::fs::canonicalize(dir.path()).unwrap()
        );
    }
}
