// File: src/config.rs
//
// Driver configuration. Built once from the command line (plus an optional
// TOML file naming implementations and benchmarks) and immutable from then
// on; the pipeline never mutates configuration mid-sweep.

use crate::errors::BenchError;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// What the sweep does with its scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Run and report scores only.
    Measure,
    /// Run and persist the scores as the new reference baseline.
    CreateReference,
    /// Run and compare scores against the recorded baseline.
    CalculateOverhead,
}

/// A named implementation under test: a shell command template with a
/// `{benchmark}` placeholder for the benchmark path. Templates may also use
/// `{profile-sort}`, which expands to the profile-sort flag when requested
/// and to nothing otherwise.
#[derive(Debug, Clone, Deserialize)]
pub struct ImplementationSpec {
    pub name: String,
    pub command: String,
}

#[derive(Debug, Clone, Deserialize)]
struct ConfigFile {
    folder: Option<String>,
    benchmarks: Option<Vec<String>>,
    #[serde(default, rename = "implementation")]
    implementations: Vec<ImplementationSpec>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub mode: Mode,
    pub runs: usize,
    pub verbose: bool,
    /// Fully resolved command template; only `{benchmark}` remains to be
    /// substituted per run.
    pub command_template: String,
    pub implementation_name: String,
    pub benchmarks: Vec<String>,
    pub benchmark_folder: PathBuf,
    pub reference_path: PathBuf,
    pub results_path: PathBuf,
    pub overhead_path: PathBuf,
    pub overhead_difference_path: PathBuf,
}

const PROFILE_SORT_FLAG: &str = "-Xtruffle.profile.sort=true";

/// The classic shootout suite the driver was built around.
pub fn default_benchmarks() -> Vec<String> {
    [
        "binary-trees-z",
        "fannkuch-redux-z",
        "mandelbrot-z",
        "n-body-z",
        "pidigits-z",
        "richards-z",
        "spectral-norm-z",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

pub fn default_implementations() -> Vec<ImplementationSpec> {
    let truffle = "../../bin/jruby -J-server -J-Xmx2G -X+T";
    let specs = [
        ("ruby", "ruby {benchmark}.rb".to_string()),
        (
            "jruby",
            "../../bin/jruby -Xcompile.mode=JIT -Xcompile.invokedynamic=true {benchmark}.rb"
                .to_string(),
        ),
        ("simple-truffle", format!("{} {{benchmark}}.rb", truffle)),
        (
            "profile-calls",
            format!("{} -Xtruffle.profile.calls=true {{profile-sort}} {{benchmark}}.rb", truffle),
        ),
        (
            "profile-calls-builtins",
            format!(
                "{} -Xtruffle.profile.calls=true -Xtruffle.profile.builtin_calls=true {{profile-sort}} {{benchmark}}.rb",
                truffle
            ),
        ),
        (
            "profile-control-flow",
            format!(
                "{} -Xtruffle.profile.control_flow=true {{profile-sort}} {{benchmark}}.rb",
                truffle
            ),
        ),
        (
            "profile-variable-accesses",
            format!(
                "{} -Xtruffle.profile.variable_accesses=true {{profile-sort}} {{benchmark}}.rb",
                truffle
            ),
        ),
        (
            "profile-operations",
            format!(
                "{} -Xtruffle.profile.operations=true {{profile-sort}} {{benchmark}}.rb",
                truffle
            ),
        ),
        (
            "profile-collection-operations",
            format!(
                "{} -Xtruffle.profile.collection_operations=true {{profile-sort}} {{benchmark}}.rb",
                truffle
            ),
        ),
    ];

    specs
        .into_iter()
        .map(|(name, command)| ImplementationSpec { name: name.to_string(), command })
        .collect()
}

impl Config {
    /// Builds the configuration for a sweep. `config_path`, when given,
    /// points at a TOML file that can override the benchmark folder, the
    /// benchmark list, and the implementation templates.
    pub fn build(
        mode: Mode,
        runs: usize,
        implementation_name: &str,
        profile_sort: bool,
        verbose: bool,
        config_path: Option<&Path>,
    ) -> Result<Self, BenchError> {
        let file = match config_path {
            Some(path) => {
                let text = fs::read_to_string(path).map_err(|e| {
                    BenchError::io(format!("reading config file '{}'", path.display()), e)
                })?;
                Some(toml::from_str::<ConfigFile>(&text).map_err(|e| {
                    BenchError::config(format!("invalid config '{}': {}", path.display(), e))
                })?)
            }
            None => None,
        };

        let mut implementations = default_implementations();
        let mut benchmarks = default_benchmarks();
        let mut folder = "benchmarks_zippy".to_string();

        if let Some(file) = file {
            if !file.implementations.is_empty() {
                implementations = file.implementations;
            }
            if let Some(list) = file.benchmarks {
                benchmarks = list;
            }
            if let Some(f) = file.folder {
                folder = f;
            }
        }

        let spec = implementations
            .iter()
            .find(|spec| spec.name == implementation_name)
            .ok_or_else(|| {
                BenchError::config(format!(
                    "unknown implementation '{}' (known: {})",
                    implementation_name,
                    implementations
                        .iter()
                        .map(|s| s.name.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                ))
            })?;

        let sort_flag = if profile_sort { PROFILE_SORT_FLAG } else { "" };
        let command_template = spec
            .command
            .replace("{profile-sort}", sort_flag)
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");

        Ok(Self {
            mode,
            runs,
            verbose,
            command_template,
            implementation_name: spec.name.clone(),
            benchmarks,
            benchmark_folder: PathBuf::from(folder),
            reference_path: PathBuf::from("benchmark.reference"),
            results_path: PathBuf::from("benchmark.results"),
            overhead_path: PathBuf::from("benchmark.overhead"),
            overhead_difference_path: PathBuf::from("benchmark.overhead_difference"),
        })
    }

    /// Benchmark path handed to the command template, without extension; the
    /// template supplies the extension.
    pub fn benchmark_path(&self, benchmark_name: &str) -> String {
        self.benchmark_folder.join(benchmark_name).to_string_lossy().into_owned()
    }

    /// Whether the template's executable can be found, for a startup
    /// warning. Never fatal: the run itself will surface the failure as a
    /// zero score.
    pub fn executable_found(&self) -> bool {
        let program = match self.command_template.split_whitespace().next() {
            Some(p) => p,
            None => return false,
        };

        if program.contains('/') {
            return Path::new(program).exists();
        }

        match env::var_os("PATH") {
            Some(paths) => env::split_paths(&paths).any(|dir| dir.join(program).is_file()),
            None => false,
        }
    }
}
