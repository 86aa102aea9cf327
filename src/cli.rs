//! CLI: fetch | generate | preview | categories
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use crate::codegen::{reconstruct, LogicOptions, DEFAULT_INCLUDE_PREFIX};
use crate::config::{self, Config, OutputDirs, RemoteConfig};
use crate::document::Document;
use crate::fetch::{GithubSource, Source};
use crate::pipeline::{emit_artifacts, Fetcher};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// turn instruction YAML documents into C headers and YAML-reconstruction sources
#[derive(Parser, Debug)]
#[command(name = "inst-codegen", version)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,

    /// debug-level logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// only warnings and errors
    #[arg(long, short, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// download documents and generate C for each one found
    Fetch(FetchCmd),
    /// generate C from YAML files on disk
    Generate(GenerateCmd),
    /// print the YAML the generated program would print
    Preview(PreviewCmd),
    /// list the remote category folders
    Categories(RemoteSettings),
}

#[derive(Args, Debug, Clone)]
struct RemoteSettings {
    /// directory-listing endpoint for category discovery
    #[arg(long, env = "INST_CODEGEN_LISTING_URL", default_value = config::DEFAULT_LISTING_URL)]
    listing_url: String,

    /// base URL of raw documents (`<base><category>/<name>.yaml`)
    #[arg(long, env = "INST_CODEGEN_RAW_BASE_URL", default_value = config::DEFAULT_RAW_BASE_URL)]
    raw_base_url: String,

    /// per-request timeout in seconds
    #[arg(long, env = "INST_CODEGEN_TIMEOUT_SECS", default_value_t = config::DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,
}

#[derive(Args, Debug, Clone)]
struct FetchCmd {
    #[command(flatten)]
    remote: RemoteSettings,

    /// where raw documents are stored, grouped by category
    #[arg(long, env = "INST_CODEGEN_RAW_DIR", default_value = "inst")]
    raw_dir: PathBuf,

    #[arg(long, env = "INST_CODEGEN_HEADER_DIR", default_value = "inst-headers")]
    header_dir: PathBuf,

    #[arg(long, env = "INST_CODEGEN_SOURCE_DIR", default_value = "inst-src")]
    source_dir: PathBuf,

    /// prefix of the header path in the generated `#include`
    #[arg(long, default_value = DEFAULT_INCLUDE_PREFIX)]
    include_prefix: String,

    /// document names, with or without `.yaml` (default: a small RV32I/Zbb set)
    names: Vec<String>,
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// One or more inputs. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(Args, Debug, Clone)]
struct GenerateCmd {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output directory for both `.h` and `.c` files
    #[arg(short, long, default_value = ".")]
    out: PathBuf,

    /// prefix of the header path in the generated `#include`
    #[arg(long, default_value = "")]
    include_prefix: String,

    /// override the instruction name (single input only)
    #[arg(long)]
    name: Option<String>,
}

#[derive(Args, Debug, Clone)]
struct PreviewCmd {
    #[command(flatten)]
    input_settings: InputSettings,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl RemoteSettings {
    fn to_config(&self) -> RemoteConfig {
        RemoteConfig {
            listing_url: self.listing_url.clone(),
            raw_base_url: self.raw_base_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            ..RemoteConfig::default()
        }
    }
}

impl FetchCmd {
    fn to_config(&self) -> Config {
        Config {
            remote: self.remote.to_config(),
            output: OutputDirs {
                raw: self.raw_dir.clone(),
                headers: self.header_dir.clone(),
                sources: self.source_dir.clone(),
            },
            logic: LogicOptions { include_prefix: self.include_prefix.clone() },
        }
    }

    fn names(&self) -> Vec<String> {
        if self.names.is_empty() {
            config::DEFAULT_DOCUMENTS.iter().map(|s| s.to_string()).collect()
        } else {
            self.names.clone()
        }
    }
}

impl InputSettings {
    /// Parse every input; unreadable or malformed files abort the command.
    fn load_documents(&self) -> Result<Vec<(PathBuf, Document)>> {
        let source_paths = resolve_file_path_patterns(&self.input)
            .context("failed to resolve input file paths")?;
        let mut out = Vec::with_capacity(source_paths.len());
        for source_path in source_paths {
            let source = std::fs::read_to_string(&source_path).map_err(|source| {
                crate::error::Error::Read { path: source_path.clone(), source }
            })?;
            let doc = Document::parse(&source_path.to_string_lossy(), &source)?;
            out.push((source_path, doc));
        }
        Ok(out)
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    /// `Ok(false)` when the command ran but did not fully succeed.
    pub fn run(&self) -> Result<bool> {
        match &self.cmd {
            Command::Fetch(target) => {
                let config = target.to_config();
                let source = GithubSource::new(config.remote)?;
                let fetcher = Fetcher::new(source, config.output, config.logic);
                let summary = fetcher.run(target.names());
                println!("\n{}", "Overall...".bold());
                print!("{summary}");
                Ok(summary.all_found())
            }
            Command::Generate(target) => {
                let docs = target.input_settings.load_documents()?;
                if target.name.is_some() && docs.len() > 1 {
                    bail!("--name needs exactly one input, got {}", docs.len());
                }
                let logic = LogicOptions { include_prefix: target.include_prefix.clone() };
                let dirs = OutputDirs {
                    raw: target.out.clone(),
                    headers: target.out.clone(),
                    sources: target.out.clone(),
                };
                for (path, doc) in &docs {
                    let name = match &target.name {
                        Some(name) => name.clone(),
                        None => name_from_path(path)?,
                    };
                    let generated = emit_artifacts(doc, &name, &dirs, &logic)?;
                    info!(input = %path.display(), "generated");
                    println!("{} {}", "Generated C header:".green(), generated.header.display());
                    println!("{} {}", "Generated C source:".green(), generated.source.display());
                }
                Ok(true)
            }
            Command::Preview(target) => {
                for (_, doc) in target.input_settings.load_documents()? {
                    print!("{}", reconstruct(&doc));
                }
                Ok(true)
            }
            Command::Categories(remote) => {
                let source = GithubSource::new(remote.to_config())?;
                let categories = source.list_categories();
                for category in &categories {
                    println!("{category}");
                }
                Ok(!categories.is_empty())
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

/// `spec/lw.yaml` → `lw`
fn name_from_path(path: &Path) -> Result<String> {
    let file = path
        .file_name()
        .and_then(|f| f.to_str())
        .with_context(|| format!("input path has no usable file name: {}", path.display()))?;
    Ok(config::instruction_name(file).to_string())
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{' ))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern)? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_comes_from_file_stem() {
        assert_eq!(name_from_path(Path::new("inst/I/lw.yaml")).unwrap(), "lw");
        assert_eq!(name_from_path(Path::new("generated_lw.yaml")).unwrap(), "generated_lw");
        assert_eq!(name_from_path(Path::new("notes")).unwrap(), "notes");
    }

    #[test]
    fn glob_patterns_expand_and_literals_pass_through() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.yaml"), "x: 1\n").unwrap();
        std::fs::write(dir.path().join("b.yaml"), "x: 2\n").unwrap();
        let pattern = format!("{}/*.yaml", dir.path().display());
        let mut found = resolve_file_path_patterns([pattern.as_str(), "literal.yaml"]).unwrap();
        found.sort();
        assert_eq!(found.len(), 3);
        assert!(found.contains(&PathBuf::from("literal.yaml")));

        let empty = format!("{}/*.json", dir.path().display());
        assert!(resolve_file_path_patterns([empty.as_str()]).is_err());
    }

    #[test]
    fn cli_parses_fetch_defaults() {
        let cli = CommandLineInterface::try_parse_from(["inst-codegen", "fetch"]).unwrap();
        let Command::Fetch(fetch) = cli.cmd else { panic!("expected fetch") };
        assert_eq!(fetch.names(), ["add", "sub", "andn", "xor", "and", "lw", "sw"]);
        assert_eq!(fetch.include_prefix, DEFAULT_INCLUDE_PREFIX);
    }

    #[test]
    fn generate_writes_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("generated_lw.yaml");
        std::fs::write(&input, "name: lw\ndescription: |\n  Load word\n").unwrap();
        let out = dir.path().join("out");
        let cli = CommandLineInterface::try_parse_from([
            "inst-codegen",
            "generate",
            "-i",
            input.to_str().unwrap(),
            "--out",
            out.to_str().unwrap(),
        ])
        .unwrap();
        assert!(cli.run().unwrap());
        let source = std::fs::read_to_string(out.join("generated_lw.c")).unwrap();
        assert!(source.contains("#include \"generated_lw.h\""));
        assert!(out.join("generated_lw.h").exists());
    }
}
