//! Runtime settings. Defaults point at the RISC-V unified database; every
//! field can be overridden from the command line or the environment.
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_LISTING_URL: &str =
    "https://api.github.com/repos/riscv-software-src/riscv-unified-db/contents/spec/std/isa/inst";
pub const DEFAULT_RAW_BASE_URL: &str =
    "https://raw.githubusercontent.com/riscv-software-src/riscv-unified-db/main/spec/std/isa/inst/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Documents fetched when none are named.
pub const DEFAULT_DOCUMENTS: &[&str] = &["add", "sub", "andn", "xor", "and", "lw", "sw"];

pub const DOCUMENT_EXTENSION: &str = ".yaml";

#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// directory-listing endpoint whose `dir` entries are the categories
    pub listing_url: String,
    /// `<raw_base_url><category>/<file>` is the raw document
    pub raw_base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            listing_url: DEFAULT_LISTING_URL.to_string(),
            raw_base_url: DEFAULT_RAW_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OutputDirs {
    /// raw documents, grouped by category
    pub raw: PathBuf,
    pub headers: PathBuf,
    pub sources: PathBuf,
}

impl Default for OutputDirs {
    fn default() -> Self {
        Self {
            raw: PathBuf::from("inst"),
            headers: PathBuf::from("inst-headers"),
            sources: PathBuf::from("inst-src"),
        }
    }
}

impl OutputDirs {
    /// Everything under one root, e.g. for tests.
    pub fn under(root: &Path) -> Self {
        let d = Self::default();
        Self {
            raw: root.join(d.raw),
            headers: root.join(d.headers),
            sources: root.join(d.sources),
        }
    }

    pub fn raw_document(&self, category: &str, file: &str) -> PathBuf {
        self.raw.join(category).join(file)
    }

    pub fn header(&self, name: &str) -> PathBuf {
        self.headers.join(format!("{}.h", name.to_lowercase()))
    }

    pub fn source(&self, name: &str) -> PathBuf {
        self.sources.join(format!("{}.c", name.to_lowercase()))
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub remote: RemoteConfig,
    pub output: OutputDirs,
    pub logic: crate::codegen::LogicOptions,
}

/// `add` and `add.yaml` both name the file `add.yaml` and the instruction `add`.
pub fn document_file_name(name: &str) -> String {
    if name.ends_with(DOCUMENT_EXTENSION) {
        name.to_string()
    } else {
        format!("{name}{DOCUMENT_EXTENSION}")
    }
}

pub fn instruction_name(name: &str) -> &str {
    name.strip_suffix(DOCUMENT_EXTENSION).unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_with_and_without_extension() {
        assert_eq!(document_file_name("add"), "add.yaml");
        assert_eq!(document_file_name("add.yaml"), "add.yaml");
        assert_eq!(instruction_name("add.yaml"), "add");
        assert_eq!(instruction_name("c.addi"), "c.addi");
    }

    #[test]
    fn output_paths_use_lowercase_names() {
        let dirs = OutputDirs::under(Path::new("/tmp/out"));
        assert_eq!(dirs.header("LW"), Path::new("/tmp/out/inst-headers/lw.h"));
        assert_eq!(dirs.source("LW"), Path::new("/tmp/out/inst-src/lw.c"));
        assert_eq!(dirs.raw_document("I", "lw.yaml"), Path::new("/tmp/out/inst/I/lw.yaml"));
    }
}
