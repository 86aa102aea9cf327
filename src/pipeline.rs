//! Fetch → parse → generate → write, one document at a time.
use std::fmt;
use std::path::{Path, PathBuf};

use colored::Colorize;
use tracing::{info, warn};

use crate::codegen::{generate_definition, generate_logic_with, LogicOptions};
use crate::config::{document_file_name, instruction_name, OutputDirs};
use crate::document::Document;
use crate::error::{Error, Result};
use crate::fetch::Source;

/// Paths written for one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub header: PathBuf,
    pub source: PathBuf,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub requested: Vec<String>,
    pub found: Vec<String>,
    pub missing: Vec<String>,
}

impl Summary {
    pub fn all_found(&self) -> bool { self.missing.is_empty() }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts = format!("Found {}/{} files", self.found.len(), self.requested.len());
        if self.all_found() {
            writeln!(f, "{}", counts.green())
        } else {
            writeln!(f, "{}", counts.yellow())?;
            writeln!(f, "{} {}", "Missing files:".red(), self.missing.join(", "))
        }
    }
}

pub fn write_file(path: &Path, contents: &str) -> Result<()> {
    let write = || -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)
    };
    write().map_err(|source| Error::Write { path: path.to_path_buf(), source })
}

/// Generate and write both artifacts for an already parsed document. Both
/// texts exist before either file is touched; a header whose source could
/// not be written is removed again.
pub fn emit_artifacts(
    doc: &Document,
    name: &str,
    dirs: &OutputDirs,
    logic: &LogicOptions,
) -> Result<Generated> {
    let definition = generate_definition(doc, name);
    let logic_text = generate_logic_with(doc, name, logic);
    let header = dirs.header(name);
    let source = dirs.source(name);
    write_file(&header, &definition)?;
    if let Err(error) = write_file(&source, &logic_text) {
        if let Err(cleanup) = std::fs::remove_file(&header) {
            warn!(path = %header.display(), error = %cleanup, "could not remove orphaned header");
        }
        return Err(error);
    }
    Ok(Generated { header, source })
}

pub struct Fetcher<S> {
    source: S,
    output: OutputDirs,
    logic: LogicOptions,
}

impl<S: Source> Fetcher<S> {
    pub fn new(source: S, output: OutputDirs, logic: LogicOptions) -> Self {
        Self { source, output, logic }
    }

    pub fn source(&self) -> &S { &self.source }

    /// Process every requested name; failures only mark a name missing.
    pub fn run<I>(&self, names: I) -> Summary
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let categories = self.source.list_categories();
        info!(count = categories.len(), "discovered categories");

        let mut summary = Summary::default();
        for name in names {
            let file = document_file_name(name.as_ref());
            summary.requested.push(file.clone());
            match self.process(&categories, &file) {
                Some(generated) => {
                    info!(document = %file, header = %generated.header.display(), source = %generated.source.display(), "generated");
                    summary.found.push(file);
                }
                None => {
                    warn!(document = %file, "could not find document in any category");
                    summary.missing.push(file);
                }
            }
        }
        summary
    }

    fn process(&self, categories: &[String], file: &str) -> Option<Generated> {
        for category in categories {
            if !self.source.probe(category, file) {
                continue;
            }
            let raw = match self.source.fetch(category, file) {
                Ok(raw) => raw,
                Err(error) if error.is_transport() => {
                    warn!(document = %file, category = %category, %error, "download failed");
                    continue;
                }
                Err(error) => {
                    warn!(document = %file, category = %category, %error, "skipping document");
                    return None;
                }
            };
            return match self.store_and_generate(category, file, &raw) {
                Ok(generated) => Some(generated),
                Err(error) => {
                    warn!(document = %file, category = %category, %error, "skipping document");
                    None
                }
            };
        }
        None
    }

    fn store_and_generate(&self, category: &str, file: &str, raw: &str) -> Result<Generated> {
        write_file(&self.output.raw_document(category, file), raw)?;
        let doc = Document::parse(file, raw)?;
        emit_artifacts(&doc, instruction_name(file), &self.output, &self.logic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// In-memory source: `docs` maps (category, file) to the body, or to an
    /// error status when the download should fail.
    struct FakeSource {
        categories: Vec<String>,
        docs: Vec<(&'static str, &'static str, std::result::Result<&'static str, u16>)>,
        fetched: RefCell<Vec<String>>,
    }

    impl FakeSource {
        fn new(categories: &[&str]) -> Self {
            Self {
                categories: categories.iter().map(|c| c.to_string()).collect(),
                docs: Vec::new(),
                fetched: RefCell::new(Vec::new()),
            }
        }

        fn with(mut self, category: &'static str, file: &'static str, body: std::result::Result<&'static str, u16>) -> Self {
            self.docs.push((category, file, body));
            self
        }
    }

    impl Source for FakeSource {
        fn list_categories(&self) -> Vec<String> { self.categories.clone() }

        fn probe(&self, category: &str, document: &str) -> bool {
            self.docs.iter().any(|(c, d, _)| *c == category && *d == document)
        }

        fn fetch(&self, category: &str, document: &str) -> Result<String> {
            self.fetched.borrow_mut().push(format!("{category}/{document}"));
            let (_, _, body) = self
                .docs
                .iter()
                .find(|(c, d, _)| *c == category && *d == document)
                .expect("probe said present");
            match body {
                Ok(text) => Ok(text.to_string()),
                Err(status) => Err(Error::Status { url: format!("{category}/{document}"), status: *status }),
            }
        }
    }

    #[test]
    fn writes_raw_header_and_source() {
        let dir = tempfile::tempdir().unwrap();
        let source = FakeSource::new(&["B", "I"]).with("I", "add.yaml", Ok("name: add\nflags: [R, W]\n"));
        let fetcher = Fetcher::new(source, OutputDirs::under(dir.path()), LogicOptions::default());

        let summary = fetcher.run(["add"]);
        assert_eq!(summary.found, ["add.yaml"]);
        assert!(summary.all_found());

        let raw = std::fs::read_to_string(dir.path().join("inst/I/add.yaml")).unwrap();
        assert_eq!(raw, "name: add\nflags: [R, W]\n");
        let header = std::fs::read_to_string(dir.path().join("inst-headers/add.h")).unwrap();
        assert!(header.contains("const char* flags[2];"));
        let logic = std::fs::read_to_string(dir.path().join("inst-src/add.c")).unwrap();
        assert!(logic.contains("#include \"../inst-headers/add.h\""));
    }

    #[test]
    fn missing_documents_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let source = FakeSource::new(&["I"]).with("I", "add.yaml", Ok("name: add\n"));
        let fetcher = Fetcher::new(source, OutputDirs::under(dir.path()), LogicOptions::default());

        let summary = fetcher.run(["add.yaml", "mul.yaml"]);
        assert_eq!(summary.requested, ["add.yaml", "mul.yaml"]);
        assert_eq!(summary.found, ["add.yaml"]);
        assert_eq!(summary.missing, ["mul.yaml"]);
        let shown = summary.to_string();
        assert!(shown.contains("Found 1/2 files"), "{shown}");
        assert!(shown.contains("mul.yaml"), "{shown}");
    }

    #[test]
    fn no_categories_means_no_downloads() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = Fetcher::new(FakeSource::new(&[]), OutputDirs::under(dir.path()), LogicOptions::default());
        let summary = fetcher.run(["add"]);
        assert_eq!(summary.missing, ["add.yaml"]);
        assert!(fetcher.source().fetched.borrow().is_empty());
    }

    #[test]
    fn failed_download_falls_through_to_next_category() {
        let dir = tempfile::tempdir().unwrap();
        let source = FakeSource::new(&["I", "Zbb"])
            .with("I", "andn.yaml", Err(503))
            .with("Zbb", "andn.yaml", Ok("name: andn\n"));
        let fetcher = Fetcher::new(source, OutputDirs::under(dir.path()), LogicOptions::default());

        let summary = fetcher.run(["andn"]);
        assert_eq!(summary.found, ["andn.yaml"]);
        assert_eq!(*fetcher.source().fetched.borrow(), ["I/andn.yaml", "Zbb/andn.yaml"]);
        assert!(dir.path().join("inst/Zbb/andn.yaml").exists());
    }

    #[test]
    fn parse_error_skips_the_document() {
        let dir = tempfile::tempdir().unwrap();
        let source = FakeSource::new(&["I", "M"])
            .with("I", "bad.yaml", Ok("name: [unclosed\n"))
            .with("M", "bad.yaml", Ok("name: fine\n"));
        let fetcher = Fetcher::new(source, OutputDirs::under(dir.path()), LogicOptions::default());

        let summary = fetcher.run(["bad"]);
        assert_eq!(summary.missing, ["bad.yaml"]);
        assert_eq!(*fetcher.source().fetched.borrow(), ["I/bad.yaml"]);
        assert!(!dir.path().join("inst-headers/bad.h").exists());
    }

    #[test]
    fn failed_source_write_leaves_no_header_behind() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let dirs = OutputDirs {
            raw: dir.path().join("raw"),
            headers: dir.path().join("headers"),
            sources: blocker.join("src"),
        };
        let doc = Document::parse("add", "name: add\n").unwrap();

        let err = emit_artifacts(&doc, "add", &dirs, &LogicOptions::default()).unwrap_err();
        assert!(matches!(err, Error::Write { .. }));
        assert!(!dirs.header("add").exists());
    }

    #[test]
    fn unwritable_destination_is_a_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "").unwrap();
        let err = write_file(&blocker.join("out.h"), "x").unwrap_err();
        assert!(matches!(err, Error::Write { .. }));
    }
}
