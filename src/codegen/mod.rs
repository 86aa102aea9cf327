//! C emission from the `Layout` IR.
//!
//! `header` writes the struct definition, static instance and getter;
//! `source` writes the YAML reconstruction logic; `preview` produces in Rust
//! the exact text the generated program prints. All three walk the same
//! members and branch on the same `Kind`.
pub mod header;
pub mod source;
pub mod preview;

use crate::document::Document;
use crate::ir::Layout;
use crate::lower::lower_to_ir;

pub const DEFAULT_INCLUDE_PREFIX: &str = "../inst-headers/";

#[derive(Debug, Clone)]
pub struct LogicOptions {
    /// prepended to `<name>.h` in the `#include` line
    pub include_prefix: String,
}

impl Default for LogicOptions {
    fn default() -> Self {
        Self { include_prefix: DEFAULT_INCLUDE_PREFIX.to_string() }
    }
}

pub struct Codegen {
    out: String,
}

impl Codegen {
    pub fn new() -> Self { Self { out: String::new() } }

    pub fn emit_header(&mut self, layout: &Layout) {
        header::emit(self, layout);
    }

    pub fn emit_source(&mut self, layout: &Layout, opts: &LogicOptions) {
        source::emit(self, layout, opts);
    }

    pub fn into_string(self) -> String { self.out }

    fn line(&mut self, s: impl AsRef<str>) {
        self.out.push_str(s.as_ref());
        self.out.push('\n');
    }

    fn blank(&mut self) {
        self.out.push('\n');
    }

    fn raw(&mut self, s: &str) {
        self.out.push_str(s);
    }
}

impl Default for Codegen {
    fn default() -> Self { Self::new() }
}

/// Text that is safe inside a `/* */` or `//` comment.
fn comment_text(s: &str) -> String {
    s.replace("*/", "* /").replace(['\n', '\r'], " ")
}

// ————————————————————————————————————————————————————————————————————————————
// FRONT API
// ————————————————————————————————————————————————————————————————————————————

pub fn generate_definition(doc: &Document, name: &str) -> String {
    let layout = lower_to_ir(doc, name);
    let mut cg = Codegen::new();
    cg.emit_header(&layout);
    cg.into_string()
}

pub fn generate_logic(doc: &Document, name: &str) -> String {
    generate_logic_with(doc, name, &LogicOptions::default())
}

pub fn generate_logic_with(doc: &Document, name: &str, opts: &LogicOptions) -> String {
    let layout = lower_to_ir(doc, name);
    let mut cg = Codegen::new();
    cg.emit_source(&layout, opts);
    cg.into_string()
}

/// The text the generated program's `main` prints for this document.
pub fn reconstruct(doc: &Document) -> String {
    preview::reconstruct(&lower_to_ir(doc, "preview"))
}
