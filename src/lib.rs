//! Instruction YAML → C struct definitions and YAML reconstruction logic.
pub mod error;
pub mod ident;
pub mod document;
pub mod inference;
pub mod flow;
pub mod literal;
pub mod ir;
pub mod lower;
pub mod codegen;
pub mod config;
pub mod fetch;
pub mod pipeline;
pub mod cli;

pub use codegen::{generate_definition, generate_logic, generate_logic_with, reconstruct, LogicOptions};
pub use document::Document;
pub use error::{Error, Result};
