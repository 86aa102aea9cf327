//! Field classification shared by the definition and logic emitters.
//!
//! A field's value is inspected once and mapped to a closed set of kinds.
//! The kind decides both the declared C member type and how the generated
//! logic reads that member back out as YAML, so the two emitters can never
//! disagree about a field.
//!
//! Policy:
//! - text is always a `const char*`; its `TextStyle` only affects output.
//! - integers pick the narrowest of 32/64 bits, unsigned when non-negative.
//! - a list is a string array only when *every* element is text.
//! - everything else is serialized up front as flow-style YAML.
pub mod str;
pub mod num;

use serde_yaml::Value;

pub use num::{NumShape, Width};
pub use str::{Chomp, TextStyle};

// ------------------------------- Kinds ----------------------------------- //

#[derive(Clone, Debug, PartialEq)]
pub enum Kind {
    Text(TextStyle),
    Flag,
    Unsigned(Width),
    Signed(Width),
    Float,
    /// per-element style, length is the array size
    TextList(Vec<TextStyle>),
    /// pre-serialized flow text in a `<name>_data` member
    Complex,
}

impl Kind {
    pub fn is_complex(&self) -> bool { matches!(self, Kind::Complex) }

    /// C type spelling for the struct member, without array suffix.
    pub fn c_type(&self) -> &'static str {
        match self {
            Kind::Text(_) | Kind::TextList(_) | Kind::Complex => "const char*",
            Kind::Flag => "uint8_t",
            Kind::Unsigned(Width::W32) => "uint32_t",
            Kind::Unsigned(Width::W64) => "uint64_t",
            Kind::Signed(Width::W32) => "int32_t",
            Kind::Signed(Width::W64) => "int64_t",
            Kind::Float => "double",
        }
    }
}

// ------------------------------ Classify --------------------------------- //

pub fn classify(v: &Value) -> Kind {
    match v {
        Value::String(s) => Kind::Text(str::text_style(s)),
        Value::Bool(_) => Kind::Flag,
        Value::Number(n) => match num::num_shape(n) {
            NumShape::Unsigned(w) => Kind::Unsigned(w),
            NumShape::Signed(w) => Kind::Signed(w),
            NumShape::Float => Kind::Float,
            NumShape::NonFinite => Kind::Complex,
        },
        Value::Sequence(xs) => classify_sequence(xs),
        Value::Null | Value::Mapping(_) | Value::Tagged(_) => Kind::Complex,
    }
}

fn classify_sequence(xs: &[Value]) -> Kind {
    if xs.is_empty() {
        return Kind::Complex;
    }
    let styles = xs
        .iter()
        .map(|x| match x {
            Value::String(s) => Some(str::flow_style(s)),
            _ => None,
        })
        .collect::<Option<Vec<_>>>();
    match styles {
        Some(styles) => Kind::TextList(styles),
        None => Kind::Complex,
    }
}

// ------------------------------- Tests ------------------------------------ //
