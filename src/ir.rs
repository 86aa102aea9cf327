// Strongly-typed IR for codegen. Naming and classification are settled here;
// the emitters only format.
use serde_yaml::Value;

use crate::inference::Kind;

#[derive(Debug, Clone)]
pub struct Layout {
    /// document name as given, used in comments
    pub doc_name: String,
    /// `ADD_H`
    pub guard: String,
    /// `add_t`
    pub struct_name: String,
    /// `add_data`
    pub instance: String,
    /// `get_add_data`
    pub getter: String,
    /// `add_to_yaml`
    pub to_yaml: String,
    /// `add.h`, the file name the logic includes
    pub header_file: String,
    pub members: Vec<Member>, // document field order
}

#[derive(Debug, Clone)]
pub struct Member {
    /// field name as written back in YAML output
    pub yaml_key: String,
    /// C member name, unique within the struct
    pub name: String,
    pub kind: Kind,
    pub value: Value,
}

impl Member {
    /// `const char* flags[2]`, `uint32_t width`, ...
    pub fn declaration(&self) -> String {
        match &self.kind {
            Kind::TextList(styles) => format!("{} {}[{}]", self.kind.c_type(), self.name, styles.len()),
            kind => format!("{} {}", kind.c_type(), self.name),
        }
    }

    /// Flow-style payload of a complex member.
    pub fn blob(&self) -> String {
        crate::flow::to_flow(&self.value)
    }

    pub fn text(&self) -> Option<&str> {
        self.value.as_str()
    }

    pub fn texts(&self) -> Vec<&str> {
        match &self.value {
            Value::Sequence(xs) => xs.iter().filter_map(Value::as_str).collect(),
            _ => Vec::new(),
        }
    }
}
