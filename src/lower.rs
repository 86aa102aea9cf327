use crate::document::Document;
use crate::ident::{sanitize, sanitize_lower, MemberNames};
use crate::inference::str::{needs_quotes, quote, Context};
use crate::inference::classify;
use crate::ir::{Layout, Member};

pub fn lower_to_ir(doc: &Document, name: &str) -> Layout {
    let ident = sanitize_lower(name);
    let mut names = MemberNames::new();

    let members = doc
        .iter()
        .map(|(key, value)| {
            let kind = classify(value);
            let suffix = if kind.is_complex() { "_data" } else { "" };
            Member {
                yaml_key: yaml_key(key),
                name: names.claim(key, suffix),
                kind,
                value: value.clone(),
            }
        })
        .collect();

    Layout {
        doc_name: name.to_string(),
        guard: format!("{}_H", sanitize(name)),
        struct_name: format!("{ident}_t"),
        instance: format!("{ident}_data"),
        getter: format!("get_{ident}_data"),
        to_yaml: format!("{ident}_to_yaml"),
        header_file: format!("{}.h", name.to_lowercase()),
        members,
    }
}

fn yaml_key(key: &str) -> String {
    if needs_quotes(key, Context::Block) { quote(key) } else { key.to_string() }
}
