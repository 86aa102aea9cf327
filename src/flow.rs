//! Single-line YAML flow serialization for fields too complex to type.
use serde_yaml::Value;

use crate::inference::str::{needs_quotes, quote, Context};

pub fn to_flow(value: &Value) -> String {
    let mut out = String::new();
    write_flow(&mut out, value);
    out
}

fn write_flow(out: &mut String, value: &Value) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => write_str(out, s),
        Value::Sequence(xs) => {
            out.push('[');
            for (i, x) in xs.iter().enumerate() {
                if i > 0 { out.push_str(", "); }
                write_flow(out, x);
            }
            out.push(']');
        }
        Value::Mapping(map) => {
            out.push('{');
            for (i, (k, v)) in map.iter().enumerate() {
                if i > 0 { out.push_str(", "); }
                write_flow(out, k);
                out.push_str(": ");
                write_flow(out, v);
            }
            out.push('}');
        }
        Value::Tagged(tagged) => {
            out.push_str(&tagged.tag.to_string());
            out.push(' ');
            write_flow(out, &tagged.value);
        }
    }
}

fn write_str(out: &mut String, s: &str) {
    if needs_quotes(s, Context::Flow) {
        out.push_str(&quote(s));
    } else {
        out.push_str(s);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(src: &str) -> Value {
        serde_yaml::from_str(src).unwrap()
    }

    #[test]
    fn encoding_block_keeps_key_order() {
        let v = yaml(
            "match: -----------------010-----0000011\n\
             variables:\n\
             - name: imm\n  location: 31-20\n\
             - name: xs1\n  location: 19-15\n",
        );
        assert_eq!(
            to_flow(&v),
            r#"{match: "-----------------010-----0000011", variables: [{name: imm, location: 31-20}, {name: xs1, location: 19-15}]}"#
        );
    }

    #[test]
    fn scalars_that_would_change_type_are_quoted() {
        let v = yaml("{match: '0110011', flag: 'true', n: 3, b: false, z: ~}");
        assert_eq!(to_flow(&v), r#"{match: "0110011", flag: "true", n: 3, b: false, z: null}"#);
    }

    #[test]
    fn empty_collections() {
        assert_eq!(to_flow(&yaml("[]")), "[]");
        assert_eq!(to_flow(&yaml("{}")), "{}");
    }

    #[test]
    fn tagged_values_keep_their_tag() {
        assert_eq!(to_flow(&yaml("!expr x + 1")), "!expr x + 1");
    }

    #[test]
    fn flow_text_parses_back_to_the_same_value() {
        let v = yaml("{a: [1, 'two, three', {b: 'c: d'}], e: \"multi\\nline\"}");
        let back: Value = serde_yaml::from_str(&to_flow(&v)).unwrap();
        assert_eq!(back, v);
    }
}
