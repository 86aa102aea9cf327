//! Rust rendition of the generated `<name>_to_yaml` function.
//!
//! Mirrors `source` statement for statement so the output can be checked
//! without compiling any C.
use crate::inference::str::{quote, scalar};
use crate::inference::{Kind, TextStyle};
use crate::ir::{Layout, Member};

pub fn reconstruct(layout: &Layout) -> String {
    let mut out = String::new();
    for m in &layout.members {
        write_member(&mut out, m);
    }
    out
}

fn write_member(out: &mut String, m: &Member) {
    let key = &m.yaml_key;
    match &m.kind {
        Kind::Text(TextStyle::Plain) => {
            out.push_str(&format!("{key}: {}\n", m.text().unwrap_or_default()));
        }
        Kind::Text(TextStyle::Quoted) => {
            out.push_str(&format!("{key}: {}\n", quote(m.text().unwrap_or_default())));
        }
        Kind::Text(TextStyle::Block(chomp)) => {
            out.push_str(&format!("{key}: {}\n", chomp.indicator()));
            write_block(out, m.text().unwrap_or_default());
        }
        Kind::Flag => {
            let b = m.value.as_bool().unwrap_or_default();
            out.push_str(&format!("{key}: {b}\n"));
        }
        Kind::Unsigned(_) => {
            out.push_str(&format!("{key}: {}\n", m.value.as_u64().unwrap_or_default()));
        }
        Kind::Signed(_) => {
            out.push_str(&format!("{key}: {}\n", m.value.as_i64().unwrap_or_default()));
        }
        Kind::Float => {
            out.push_str(&format!("{key}: {}\n", format_g17(m.value.as_f64().unwrap_or_default())));
        }
        Kind::TextList(styles) => {
            let items = m
                .texts()
                .into_iter()
                .zip(styles)
                .map(|(t, style)| scalar(t, *style))
                .collect::<Vec<_>>();
            out.push_str(&format!("{key}: [{}]\n", items.join(", ")));
        }
        Kind::Complex => {
            out.push_str(&format!("{key}: {}\n", m.blob()));
        }
    }
}

fn write_block(out: &mut String, value: &str) {
    let mut rest = value;
    while !rest.is_empty() {
        let (line, tail) = match rest.find('\n') {
            Some(i) => (&rest[..i], Some(&rest[i + 1..])),
            None => (rest, None),
        };
        if line.is_empty() {
            out.push('\n');
        } else {
            out.push_str("  ");
            out.push_str(line);
            out.push('\n');
        }
        match tail {
            Some(t) => rest = t,
            None => break,
        }
    }
}

/// Same text as C's `printf("%.17g", f)` for finite values.
pub fn format_g17(f: f64) -> String {
    const P: i32 = 17;
    if f == 0.0 {
        return if f.is_sign_negative() { "-0".into() } else { "0".into() };
    }
    // exponent after rounding to P significant digits
    let sci = format!("{:.*e}", (P - 1) as usize, f);
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);

    if (-4..P).contains(&exp) {
        let fixed = format!("{:.*}", (P - 1 - exp) as usize, f);
        trim_fraction(&fixed).to_string()
    } else {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{sign}{:02}", trim_fraction(mantissa), exp.abs())
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}
