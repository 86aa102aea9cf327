use super::{comment_text, Codegen, LogicOptions};
use crate::inference::{Kind, TextStyle, Width};
use crate::ir::{Layout, Member};
use crate::literal::c_string;

const BUFFER_HELPERS: &str = r#"typedef struct {
    char* data;
    size_t len;
    size_t cap;
    int failed;
} yaml_buffer_t;

static int yaml_reserve(yaml_buffer_t* buf, size_t extra) {
    size_t required = buf->len + extra + 1;
    if (buf->failed) {
        return 0;
    }
    if (required > buf->cap) {
        size_t cap = buf->cap ? buf->cap : 256;
        while (cap < required) {
            cap *= 2;
        }
        char* grown = realloc(buf->data, cap);
        if (grown == NULL) {
            buf->failed = 1;
            return 0;
        }
        buf->data = grown;
        buf->cap = cap;
    }
    return 1;
}

static void yaml_append(yaml_buffer_t* buf, const char* fmt, ...) {
    va_list args;
    va_start(args, fmt);
    int needed = vsnprintf(NULL, 0, fmt, args);
    va_end(args);
    if (needed < 0) {
        buf->failed = 1;
        return;
    }
    if (!yaml_reserve(buf, (size_t)needed)) {
        return;
    }
    va_start(args, fmt);
    vsnprintf(buf->data + buf->len, buf->cap - buf->len, fmt, args);
    va_end(args);
    buf->len += (size_t)needed;
}
"#;

const MULTILINE_HELPER: &str = r#"static void format_multiline_string(yaml_buffer_t* buf, const char* key,
                                    const char* indicator, const char* value) {
    const char* line = value;
    yaml_append(buf, "%s: %s\n", key, indicator);
    while (*line != '\0') {
        const char* end = strchr(line, '\n');
        int len = end != NULL ? (int)(end - line) : (int)strlen(line);
        if (len > 0) {
            yaml_append(buf, "  %.*s\n", len, line);
        } else {
            yaml_append(buf, "\n");
        }
        if (end == NULL) {
            break;
        }
        line = end + 1;
    }
}
"#;

const QUOTED_HELPER: &str = r#"static void format_quoted_string(yaml_buffer_t* buf, const char* value) {
    const unsigned char* c = (const unsigned char*)value;
    yaml_append(buf, "\"");
    for (; *c != '\0'; ++c) {
        switch (*c) {
        case '"':
            yaml_append(buf, "\\\"");
            break;
        case '\\':
            yaml_append(buf, "\\\\");
            break;
        case '\n':
            yaml_append(buf, "\\n");
            break;
        case '\t':
            yaml_append(buf, "\\t");
            break;
        case '\r':
            yaml_append(buf, "\\r");
            break;
        default:
            if (*c < 0x20 || *c == 0x7f) {
                yaml_append(buf, "\\x%02X", (unsigned)*c);
            } else if (c[0] == 0xc2 && c[1] >= 0x80 && c[1] <= 0x9f) {
                if (c[1] == 0x85) {
                    yaml_append(buf, "\\N");
                } else {
                    yaml_append(buf, "\\x%02X", (unsigned)c[1]);
                }
                ++c;
            } else if (c[0] == 0xe2 && c[1] == 0x80 && (c[2] == 0xa8 || c[2] == 0xa9)) {
                yaml_append(buf, c[2] == 0xa8 ? "\\L" : "\\P");
                c += 2;
            } else {
                yaml_append(buf, "%c", *c);
            }
        }
    }
    yaml_append(buf, "\"");
}
"#;

/// Which optional helpers the members actually call.
#[derive(Debug, Default)]
struct Helpers {
    multiline: bool,
    quoted: bool,
}

impl Helpers {
    fn for_layout(layout: &Layout) -> Self {
        let mut h = Self::default();
        for m in &layout.members {
            match &m.kind {
                Kind::Text(TextStyle::Block(_)) => h.multiline = true,
                Kind::Text(TextStyle::Quoted) => h.quoted = true,
                Kind::TextList(styles) if styles.contains(&TextStyle::Quoted) => h.quoted = true,
                _ => {}
            }
        }
        h
    }
}

pub(super) fn emit(cg: &mut Codegen, layout: &Layout, opts: &LogicOptions) {
    cg.line(format!("// C source for {}", comment_text(&layout.doc_name)));
    cg.blank();
    for header in ["inttypes.h", "stdarg.h", "stdio.h", "stdlib.h", "string.h"] {
        cg.line(format!("#include <{header}>"));
    }
    cg.line(format!("#include {}", c_string(&format!("{}{}", opts.include_prefix, layout.header_file))));
    cg.blank();

    cg.raw(BUFFER_HELPERS);
    let helpers = Helpers::for_layout(layout);
    if helpers.multiline {
        cg.blank();
        cg.raw(MULTILINE_HELPER);
    }
    if helpers.quoted {
        cg.blank();
        cg.raw(QUOTED_HELPER);
    }
    cg.blank();

    cg.line(format!("const char* {}(void) {{", layout.to_yaml));
    cg.line("    static yaml_buffer_t buf;");
    cg.line(format!("    const {}* data = {}();", layout.struct_name, layout.getter));
    cg.blank();
    cg.line("    buf.len = 0;");
    cg.line("    buf.failed = 0;");
    cg.line("    if (!yaml_reserve(&buf, 0)) {");
    cg.line("        return NULL;");
    cg.line("    }");
    cg.line("    buf.data[0] = '\\0';");
    for m in &layout.members {
        emit_member(cg, m);
    }
    cg.blank();
    cg.line("    return buf.failed ? NULL : buf.data;");
    cg.line("}");
    cg.blank();

    cg.line("int main(void) {");
    cg.line(format!("    const char* yaml = {}();", layout.to_yaml));
    cg.line("    if (yaml == NULL) {");
    cg.line("        return 1;");
    cg.line("    }");
    cg.line("    printf(\"%s\", yaml);");
    cg.line("    return 0;");
    cg.line("}");
}

fn emit_member(cg: &mut Codegen, m: &Member) {
    let key = c_string(&m.yaml_key);
    let name = &m.name;
    match &m.kind {
        Kind::Text(TextStyle::Plain) | Kind::Complex => {
            cg.line(format!(r#"    yaml_append(&buf, "%s: %s\n", {key}, data->{name});"#));
        }
        Kind::Text(TextStyle::Quoted) => {
            cg.line(format!(r#"    yaml_append(&buf, "%s: ", {key});"#));
            cg.line(format!("    format_quoted_string(&buf, data->{name});"));
            cg.line(r#"    yaml_append(&buf, "\n");"#);
        }
        Kind::Text(TextStyle::Block(chomp)) => {
            let indicator = c_string(chomp.indicator());
            cg.line(format!(
                "    format_multiline_string(&buf, {key}, {indicator}, data->{name});"
            ));
        }
        Kind::Flag => {
            cg.line(format!(
                r#"    yaml_append(&buf, "%s: %s\n", {key}, data->{name} ? "true" : "false");"#
            ));
        }
        Kind::Unsigned(w) | Kind::Signed(w) => {
            let macro_ = match (&m.kind, w) {
                (Kind::Unsigned(_), Width::W32) => "PRIu32",
                (Kind::Unsigned(_), Width::W64) => "PRIu64",
                (_, Width::W32) => "PRId32",
                (_, Width::W64) => "PRId64",
            };
            cg.line(format!(
                r#"    yaml_append(&buf, "%s: %" {macro_} "\n", {key}, data->{name});"#
            ));
        }
        Kind::Float => {
            cg.line(format!(r#"    yaml_append(&buf, "%s: %.17g\n", {key}, data->{name});"#));
        }
        Kind::TextList(styles) => {
            cg.line(format!(r#"    yaml_append(&buf, "%s: [", {key});"#));
            for (i, style) in styles.iter().enumerate() {
                if i > 0 {
                    cg.line(r#"    yaml_append(&buf, ", ");"#);
                }
                match style {
                    TextStyle::Plain => {
                        cg.line(format!(r#"    yaml_append(&buf, "%s", data->{name}[{i}]);"#));
                    }
                    _ => {
                        cg.line(format!("    format_quoted_string(&buf, data->{name}[{i}]);"));
                    }
                }
            }
            cg.line(r#"    yaml_append(&buf, "]\n");"#);
        }
    }
}
