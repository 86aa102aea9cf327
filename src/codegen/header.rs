use super::{comment_text, Codegen};
use crate::inference::Kind;
use crate::ir::{Layout, Member};
use crate::literal::{c_string, render};

pub(super) fn emit(cg: &mut Codegen, layout: &Layout) {
    let doc = comment_text(&layout.doc_name);

    cg.line(format!("#ifndef {}", layout.guard));
    cg.line(format!("#define {}", layout.guard));
    cg.blank();
    cg.line(format!("// C header for {doc}"));
    cg.blank();
    cg.line("#include <stdint.h>");
    cg.blank();

    cg.line(format!("/* Structure for {doc} instruction data */"));
    cg.line("typedef struct {");
    for m in &layout.members {
        cg.line(format!("    {};", m.declaration()));
    }
    cg.line(format!("}} {};", layout.struct_name));
    cg.blank();

    cg.line(format!("/* Data for {doc} instruction */"));
    cg.line(format!("static const {} {} = {{", layout.struct_name, layout.instance));
    for m in &layout.members {
        cg.line(format!("    .{} = {},", m.name, initializer(m)));
    }
    cg.line("};");
    cg.blank();

    cg.line(format!("/* Getter for {doc} */"));
    cg.line(format!(
        "static inline const {}* {}(void) {{",
        layout.struct_name, layout.getter
    ));
    cg.line(format!("    return &{};", layout.instance));
    cg.line("}");
    cg.blank();

    cg.line("/* Rebuilds the YAML text, defined in the .c file */");
    cg.line(format!("const char* {}(void);", layout.to_yaml));
    cg.blank();
    cg.line(format!("#endif /* {} */", layout.guard));
}

fn initializer(m: &Member) -> String {
    match &m.kind {
        Kind::TextList(_) => {
            let items = m.texts().into_iter().map(c_string).collect::<Vec<_>>();
            format!("{{{}}}", items.join(", "))
        }
        Kind::Complex => c_string(&m.blob()),
        _ => render(&m.value),
    }
}
