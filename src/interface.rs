//! Renders the C header and SWIG interface file for the exported symbols.

use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;
use tracing::info;

use crate::config::{ArrayType, BindingConfig};
use crate::Result;

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub contents: String,
}

const FUNCTION_PROTOTYPES: &str = "\
/* Add two integers */
int add(int a, int b);

/* Multiply two doubles */
double multiply(double a, double b);

/* Compute factorial of n, or -1 if n is negative */
int factorial(int n);

/* Compute nth Fibonacci number, 0 for n <= 0 */
int fibonacci(int n);
";

pub fn generate_header(config: &BindingConfig) -> String {
    let guard = config.include_guard();
    let mut out = String::new();

    let _ = writeln!(
        out,
        "/* {} - generated by ffimath {} */",
        config.header_name,
        crate::version()
    );
    let _ = writeln!(out, "#ifndef {guard}");
    let _ = writeln!(out, "#define {guard}");
    out.push('\n');

    let arrays = config.enabled_array_types();
    if !arrays.is_empty() {
        out.push_str("#include <stddef.h>\n\n");
    }

    out.push_str(FUNCTION_PROTOTYPES);

    for &array in arrays {
        out.push('\n');
        write_array_prototypes(&mut out, array);
    }

    out.push('\n');
    let _ = writeln!(out, "#endif /* {guard} */");
    out
}

fn write_array_prototypes(out: &mut String, array: ArrayType) {
    let ctype = array.c_type();
    let prefix = array.symbol_prefix();
    // Opaque handle type; distinct from the class SWIG's %array_class emits.
    let handle = format!("{prefix}_t");

    let _ = writeln!(out, "/* {}: fixed-length {ctype} buffer */", array.class_name());
    let _ = writeln!(out, "typedef struct {handle} {handle};");
    let _ = writeln!(out, "/* Returns NULL on allocation failure */");
    let _ = writeln!(out, "{handle} *{prefix}_new(size_t len);");
    let _ = writeln!(out, "void {prefix}_free({handle} *array);");
    let _ = writeln!(out, "size_t {prefix}_len(const {handle} *array);");
    let _ = writeln!(
        out,
        "{ctype} {prefix}_getitem(const {handle} *array, size_t index);"
    );
    let _ = writeln!(
        out,
        "int {prefix}_setitem({handle} *array, size_t index, {ctype} value);"
    );
    let _ = writeln!(out, "{ctype} *{prefix}_cast({handle} *array);");
}

pub fn generate_swig_interface(config: &BindingConfig) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "/* {} */", config.interface_name());
    let _ = writeln!(out, "%module {}", config.module_name);
    out.push('\n');
    out.push_str("%{\n");
    let _ = writeln!(out, "#include \"{}\"", config.header_name);
    out.push_str("%}\n\n");

    let arrays = config.enabled_array_types();
    if !arrays.is_empty() {
        out.push_str("%include \"carrays.i\"\n");
        for array in arrays {
            let _ = writeln!(
                out,
                "%array_class({}, {});",
                array.c_type(),
                array.class_name()
            );
        }
        out.push('\n');
    }

    let _ = writeln!(out, "%include \"{}\"", config.header_name);
    out
}

/// Writes the header and interface file into `config.output_dir`.
pub fn write_bindings(config: &BindingConfig) -> Result<Vec<GeneratedFile>> {
    config.validate()?;
    fs::create_dir_all(&config.output_dir)?;

    let files = vec![
        GeneratedFile {
            path: config.output_dir.join(&config.header_name),
            contents: generate_header(config),
        },
        GeneratedFile {
            path: config.output_dir.join(config.interface_name()),
            contents: generate_swig_interface(config),
        },
    ];

    for file in &files {
        fs::write(&file.path, &file.contents)?;
        info!(path = %file.path.display(), "wrote binding file");
    }

    Ok(files)
}
