//! Module assembly into header and source documents.
//!
//! The assembler gathers every record and enum declared in one schema
//! module into a [`ModuleUnit`] (content), then renders the unit into the
//! two output documents (formatting). Keeping the steps separate lets
//! golden tests target content independent of cosmetic layout.

use crate::cpp::enums::EnumEmitter;
use crate::cpp::records::RecordEmitter;
use crate::cpp::types::TypeResolver;
use crate::error::CodegenError;
use crate::generator::{GeneratedModule, GeneratorOptions};
use ironbind_schema::{ModuleDecl, ModulePath};
use std::collections::BTreeSet;

/// Assembled content for one schema module.
#[derive(Debug)]
pub struct ModuleUnit {
    /// Dotted module path.
    pub module_name: String,
    /// C++ namespace (all but the leaf path segment).
    pub namespace_path: String,
    /// Deduplicated includes: system includes lexically sorted, then
    /// local includes lexically sorted, self-include removed.
    pub includes: Vec<String>,
    /// Fully-qualified names referenced across namespaces.
    pub cross_namespace_refs: BTreeSet<String>,
    /// Binding-module import paths for referenced generated modules, in
    /// header order. These must execute before this module's own
    /// registrations so referenced types already exist in the host
    /// runtime's type registry.
    pub imports: Vec<String>,
    /// Enum definitions, in declaration order.
    pub enum_texts: Vec<String>,
    /// Struct definitions, in declaration order.
    pub struct_texts: Vec<String>,
    /// Binding registration blocks: enums first, then records, each in
    /// declaration order.
    pub binding_texts: Vec<String>,
}

/// Assembles one schema module into its generated documents.
pub struct ModuleAssembler<'a> {
    module: &'a ModuleDecl,
    options: GeneratorOptions,
}

impl<'a> ModuleAssembler<'a> {
    /// Creates a new assembler for the given module.
    #[must_use]
    pub fn new(module: &'a ModuleDecl, options: GeneratorOptions) -> Self {
        Self { module, options }
    }

    /// Assembles the module content.
    ///
    /// # Errors
    /// Any record whose fields fail resolution aborts assembly with the
    /// originating error; nothing is emitted for the module.
    pub fn assemble(&self) -> Result<ModuleUnit, CodegenError> {
        tracing::debug!(
            "Assembling module '{}' ({} records, {} enums)",
            self.module.path,
            self.module.records.len(),
            self.module.enums.len()
        );

        let mut resolver = TypeResolver::new();
        let mut include_set: BTreeSet<String> = BTreeSet::new();
        let mut cross_refs: BTreeSet<String> = BTreeSet::new();
        let mut enum_texts = Vec::new();
        let mut struct_texts = Vec::new();
        let mut binding_texts = Vec::new();

        for decl in &self.module.enums {
            if let Some(emitted) = EnumEmitter::new(decl).emit() {
                enum_texts.push(emitted.enum_text);
                binding_texts.push(emitted.binding_text);
            }
        }

        for record in &self.module.records {
            if let Some(emitted) = RecordEmitter::new(record).emit(&mut resolver)? {
                include_set.extend(emitted.includes);
                cross_refs.extend(emitted.cross_refs);
                struct_texts.push(emitted.struct_text);
                binding_texts.push(emitted.binding_text);
            }
        }

        include_set.remove(&format!("\"{}\"", self.module.path.header_path()));

        let system: Vec<String> = include_set
            .iter()
            .filter(|i| i.starts_with('<'))
            .cloned()
            .collect();
        let local: Vec<String> = include_set
            .iter()
            .filter(|i| i.starts_with('"'))
            .cloned()
            .collect();

        let imports: Vec<String> = local
            .iter()
            .filter_map(|include| {
                let header = include.trim_matches('"');
                let dotted = header.strip_suffix(".h")?.replace('/', ".");
                ModulePath::parse(&dotted).map(|p| p.binding_import_path())
            })
            .collect();

        let mut includes = system;
        includes.extend(local);

        Ok(ModuleUnit {
            module_name: self.module.path.to_string(),
            namespace_path: self.module.path.cpp_namespace(),
            includes,
            cross_namespace_refs: cross_refs,
            imports,
            enum_texts,
            struct_texts,
            binding_texts,
        })
    }

    /// Assembles and renders the module into its two documents.
    ///
    /// # Errors
    /// Propagates assembly errors; rendering itself cannot fail.
    pub fn generate(&self) -> Result<GeneratedModule, CodegenError> {
        let unit = self.assemble()?;
        let leaf = self.module.path.leaf();
        Ok(GeneratedModule {
            header_name: format!("{leaf}.h"),
            source_name: format!("{leaf}.cpp"),
            header: self.render_header(&unit),
            source: self.render_source(&unit),
        })
    }

    /// Renders the include-guard-wrapped header document.
    fn render_header(&self, unit: &ModuleUnit) -> String {
        let guard = self.module.path.include_guard();
        let mut text = String::new();
        text.push_str(&format!("#ifndef {guard}\n#define {guard}\n"));

        if !unit.includes.is_empty() {
            text.push('\n');
            for include in &unit.includes {
                text.push_str(&format!("#include {include}\n"));
            }
        }

        let namespace = unit.namespace_path.as_str();
        let usings: Vec<String> = unit
            .cross_namespace_refs
            .iter()
            .filter_map(|qualified| match qualified.rsplit_once("::") {
                Some((ns, _)) if ns != namespace => Some(format!("using {qualified};")),
                _ => None,
            })
            .collect();

        let mut parts: Vec<String> = Vec::new();
        if !usings.is_empty() {
            parts.push(usings.join("\n"));
        }
        parts.extend(unit.enum_texts.iter().cloned());
        parts.extend(unit.struct_texts.iter().cloned());
        let body = parts.join("\n\n");

        if namespace.is_empty() {
            if !body.is_empty() {
                text.push('\n');
                text.push_str(&body);
                text.push('\n');
            }
        } else {
            text.push_str(&format!("\nnamespace {namespace}\n{{\n"));
            if !body.is_empty() {
                text.push('\n');
                text.push_str(&indent(&body, self.options.indent));
                text.push('\n');
            }
            text.push_str(&format!("\n}} // namespace {namespace}\n"));
        }

        text.push_str(&format!("\n#endif // {guard}\n"));
        text
    }

    /// Renders the source document with the binding registration entry
    /// point.
    fn render_source(&self, unit: &ModuleUnit) -> String {
        let leaf = self.module.path.leaf();
        let mut text = String::new();
        text.push_str("#include <pybind11/pybind11.h>\n#include <pybind11/stl.h>\n\n");
        text.push_str(&format!("#include \"{leaf}.h\"\n\n"));
        text.push_str("namespace py = pybind11;\n");
        if !unit.namespace_path.is_empty() {
            text.push_str(&format!("using namespace {};\n", unit.namespace_path));
        }
        text.push_str(&format!(
            "\nPYBIND11_MODULE({}, m)\n{{\n",
            self.module.path.registration_name()
        ));

        let mut parts: Vec<String> = Vec::new();
        if !unit.imports.is_empty() {
            parts.push(
                unit.imports
                    .iter()
                    .map(|import| format!("py::module_::import(\"{import}\");"))
                    .collect::<Vec<_>>()
                    .join("\n"),
            );
        }
        parts.extend(unit.binding_texts.iter().cloned());
        let body = parts.join("\n\n");
        if !body.is_empty() {
            text.push_str(&indent(&body, self.options.indent));
            text.push('\n');
        }
        text.push_str("}\n");
        text
    }
}

/// Indents every non-empty line of a block by the given width.
fn indent(text: &str, width: usize) -> String {
    let prefix = " ".repeat(width);
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{prefix}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use ironbind_schema::{
        EnumDecl, FieldDecl, PrimitiveKind, RecordDecl, TypeDescriptor, TypeRef,
    };

    fn orders_path() -> ModulePath {
        ModulePath::parse("acme.orders").expect("valid path")
    }

    fn int() -> TypeDescriptor {
        TypeDescriptor::Primitive(PrimitiveKind::Int)
    }

    fn text() -> TypeDescriptor {
        TypeDescriptor::Primitive(PrimitiveKind::Text)
    }

    fn sample_module() -> ModuleDecl {
        let mut module = ModuleDecl::new(orders_path());
        module.add_enum(
            EnumDecl::new("Side", orders_path())
                .with_member("Buy", 1)
                .with_member("Sell", 2),
        );
        module.add_record(
            RecordDecl::new("Order", orders_path())
                .with_field(FieldDecl::new("qty", int()))
                .with_field(FieldDecl::new("sym", text())),
        );
        module
    }

    fn generate(module: &ModuleDecl) -> GeneratedModule {
        ModuleAssembler::new(module, GeneratorOptions::default())
            .generate()
            .expect("generates")
    }

    #[test]
    fn test_header_structure() {
        let generated = generate(&sample_module());
        let header = &generated.header;

        assert!(header.starts_with("#ifndef ACME_ORDERS_H\n#define ACME_ORDERS_H\n"));
        assert!(header.ends_with("#endif // ACME_ORDERS_H\n"));
        assert!(header.contains("namespace acme\n{"));
        assert!(header.contains("} // namespace acme"));
        assert!(header.contains("    enum class Side { Buy = 1, Sell = 2 };"));
        assert!(header.contains("    struct Order"));
        assert_eq!(generated.header_name, "orders.h");
    }

    #[test]
    fn test_source_structure() {
        let generated = generate(&sample_module());
        let source = &generated.source;

        assert!(source.starts_with(
            "#include <pybind11/pybind11.h>\n#include <pybind11/stl.h>\n\n#include \"orders.h\"\n"
        ));
        assert!(source.contains("namespace py = pybind11;\nusing namespace acme;"));
        assert!(source.contains("PYBIND11_MODULE(acme_orders, m)\n{"));
        assert!(source.contains("    py::enum_<Side>(m, \"Side\")"));
        assert!(source.contains("    py::class_<Order>(m, \"Order\")"));
        assert_eq!(generated.source_name, "orders.cpp");
    }

    #[test]
    fn test_enums_register_before_records() {
        let generated = generate(&sample_module());
        let enum_at = generated.source.find("py::enum_<Side>").expect("enum bound");
        let class_at = generated.source.find("py::class_<Order>").expect("record bound");
        assert!(enum_at < class_at);
    }

    #[test]
    fn test_include_ordering_system_before_local() {
        let refdata = ModulePath::parse("acme.refdata").expect("valid path");
        let mut module = sample_module();
        module.add_record(
            RecordDecl::new("Position", orders_path()).with_field(FieldDecl::new(
                "instrument",
                TypeDescriptor::RecordRef(TypeRef::new("Instrument", refdata)),
            )),
        );

        let unit = ModuleAssembler::new(&module, GeneratorOptions::default())
            .assemble()
            .expect("assembles");

        let last_system = unit
            .includes
            .iter()
            .rposition(|i| i.starts_with('<'))
            .expect("has system includes");
        let first_local = unit
            .includes
            .iter()
            .position(|i| i.starts_with('"'))
            .expect("has local includes");
        assert!(last_system < first_local);
        assert!(unit.includes.contains(&"\"acme/refdata.h\"".to_string()));
        assert!(unit.includes.contains(&"<msgpack/msgpack.h>".to_string()));
    }

    #[test]
    fn test_self_include_removed() {
        let mut module = ModuleDecl::new(orders_path());
        // A record referencing another record in the same module.
        module.add_record(
            RecordDecl::new("Leg", orders_path()).with_field(FieldDecl::new("qty", int())),
        );
        module.add_record(
            RecordDecl::new("Trade", orders_path()).with_field(FieldDecl::new(
                "leg",
                TypeDescriptor::RecordRef(TypeRef::new("Leg", orders_path())),
            )),
        );

        let unit = ModuleAssembler::new(&module, GeneratorOptions::default())
            .assemble()
            .expect("assembles");
        assert!(!unit.includes.contains(&"\"acme/orders.h\"".to_string()));
        assert!(unit.imports.is_empty());
    }

    #[test]
    fn test_cross_module_reference_imports_before_registrations() {
        let refdata = ModulePath::parse("acme.refdata").expect("valid path");
        let mut module = ModuleDecl::new(orders_path());
        module.add_record(
            RecordDecl::new("Position", orders_path()).with_field(FieldDecl::new(
                "instrument",
                TypeDescriptor::RecordRef(TypeRef::new("Instrument", refdata)),
            )),
        );

        let generated = generate(&module);
        let import_stmt =
            "py::module_::import(\"acme.__pybind__.acme_refdata\");";
        assert!(generated.source.contains(import_stmt));

        let import_at = generated.source.find(import_stmt).expect("import present");
        let class_at = generated
            .source
            .find("py::class_<Position>")
            .expect("record bound");
        assert!(import_at < class_at);
    }

    #[test]
    fn test_cross_namespace_using_directive() {
        let refdata = ModulePath::parse("acme.refdata.currencies").expect("valid path");
        let mut module = ModuleDecl::new(orders_path());
        module.add_record(
            RecordDecl::new("Quote", orders_path()).with_field(FieldDecl::new(
                "ccy",
                TypeDescriptor::EnumRef(TypeRef::new("Currency", refdata)),
            )),
        );

        let generated = generate(&module);
        assert!(generated
            .header
            .contains("using acme::refdata::Currency;"));
    }

    #[test]
    fn test_same_namespace_reference_needs_no_using() {
        let refdata = ModulePath::parse("acme.refdata").expect("valid path");
        let mut module = ModuleDecl::new(orders_path());
        module.add_record(
            RecordDecl::new("Position", orders_path()).with_field(FieldDecl::new(
                "instrument",
                TypeDescriptor::RecordRef(TypeRef::new("Instrument", refdata)),
            )),
        );

        // acme.refdata and acme.orders share the namespace `acme`.
        let generated = generate(&module);
        assert!(!generated.header.contains("using acme::Instrument;"));
    }

    #[test]
    fn test_generation_is_deterministic() {
        let module = sample_module();
        let first = generate(&module);
        let second = generate(&module);
        assert_eq!(first.header, second.header);
        assert_eq!(first.source, second.source);
    }

    #[test]
    fn test_zero_field_record_absent_from_artifacts() {
        let mut module = sample_module();
        module.add_record(RecordDecl::new("Ghost", orders_path()));

        let generated = generate(&module);
        assert!(!generated.header.contains("Ghost"));
        assert!(!generated.source.contains("Ghost"));
    }

    #[test]
    fn test_empty_module_generates_valid_documents() {
        let module = ModuleDecl::new(orders_path());
        let generated = generate(&module);

        assert!(generated.header.contains("#ifndef ACME_ORDERS_H"));
        assert!(generated.header.contains("namespace acme"));
        assert!(generated.source.contains("PYBIND11_MODULE(acme_orders, m)"));
    }

    #[test]
    fn test_unsupported_field_aborts_assembly() {
        let mut module = sample_module();
        module.add_record(
            RecordDecl::new("Broken", orders_path()).with_field(FieldDecl::new(
                "bad",
                TypeDescriptor::Unparameterized(ironbind_schema::ContainerKind::Mapping),
            )),
        );

        let result = ModuleAssembler::new(&module, GeneratorOptions::default()).generate();
        assert!(result.is_err());
    }

    #[test]
    fn test_single_segment_module_has_no_namespace() {
        let path = ModulePath::parse("orders").expect("valid path");
        let mut module = ModuleDecl::new(path.clone());
        module.add_record(
            RecordDecl::new("Order", path).with_field(FieldDecl::new("qty", int())),
        );

        let generated = generate(&module);
        assert!(!generated.header.contains("namespace"));
        assert!(generated.header.contains("\nstruct Order"));
        assert!(!generated.source.contains("using namespace"));
    }
}
