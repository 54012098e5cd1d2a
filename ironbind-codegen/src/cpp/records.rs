//! Record struct and binding emission.
//!
//! Builds the C++ aggregate for one record declaration together with its
//! pybind11 registration block. Records with no effective fields (own or
//! inherited) produce nothing and are absent from the emitted module.

use crate::cpp::defaults::default_literal;
use crate::cpp::types::TypeResolver;
use crate::error::CodegenError;
use ironbind_schema::fields::{CollectedFields, collect};
use ironbind_schema::RecordDecl;
use std::collections::BTreeSet;

/// The emitted texts and aggregation data for one record.
#[derive(Debug)]
pub struct EmittedRecord {
    /// C++ struct definition.
    pub struct_text: String,
    /// pybind11 registration block.
    pub binding_text: String,
    /// Required `#include` directives.
    pub includes: BTreeSet<String>,
    /// Fully-qualified cross-namespace references.
    pub cross_refs: BTreeSet<String>,
}

/// One resolved constructor parameter.
struct Param {
    name: String,
    cpp_type: String,
    default_text: Option<String>,
    move_eligible: bool,
    inherited: bool,
}

/// Emitter for record struct and binding text.
pub struct RecordEmitter<'a> {
    record: &'a RecordDecl,
}

impl<'a> RecordEmitter<'a> {
    /// Creates a new record emitter.
    #[must_use]
    pub fn new(record: &'a RecordDecl) -> Self {
        Self { record }
    }

    /// Emits the struct and binding text for the record.
    ///
    /// Returns `Ok(None)` for a record with zero effective fields.
    ///
    /// # Errors
    /// Returns the originating resolution error, with record and field
    /// context attached, if any field's type or default is unsupported.
    pub fn emit(
        &self,
        resolver: &mut TypeResolver,
    ) -> Result<Option<EmittedRecord>, CodegenError> {
        let collected = collect(self.record);
        if collected.is_empty() {
            tracing::debug!(
                "Skipping record '{}' with no effective fields",
                self.record.name
            );
            return Ok(None);
        }

        let mut includes = BTreeSet::new();
        includes.insert("<msgpack/msgpack.h>".to_string());
        let mut cross_refs = BTreeSet::new();

        let mut params = Vec::with_capacity(collected.params.len());
        for field in &collected.params {
            let resolved = resolver
                .resolve(&field.ty)
                .map_err(|e| e.in_field(self.record.name.clone(), field.name.clone()))?;
            let default_text = default_literal(field.default.as_ref())
                .map_err(|e| e.in_field(self.record.name.clone(), field.name.clone()))?;
            includes.extend(resolved.includes);
            cross_refs.extend(resolved.cross_refs);
            params.push(Param {
                name: field.name.clone(),
                cpp_type: resolved.cpp_type,
                default_text,
                move_eligible: field.move_eligible,
                inherited: field.inherited,
            });
        }

        if params.iter().any(|p| !p.inherited && p.move_eligible) {
            includes.insert("<utility>".to_string());
        }

        for base in &collected.bases {
            if base.decl.module != self.record.module {
                includes.insert(format!("\"{}\"", base.decl.module.header_path()));
                cross_refs.insert(qualified_record_name(base.decl));
            }
        }

        let struct_text = self.render_struct(&collected, &params);
        let binding_text = self.render_binding(&collected, &params);

        Ok(Some(EmittedRecord {
            struct_text,
            binding_text,
            includes,
            cross_refs,
        }))
    }

    fn render_struct(&self, collected: &CollectedFields<'_>, params: &[Param]) -> String {
        let name = &self.record.name;
        let mut sections: Vec<String> = Vec::new();

        // Zero-argument constructor, so deserialization can construct an
        // empty instance and populate it afterward. Omitted when every
        // parameter has a default: the parameterized constructor is then
        // already callable with no arguments.
        if collected.any_required() {
            let mut init_items: Vec<String> = collected
                .bases
                .iter()
                .map(|b| format!("{}()", b.decl.name))
                .collect();
            init_items.extend(
                params
                    .iter()
                    .filter(|p| !p.inherited)
                    .map(|p| format!("{}()", p.name)),
            );
            sections.push(format!(
                "    {name}() :\n        {}\n    {{\n    }}",
                init_items.join(", ")
            ));
        }

        let args: Vec<String> = params
            .iter()
            .map(|p| match &p.default_text {
                Some(default) => format!("{} {}={}", p.cpp_type, p.name, default),
                None => format!("{} {}", p.cpp_type, p.name),
            })
            .collect();
        let mut init_items: Vec<String> = collected
            .bases
            .iter()
            .map(|b| format!("{}({})", b.decl.name, b.param_names.join(", ")))
            .collect();
        init_items.extend(params.iter().filter(|p| !p.inherited).map(|p| {
            if p.move_eligible {
                format!("{}(std::move({}))", p.name, p.name)
            } else {
                format!("{}({})", p.name, p.name)
            }
        }));
        sections.push(format!(
            "    {name}({}) :\n        {}\n    {{\n    }}",
            args.join(", "),
            init_items.join(", ")
        ));

        let members: Vec<String> = params
            .iter()
            .filter(|p| !p.inherited)
            .map(|p| format!("    {} {};", p.cpp_type, p.name))
            .collect();
        if !members.is_empty() {
            sections.push(members.join("\n"));
        }

        let names: Vec<&str> = params.iter().map(|p| p.name.as_str()).collect();
        sections.push(format!(
            "    template<class T>\n    void msgpack(T &pack)\n    {{\n        pack({});\n    }}",
            names.join(", ")
        ));

        let inheritance = if collected.bases.is_empty() {
            String::new()
        } else {
            let bases: Vec<String> = collected
                .bases
                .iter()
                .map(|b| format!("public {}", b.decl.name))
                .collect();
            format!(" : {}", bases.join(", "))
        };

        format!(
            "struct {name}{inheritance}\n{{\n{}\n}};",
            sections.join("\n\n")
        )
    }

    fn render_binding(&self, collected: &CollectedFields<'_>, params: &[Param]) -> String {
        let name = &self.record.name;
        let mut class_params = vec![name.clone()];
        class_params.extend(collected.bases.iter().map(|b| b.decl.name.clone()));

        let init_types: Vec<&str> = params.iter().map(|p| p.cpp_type.as_str()).collect();
        let kwargs: Vec<String> = params
            .iter()
            .map(|p| match &p.default_text {
                Some(default) => format!("py::arg(\"{}\")={}", p.name, default),
                None => format!("py::arg(\"{}\")", p.name),
            })
            .collect();

        let mut lines = vec![format!(
            ".def(py::init<{}>(), {})",
            init_types.join(", "),
            kwargs.join(", ")
        )];
        if collected.any_required() {
            lines.push(".def(py::init<>())".to_string());
        }
        lines.push(format!(
            ".def(\"to_msg_pack\", [](const {name} &self) {{ return py::bytes(msgpack::pack(self)); }})"
        ));
        lines.push(format!(
            ".def_static(\"from_msg_pack\", [](const py::bytes &data) {{ return msgpack::unpack<{name}>(data); }})"
        ));

        let accessor = if self.record.frozen {
            ".def_readonly"
        } else {
            ".def_readwrite"
        };
        for p in params.iter().filter(|p| !p.inherited) {
            lines.push(format!("{accessor}(\"{}\", &{name}::{})", p.name, p.name));
        }

        format!(
            "py::class_<{}>(m, \"{name}\")\n    {};",
            class_params.join(", "),
            lines.join("\n    ")
        )
    }
}

/// Returns the fully-qualified C++ name of a record.
fn qualified_record_name(record: &RecordDecl) -> String {
    let ns = record.module.cpp_namespace();
    if ns.is_empty() {
        record.name.clone()
    } else {
        format!("{}::{}", ns, record.name)
    }
}
