//! Type descriptor resolution to C++ type text.
//!
//! Resolution is a pure function of the descriptor: the same descriptor
//! always yields the same `(type text, includes, cross references)`
//! triple. The resolver memoizes within one generation run; nothing is
//! cached across runs, so separate module inputs always re-resolve their
//! cross-module references.

use crate::error::CodegenError;
use ironbind_schema::{PrimitiveKind, TemporalKind, TypeDescriptor};
use std::collections::{BTreeSet, HashMap};

/// The C++ resolution of one type descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedType {
    /// C++ type text.
    pub cpp_type: String,
    /// Required `#include` directives, with their delimiters
    /// (`<optional>` or `"acme/orders.h"`).
    pub includes: BTreeSet<String>,
    /// Fully-qualified names referenced across namespaces
    /// (`acme::orders::Order`).
    pub cross_refs: BTreeSet<String>,
}

impl ResolvedType {
    /// Creates a resolution with no includes or cross references.
    fn bare(cpp_type: impl Into<String>) -> Self {
        Self {
            cpp_type: cpp_type.into(),
            includes: BTreeSet::new(),
            cross_refs: BTreeSet::new(),
        }
    }

    /// Creates a resolution with one system include.
    fn with_include(cpp_type: impl Into<String>, include: &str) -> Self {
        let mut resolved = Self::bare(cpp_type);
        resolved.includes.insert(include.to_string());
        resolved
    }

    /// Wraps this resolution in `std::optional`.
    fn into_optional(mut self) -> Self {
        self.cpp_type = format!("std::optional<{}>", self.cpp_type);
        self.includes.insert("<optional>".to_string());
        self
    }

    /// Wraps this resolution in a single-parameter container.
    fn into_container(mut self, template: &str, include: &str) -> Self {
        self.cpp_type = format!("{}<{}>", template, self.cpp_type);
        self.includes.insert(include.to_string());
        self
    }
}

/// Per-generation-run resolution context.
///
/// One resolver is created per module generation; the memo map never
/// outlives the run.
#[derive(Debug, Default)]
pub struct TypeResolver {
    cache: HashMap<TypeDescriptor, ResolvedType>,
}

impl TypeResolver {
    /// Creates a new empty resolver.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves a type descriptor to its C++ form.
    ///
    /// # Errors
    /// Returns `CodegenError::UnsupportedType` naming the descriptor if
    /// no mapping exists, including unparameterized containers and
    /// variadic-tuple misuse.
    pub fn resolve(&mut self, ty: &TypeDescriptor) -> Result<ResolvedType, CodegenError> {
        if let Some(hit) = self.cache.get(ty) {
            return Ok(hit.clone());
        }
        let resolved = self.resolve_uncached(ty)?;
        self.cache.insert(ty.clone(), resolved.clone());
        Ok(resolved)
    }

    fn resolve_uncached(&mut self, ty: &TypeDescriptor) -> Result<ResolvedType, CodegenError> {
        match ty {
            TypeDescriptor::Primitive(kind) => Ok(match kind {
                PrimitiveKind::Bool => ResolvedType::bare("bool"),
                PrimitiveKind::Int => ResolvedType::bare("int"),
                PrimitiveKind::Float => ResolvedType::bare("double"),
                PrimitiveKind::Text => ResolvedType::with_include("std::string", "<string>"),
            }),
            TypeDescriptor::Temporal(kind) => Ok(match kind {
                TemporalKind::Duration => ResolvedType::with_include(
                    "std::chrono::system_clock::duration",
                    "<chrono>",
                ),
                TemporalKind::Date | TemporalKind::DateTime | TemporalKind::TimeOfDay => {
                    ResolvedType::with_include(
                        "std::chrono::system_clock::time_point",
                        "<chrono>",
                    )
                }
            }),
            TypeDescriptor::EnumRef(r) | TypeDescriptor::RecordRef(r) => {
                let mut resolved = ResolvedType::bare(r.name.as_str());
                resolved
                    .includes
                    .insert(format!("\"{}\"", r.module.header_path()));
                resolved.cross_refs.insert(r.qualified_name());
                Ok(resolved)
            }
            TypeDescriptor::Optional(inner) => Ok(self.resolve(inner)?.into_optional()),
            TypeDescriptor::Union(variants) => self.resolve_union(ty, variants),
            TypeDescriptor::List(inner) | TypeDescriptor::VarTuple(inner) => Ok(self
                .resolve(inner)?
                .into_container("std::vector", "<vector>")),
            TypeDescriptor::SetOf(inner) => {
                Ok(self.resolve(inner)?.into_container("std::set", "<set>"))
            }
            TypeDescriptor::FixedTuple(variants) => self.resolve_tuple(ty, variants),
            TypeDescriptor::Mapping(key, value) => {
                // Key and value are resolved independently.
                let key_resolved = self.resolve(key)?;
                let value_resolved = self.resolve(value)?;
                let mut resolved = ResolvedType::bare(format!(
                    "std::unordered_map<{}, {}>",
                    key_resolved.cpp_type, value_resolved.cpp_type
                ));
                resolved.includes.insert("<unordered_map>".to_string());
                resolved.includes.extend(key_resolved.includes);
                resolved.includes.extend(value_resolved.includes);
                resolved.cross_refs.extend(key_resolved.cross_refs);
                resolved.cross_refs.extend(value_resolved.cross_refs);
                Ok(resolved)
            }
            TypeDescriptor::Null
            | TypeDescriptor::Ellipsis
            | TypeDescriptor::Unparameterized(_) => Err(CodegenError::unsupported_type(ty)),
        }
    }

    /// Resolves a union, collapsing an absence marker into an optional
    /// wrapper so `optional[X]` and `union[X | none]` normalize to the
    /// same output.
    fn resolve_union(
        &mut self,
        ty: &TypeDescriptor,
        variants: &[TypeDescriptor],
    ) -> Result<ResolvedType, CodegenError> {
        let mut optional = false;
        let mut real: Vec<&TypeDescriptor> = Vec::new();
        for variant in variants {
            if matches!(variant, TypeDescriptor::Null) {
                optional = true;
            } else {
                real.push(variant);
            }
        }
        if real.is_empty() {
            return Err(CodegenError::unsupported_type(ty));
        }

        let resolved = self.resolve_variants("std::variant", "<variant>", &real)?;
        Ok(if optional {
            resolved.into_optional()
        } else {
            resolved
        })
    }

    /// Resolves a fixed tuple. A tuple whose second slot is the variadic
    /// marker degenerates to a sequence; the marker anywhere else is
    /// misuse.
    fn resolve_tuple(
        &mut self,
        ty: &TypeDescriptor,
        variants: &[TypeDescriptor],
    ) -> Result<ResolvedType, CodegenError> {
        if variants.iter().any(|v| matches!(v, TypeDescriptor::Ellipsis)) {
            if variants.len() == 2 && matches!(variants[1], TypeDescriptor::Ellipsis) {
                return Ok(self
                    .resolve(&variants[0])?
                    .into_container("std::vector", "<vector>"));
            }
            return Err(CodegenError::unsupported_type(ty));
        }
        if variants.is_empty() {
            return Err(CodegenError::unsupported_type(ty));
        }

        let refs: Vec<&TypeDescriptor> = variants.iter().collect();
        self.resolve_variants("std::tuple", "<tuple>", &refs)
    }

    /// Resolves a parameter list into `template<..>` text. A single
    /// parameter yields its own type text without the wrapper.
    fn resolve_variants(
        &mut self,
        template: &str,
        include: &str,
        variants: &[&TypeDescriptor],
    ) -> Result<ResolvedType, CodegenError> {
        let mut includes = BTreeSet::new();
        let mut cross_refs = BTreeSet::new();
        let mut texts = Vec::with_capacity(variants.len());
        for variant in variants {
            let resolved = self.resolve(variant)?;
            texts.push(resolved.cpp_type);
            includes.extend(resolved.includes);
            cross_refs.extend(resolved.cross_refs);
        }

        let cpp_type = if texts.len() == 1 {
            texts.remove(0)
        } else {
            includes.insert(include.to_string());
            format!("{}<{}>", template, texts.join(", "))
        };

        Ok(ResolvedType {
            cpp_type,
            includes,
            cross_refs,
        })
    }
}
