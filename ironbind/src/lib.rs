//! # IronBind
//!
//! Schema-driven C++ struct and pybind11 binding generator.
//!
//! IronBind translates in-memory data-model declarations (records with
//! typed, possibly-defaulted fields, enumerations, and inheritance among
//! records) into native C++ struct definitions plus the pybind11
//! registration glue needed to expose them to a host runtime, with
//! msgpack serialization hooks built in.
//!
//! ## Quick Start
//!
//! ```
//! use ironbind::prelude::*;
//!
//! let path = ModulePath::parse("acme.orders").expect("valid path");
//! let mut module = ModuleDecl::new(path.clone());
//! module.add_enum(
//!     EnumDecl::new("Side", path.clone())
//!         .with_member("Buy", 1)
//!         .with_member("Sell", 2),
//! );
//! module.add_record(
//!     RecordDecl::new("Order", path.clone())
//!         .with_field(FieldDecl::new(
//!             "qty",
//!             TypeDescriptor::Primitive(PrimitiveKind::Int),
//!         ))
//!         .with_field(FieldDecl::with_default(
//!             "sym",
//!             TypeDescriptor::Primitive(PrimitiveKind::Text),
//!             Literal::str("EURUSD"),
//!         )),
//! );
//!
//! let generated = generate_module(&module).expect("generates");
//! assert!(generated.header.contains("struct Order"));
//! assert!(generated.source.contains("PYBIND11_MODULE(acme_orders, m)"));
//! ```
//!
//! ## Crate Organization
//!
//! - [`schema`] - Data-model declarations, field collection, validation
//! - [`codegen`] - C++ emission and artifact write-out

pub mod prelude;

/// Data-model declarations and field collection.
pub mod schema {
    pub use ironbind_schema::*;
}

/// C++ code generation from schema declarations.
pub mod codegen {
    pub use ironbind_codegen::*;
}

pub use ironbind_codegen::{generate_module, write_module};
