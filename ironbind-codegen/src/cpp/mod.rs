//! C++ emission modules.

pub mod defaults;
pub mod enums;
pub mod module;
pub mod records;
pub mod types;

pub use enums::{EmittedEnum, EnumEmitter};
pub use module::{ModuleAssembler, ModuleUnit};
pub use records::{EmittedRecord, RecordEmitter};
pub use types::{ResolvedType, TypeResolver};
