pub mod attributes;
pub mod type_spec;
pub mod value;

pub use attributes::{AttributeMap, Attributes};
pub use type_spec::{TypeKind, TypeSpec};
pub use value::Value;
