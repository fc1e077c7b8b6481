use std::any::TypeId;
use std::fmt;

/// What a [`TypeSpec`] refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// A concrete runtime type; values can be instances of it
    Type,
    /// A namespace; no value is ever an instance of a module
    Module,
    /// A free function registered by path
    Function,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Identity {
    Rust(TypeId),
    Path(String),
}

/// Resolved identity of an expected type
///
/// Equality is by identity only: two specs naming the same Rust type are equal
/// whatever path they were resolved through. The display name of a Rust type is
/// its `std::any::type_name`.
#[derive(Debug, Clone)]
pub struct TypeSpec {
    identity: Identity,
    name: String,
    kind: TypeKind,
}

impl TypeSpec {
    /// Spec for the Rust type `T`
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            identity: Identity::Rust(TypeId::of::<T>()),
            name: std::any::type_name::<T>().to_string(),
            kind: TypeKind::Type,
        }
    }

    /// Spec for a dynamic value kind with no single Rust type (tuples, lists, maps)
    pub fn builtin(name: &str) -> Self {
        Self {
            identity: Identity::Path(format!("builtins.{name}")),
            name: name.to_string(),
            kind: TypeKind::Type,
        }
    }

    pub fn module(path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            identity: Identity::Path(path.clone()),
            name: path,
            kind: TypeKind::Module,
        }
    }

    pub fn function(path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            identity: Identity::Path(path.clone()),
            name: path,
            kind: TypeKind::Function,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name with its module path removed; generic arguments are kept
    pub fn short_name(&self) -> &str {
        let base = self.name.split('<').next().unwrap_or(&self.name);
        let start = base.rfind("::").map(|i| i + 2).unwrap_or(0);
        let start = start.max(base.rfind('.').map(|i| i + 1).unwrap_or(0));
        &self.name[start..]
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    pub fn is_type(&self) -> bool {
        self.kind == TypeKind::Type
    }
}

impl PartialEq for TypeSpec {
    fn eq(&self, other: &Self) -> bool {
        self.identity == other.identity
    }
}

impl Eq for TypeSpec {}

impl std::hash::Hash for TypeSpec {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.identity.hash(state);
    }
}

impl fmt::Display for TypeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
