//! Type resolver: string paths to [`TypeSpec`]s.
//!
//! Paths are dotted (`pkg.module.Type`); Rust-style `::` separators are
//! accepted and normalised to dots, so the `std::any::type_name` of a type is
//! always a valid lookup key. Registering an entry also registers its ancestor
//! paths as modules, which is what lets a trailing name be resolved as a member
//! of its container.

use std::collections::BTreeMap;
use std::sync::{OnceLock, PoisonError, RwLock};
use std::time::Instant;

use likeness_core_types::schema::{OP_REGISTER, OP_RESOLVE};

use crate::errors::{LikenessError, Result};
use crate::model::{TypeKind, TypeSpec, Value};
use crate::{log_op_end, log_op_error, log_op_start};

/// Module under which the dynamic value kinds are registered
pub const BUILTINS_MODULE: &str = "builtins";

/// Table of resolvable paths
///
/// Not thread-safe on its own; the process-wide instance returned by
/// [`global`] is wrapped in an `RwLock`.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    entries: BTreeMap<String, TypeSpec>,
}

impl TypeRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Registry pre-populated with the types a `Value` can have
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        let builtins = [
            TypeSpec::of::<()>(),
            TypeSpec::of::<bool>(),
            TypeSpec::of::<i64>(),
            TypeSpec::of::<f64>(),
            TypeSpec::of::<String>(),
        ];
        for spec in builtins {
            let path = spec.name().to_string();
            // Fresh registry: these paths cannot collide.
            let _ = registry.insert(&path, spec);
        }
        for kind in ["tuple", "list", "map"] {
            let _ = registry.insert(
                &format!("{BUILTINS_MODULE}.{kind}"),
                TypeSpec::builtin(kind),
            );
        }
        registry
    }

    /// Register `T` under its `type_name` path
    ///
    /// # Errors
    ///
    /// Returns `DuplicateRegistration` if the path already names something else.
    pub fn register<T: ?Sized + 'static>(&mut self) -> Result<TypeSpec> {
        let spec = TypeSpec::of::<T>();
        let path = spec.name().to_string();
        self.insert(&path, spec)
    }

    /// Register `T` under its `type_name` path and under `path`
    ///
    /// # Errors
    ///
    /// Returns `EmptyPath` for malformed paths and `DuplicateRegistration` if
    /// either path already names something else.
    pub fn register_as<T: ?Sized + 'static>(&mut self, path: &str) -> Result<TypeSpec> {
        let spec = self.register::<T>()?;
        self.insert(path, spec)
    }

    /// Register a module path
    ///
    /// # Errors
    ///
    /// Returns `EmptyPath` or `DuplicateRegistration`.
    pub fn register_module(&mut self, path: &str) -> Result<TypeSpec> {
        let normalized = normalize(path)?;
        self.insert(&normalized, TypeSpec::module(normalized.clone()))
    }

    /// Register a function path
    ///
    /// # Errors
    ///
    /// Returns `EmptyPath` or `DuplicateRegistration`.
    pub fn register_function(&mut self, path: &str) -> Result<TypeSpec> {
        let normalized = normalize(path)?;
        self.insert(&normalized, TypeSpec::function(normalized.clone()))
    }

    /// Make `alias` resolve to whatever `target` resolves to
    ///
    /// # Errors
    ///
    /// Returns `UnresolvedPath` if `target` does not resolve, or the errors of
    /// registration for `alias`.
    pub fn alias(&mut self, alias: &str, target: &str) -> Result<TypeSpec> {
        let spec = self.resolve(target)?;
        self.insert(alias, spec)
    }

    fn insert(&mut self, path: &str, spec: TypeSpec) -> Result<TypeSpec> {
        let start = Instant::now();
        let normalized = normalize(path)?;
        log_op_start!(OP_REGISTER, path = %normalized, type_name = %spec);

        if let Some(existing) = self.entries.get(&normalized) {
            if *existing != spec {
                let err = LikenessError::DuplicateRegistration {
                    path: normalized,
                    existing: existing.to_string(),
                };
                log_op_error!(
                    OP_REGISTER,
                    err.clone(),
                    duration_ms = start.elapsed().as_millis() as u64
                );
                return Err(err);
            }
        }

        for ancestor in ancestors(&normalized) {
            self.entries
                .entry(ancestor.to_string())
                .or_insert_with(|| TypeSpec::module(ancestor.to_string()));
        }
        log_op_end!(
            OP_REGISTER,
            duration_ms = start.elapsed().as_millis() as u64,
            path = %normalized
        );
        self.entries.insert(normalized, spec.clone());
        Ok(spec)
    }

    /// Resolve a path to exactly one entry
    ///
    /// The whole path is tried as a module first; otherwise the trailing segment
    /// is looked up as a member of its container, which must itself be a
    /// registered module or type.
    ///
    /// # Errors
    ///
    /// Returns `EmptyPath` for malformed paths and `UnresolvedPath` when nothing
    /// is registered at the path.
    pub fn resolve(&self, path: &str) -> Result<TypeSpec> {
        let start = Instant::now();
        log_op_start!(OP_RESOLVE, path = path);

        let result = self.resolve_inner(path);
        let duration_ms = start.elapsed().as_millis() as u64;
        match &result {
            Ok(spec) => {
                log_op_end!(OP_RESOLVE, duration_ms = duration_ms, type_name = %spec);
            }
            Err(err) => {
                log_op_error!(OP_RESOLVE, err.clone(), duration_ms = duration_ms);
            }
        }
        result
    }

    fn resolve_inner(&self, path: &str) -> Result<TypeSpec> {
        let normalized = normalize(path)?;
        let unresolved = || LikenessError::UnresolvedPath {
            path: path.to_string(),
        };

        if let Some(spec) = self.entries.get(&normalized) {
            if spec.kind() == TypeKind::Module {
                return Ok(spec.clone());
            }
        }

        match split_container(&normalized) {
            Some((container, _name)) => {
                let container_ok = self
                    .entries
                    .get(container)
                    .is_some_and(|c| matches!(c.kind(), TypeKind::Module | TypeKind::Type));
                if !container_ok {
                    return Err(unresolved());
                }
                self.entries.get(&normalized).cloned().ok_or_else(unresolved)
            }
            None => self.entries.get(&normalized).cloned().ok_or_else(unresolved),
        }
    }

    pub fn contains(&self, path: &str) -> bool {
        normalize(path).is_ok_and(|p| self.entries.contains_key(&p))
    }

    /// Registered paths in sorted order
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Normalise `::` to `.` and reject empty segments
///
/// # Errors
///
/// Returns `EmptyPath` if the path or any of its segments is empty.
pub fn normalize(path: &str) -> Result<String> {
    let normalized = path.trim().replace("::", ".");
    let invalid = normalized.is_empty() || segments(&normalized).any(str::is_empty);
    if invalid {
        return Err(LikenessError::EmptyPath {
            path: path.to_string(),
        });
    }
    Ok(normalized)
}

// Top-level segments only: dots inside generic arguments do not split.
fn segments(path: &str) -> impl Iterator<Item = &str> {
    let mut depth = 0usize;
    let mut start = 0usize;
    let mut out = Vec::new();
    for (i, ch) in path.char_indices() {
        match ch {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            '.' if depth == 0 => {
                out.push(&path[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    out.push(&path[start..]);
    out.into_iter()
}

fn split_container(path: &str) -> Option<(&str, &str)> {
    let last = segments(path).last()?;
    let cut = path.len().checked_sub(last.len() + 1)?;
    Some((&path[..cut], last))
}

fn ancestors(path: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut current = path;
    while let Some((container, _)) = split_container(current) {
        out.push(container);
        current = container;
    }
    out
}

static GLOBAL: OnceLock<RwLock<TypeRegistry>> = OnceLock::new();

/// The process-wide registry used by `Comparison::new`
pub fn global() -> &'static RwLock<TypeRegistry> {
    GLOBAL.get_or_init(|| RwLock::new(TypeRegistry::with_builtins()))
}

/// Run `f` with the global registry locked for writing
pub fn with_global_mut<R>(f: impl FnOnce(&mut TypeRegistry) -> R) -> R {
    let mut guard = global().write().unwrap_or_else(PoisonError::into_inner);
    f(&mut guard)
}

/// Run `f` with the global registry locked for reading
pub fn with_global<R>(f: impl FnOnce(&TypeRegistry) -> R) -> R {
    let guard = global().read().unwrap_or_else(PoisonError::into_inner);
    f(&guard)
}

/// Register `T` in the global registry
///
/// # Errors
///
/// See [`TypeRegistry::register`].
pub fn register<T: ?Sized + 'static>() -> Result<TypeSpec> {
    with_global_mut(|r| r.register::<T>())
}

/// Register `T` in the global registry under an extra path
///
/// # Errors
///
/// See [`TypeRegistry::register_as`].
pub fn register_as<T: ?Sized + 'static>(path: &str) -> Result<TypeSpec> {
    with_global_mut(|r| r.register_as::<T>(path))
}

/// Register a module path in the global registry
///
/// # Errors
///
/// See [`TypeRegistry::register_module`].
pub fn register_module(path: &str) -> Result<TypeSpec> {
    with_global_mut(|r| r.register_module(path))
}

/// Register a function path in the global registry
///
/// # Errors
///
/// See [`TypeRegistry::register_function`].
pub fn register_function(path: &str) -> Result<TypeSpec> {
    with_global_mut(|r| r.register_function(path))
}

/// Resolve a path against the global registry
///
/// # Errors
///
/// See [`TypeRegistry::resolve`].
pub fn resolve(path: &str) -> Result<TypeSpec> {
    with_global(|r| r.resolve(path))
}

/// What a `Comparison` is built from
#[derive(Debug, Clone)]
pub enum Target {
    /// Dotted path resolved through a registry
    Path(String),
    /// A type used directly
    Type(TypeSpec),
    /// An instance: its runtime type, with its attributes as defaults
    Instance(Value),
}

impl From<&str> for Target {
    fn from(path: &str) -> Self {
        Target::Path(path.to_string())
    }
}

impl From<String> for Target {
    fn from(path: String) -> Self {
        Target::Path(path)
    }
}

impl From<TypeSpec> for Target {
    fn from(spec: TypeSpec) -> Self {
        Target::Type(spec)
    }
}

impl From<Value> for Target {
    fn from(value: Value) -> Self {
        Target::Instance(value)
    }
}
