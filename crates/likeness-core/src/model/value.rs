use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use crate::comparison::Comparison;
use crate::errors::Result;
use crate::introspect::Introspect;

use super::attributes::Attributes;
use super::type_spec::TypeSpec;

/// A dynamically typed value taking part in a comparison
///
/// Objects are shared (`Rc`) and compare by identity, the same way an object
/// without its own equality would. A `Comparison` on either side of an equality
/// check takes over and runs its reconciliation against the other side.
#[derive(Clone)]
pub enum Value {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Tuple(Vec<Value>),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
    Object(Rc<dyn Introspect>),
    Comparison(Rc<Comparison>),
}

impl Value {
    /// Wrap an introspectable value as a shared object
    pub fn object<T: Introspect>(value: T) -> Self {
        Value::Object(Rc::new(value))
    }

    pub fn tuple<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Value::Tuple(items.into_iter().map(Into::into).collect())
    }

    pub fn list<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    pub fn as_comparison(&self) -> Option<&Comparison> {
        match self {
            Value::Comparison(c) => Some(c),
            _ => None,
        }
    }

    /// Standard value equality, surfacing fatal comparison errors
    ///
    /// # Errors
    ///
    /// Returns `IntrospectionUnsupported` when a `Comparison` reached through
    /// this value needs a strict comparison against a value without attributes.
    pub fn try_eq(&self, other: &Value) -> Result<bool> {
        let equal = match (self, other) {
            (Value::Comparison(c), _) => c.try_eq(other)?,
            (_, Value::Comparison(c)) => c.try_eq(self)?,
            (Value::None, Value::None) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => *a as f64 == *b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Tuple(a), Value::Tuple(b)) | (Value::List(a), Value::List(b)) => {
                seq_eq(a, b)?
            }
            (Value::Map(a), Value::Map(b)) => map_eq(a, b)?,
            (Value::Object(a), Value::Object(b)) => {
                std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
            }
            _ => false,
        };
        Ok(equal)
    }
}

// Stops at the first unequal element, so later Comparisons are left untouched.
fn seq_eq(a: &[Value], b: &[Value]) -> Result<bool> {
    if a.len() != b.len() {
        return Ok(false);
    }
    for (x, y) in a.iter().zip(b) {
        if !x.try_eq(y)? {
            return Ok(false);
        }
    }
    Ok(true)
}

fn map_eq(a: &BTreeMap<String, Value>, b: &BTreeMap<String, Value>) -> Result<bool> {
    if a.len() != b.len() {
        return Ok(false);
    }
    for (key, x) in a {
        match b.get(key) {
            Some(y) if x.try_eq(y)? => {}
            _ => return Ok(false),
        }
    }
    Ok(true)
}

impl PartialEq for Value {
    /// # Panics
    ///
    /// Panics with the error message when a nested comparison fails fatally.
    fn eq(&self, other: &Value) -> bool {
        match self.try_eq(other) {
            Ok(equal) => equal,
            Err(err) => panic!("{}", err),
        }
    }
}

impl PartialEq<Comparison> for Value {
    fn eq(&self, other: &Comparison) -> bool {
        other.matches(self)
    }
}

impl Introspect for Value {
    fn runtime_type(&self) -> TypeSpec {
        match self {
            Value::None => TypeSpec::of::<()>(),
            Value::Bool(_) => TypeSpec::of::<bool>(),
            Value::Int(_) => TypeSpec::of::<i64>(),
            Value::Float(_) => TypeSpec::of::<f64>(),
            Value::Str(_) => TypeSpec::of::<String>(),
            Value::Tuple(_) => TypeSpec::builtin("tuple"),
            Value::List(_) => TypeSpec::builtin("list"),
            Value::Map(_) => TypeSpec::builtin("map"),
            Value::Object(obj) => obj.runtime_type(),
            Value::Comparison(c) => c.runtime_type(),
        }
    }

    fn attributes(&self) -> Attributes {
        match self {
            Value::Object(obj) => obj.attributes(),
            _ => Attributes::Unsupported,
        }
    }

    fn attribute(&self, name: &str) -> Option<Value> {
        match self {
            Value::Object(obj) => obj.attribute(name),
            _ => None,
        }
    }

    fn positional_args(&self) -> Option<Vec<Value>> {
        match self {
            Value::Object(obj) => obj.positional_args(),
            _ => None,
        }
    }

    fn repr(&self) -> String {
        self.to_string()
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, items: &[Value]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => f.write_str("None"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{:?}", x),
            Value::Str(s) => write!(f, "{:?}", s),
            Value::Tuple(items) => {
                f.write_str("(")?;
                write_joined(f, items)?;
                if items.len() == 1 {
                    f.write_str(",")?;
                }
                f.write_str(")")
            }
            Value::List(items) => {
                f.write_str("[")?;
                write_joined(f, items)?;
                f.write_str("]")
            }
            Value::Map(entries) => {
                f.write_str("{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{:?}: {}", key, value)?;
                }
                f.write_str("}")
            }
            Value::Object(obj) => f.write_str(&obj.repr()),
            Value::Comparison(c) => write!(f, "{}", c),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

macro_rules! value_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::Int(i64::from(v))
                }
            }
        )*
    };
}

value_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::Str(v.clone())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::None)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::list(v)
    }
}

impl<V: Into<Value>> From<BTreeMap<String, V>> for Value {
    fn from(v: BTreeMap<String, V>) -> Self {
        Value::Map(v.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl<A: Into<Value>> From<(A,)> for Value {
    fn from((a,): (A,)) -> Self {
        Value::Tuple(vec![a.into()])
    }
}

impl<A: Into<Value>, B: Into<Value>> From<(A, B)> for Value {
    fn from((a, b): (A, B)) -> Self {
        Value::Tuple(vec![a.into(), b.into()])
    }
}

impl<A: Into<Value>, B: Into<Value>, C: Into<Value>> From<(A, B, C)> for Value {
    fn from((a, b, c): (A, B, C)) -> Self {
        Value::Tuple(vec![a.into(), b.into(), c.into()])
    }
}

impl From<Comparison> for Value {
    fn from(c: Comparison) -> Self {
        Value::Comparison(Rc::new(c))
    }
}

impl From<Rc<Comparison>> for Value {
    fn from(c: Rc<Comparison>) -> Self {
        Value::Comparison(c)
    }
}
