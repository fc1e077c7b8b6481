//! Fixture types shared by the integration tests.
//!
//! Each fixture renders as `<Name>` so failure messages stay readable.

#![allow(dead_code)]

use std::fmt;

use likeness_core::{
    comparable, introspect, registry, AttributeMap, Attributes, Introspect, TypeSpec, Value,
};

macro_rules! short_debug {
    ($($ty:ident),*) => {
        $(
            impl fmt::Debug for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "<{}>", stringify!($ty))
                }
            }
        )*
    };
}

/// Object with a required `x` and an `y` that is only set when given
pub struct AClass {
    pub x: Value,
    pub y: Option<Value>,
}

impl AClass {
    pub fn new(x: impl Into<Value>, y: impl Into<Value>) -> Self {
        Self {
            x: x.into(),
            y: Some(y.into()),
        }
    }

    pub fn x_only(x: impl Into<Value>) -> Self {
        Self {
            x: x.into(),
            y: None,
        }
    }
}

/// Same shape as [`AClass`], different type
pub struct BClass {
    pub x: Value,
    pub y: Option<Value>,
}

impl BClass {
    pub fn new(x: impl Into<Value>, y: impl Into<Value>) -> Self {
        Self {
            x: x.into(),
            y: Some(y.into()),
        }
    }
}

fn optional_pair(x: &Value, y: &Option<Value>) -> Attributes {
    let mut map = AttributeMap::new().with("x", x.clone());
    if let Some(y) = y {
        map.insert("y", y.clone());
    }
    Attributes::Map(map)
}

impl Introspect for AClass {
    fn runtime_type(&self) -> TypeSpec {
        TypeSpec::of::<AClass>()
    }

    fn attributes(&self) -> Attributes {
        optional_pair(&self.x, &self.y)
    }
}

impl Introspect for BClass {
    fn runtime_type(&self) -> TypeSpec {
        TypeSpec::of::<BClass>()
    }

    fn attributes(&self) -> Attributes {
        optional_pair(&self.x, &self.y)
    }
}

comparable!(AClass);
comparable!(BClass);

/// Error-like value carrying only positional arguments
#[derive(Debug)]
pub struct ValueError {
    pub args: Vec<Value>,
}

impl ValueError {
    pub fn new(message: &str) -> Self {
        Self {
            args: vec![Value::from(message)],
        }
    }
}

impl Introspect for ValueError {
    fn runtime_type(&self) -> TypeSpec {
        TypeSpec::of::<ValueError>()
    }

    fn attributes(&self) -> Attributes {
        Attributes::Map(AttributeMap::new())
    }

    fn positional_args(&self) -> Option<Vec<Value>> {
        Some(self.args.clone())
    }

    fn repr(&self) -> String {
        format!("ValueError{}", Value::Tuple(self.args.clone()))
    }
}

comparable!(ValueError);

/// Error-like value with its own attributes as well as positional arguments
pub struct WeirdError {
    pub x: i64,
    pub y: i64,
}

impl Introspect for WeirdError {
    fn runtime_type(&self) -> TypeSpec {
        TypeSpec::of::<WeirdError>()
    }

    fn attributes(&self) -> Attributes {
        Attributes::Map(AttributeMap::new().with("x", self.x).with("y", self.y))
    }

    fn positional_args(&self) -> Option<Vec<Value>> {
        Some(vec![Value::from(self.x), Value::from(self.y)])
    }
}

comparable!(WeirdError);

/// Value with fixed slots and no enumerable attribute mapping
#[derive(Default)]
pub struct Slotted {
    pub x: Option<i64>,
}

impl Introspect for Slotted {
    fn runtime_type(&self) -> TypeSpec {
        TypeSpec::of::<Slotted>()
    }

    fn attribute(&self, name: &str) -> Option<Value> {
        match name {
            "x" => self.x.map(Value::from),
            _ => None,
        }
    }
}

comparable!(Slotted);

/// Value built from a variable number of positional arguments
pub struct TestClassA {
    pub args: Value,
}

impl TestClassA {
    pub fn new<I, V>(args: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            args: Value::tuple(args),
        }
    }
}

introspect!(TestClassA { args });

pub struct Inner {
    pub x: i64,
}

introspect!(Inner { x });

pub struct Outer {
    pub inner: Value,
}

impl Outer {
    pub fn with_inner(x: i64) -> Self {
        Self {
            inner: Value::object(Inner { x }),
        }
    }
}

introspect!(Outer { inner });

/// Value whose attribute set is chosen at runtime
pub struct Record {
    pub attrs: AttributeMap,
}

impl Introspect for Record {
    fn runtime_type(&self) -> TypeSpec {
        TypeSpec::of::<Record>()
    }

    fn attributes(&self) -> Attributes {
        Attributes::Map(self.attrs.clone())
    }
}

comparable!(Record);

short_debug!(AClass, BClass, WeirdError, Slotted, TestClassA, Inner, Outer, Record);

/// Display name a fixture renders with
pub fn name_of<T: ?Sized + 'static>() -> &'static str {
    std::any::type_name::<T>()
}

/// Register the fixtures in the global registry under stable dotted paths
pub fn register_fixtures() {
    registry::register_as::<AClass>("fixtures.sample.AClass").unwrap();
    registry::register_as::<BClass>("fixtures.sample.BClass").unwrap();
    registry::register_as::<TestClassA>("fixtures.sample.TestClassA").unwrap();
    registry::register_as::<ValueError>("fixtures.errors.ValueError").unwrap();
    registry::register_function("fixtures.sample.a_function").unwrap();
}
