//! Runtime values.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use lateinit_ir::DeclId;

/// A class instance. Fields never assigned read as null.
#[derive(Debug, Default)]
pub struct Object {
    pub class: Option<DeclId>,
    pub fields: FxHashMap<DeclId, Value>,
}

/// Shared, mutable instance handle; equality is identity.
pub type ObjectRef = Rc<RefCell<Object>>;

#[derive(Debug, Clone)]
pub enum Value {
    Unit,
    Null,
    Bool(bool),
    Int(i64),
    Double(f64),
    Str(Rc<str>),
    Object(ObjectRef),
    /// A bound property reference, `receiver::property`.
    PropertyRef {
        property: DeclId,
        receiver: Option<Box<Value>>,
    },
}

impl Value {
    pub fn str(s: impl AsRef<str>) -> Self {
        Value::Str(Rc::from(s.as_ref()))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s.as_ref()),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Language equality: structural for scalars, identity for objects.
    pub fn equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Unit, Value::Unit) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Double(a), Value::Double(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            (
                Value::PropertyRef {
                    property: a,
                    receiver: ra,
                },
                Value::PropertyRef {
                    property: b,
                    receiver: rb,
                },
            ) => {
                a == b
                    && match (ra, rb) {
                        (Some(ra), Some(rb)) => ra.equals(rb),
                        (None, None) => true,
                        _ => false,
                    }
            }
            _ => false,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        self.equals(other)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Unit => write!(f, "Unit"),
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Double(d) => write!(f, "{d}"),
            Value::Str(s) => write!(f, "{s}"),
            Value::Object(o) => match o.borrow().class {
                Some(class) => write!(f, "object({class})"),
                None => write!(f, "object"),
            },
            Value::PropertyRef { property, .. } => write!(f, "::{property}"),
        }
    }
}
