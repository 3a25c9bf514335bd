//! Untyped values carried in a [`DataBag`] and the coercion applied before
//! they reach a typed setter.
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::mapping::error::{MappingError, MappingResult};

/// Ordered name -> value map carrying properties a subtype declares beyond
/// its base type.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataBag(Map<String, Value>);

impl DataBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(name.into(), value)
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.0.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

impl FromIterator<(String, Value)> for DataBag {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Runtime shape a setter was declared with.
///
/// Only the numeric kinds influence coercion; everything else is `Other`
/// and passes through untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Bool,
    String,
    Other,
}

impl ValueKind {
    pub fn name(&self) -> &'static str {
        match self {
            ValueKind::I8 => "i8",
            ValueKind::I16 => "i16",
            ValueKind::I32 => "i32",
            ValueKind::I64 => "i64",
            ValueKind::U8 => "u8",
            ValueKind::U16 => "u16",
            ValueKind::U32 => "u32",
            ValueKind::U64 => "u64",
            ValueKind::F32 => "f32",
            ValueKind::F64 => "f64",
            ValueKind::Bool => "bool",
            ValueKind::String => "string",
            ValueKind::Other => "value",
        }
    }

    fn is_integral(&self) -> bool {
        matches!(
            self,
            ValueKind::I8
                | ValueKind::I16
                | ValueKind::I32
                | ValueKind::I64
                | ValueKind::U8
                | ValueKind::U16
                | ValueKind::U32
                | ValueKind::U64
        )
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Associates a field type with the [`ValueKind`] its setter is declared with.
///
/// Custom field types can rely on the default:
///
/// ```ignore
/// impl DeclaredType for Tier {}
/// ```
pub trait DeclaredType {
    const KIND: ValueKind = ValueKind::Other;
}

macro_rules! declared_kind {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(impl DeclaredType for $ty {
            const KIND: ValueKind = ValueKind::$kind;
        })*
    };
}

declared_kind! {
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    bool => Bool,
    String => String,
}

impl<T: DeclaredType> DeclaredType for Option<T> {
    const KIND: ValueKind = T::KIND;
}

impl<T> DeclaredType for Vec<T> {}
impl<K, V> DeclaredType for BTreeMap<K, V> {}
impl<K, V, S> DeclaredType for HashMap<K, V, S> {}
impl DeclaredType for DateTime<Utc> {}
impl DeclaredType for Value {}

/// Narrows `value` to the declared kind of the setter it is about to reach.
///
/// The wire codec reads every integral number as a 64-bit value; a field
/// declared narrower only accepts values inside its range. Out-of-range or
/// fractional values fail instead of wrapping. Non-numeric declared kinds pass
/// through unchanged, as does `null` (optional fields).
pub fn coerce(property: &str, value: Value, declared: ValueKind) -> MappingResult<Value> {
    if value.is_null() {
        return Ok(value);
    }

    if declared.is_integral() {
        let narrowed = match &value {
            Value::Number(n) => narrow_integer(n, declared),
            _ => None,
        };
        return narrowed.ok_or_else(|| coercion_error(property, declared, &value));
    }

    match declared {
        ValueKind::F32 => match value.as_f64() {
            Some(f) if f.is_finite() && f.abs() <= f64::from(f32::MAX) => Ok(value),
            _ => Err(coercion_error(property, declared, &value)),
        },
        ValueKind::F64 if !value.is_number() => Err(coercion_error(property, declared, &value)),
        _ => Ok(value),
    }
}

fn narrow_integer(n: &Number, declared: ValueKind) -> Option<Value> {
    // u64 values above i64::MAX only fit U64.
    if let Some(wide) = n.as_i64() {
        let narrowed = match declared {
            ValueKind::I8 => i8::try_from(wide).ok().map(Value::from),
            ValueKind::I16 => i16::try_from(wide).ok().map(Value::from),
            ValueKind::I32 => i32::try_from(wide).ok().map(Value::from),
            ValueKind::I64 => Some(Value::from(wide)),
            ValueKind::U8 => u8::try_from(wide).ok().map(Value::from),
            ValueKind::U16 => u16::try_from(wide).ok().map(Value::from),
            ValueKind::U32 => u32::try_from(wide).ok().map(Value::from),
            ValueKind::U64 => u64::try_from(wide).ok().map(Value::from),
            _ => None,
        };
        return narrowed;
    }

    match (n.as_u64(), declared) {
        (Some(wide), ValueKind::U64) => Some(Value::from(wide)),
        _ => None,
    }
}

fn coercion_error(property: &str, expected: ValueKind, value: &Value) -> MappingError {
    MappingError::Coercion {
        property: property.to_string(),
        expected,
        found: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wide_integer_narrows_to_declared_width() {
        let v = coerce("max_sessions", json!(42_i64), ValueKind::I32).unwrap();
        assert_eq!(v, json!(42));
        let v = coerce("port", json!(65_535_u64), ValueKind::U16).unwrap();
        assert_eq!(v, json!(65_535));
        let v = coerce("min", json!(i32::MIN as i64), ValueKind::I32).unwrap();
        assert_eq!(v, json!(i32::MIN));
    }

    #[test]
    fn out_of_range_integer_is_rejected() {
        let err = coerce("max_sessions", json!(5_000_000_000_i64), ValueKind::I32).unwrap_err();
        assert!(matches!(err, MappingError::Coercion { expected: ValueKind::I32, .. }));

        let err = coerce("port", json!(-1), ValueKind::U16).unwrap_err();
        assert!(err.to_string().contains("port"));
    }

    #[test]
    fn fractional_value_is_not_truncated() {
        assert!(coerce("count", json!(1.5), ValueKind::I64).is_err());
        assert!(coerce("count", json!("7"), ValueKind::I64).is_err());
    }

    #[test]
    fn u64_above_i64_range_only_fits_u64() {
        assert!(coerce("big", json!(u64::MAX), ValueKind::U64).is_ok());
        assert!(coerce("big", json!(u64::MAX), ValueKind::I64).is_err());
    }

    #[test]
    fn non_numeric_kinds_pass_through() {
        let v = coerce("tenant", json!("contoso"), ValueKind::String).unwrap();
        assert_eq!(v, json!("contoso"));
        let v = coerce("tags", json!(["a", "b"]), ValueKind::Other).unwrap();
        assert_eq!(v, json!(["a", "b"]));
        let v = coerce("maybe", Value::Null, ValueKind::I32).unwrap();
        assert!(v.is_null());
    }

    #[test]
    fn optional_fields_declare_inner_kind() {
        assert_eq!(<Option<i32> as DeclaredType>::KIND, ValueKind::I32);
        assert_eq!(<Vec<i32> as DeclaredType>::KIND, ValueKind::Other);
    }

    #[test]
    fn data_bag_keeps_insertion_order() {
        let mut bag = DataBag::new();
        bag.insert("z", json!(1));
        bag.insert("a", json!(2));
        let names: Vec<_> = bag.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(names, vec!["z", "a"]);
        assert_eq!(serde_json::to_string(&bag).unwrap(), r#"{"z":1,"a":2}"#);
    }
}
