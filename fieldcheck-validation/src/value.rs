// Dynamically typed field values

use serde_json::Number;
use std::fmt;

/// A single loosely-typed value as it arrives from a deserialized body.
///
/// Rules never look at the variant directly: every scalar is rendered
/// through [`Display`](fmt::Display) first and checked as text.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// JSON `null`, rendered as the empty string
    Null,
    Bool(bool),
    Number(Number),
    Text(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => Ok(()),
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Number(n) => match n.as_f64() {
                // Whole floats render like integers so `3.0` still passes
                // `number`, `min` and `max`.
                Some(x) if n.is_f64() && x.fract() == 0.0 && x.abs() < 1e21 => {
                    write!(f, "{:.0}", x)
                }
                _ => write!(f, "{}", n),
            },
            Scalar::Text(s) => f.write_str(s),
        }
    }
}

impl From<serde_json::Value> for Scalar {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Scalar::Null,
            serde_json::Value::Bool(b) => Scalar::Bool(b),
            serde_json::Value::Number(n) => Scalar::Number(n),
            serde_json::Value::String(s) => Scalar::Text(s),
            // Nested structures are not validated recursively; they are
            // compared by their compact JSON text.
            nested => Scalar::Text(nested.to_string()),
        }
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        match Number::from_f64(value) {
            Some(n) => Scalar::Number(n),
            None => Scalar::Text(value.to_string()),
        }
    }
}

macro_rules! scalar_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Scalar {
                fn from(value: $ty) -> Self {
                    Scalar::Number(Number::from(value))
                }
            }
        )*
    };
}

scalar_from_int!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize);

/// The value wrapped by a validator: one scalar or an ordered list of them.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Scalar(Scalar),
    List(Vec<Scalar>),
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Scalar::from).collect())
            }
            other => Value::Scalar(Scalar::from(other)),
        }
    }
}

impl From<Scalar> for Value {
    fn from(value: Scalar) -> Self {
        Value::Scalar(value)
    }
}

impl<T: Into<Scalar>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

macro_rules! value_from_scalar {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Scalar(Scalar::from(value))
                }
            }
        )*
    };
}

value_from_scalar!(String, &str, bool, f64, i8, i16, i32, i64, u8, u16, u32, u64, usize, isize);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalar_rendering() {
        assert_eq!(Scalar::Null.to_string(), "");
        assert_eq!(Scalar::from(true).to_string(), "true");
        assert_eq!(Scalar::from(42).to_string(), "42");
        assert_eq!(Scalar::from(-7i64).to_string(), "-7");
        assert_eq!(Scalar::from("abc").to_string(), "abc");
    }

    #[test]
    fn test_json_array_becomes_list() {
        let value = Value::from(json!(["a", 1, true]));
        assert_eq!(
            value,
            Value::List(vec![Scalar::from("a"), Scalar::from(1), Scalar::from(true)])
        );
    }

    #[test]
    fn test_nested_object_is_rendered_as_json() {
        let value = Value::from(json!({"inner": 1}));
        assert_eq!(value, Value::from(r#"{"inner":1}"#));
    }

    #[test]
    fn test_vec_conversion() {
        let value = Value::from(vec!["x", "y"]);
        assert_eq!(
            value,
            Value::List(vec![Scalar::from("x"), Scalar::from("y")])
        );
    }

    #[test]
    fn test_whole_floats_render_without_fraction() {
        assert_eq!(Scalar::from(json!(3.0)).to_string(), "3");
        assert_eq!(Scalar::from(-12.0).to_string(), "-12");
        assert_eq!(Scalar::from(2.5).to_string(), "2.5");
    }

    #[test]
    fn test_non_finite_float_falls_back_to_text() {
        assert_eq!(Scalar::from(f64::NAN), Scalar::Text("NaN".to_string()));
    }
}
