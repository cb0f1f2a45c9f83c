// Inspection traits

use crate::{Field, Value};
use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::rc::Rc;
use std::sync::Arc;

/// Trait for types whose runtime value can be classified by rule functions.
///
/// `to_value` is callable with method syntax on every implementor,
/// including `Option<T>`.
pub trait Inspect {
    /// Describe the current value.
    fn to_value(&self) -> Value<'_>;
}

/// Trait for struct-shaped values with named, tagged fields.
///
/// Usually implemented with `#[derive(Record)]`.
pub trait Record {
    /// Declared fields in declaration order.
    fn fields(&self) -> Vec<Field<'_>>;

    /// Name used in logs and debug output.
    fn record_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

macro_rules! inspect_int {
    ($($t:ty),*) => {
        $(
            impl Inspect for $t {
                fn to_value(&self) -> Value<'_> {
                    Value::Int(*self as i64)
                }
            }
        )*
    };
}

macro_rules! inspect_uint {
    ($($t:ty),*) => {
        $(
            impl Inspect for $t {
                fn to_value(&self) -> Value<'_> {
                    Value::Uint(*self as u64)
                }
            }
        )*
    };
}

inspect_int!(i8, i16, i32, i64, isize);
inspect_uint!(u8, u16, u32, u64, usize);

impl Inspect for f32 {
    fn to_value(&self) -> Value<'_> {
        Value::Float(f64::from(*self))
    }
}

impl Inspect for f64 {
    fn to_value(&self) -> Value<'_> {
        Value::Float(*self)
    }
}

impl Inspect for bool {
    fn to_value(&self) -> Value<'_> {
        Value::Bool(*self)
    }
}

impl Inspect for str {
    fn to_value(&self) -> Value<'_> {
        Value::Str(self)
    }
}

impl Inspect for String {
    fn to_value(&self) -> Value<'_> {
        Value::Str(self.as_str())
    }
}

impl Inspect for Cow<'_, str> {
    fn to_value(&self) -> Value<'_> {
        Value::Str(&**self)
    }
}

macro_rules! inspect_collection {
    ($($t:ident<$($p:ident),+>),*) => {
        $(
            impl<$($p),+> Inspect for $t<$($p),+> {
                fn to_value(&self) -> Value<'_> {
                    Value::Collection(self.len())
                }
            }
        )*
    };
}

inspect_collection!(Vec<T>, VecDeque<T>, BTreeSet<T>, BTreeMap<K, V>);

impl<T, S> Inspect for HashSet<T, S> {
    fn to_value(&self) -> Value<'_> {
        Value::Collection(self.len())
    }
}

impl<K, V, S> Inspect for HashMap<K, V, S> {
    fn to_value(&self) -> Value<'_> {
        Value::Collection(self.len())
    }
}

impl<T> Inspect for [T] {
    fn to_value(&self) -> Value<'_> {
        Value::Collection(self.len())
    }
}

impl<T, const N: usize> Inspect for [T; N] {
    fn to_value(&self) -> Value<'_> {
        Value::Collection(N)
    }
}

impl<T: Inspect> Inspect for Option<T> {
    fn to_value(&self) -> Value<'_> {
        Value::pointer(self.as_ref().map(|inner| inner.to_value()))
    }
}

impl<T: Inspect + ?Sized> Inspect for Box<T> {
    fn to_value(&self) -> Value<'_> {
        Value::pointer(Some((**self).to_value()))
    }
}

impl<T: Inspect + ?Sized> Inspect for Rc<T> {
    fn to_value(&self) -> Value<'_> {
        Value::pointer(Some((**self).to_value()))
    }
}

impl<T: Inspect + ?Sized> Inspect for Arc<T> {
    fn to_value(&self) -> Value<'_> {
        Value::pointer(Some((**self).to_value()))
    }
}

impl<T: Inspect + ?Sized> Inspect for &T {
    fn to_value(&self) -> Value<'_> {
        (**self).to_value()
    }
}

impl<T: Inspect + ?Sized> Inspect for &mut T {
    fn to_value(&self) -> Value<'_> {
        (**self).to_value()
    }
}

impl Inspect for Value<'_> {
    fn to_value(&self) -> Value<'_> {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Kind;

    #[test]
    fn test_numeric_families() {
        assert_eq!((-5i8).to_value().as_i64(), Some(-5));
        assert_eq!(42usize.to_value().as_u64(), Some(42));
        assert_eq!(1.5f32.to_value().as_f64(), Some(1.5));
        assert_eq!(true.to_value().kind(), Kind::Bool);
    }

    #[test]
    fn test_strings_and_collections() {
        assert_eq!("abc".to_value().as_str(), Some("abc"));
        assert_eq!(String::from("héllo").to_value().as_str(), Some("héllo"));
        assert_eq!(vec![1, 2, 3].to_value().collection_len(), Some(3));
        assert_eq!([0u8; 4].to_value().collection_len(), Some(4));

        let mut map = HashMap::new();
        map.insert("a", 1);
        assert_eq!(map.to_value().collection_len(), Some(1));
    }

    #[test]
    fn test_pointers() {
        let none: Option<i32> = None;
        assert!(none.to_value().is_nil());

        let some = Some(3u16);
        let value = some.to_value();
        assert_eq!(value.kind(), Kind::Pointer);
        assert_eq!(value.indirect().and_then(Value::as_u64), Some(3));

        let boxed = Box::new(String::from("x"));
        assert_eq!(boxed.to_value().indirect().and_then(Value::as_str), Some("x"));
    }

    #[test]
    fn test_references_are_transparent() {
        let n = 9i64;
        let r = &&n;
        assert_eq!(r.to_value().as_i64(), Some(9));
    }
}
