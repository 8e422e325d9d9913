//! Property storage rules
//!
//! [`Transmutable`] covers every type that can travel through the engine as a
//! [`Value`]. [`Property`] covers every type a shape field can be declared with and
//! defines how such a field is read (possibly as absent) and written.
//!
//! Fields declared as `Option<T>` are nullable: `None` reads as absent and writing
//! always stores `Some`. For the eight primitives that have a wrapper counterpart,
//! `Option<P>` also changes the reported property type to the wrapper shape.
//!
//! Copyright (c) 2025 Shapeshift Team
//! Licensed under the Apache-2.0 license

use super::{TypeInfo, TypeKind, Value};
use std::any::Any;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList, VecDeque};

/// A type that can be handed to and produced by the engine
pub trait Transmutable: Any + Send + Sized {
    /// Type info of a value of this type
    fn type_info() -> TypeInfo;

    /// Type info reported by a field declared as `Option<Self>`
    fn optional_type_info() -> TypeInfo {
        Self::type_info()
    }

    /// Recover a typed value, handing the value back on mismatch
    fn from_value(value: Value) -> Result<Self, Value> {
        value.downcast::<Self>()
    }
}

/// A type a shape field can be declared with
pub trait Property: Send + 'static {
    /// Declared type of a field of this type
    fn property_type() -> TypeInfo
    where
        Self: Sized;

    /// Current value of the field, `None` when absent
    fn read(&self) -> Option<Value>;

    /// Store a value, handing it back if it cannot be assigned
    fn write(&mut self, value: Value) -> Result<(), Value>;
}

/// Read helper for fields whose type is always present
pub fn read_present<T: Transmutable + Clone>(field: &T) -> Option<Value> {
    Some(Value::new(field.clone()))
}

/// Write helper for fields whose type is always present
pub fn write_present<T: Transmutable>(field: &mut T, value: Value) -> Result<(), Value> {
    *field = T::from_value(value)?;
    Ok(())
}

impl<T: Transmutable + Clone> Property for Option<T> {
    fn property_type() -> TypeInfo {
        T::optional_type_info()
    }

    fn read(&self) -> Option<Value> {
        self.as_ref()
            .map(|value| Value::with_info(T::optional_type_info(), value.clone()))
    }

    fn write(&mut self, value: Value) -> Result<(), Value> {
        *self = Some(T::from_value(value)?);
        Ok(())
    }
}

macro_rules! primitive_properties {
    ($($primitive:ty),* $(,)?) => {
        $(
            impl Transmutable for $primitive {
                fn type_info() -> TypeInfo {
                    TypeInfo::leaf::<$primitive>(TypeKind::Primitive)
                }

                fn optional_type_info() -> TypeInfo {
                    TypeInfo::leaf::<Option<$primitive>>(TypeKind::Wrapper)
                }
            }

            impl Property for $primitive {
                fn property_type() -> TypeInfo {
                    <$primitive as Transmutable>::type_info()
                }

                fn read(&self) -> Option<Value> {
                    read_present(self)
                }

                fn write(&mut self, value: Value) -> Result<(), Value> {
                    write_present(self, value)
                }
            }
        )*
    };
}

macro_rules! scalar_properties {
    ($($scalar:ty),* $(,)?) => {
        $(
            impl Transmutable for $scalar {
                fn type_info() -> TypeInfo {
                    TypeInfo::leaf::<$scalar>(TypeKind::Scalar)
                }
            }

            impl Property for $scalar {
                fn property_type() -> TypeInfo {
                    <$scalar as Transmutable>::type_info()
                }

                fn read(&self) -> Option<Value> {
                    read_present(self)
                }

                fn write(&mut self, value: Value) -> Result<(), Value> {
                    write_present(self, value)
                }
            }
        )*
    };
}

primitive_properties!(bool, i32, f64, f32, i64, i16, char, i8);
scalar_properties!(String, u8, u16, u32, u64, u128, usize, i128, isize);

macro_rules! collection_properties {
    ($kind:expr => $($collection:ident<$($param:ident),+>),* $(,)?) => {
        $(
            impl<$($param: Clone + Send + 'static),+> Transmutable for $collection<$($param),+> {
                fn type_info() -> TypeInfo {
                    TypeInfo::leaf::<$collection<$($param),+>>($kind)
                }
            }

            impl<$($param: Clone + Send + 'static),+> Property for $collection<$($param),+> {
                fn property_type() -> TypeInfo {
                    <Self as Transmutable>::type_info()
                }

                fn read(&self) -> Option<Value> {
                    read_present(self)
                }

                fn write(&mut self, value: Value) -> Result<(), Value> {
                    write_present(self, value)
                }
            }
        )*
    };
}

collection_properties!(TypeKind::Sequence =>
    Vec<T>, VecDeque<T>, LinkedList<T>, HashSet<T>, BTreeSet<T>,
);
collection_properties!(TypeKind::Map => HashMap<K, V>, BTreeMap<K, V>);

impl<T: Clone + Send + 'static, const N: usize> Transmutable for [T; N] {
    fn type_info() -> TypeInfo {
        TypeInfo::leaf::<[T; N]>(TypeKind::Array)
    }
}

impl<T: Clone + Send + 'static, const N: usize> Property for [T; N] {
    fn property_type() -> TypeInfo {
        <Self as Transmutable>::type_info()
    }

    fn read(&self) -> Option<Value> {
        read_present(self)
    }

    fn write(&mut self, value: Value) -> Result<(), Value> {
        write_present(self, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::ShapeId;

    #[test]
    fn test_primitive_and_wrapper_property_types() {
        assert_eq!(<i32 as Property>::property_type().id(), ShapeId::of::<i32>());
        assert_eq!(<i32 as Property>::property_type().kind(), TypeKind::Primitive);
        assert_eq!(
            <Option<i32> as Property>::property_type().id(),
            ShapeId::of::<Option<i32>>()
        );
        assert_eq!(
            <Option<i32> as Property>::property_type().kind(),
            TypeKind::Wrapper
        );
    }

    #[test]
    fn test_optional_scalar_reports_scalar_type() {
        assert_eq!(
            <Option<String> as Property>::property_type().id(),
            ShapeId::of::<String>()
        );
    }

    #[test]
    fn test_optional_field_reads_absent() {
        let field: Option<String> = None;
        assert!(field.read().is_none());

        let field = Some("x".to_string());
        let value = field.read().unwrap();
        assert_eq!(value.downcast::<String>().unwrap(), "x");
    }

    #[test]
    fn test_primitive_accepts_wrapper_value_and_back() {
        let mut primitive = 0i64;
        let wrapper: Option<i64> = Some(9);
        primitive.write(wrapper.read().unwrap()).unwrap();
        assert_eq!(primitive, 9);

        let mut wrapper: Option<i64> = None;
        wrapper.write(primitive.read().unwrap()).unwrap();
        assert_eq!(wrapper, Some(9));
    }

    #[test]
    fn test_write_rejects_mismatched_value() {
        let mut field = 0i32;
        let rejected = field.write(Value::new("nope".to_string())).unwrap_err();
        assert_eq!(rejected.shape(), ShapeId::of::<String>());
        assert_eq!(field, 0);
    }

    #[test]
    fn test_collection_kinds() {
        assert_eq!(<Vec<u8> as Transmutable>::type_info().kind(), TypeKind::Sequence);
        assert_eq!(
            <HashMap<String, i32> as Transmutable>::type_info().kind(),
            TypeKind::Map
        );
        assert_eq!(<[i32; 3] as Transmutable>::type_info().kind(), TypeKind::Array);
    }
}
