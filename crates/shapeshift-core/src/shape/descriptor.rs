//! Shape and property descriptors
//!
//! A [`ShapeDescriptor`] is the static description of a struct: its properties in
//! declaration order and its default constructor. Descriptors are emitted by the
//! [`shape!`](crate::shape!) macro and live for the whole process.
//!
//! Copyright (c) 2025 Shapeshift Team
//! Licensed under the Apache-2.0 license

use super::{Property, ShapeId, Transmutable, TypeInfo, Value};
use std::any::Any;
use thiserror::Error;

/// Outcome of a shape factory
pub type InstanceResult = Result<Box<dyn Any + Send>, anyhow::Error>;

/// Constructor of a default instance
pub type Factory = fn() -> InstanceResult;

/// Read capability of a property
pub type Reader = fn(&dyn Any) -> Result<Option<Value>, AccessFault>;

/// Write capability of a property
pub type Writer = fn(&mut dyn Any, Value) -> Result<(), AccessFault>;

/// Failure of a single accessor invocation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AccessFault {
    /// The accessor was invoked on an instance of another shape
    #[error("accessor of {expected} invoked on a different shape")]
    Receiver { expected: &'static str },

    /// The value handed to a writer cannot be stored in the property
    #[error("cannot assign a value of type {found} to a property of type {expected}")]
    Assignment {
        expected: &'static str,
        found: &'static str,
    },
}

impl AccessFault {
    pub fn assignment<T: ?Sized + 'static>(rejected: &Value) -> Self {
        AccessFault::Assignment {
            expected: std::any::type_name::<T>(),
            found: rejected.shape().name(),
        }
    }
}

/// Downcast an accessor receiver to its shape
pub fn receiver<S: Any>(this: &dyn Any) -> Result<&S, AccessFault> {
    this.downcast_ref::<S>().ok_or(AccessFault::Receiver {
        expected: std::any::type_name::<S>(),
    })
}

/// Mutable counterpart of [`receiver`]
pub fn receiver_mut<S: Any>(this: &mut dyn Any) -> Result<&mut S, AccessFault> {
    this.downcast_mut::<S>().ok_or(AccessFault::Receiver {
        expected: std::any::type_name::<S>(),
    })
}

/// A named, typed property with independent read and write capabilities
#[derive(Debug, Clone, Copy)]
pub struct PropertyDescriptor {
    name: &'static str,
    property_type: TypeInfo,
    reader: Option<Reader>,
    writer: Option<Writer>,
}

impl PropertyDescriptor {
    pub fn new(
        name: &'static str,
        property_type: TypeInfo,
        reader: Option<Reader>,
        writer: Option<Writer>,
    ) -> Self {
        Self {
            name,
            property_type,
            reader,
            writer,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn property_type(&self) -> &TypeInfo {
        &self.property_type
    }

    pub fn reader(&self) -> Option<Reader> {
        self.reader
    }

    pub fn writer(&self) -> Option<Writer> {
        self.writer
    }

    pub fn is_readable(&self) -> bool {
        self.reader.is_some()
    }

    pub fn is_writable(&self) -> bool {
        self.writer.is_some()
    }
}

/// Static description of a shape
#[derive(Debug)]
pub struct ShapeDescriptor {
    info: TypeInfo,
    factory: Option<Factory>,
    properties: Vec<PropertyDescriptor>,
}

impl ShapeDescriptor {
    pub fn new(info: TypeInfo, factory: Option<Factory>, properties: Vec<PropertyDescriptor>) -> Self {
        Self {
            info,
            factory,
            properties,
        }
    }

    pub fn id(&self) -> ShapeId {
        self.info.id()
    }

    pub fn info(&self) -> &TypeInfo {
        &self.info
    }

    /// Properties in declaration order
    pub fn properties(&self) -> &[PropertyDescriptor] {
        &self.properties
    }

    pub fn property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn factory(&self) -> Option<Factory> {
        self.factory
    }
}

/// A struct described with [`shape!`](crate::shape!)
pub trait Shape: Transmutable + Property {
    fn descriptor() -> &'static ShapeDescriptor;
}

/// Describe an existing struct as a shape
///
/// Every listed field becomes a property with read and write capability unless it is
/// suffixed with `=> read_only` or `=> write_only`. Shapes are instantiated through
/// `Default` unless `#[factory = path]` names a `fn() -> Result<Self, E>` or
/// `#[no_default]` declares that the shape cannot be constructed by the engine.
///
/// ```
/// use shapeshift_core::shape;
///
/// #[derive(Debug, Clone, Default)]
/// pub struct Source {
///     pub name: String,
///     pub age: i32,
///     pub secret: Option<String>,
/// }
///
/// shape! {
///     Source {
///         name: String,
///         age: i32,
///         secret: Option<String> => write_only,
///     }
/// }
/// ```
#[macro_export]
macro_rules! shape {
    (#[no_default] $name:ident { $($fields:tt)* }) => {
        $crate::shape!(@describe $name, ::std::option::Option::None, { $($fields)* });
    };
    (#[factory = $factory:path] $name:ident { $($fields:tt)* }) => {
        $crate::shape!(@describe $name, {
            fn instantiate() -> $crate::shape::InstanceResult {
                $factory()
                    .map(|instance: $name| {
                        ::std::boxed::Box::new(instance)
                            as ::std::boxed::Box<dyn ::std::any::Any + ::std::marker::Send>
                    })
                    .map_err(::std::convert::Into::into)
            }
            ::std::option::Option::Some(instantiate as $crate::shape::Factory)
        }, { $($fields)* });
    };
    ($name:ident { $($fields:tt)* }) => {
        $crate::shape!(@describe $name, {
            fn instantiate() -> $crate::shape::InstanceResult {
                ::std::result::Result::Ok(::std::boxed::Box::new(
                    <$name as ::std::default::Default>::default(),
                ))
            }
            ::std::option::Option::Some(instantiate as $crate::shape::Factory)
        }, { $($fields)* });
    };
    (@describe $name:ident, $factory:expr, {
        $( $field:ident : $ty:ty $(=> $access:ident)? ),* $(,)?
    }) => {
        impl $crate::shape::Transmutable for $name {
            fn type_info() -> $crate::shape::TypeInfo {
                $crate::shape::TypeInfo::shape::<$name>()
            }
        }

        impl $crate::shape::Property for $name {
            fn property_type() -> $crate::shape::TypeInfo {
                $crate::shape::TypeInfo::shape::<$name>()
            }

            fn read(&self) -> ::std::option::Option<$crate::shape::Value> {
                $crate::shape::property::read_present(self)
            }

            fn write(
                &mut self,
                value: $crate::shape::Value,
            ) -> ::std::result::Result<(), $crate::shape::Value> {
                $crate::shape::property::write_present(self, value)
            }
        }

        impl $crate::shape::Shape for $name {
            fn descriptor() -> &'static $crate::shape::ShapeDescriptor {
                static DESCRIPTOR: ::std::sync::OnceLock<$crate::shape::ShapeDescriptor> =
                    ::std::sync::OnceLock::new();
                DESCRIPTOR.get_or_init(|| {
                    $crate::shape::ShapeDescriptor::new(
                        $crate::shape::TypeInfo::shape::<$name>(),
                        $factory,
                        ::std::vec![
                            $( $crate::shape!(@property $name, $field, $ty $(, $access)?) ),*
                        ],
                    )
                })
            }
        }
    };
    (@property $name:ident, $field:ident, $ty:ty) => {
        $crate::shape::PropertyDescriptor::new(
            ::std::stringify!($field),
            <$ty as $crate::shape::Property>::property_type(),
            ::std::option::Option::Some($crate::shape!(@reader $name, $field)),
            ::std::option::Option::Some($crate::shape!(@writer $name, $field, $ty)),
        )
    };
    (@property $name:ident, $field:ident, $ty:ty, read_only) => {
        $crate::shape::PropertyDescriptor::new(
            ::std::stringify!($field),
            <$ty as $crate::shape::Property>::property_type(),
            ::std::option::Option::Some($crate::shape!(@reader $name, $field)),
            ::std::option::Option::None,
        )
    };
    (@property $name:ident, $field:ident, $ty:ty, write_only) => {
        $crate::shape::PropertyDescriptor::new(
            ::std::stringify!($field),
            <$ty as $crate::shape::Property>::property_type(),
            ::std::option::Option::None,
            ::std::option::Option::Some($crate::shape!(@writer $name, $field, $ty)),
        )
    };
    (@reader $name:ident, $field:ident) => {{
        fn read(
            this: &dyn ::std::any::Any,
        ) -> ::std::result::Result<
            ::std::option::Option<$crate::shape::Value>,
            $crate::shape::AccessFault,
        > {
            let this = $crate::shape::descriptor::receiver::<$name>(this)?;
            ::std::result::Result::Ok($crate::shape::Property::read(&this.$field))
        }
        read as $crate::shape::Reader
    }};
    (@writer $name:ident, $field:ident, $ty:ty) => {{
        fn write(
            this: &mut dyn ::std::any::Any,
            value: $crate::shape::Value,
        ) -> ::std::result::Result<(), $crate::shape::AccessFault> {
            let this = $crate::shape::descriptor::receiver_mut::<$name>(this)?;
            $crate::shape::Property::write(&mut this.$field, value)
                .map_err(|rejected| $crate::shape::AccessFault::assignment::<$ty>(&rejected))
        }
        write as $crate::shape::Writer
    }};
}
