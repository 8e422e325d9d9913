//! Shape description layer
//!
//! Shapes are plain Rust structs described at build time with the [`shape!`](crate::shape!)
//! macro. The description gives the engine what a reflective runtime would: the list of
//! properties with their read and write capabilities, the declared type of each property,
//! and a way to construct a default instance.
//!
//! Values move through the engine as [`Value`]s, a boxed payload tagged with the
//! [`TypeInfo`] of its runtime type.
//!
//! # Module Organization
//!
//! - [`descriptor`] - Shape and property descriptors, the `shape!` macro
//! - [`property`] - Property storage rules for scalars, wrappers and collections
//! - [`scanner`] - The property scanning capability consumed by mappers
//!
//! Copyright (c) 2025 Shapeshift Team
//! Licensed under the Apache-2.0 license

pub mod descriptor;
pub mod property;
pub mod scanner;

pub use descriptor::{
    AccessFault, Factory, InstanceResult, PropertyDescriptor, Reader, Shape, ShapeDescriptor,
    Writer,
};
pub use property::{Property, Transmutable};
pub use scanner::{DescriptorScanner, PropertyScanner};

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Identity of a declared type
///
/// Two identities are equal iff they denote the same type. The type name is kept
/// only for messages.
#[derive(Clone, Copy)]
pub struct ShapeId {
    id: TypeId,
    name: &'static str,
}

impl ShapeId {
    /// Identity of `T`
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Fully qualified type name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Type name without module paths, e.g. `Option<i32>` or `Dest`
    pub fn short_name(&self) -> String {
        let mut short = String::with_capacity(self.name.len());
        let mut segment = String::new();
        for c in self.name.chars() {
            match c {
                ':' => segment.clear(),
                '<' | '>' | ',' | ' ' | '[' | ']' | ';' | '(' | ')' | '&' => {
                    short.push_str(&segment);
                    segment.clear();
                    short.push(c);
                }
                _ => segment.push(c),
            }
        }
        short.push_str(&segment);
        short
    }
}

impl PartialEq for ShapeId {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ShapeId {}

impl Hash for ShapeId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ShapeId({})", self.name)
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Coarse classification of a type, as far as mapping is concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// One of the eight primitives with a wrapper counterpart
    Primitive,
    /// `Option<P>` of a primitive `P`, the nullable counterpart of `P`
    Wrapper,
    /// Any other leaf value (strings, unsigned integers, ...)
    Scalar,
    /// List-like or set-like collections
    Sequence,
    /// Map-like collections
    Map,
    /// Fixed-size arrays
    Array,
    /// A struct described with `shape!`
    Shape,
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeKind::Primitive => write!(f, "primitive"),
            TypeKind::Wrapper => write!(f, "wrapper"),
            TypeKind::Scalar => write!(f, "scalar"),
            TypeKind::Sequence => write!(f, "sequence"),
            TypeKind::Map => write!(f, "map"),
            TypeKind::Array => write!(f, "array"),
            TypeKind::Shape => write!(f, "shape"),
        }
    }
}

/// Runtime type descriptor: identity, kind, and the shape description if any
#[derive(Debug, Clone, Copy)]
pub struct TypeInfo {
    id: ShapeId,
    kind: TypeKind,
    descriptor: Option<fn() -> &'static ShapeDescriptor>,
}

impl TypeInfo {
    /// Type info of a leaf type of the given kind
    pub fn leaf<T: ?Sized + 'static>(kind: TypeKind) -> Self {
        Self {
            id: ShapeId::of::<T>(),
            kind,
            descriptor: None,
        }
    }

    /// Type info of a described shape
    pub fn shape<T: Shape>() -> Self {
        Self {
            id: ShapeId::of::<T>(),
            kind: TypeKind::Shape,
            descriptor: Some(T::descriptor as fn() -> &'static ShapeDescriptor),
        }
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        self.id.name()
    }

    /// The static description of this type, present for shapes only
    pub fn descriptor(&self) -> Option<&'static ShapeDescriptor> {
        self.descriptor.map(|describe| describe())
    }
}

impl PartialEq for TypeInfo {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeInfo {}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.id, f)
    }
}

/// A type-erased value together with its runtime type
///
/// Wrapper-typed values (`Option<P>` reads) carry the bare primitive `P` as payload,
/// which is what lets a widened pass-through be written into either form.
pub struct Value {
    info: TypeInfo,
    payload: Box<dyn Any + Send>,
}

impl Value {
    /// Wrap a value, tagging it with its own type info
    pub fn new<T: Transmutable>(value: T) -> Self {
        Self {
            info: T::type_info(),
            payload: Box::new(value),
        }
    }

    /// Wrap a payload under an explicit type info
    pub fn with_info<T: Any + Send>(info: TypeInfo, payload: T) -> Self {
        Self {
            info,
            payload: Box::new(payload),
        }
    }

    pub(crate) fn from_boxed(info: TypeInfo, payload: Box<dyn Any + Send>) -> Self {
        Self { info, payload }
    }

    pub fn info(&self) -> &TypeInfo {
        &self.info
    }

    pub fn shape(&self) -> ShapeId {
        self.info.id
    }

    /// Take the payload out as `T`, handing the value back on mismatch
    pub fn downcast<T: Any>(self) -> Result<T, Value> {
        let info = self.info;
        match self.payload.downcast::<T>() {
            Ok(payload) => Ok(*payload),
            Err(payload) => Err(Value { info, payload }),
        }
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.payload.downcast_ref::<T>()
    }

    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.payload.downcast_mut::<T>()
    }

    pub(crate) fn as_any(&self) -> &dyn Any {
        &*self.payload
    }

    pub(crate) fn as_any_mut(&mut self) -> &mut dyn Any {
        &mut *self.payload
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Value")
            .field("shape", &self.info.id)
            .field("kind", &self.info.kind)
            .finish_non_exhaustive()
    }
}
