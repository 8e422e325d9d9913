//! Type compatibility rules
//!
//! Decides whether two types are identical, interchangeable through primitive
//! widening, or need a transformation, and which types can never be produced by the
//! default property-by-property strategy.

use crate::shape::{ShapeId, TypeInfo, TypeKind};
use std::sync::OnceLock;

macro_rules! widening_table {
    ($($primitive:ty),* $(,)?) => {
        [$( (ShapeId::of::<$primitive>(), ShapeId::of::<Option<$primitive>>()) ),*]
    };
}

/// Primitive / wrapper pairs. Widening never crosses primitive kinds.
fn widening_pairs() -> &'static [(ShapeId, ShapeId); 8] {
    static PAIRS: OnceLock<[(ShapeId, ShapeId); 8]> = OnceLock::new();
    PAIRS.get_or_init(|| widening_table!(bool, i32, f64, f32, i64, i16, char, i8))
}

/// True iff both identities denote the same type
pub fn identical(a: ShapeId, b: ShapeId) -> bool {
    a == b
}

/// True iff one side is a primitive and the other is its own wrapper
pub fn primitive_widenable(a: ShapeId, b: ShapeId) -> bool {
    widening_pairs()
        .iter()
        .any(|&(primitive, wrapper)| (a == primitive && b == wrapper) || (a == wrapper && b == primitive))
}

/// The primitive behind a wrapper identity, any other identity unchanged
///
/// Transmuters are registered for primitives; a wrapper value resolves through the
/// transmuter of its primitive.
pub fn unwrapped(id: ShapeId) -> ShapeId {
    widening_pairs()
        .iter()
        .find(|&&(_, wrapper)| id == wrapper)
        .map(|&(primitive, _)| primitive)
        .unwrap_or(id)
}

/// True iff a value of `origin` may be assigned to `target` without a transformation
pub fn assignable(origin: ShapeId, target: ShapeId) -> bool {
    identical(origin, target) || primitive_widenable(origin, target)
}

/// Arrays, list-like and map-like types can only be produced by explicit converters
pub fn unsupported_as_default_target(target: &TypeInfo) -> bool {
    matches!(
        target.kind(),
        TypeKind::Array | TypeKind::Sequence | TypeKind::Map
    )
}
