//! Property access pairs
//!
//! Copyright (c) 2025 Shapeshift Team
//! Licensed under the Apache-2.0 license

use crate::shape::{AccessFault, PropertyDescriptor, Reader, TypeInfo, Value, Writer};
use std::any::Any;

/// One origin-property / target-property correspondence
///
/// A pair only exists once the origin side is known to be readable and the target
/// side writable, so both accessors are held unconditionally.
#[derive(Debug, Clone, Copy)]
pub struct PropertyAccessPair {
    origin: PropertyDescriptor,
    target: PropertyDescriptor,
    reader: Reader,
    writer: Writer,
}

impl PropertyAccessPair {
    pub(crate) fn new(
        origin: PropertyDescriptor,
        target: PropertyDescriptor,
        reader: Reader,
        writer: Writer,
    ) -> Self {
        Self {
            origin,
            target,
            reader,
            writer,
        }
    }

    pub fn origin(&self) -> &PropertyDescriptor {
        &self.origin
    }

    pub fn target(&self) -> &PropertyDescriptor {
        &self.target
    }

    pub fn origin_name(&self) -> &'static str {
        self.origin.name()
    }

    pub fn target_name(&self) -> &'static str {
        self.target.name()
    }

    pub fn origin_type(&self) -> &TypeInfo {
        self.origin.property_type()
    }

    pub fn target_type(&self) -> &TypeInfo {
        self.target.property_type()
    }

    /// Read the origin property of `origin`
    pub fn read(&self, origin: &dyn Any) -> Result<Option<Value>, AccessFault> {
        (self.reader)(origin)
    }

    /// Write `value` into the target property of `target`
    pub fn write(&self, target: &mut dyn Any, value: Value) -> Result<(), AccessFault> {
        (self.writer)(target, value)
    }
}

impl PartialEq for PropertyAccessPair {
    fn eq(&self, other: &Self) -> bool {
        self.origin_name() == other.origin_name()
            && self.target_name() == other.target_name()
            && self.origin_type() == other.origin_type()
            && self.target_type() == other.target_type()
    }
}

impl Eq for PropertyAccessPair {}
