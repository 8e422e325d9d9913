//! Converters: whole-value transformations supplied by the caller
//!
//! A converter owns the construction of its result. When one is registered for a
//! pair, the engine never looks at properties and ignores any supplied target.
//!
//! Copyright (c) 2025 Shapeshift Team
//! Licensed under the Apache-2.0 license

use crate::format;
use crate::shape::{Transmutable, TypeInfo, Value};
use crate::{Error, Result};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

type ConvertFn = Arc<dyn Fn(Value) -> Result<Value> + Send + Sync>;

/// Type-erased conversion from one shape to another
#[derive(Clone)]
pub struct Converter {
    origin: TypeInfo,
    target: TypeInfo,
    convert: ConvertFn,
}

impl Converter {
    /// Converter backed by a plain function
    pub fn new<O, T, F>(convert: F) -> Self
    where
        O: Transmutable,
        T: Transmutable,
        F: Fn(O) -> T + Send + Sync + 'static,
    {
        let origin = O::type_info();
        let target = T::type_info();
        let convert: ConvertFn = Arc::new(move |value: Value| -> Result<Value> {
            let origin_value = O::from_value(value).map_err(|rejected| {
                Error::internal(format::message(
                    origin.id(),
                    target.id(),
                    &format!("converter received a value of type {}", rejected.shape()),
                ))
            })?;
            Ok(Value::new(convert(origin_value)))
        });

        Self {
            origin,
            target,
            convert,
        }
    }

    pub fn origin(&self) -> &TypeInfo {
        &self.origin
    }

    pub fn target(&self) -> &TypeInfo {
        &self.target
    }

    pub fn convert(&self, origin: Value) -> Result<Value> {
        (self.convert)(origin)
    }
}

impl fmt::Debug for Converter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Converter")
            .field("origin", &self.origin.id())
            .field("target", &self.target.id())
            .finish_non_exhaustive()
    }
}

/// Builder for a [`Converter`] whose function is supplied separately
pub struct ConverterBuilder<O, T> {
    convert: Option<Converter>,
    _shapes: PhantomData<fn(O) -> T>,
}

impl<O: Transmutable, T: Transmutable> ConverterBuilder<O, T> {
    pub fn new() -> Self {
        Self {
            convert: None,
            _shapes: PhantomData,
        }
    }

    pub fn convert_with<F>(mut self, convert: F) -> Self
    where
        F: Fn(O) -> T + Send + Sync + 'static,
    {
        self.convert = Some(Converter::new(convert));
        self
    }

    /// Fails with `InvalidArgument` if no conversion function was set
    pub fn build(self) -> Result<Converter> {
        self.convert.ok_or_else(|| {
            Error::invalid_argument(format::message(
                O::type_info().id(),
                T::type_info().id(),
                "converter is not defined",
            ))
        })
    }
}

impl<O: Transmutable, T: Transmutable> Default for ConverterBuilder<O, T> {
    fn default() -> Self {
        Self::new()
    }
}
