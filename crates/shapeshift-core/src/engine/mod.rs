//! Transformation engine
//!
//! [`Engine`] is the typed entry point: it maps an `O` into a `T` using the
//! transmuters registered in a caller-owned [`Repository`]. [`ValueEngine`] runs the
//! same procedure over type-erased [`Value`]s and is what the typed engine delegates
//! to.
//!
//! The engine keeps no state between calls. Two calls with equal inputs and an
//! unchanged repository produce equal outputs.
//!
//! Copyright (c) 2025 Shapeshift Team
//! Licensed under the Apache-2.0 license

pub mod transmute;

pub use transmute::ValueEngine;

use crate::config::EngineConfig;
use crate::format;
use crate::repository::Repository;
use crate::shape::{PropertyScanner, Transmutable, TypeInfo, Value};
use crate::{Error, Result};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// Maps values of `O` into values of `T`
///
/// ```
/// use shapeshift_core::{shape, Engine, Repository};
///
/// #[derive(Debug, Clone, Default)]
/// pub struct Source { pub name: String, pub age: i32 }
/// #[derive(Debug, Clone, Default)]
/// pub struct Dest { pub name: String, pub age: Option<i32> }
///
/// shape! { Source { name: String, age: i32 } }
/// shape! { Dest { name: String, age: Option<i32> } }
///
/// let repository = Repository::new();
/// let dest = Engine::<Source, Dest>::new(&repository)
///     .map(Source { name: "ada".into(), age: 36 })?
///     .unwrap();
/// assert_eq!(dest.age, Some(36));
/// # Ok::<(), shapeshift_core::Error>(())
/// ```
pub struct Engine<'r, O, T> {
    values: ValueEngine<'r>,
    _shapes: PhantomData<fn(O) -> T>,
}

impl<'r, O: Transmutable, T: Transmutable> Engine<'r, O, T> {
    pub fn new(repository: &'r Repository) -> Self {
        Self {
            values: ValueEngine::new(repository),
            _shapes: PhantomData,
        }
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.values = self.values.with_config(config);
        self
    }

    pub fn with_scanner(mut self, scanner: Arc<dyn PropertyScanner>) -> Self {
        self.values = self.values.with_scanner(scanner);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        self.values.config()
    }

    /// Map into a new `T`, deeply if the configuration says so
    pub fn map(&self, origin: impl Into<Option<O>>) -> Result<Option<T>> {
        self.map_with(origin, None, self.config().deep_by_default)
    }

    /// Map into an existing `T`
    pub fn map_into(&self, origin: impl Into<Option<O>>, target: T) -> Result<Option<T>> {
        self.map_with(origin, Some(target), self.config().deep_by_default)
    }

    /// Map into a new `T`, synthesizing mappings for nested shapes as needed
    pub fn map_deep(&self, origin: impl Into<Option<O>>) -> Result<Option<T>> {
        self.map_with(origin, None, true)
    }

    /// Map with every argument explicit
    ///
    /// An absent origin always yields an absent result.
    pub fn map_with(
        &self,
        origin: impl Into<Option<O>>,
        target: Option<T>,
        deep: bool,
    ) -> Result<Option<T>> {
        let origin = origin.into().map(Value::new);
        let target = target.map(Value::new);

        self.values
            .map_value(origin, &T::type_info(), target, deep)?
            .map(|value| {
                T::from_value(value).map_err(|rejected| {
                    Error::internal(format::message(
                        rejected.shape(),
                        T::type_info().id(),
                        "transmuter produced a value of another type",
                    ))
                })
            })
            .transpose()
    }

    /// Map a type-erased value, see [`ValueEngine::map_value`]
    pub fn map_value(
        &self,
        origin: Option<Value>,
        target_info: &TypeInfo,
        target: Option<Value>,
        deep: bool,
    ) -> Result<Option<Value>> {
        self.values.map_value(origin, target_info, target, deep)
    }
}

impl<O, T> fmt::Debug for Engine<'_, O, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("origin", &std::any::type_name::<O>())
            .field("target", &std::any::type_name::<T>())
            .field("values", &self.values)
            .finish()
    }
}
