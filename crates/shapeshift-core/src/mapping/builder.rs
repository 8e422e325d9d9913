//! Fluent configuration of a [`Mapper`]
//!
//! Copyright (c) 2025 Shapeshift Team
//! Licensed under the Apache-2.0 license

use super::Mapper;
use crate::format;
use crate::shape::{DescriptorScanner, PropertyScanner, Transmutable};
use crate::{Error, Result};
use std::any::Any;
use std::collections::BTreeSet;
use std::marker::PhantomData;
use std::sync::Arc;

/// Builder for a mapping between `O` and `T`
///
/// ```
/// use shapeshift_core::{shape, MapperBuilder};
///
/// #[derive(Debug, Clone, Default)]
/// pub struct Source { pub nickname: String }
/// #[derive(Debug, Clone, Default)]
/// pub struct Dest { pub name: String }
///
/// shape! { Source { nickname: String } }
/// shape! { Dest { name: String } }
///
/// let mapper = MapperBuilder::<Source, Dest>::new()?
///     .customize_name("nickname", "name")?
///     .build();
/// assert_eq!(mapper.compute_access_pairs()?.len(), 1);
/// # Ok::<(), shapeshift_core::Error>(())
/// ```
pub struct MapperBuilder<O, T> {
    mapper: Mapper,
    origin_names: BTreeSet<&'static str>,
    target_names: BTreeSet<&'static str>,
    _shapes: PhantomData<fn(O) -> T>,
}

impl<O: Transmutable, T: Transmutable> MapperBuilder<O, T> {
    /// Start a mapping using the default descriptor scanner
    ///
    /// Fails with `InvalidArgument` when `O` and `T` are the same type.
    pub fn new() -> Result<Self> {
        Self::with_scanner(Arc::new(DescriptorScanner))
    }

    /// Start a mapping using a custom property scanner
    pub fn with_scanner(scanner: Arc<dyn PropertyScanner>) -> Result<Self> {
        let origin = O::type_info();
        let target = T::type_info();
        let origin_names = scanner.declared_names(&origin);
        let target_names = scanner.declared_names(&target);
        let mapper = Mapper::default_for(origin, target, scanner)?;

        Ok(Self {
            mapper,
            origin_names,
            target_names,
            _shapes: PhantomData,
        })
    }

    /// Feed `target_field` from `origin_field`
    ///
    /// Both fields must be declared by their shapes, and an origin field can only be
    /// renamed once.
    pub fn customize_name(mut self, origin_field: &str, target_field: &str) -> Result<Self> {
        self.require_declared(origin_field, self.origin_names.contains(origin_field), "origin")?;
        self.require_declared(target_field, self.target_names.contains(target_field), "target")?;

        if let Some(previous) = self.mapper.renames().get(origin_field) {
            return Err(Error::invalid_argument(self.message(&format!(
                "field {} is already renamed to {}",
                origin_field, previous
            ))));
        }

        self.mapper
            .insert_rename(origin_field.to_string(), target_field.to_string());
        Ok(self)
    }

    /// Exclude a field declared by at least one of the two shapes
    pub fn exclude_field(mut self, field: &str) -> Result<Self> {
        let declared = self.origin_names.contains(field) || self.target_names.contains(field);
        self.require_declared(field, declared, "origin or target")?;
        self.mapper.insert_exclusion(field.to_string());
        Ok(self)
    }

    /// Exclude a field name without checking that either shape declares it
    pub fn force_exclude_field(mut self, field: &str) -> Self {
        self.mapper.insert_exclusion(field.to_string());
        self
    }

    /// Exclude every declared property of both shapes
    pub fn exclude_all_fields(mut self) -> Self {
        for field in self.origin_names.iter().chain(self.target_names.iter()) {
            self.mapper.insert_exclusion(field.to_string());
        }
        self
    }

    /// Run `post_process` after the automatic copy, with both instances in hand
    pub fn customize_post_process<F>(mut self, post_process: F) -> Self
    where
        F: Fn(&O, &mut T) + Send + Sync + 'static,
    {
        let message = self.message("post-process invoked on instances of other shapes");
        self.mapper
            .set_post_process(Arc::new(move |origin: &dyn Any, target: &mut dyn Any| {
                match (origin.downcast_ref::<O>(), target.downcast_mut::<T>()) {
                    (Some(origin), Some(target)) => {
                        post_process(origin, target);
                        Ok(())
                    }
                    _ => Err(Error::internal(message.clone())),
                }
            }));
        self
    }

    pub fn build(self) -> Mapper {
        self.mapper
    }

    fn require_declared(&self, field: &str, declared: bool, side: &str) -> Result<()> {
        if declared {
            return Ok(());
        }
        Err(Error::FieldNotFound {
            field: field.to_string(),
            message: self.message(&format!("{} field {} is not declared", side, field)),
        })
    }

    fn message(&self, detail: &str) -> String {
        format::message(self.mapper.origin().id(), self.mapper.target().id(), detail)
    }
}
