//! Transmuter registry
//!
//! A [`Repository`] stores at most one [`Transmuter`] per ordered pair of shapes.
//! It is created by the caller and handed to every engine call that should see its
//! registrations; there is no process-wide registry.
//!
//! Copyright (c) 2025 Shapeshift Team
//! Licensed under the Apache-2.0 license

use crate::format;
use crate::mapping::{Converter, Mapper};
use crate::shape::{ShapeId, Transmutable, TypeInfo};
use crate::{Error, Result};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// A registered transformation for one ordered pair of shapes
#[derive(Debug, Clone)]
pub enum Transmuter {
    /// Property-by-property copy
    Mapper(Arc<Mapper>),
    /// Whole-value conversion
    Converter(Arc<Converter>),
}

impl Transmuter {
    pub fn origin(&self) -> &TypeInfo {
        match self {
            Transmuter::Mapper(mapper) => mapper.origin(),
            Transmuter::Converter(converter) => converter.origin(),
        }
    }

    pub fn target(&self) -> &TypeInfo {
        match self {
            Transmuter::Mapper(mapper) => mapper.target(),
            Transmuter::Converter(converter) => converter.target(),
        }
    }

    fn key(&self) -> (ShapeId, ShapeId) {
        (self.origin().id(), self.target().id())
    }

    pub fn is_converter(&self) -> bool {
        matches!(self, Transmuter::Converter(_))
    }
}

impl From<Mapper> for Transmuter {
    fn from(mapper: Mapper) -> Self {
        Transmuter::Mapper(Arc::new(mapper))
    }
}

impl From<Converter> for Transmuter {
    fn from(converter: Converter) -> Self {
        Transmuter::Converter(Arc::new(converter))
    }
}

/// Something that knows how to build a transmuter, possibly using the repository
/// it is being registered into
pub trait TransmuterDefiner {
    fn define(&self, repository: &Repository) -> Result<Transmuter>;
}

/// Keyed store of transmuters
///
/// Safe to share between threads; lookups take a read lock, `store` and `remove`
/// take the write lock.
#[derive(Debug, Default)]
pub struct Repository {
    transmuters: RwLock<HashMap<(ShapeId, ShapeId), Transmuter>>,
}

impl Repository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exists(&self, origin: ShapeId, target: ShapeId) -> bool {
        self.read().contains_key(&(origin, target))
    }

    /// Register a transmuter for its ordered pair
    ///
    /// Fails with `DuplicateTransmuter` if the pair already has one; the registered
    /// transmuter is left untouched.
    pub fn store(&self, transmuter: impl Into<Transmuter>) -> Result<()> {
        let transmuter = transmuter.into();
        let (origin, target) = transmuter.key();

        let mut transmuters = self.write();
        if transmuters.contains_key(&(origin, target)) {
            return Err(Error::DuplicateTransmuter {
                origin: origin.name().to_string(),
                target: target.name().to_string(),
                message: format::message(origin, target, "a transmuter is already registered"),
            });
        }

        tracing::debug!("{}", format::message(origin, target, "transmuter registered"));
        transmuters.insert((origin, target), transmuter);
        Ok(())
    }

    pub fn get(&self, origin: ShapeId, target: ShapeId) -> Option<Transmuter> {
        self.read().get(&(origin, target)).cloned()
    }

    /// Unregister and return the transmuter for the pair, if any
    pub fn remove(&self, origin: ShapeId, target: ShapeId) -> Option<Transmuter> {
        self.write().remove(&(origin, target))
    }

    pub fn exists_for<O: Transmutable, T: Transmutable>(&self) -> bool {
        self.exists(ShapeId::of::<O>(), ShapeId::of::<T>())
    }

    pub fn get_for<O: Transmutable, T: Transmutable>(&self) -> Option<Transmuter> {
        self.get(ShapeId::of::<O>(), ShapeId::of::<T>())
    }

    pub fn remove_for<O: Transmutable, T: Transmutable>(&self) -> Option<Transmuter> {
        self.remove(ShapeId::of::<O>(), ShapeId::of::<T>())
    }

    /// Define a transmuter and register it
    pub fn store_defined(&self, definer: &dyn TransmuterDefiner) -> Result<()> {
        let transmuter = definer.define(self)?;
        self.store(transmuter)
    }

    /// Unregister the pair a definer would produce
    pub fn remove_defined(&self, definer: &dyn TransmuterDefiner) -> Result<Option<Transmuter>> {
        let transmuter = definer.define(self)?;
        let (origin, target) = transmuter.key();
        Ok(self.remove(origin, target))
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Registered ordered pairs, in no particular order
    pub fn pairs(&self) -> Vec<(ShapeId, ShapeId)> {
        self.read().keys().copied().collect()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<(ShapeId, ShapeId), Transmuter>> {
        self.transmuters
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<(ShapeId, ShapeId), Transmuter>> {
        self.transmuters
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::{ConverterBuilder, MapperBuilder};

    #[derive(Debug, Clone, Default)]
    struct Source {
        name: String,
    }

    crate::shape! {
        Source { name: String }
    }

    #[derive(Debug, Clone, Default)]
    struct Dest {
        name: String,
    }

    crate::shape! {
        Dest { name: String }
    }

    fn converter() -> Converter {
        Converter::new(|source: Source| Dest { name: source.name })
    }

    #[test]
    fn test_store_get_remove() {
        let repository = Repository::new();
        assert!(repository.is_empty());
        assert!(!repository.exists_for::<Source, Dest>());

        repository.store(converter()).unwrap();
        assert!(repository.exists(ShapeId::of::<Source>(), ShapeId::of::<Dest>()));
        assert_eq!(repository.len(), 1);
        assert_eq!(
            repository.pairs(),
            vec![(ShapeId::of::<Source>(), ShapeId::of::<Dest>())]
        );

        let removed = repository.remove_for::<Source, Dest>().unwrap();
        assert!(removed.is_converter());
        assert!(repository.get_for::<Source, Dest>().is_none());
        assert!(repository.remove_for::<Source, Dest>().is_none());
    }

    #[test]
    fn test_pairs_are_ordered() {
        let repository = Repository::new();
        repository.store(converter()).unwrap();
        assert!(!repository.exists_for::<Dest, Source>());

        repository
            .store(MapperBuilder::<Dest, Source>::new().unwrap().build())
            .unwrap();
        assert_eq!(repository.len(), 2);
    }

    #[test]
    fn test_duplicate_keeps_original() {
        let repository = Repository::new();
        repository.store(converter()).unwrap();

        let err = repository
            .store(MapperBuilder::<Source, Dest>::new().unwrap().build())
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateTransmuter { .. }));
        assert!(repository.get_for::<Source, Dest>().unwrap().is_converter());
    }

    struct SourceToDest;

    impl TransmuterDefiner for SourceToDest {
        fn define(&self, _repository: &Repository) -> Result<Transmuter> {
            Ok(ConverterBuilder::<Source, Dest>::new()
                .convert_with(|source| Dest { name: source.name })
                .build()?
                .into())
        }
    }

    #[test]
    fn test_definers() {
        let repository = Repository::new();
        repository.store_defined(&SourceToDest).unwrap();
        assert!(repository.exists_for::<Source, Dest>());
        assert!(repository.store_defined(&SourceToDest).is_err());

        let removed = repository.remove_defined(&SourceToDest).unwrap();
        assert!(removed.is_some());
        assert!(repository.is_empty());
    }
}
