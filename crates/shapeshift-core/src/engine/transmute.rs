//! The transmute procedure
//!
//! Decision order for one value, given the declared target type:
//!
//! 1. absent origin → absent result
//! 2. identical or primitive-widenable types → the origin itself
//! 3. registered converter → its result, any supplied target is ignored; wrapper
//!    types are looked up under their primitive
//! 4. registered mapper, or a default one synthesized on the spot → property copy
//!    into the supplied target or a freshly constructed one, then the post-process
//!
//! Nested property values that are not directly assignable are transmuted only when
//! mapping deeply or when a transmuter is registered for the nested pair; otherwise
//! the target property is left untouched.
//!
//! Copyright (c) 2025 Shapeshift Team
//! Licensed under the Apache-2.0 license

use crate::compat;
use crate::config::EngineConfig;
use crate::format;
use crate::mapping::{Mapper, PropertyAccessPair};
use crate::repository::{Repository, Transmuter};
use crate::shape::{AccessFault, DescriptorScanner, PropertyScanner, ShapeId, TypeInfo, Value};
use crate::{Error, Result};
use std::fmt;
use std::sync::Arc;

/// Transformation engine over type-erased values
#[derive(Clone)]
pub struct ValueEngine<'r> {
    repository: &'r Repository,
    scanner: Arc<dyn PropertyScanner>,
    config: EngineConfig,
}

impl<'r> ValueEngine<'r> {
    pub fn new(repository: &'r Repository) -> Self {
        Self {
            repository,
            scanner: Arc::new(DescriptorScanner),
            config: EngineConfig::default(),
        }
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Scanner used for mappers synthesized by the engine
    pub fn with_scanner(mut self, scanner: Arc<dyn PropertyScanner>) -> Self {
        self.scanner = scanner;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn repository(&self) -> &'r Repository {
        self.repository
    }

    /// Map `origin` to a value of type `target_info`
    ///
    /// `target`, when given, must hold a value of type `target_info`; it is populated
    /// in place by mappers and ignored by converters.
    pub fn map_value(
        &self,
        origin: Option<Value>,
        target_info: &TypeInfo,
        target: Option<Value>,
        deep: bool,
    ) -> Result<Option<Value>> {
        let origin = match origin {
            Some(origin) => origin,
            None => return Ok(None),
        };

        if compat::assignable(origin.shape(), target_info.id()) {
            tracing::trace!(
                "{}",
                format::message(origin.shape(), target_info.id(), "passed through")
            );
            return Ok(Some(origin));
        }

        self.transmute(origin, target_info, target, deep).map(Some)
    }

    fn transmute(
        &self,
        origin: Value,
        target_info: &TypeInfo,
        target: Option<Value>,
        deep: bool,
    ) -> Result<Value> {
        match self.registered(origin.shape(), target_info.id()) {
            Some(Transmuter::Converter(converter)) => converter.convert(origin),
            Some(Transmuter::Mapper(mapper)) => self.apply(&mapper, origin, target, deep),
            None => {
                let mapper = Mapper::default_for(*origin.info(), *target_info, self.scanner.clone())?;
                self.apply(&mapper, origin, target, deep)
            }
        }
    }

    /// Transmuter for the pair, with wrapper identities replaced by their primitive
    fn registered(&self, origin: ShapeId, target: ShapeId) -> Option<Transmuter> {
        self.repository
            .get(compat::unwrapped(origin), compat::unwrapped(target))
    }

    /// Property-by-property copy followed by the post-process
    fn apply(&self, mapper: &Mapper, origin: Value, target: Option<Value>, deep: bool) -> Result<Value> {
        let mut target = match target {
            Some(target) => target,
            None => instantiate(mapper.target())?,
        };

        let pairs = mapper.compute_access_pairs()?;
        tracing::debug!(
            "{}",
            format::message(
                mapper.origin().id(),
                mapper.target().id(),
                &format!("verifying mapping of {} properties", pairs.len())
            )
        );

        for pair in &pairs {
            let value = pair
                .read(origin.as_any())
                .map_err(|fault| access_error(pair, "cannot read origin property", fault))?;

            // absent values are never written
            let Some(value) = value else { continue };
            let Some(resolved) = self.resolve(pair, value, deep)? else { continue };

            pair.write(target.as_any_mut(), resolved)
                .map_err(|fault| access_error(pair, "cannot write target property", fault))?;

            if self.config.verify_writes {
                verify_write(pair, &target)?;
            }
        }

        mapper.post_process(origin.as_any(), target.as_any_mut())?;
        Ok(target)
    }

    /// Value to write for one pair, `None` to leave the target property unset
    fn resolve(&self, pair: &PropertyAccessPair, value: Value, deep: bool) -> Result<Option<Value>> {
        let target_type = pair.target_type();
        if compat::assignable(value.shape(), target_type.id()) {
            return Ok(Some(value));
        }

        if deep || self.registered(value.shape(), target_type.id()).is_some() {
            return self.map_value(Some(value), target_type, None, deep);
        }

        tracing::trace!(
            "{}",
            format::property_message(
                pair.origin(),
                pair.target(),
                "left unset, no transmuter registered and not mapping deeply"
            )
        );
        Ok(None)
    }
}

impl fmt::Debug for ValueEngine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueEngine")
            .field("transmuters", &self.repository.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn instantiate(target: &TypeInfo) -> Result<Value> {
    let create_error = |message: &str, source: Option<anyhow::Error>| Error::CreateInstance {
        shape: target.name().to_string(),
        message: format!("{}: {}", target.name(), message),
        source,
    };

    let descriptor = target
        .descriptor()
        .ok_or_else(|| create_error("not a described shape", None))?;
    let factory = descriptor
        .factory()
        .ok_or_else(|| create_error("shape has no default constructor", None))?;
    let instance = factory().map_err(|source| create_error("factory failed", Some(source)))?;

    Ok(Value::from_boxed(*target, instance))
}

/// Read the written property back
///
/// `shape!` accessors always observe a write; an absent read-back only comes from
/// custom scanners.
fn verify_write(pair: &PropertyAccessPair, target: &Value) -> Result<()> {
    let Some(reader) = pair.target().reader() else {
        tracing::warn!(
            "{}",
            format::property_message(
                pair.origin(),
                pair.target(),
                "write not verified, target property is write-only"
            )
        );
        return Ok(());
    };

    match reader(target.as_any()) {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(Error::AccessProperty {
            origin_property: pair.origin_name().to_string(),
            target_property: pair.target_name().to_string(),
            message: format::property_message(pair.origin(), pair.target(), "written value is absent"),
            source: anyhow::anyhow!("target property {} is absent after write", pair.target_name()),
        }),
        Err(fault) => Err(access_error(pair, "cannot read back target property", fault)),
    }
}

fn access_error(pair: &PropertyAccessPair, detail: &str, fault: AccessFault) -> Error {
    Error::AccessProperty {
        origin_property: pair.origin_name().to_string(),
        target_property: pair.target_name().to_string(),
        message: format::property_message(pair.origin(), pair.target(), detail),
        source: fault.into(),
    }
}
