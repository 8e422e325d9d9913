//! Property mapping for one ordered pair of shapes
//!
//! A [`Mapper`] decides which origin property feeds which target property. It is
//! produced by [`MapperBuilder`](super::MapperBuilder) for user-defined mappings, or
//! synthesized by the engine with no renames and no exclusions.
//!
//! Copyright (c) 2025 Shapeshift Team
//! Licensed under the Apache-2.0 license

use super::PropertyAccessPair;
use crate::compat;
use crate::format;
use crate::shape::{PropertyDescriptor, PropertyScanner, TypeInfo};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;

/// Custom step run after the automatic property copy
pub type PostProcess = Arc<dyn Fn(&dyn Any, &mut dyn Any) -> Result<()> + Send + Sync>;

/// Property mapping between an origin and a target shape
#[derive(Clone)]
pub struct Mapper {
    origin: TypeInfo,
    target: TypeInfo,
    scanner: Arc<dyn PropertyScanner>,
    renames: BTreeMap<String, String>,
    excluded: BTreeSet<String>,
    post_process: Option<PostProcess>,
}

impl Mapper {
    /// Mapping with no renames, exclusions, or post-process
    ///
    /// Fails with `InvalidArgument` when both sides are the same type: such values are
    /// passed through unchanged and never need a mapping.
    pub fn default_for(
        origin: TypeInfo,
        target: TypeInfo,
        scanner: Arc<dyn PropertyScanner>,
    ) -> Result<Self> {
        if compat::identical(origin.id(), target.id()) {
            return Err(Error::invalid_argument(format::message(
                origin.id(),
                target.id(),
                "origin and target are the same type, no mapping is needed",
            )));
        }

        Ok(Self {
            origin,
            target,
            scanner,
            renames: BTreeMap::new(),
            excluded: BTreeSet::new(),
            post_process: None,
        })
    }

    pub fn origin(&self) -> &TypeInfo {
        &self.origin
    }

    pub fn target(&self) -> &TypeInfo {
        &self.target
    }

    /// Renames, keyed by origin property name
    pub fn renames(&self) -> &BTreeMap<String, String> {
        &self.renames
    }

    pub fn excluded(&self) -> &BTreeSet<String> {
        &self.excluded
    }

    pub fn has_post_process(&self) -> bool {
        self.post_process.is_some()
    }

    pub(super) fn insert_rename(&mut self, origin_field: String, target_field: String) {
        self.renames.insert(origin_field, target_field);
    }

    pub(super) fn insert_exclusion(&mut self, field: String) {
        self.excluded.insert(field);
    }

    pub(super) fn set_post_process(&mut self, post_process: PostProcess) {
        self.post_process = Some(post_process);
    }

    /// Run the custom post-process, if any
    pub fn post_process(&self, origin: &dyn Any, target: &mut dyn Any) -> Result<()> {
        match &self.post_process {
            Some(post_process) => post_process(origin, target),
            None => Ok(()),
        }
    }

    /// Target property fed by an origin property
    pub fn target_name_for<'a>(&'a self, origin_name: &'a str) -> &'a str {
        self.renames
            .get(origin_name)
            .map(String::as_str)
            .unwrap_or(origin_name)
    }

    /// Compute the authoritative list of property pairs
    ///
    /// Every readable origin property that is not excluded, and whose target name is
    /// not excluded either, must resolve to a writable target property of a type the
    /// default strategy can produce. Any other situation is a `PropertyAccess` error
    /// naming the offending property.
    pub fn compute_access_pairs(&self) -> Result<Vec<PropertyAccessPair>> {
        let target_properties: HashMap<&'static str, PropertyDescriptor> = self
            .scanner
            .properties(&self.target)
            .into_iter()
            .map(|property| (property.name(), property))
            .collect();

        let mut pairs = Vec::new();
        for origin_property in self.scanner.properties(&self.origin) {
            let origin_name = origin_property.name();
            let target_name = self.target_name_for(origin_name);
            if self.excluded.contains(origin_name) || self.excluded.contains(target_name) {
                continue;
            }

            let reader = origin_property.reader().ok_or_else(|| {
                self.property_error(
                    origin_name,
                    format!("origin property {} has no read capability", origin_name),
                )
            })?;

            let target_property = target_properties.get(target_name).ok_or_else(|| {
                self.property_error(
                    origin_name,
                    format!(
                        "no property named {} exists in {}",
                        target_name,
                        self.target.name()
                    ),
                )
            })?;

            let writer = target_property.writer().ok_or_else(|| {
                self.property_error(
                    target_name,
                    format!("target property {} has no write capability", target_name),
                )
            })?;

            if compat::unsupported_as_default_target(target_property.property_type()) {
                return Err(self.property_error(
                    target_name,
                    format!(
                        "target property {} has unsupported type {} ({})",
                        target_name,
                        target_property.property_type().id().short_name(),
                        target_property.property_type().kind()
                    ),
                ));
            }

            pairs.push(PropertyAccessPair::new(
                origin_property,
                *target_property,
                reader,
                writer,
            ));
        }

        Ok(pairs)
    }

    /// Serializable summary of this mapping and its resolved pairs
    pub fn plan(&self) -> Result<MappingPlan> {
        let pairs = self
            .compute_access_pairs()?
            .iter()
            .map(|pair| PlannedPair {
                origin_property: pair.origin_name().to_string(),
                target_property: pair.target_name().to_string(),
                origin_type: pair.origin_type().id().short_name(),
                target_type: pair.target_type().id().short_name(),
            })
            .collect();

        Ok(MappingPlan {
            origin: self.origin.name().to_string(),
            target: self.target.name().to_string(),
            renames: self.renames.clone(),
            excluded: self.excluded.iter().cloned().collect(),
            pairs,
            post_process: self.post_process.is_some(),
        })
    }

    fn property_error(&self, property: &str, detail: String) -> Error {
        Error::PropertyAccess {
            origin: self.origin.name().to_string(),
            target: self.target.name().to_string(),
            property: property.to_string(),
            message: format::message(
                self.origin.id(),
                self.target.id(),
                &format!("{}; exclude the field, rename it, or add a post-process", detail),
            ),
        }
    }
}

impl fmt::Debug for Mapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mapper")
            .field("origin", &self.origin.id())
            .field("target", &self.target.id())
            .field("renames", &self.renames)
            .field("excluded", &self.excluded)
            .field("post_process", &self.post_process.is_some())
            .finish()
    }
}

/// Serializable description of a mapping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingPlan {
    pub origin: String,
    pub target: String,
    pub renames: BTreeMap<String, String>,
    pub excluded: Vec<String>,
    pub pairs: Vec<PlannedPair>,
    pub post_process: bool,
}

/// One resolved pair inside a [`MappingPlan`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedPair {
    pub origin_property: String,
    pub target_property: String,
    pub origin_type: String,
    pub target_type: String,
}

impl MappingPlan {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
