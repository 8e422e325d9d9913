//! Mappers and converters
//!
//! This module holds the two kinds of transformation the engine can apply to a pair
//! of shapes:
//!
//! - [`Mapper`] - property-by-property copy, configured with [`MapperBuilder`]
//! - [`Converter`] - an arbitrary function from origin to target
//!
//! A mapper resolves its configuration into a list of [`PropertyAccessPair`]s every
//! time it is applied.
//!
//! Copyright (c) 2025 Shapeshift Team
//! Licensed under the Apache-2.0 license

pub mod access;
pub mod builder;
pub mod converter;
pub mod mapper;

pub use access::PropertyAccessPair;
pub use builder::MapperBuilder;
pub use converter::{Converter, ConverterBuilder};
pub use mapper::{Mapper, MappingPlan, PlannedPair, PostProcess};
