//! Shapeshift Core - Object-to-object transformation engine
//!
//! This crate maps an instance of an origin shape into an instance of a target shape
//! by copying compatible properties, optionally recursing into nested shapes. It
//! replaces hand-written conversion code between structurally similar types such as
//! DTOs and domain models.
//!
//! # Main Components
//!
//! - **Shapes**: structs described with the [`shape!`] macro
//! - **Type Compatibility**: identity and primitive-widening rules
//! - **Mappings**: property-by-property mappers built with [`MapperBuilder`],
//!   and whole-value [`Converter`]s
//! - **Repository**: caller-owned registry of transmuters per ordered type pair
//! - **Engine**: the recursive transmute procedure
//! - **Error Handling**: error types using `thiserror` and `anyhow`
//!
//! # Example
//!
//! ```
//! use shapeshift_core::{shape, Engine, MapperBuilder, Repository, Result};
//!
//! #[derive(Debug, Clone, Default)]
//! pub struct Customer { pub nickname: String, pub age: i32 }
//! #[derive(Debug, Clone, Default)]
//! pub struct CustomerDto { pub name: String, pub age: Option<i32> }
//!
//! shape! { Customer { nickname: String, age: i32 } }
//! shape! { CustomerDto { name: String, age: Option<i32> } }
//!
//! fn example() -> Result<()> {
//!     let repository = Repository::new();
//!     repository.store(
//!         MapperBuilder::<Customer, CustomerDto>::new()?
//!             .customize_name("nickname", "name")?
//!             .build(),
//!     )?;
//!
//!     let dto = Engine::<Customer, CustomerDto>::new(&repository)
//!         .map(Customer { nickname: "ada".into(), age: 36 })?
//!         .unwrap();
//!     assert_eq!(dto.name, "ada");
//!     assert_eq!(dto.age, Some(36));
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

pub mod compat;
pub mod config;
pub mod engine;
pub mod error;
pub mod format;
pub mod mapping;
pub mod repository;
pub mod shape;

// Re-export main types for convenience
pub use config::EngineConfig;
pub use engine::{Engine, ValueEngine};
pub use error::{Error, Result};
pub use mapping::{
    Converter, ConverterBuilder, Mapper, MapperBuilder, MappingPlan, PlannedPair,
    PropertyAccessPair,
};
pub use repository::{Repository, Transmuter, TransmuterDefiner};
pub use shape::{
    AccessFault, DescriptorScanner, Property, PropertyDescriptor, PropertyScanner, Shape,
    ShapeDescriptor, ShapeId, Transmutable, TypeInfo, TypeKind, Value,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
