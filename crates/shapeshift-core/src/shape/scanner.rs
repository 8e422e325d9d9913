//! Property scanning capability
//!
//! Mappers never look at descriptors directly; they ask a [`PropertyScanner`] for
//! the properties of a type. The default [`DescriptorScanner`] answers from the
//! static descriptors emitted by `shape!`, and reports no properties for leaf types.

use super::{PropertyDescriptor, TypeInfo};
use std::collections::BTreeSet;

/// Lists the properties of a shape
pub trait PropertyScanner: Send + Sync {
    /// Properties of the type, in declaration order
    fn properties(&self, shape: &TypeInfo) -> Vec<PropertyDescriptor>;

    /// Names of every property declared by the type
    fn declared_names(&self, shape: &TypeInfo) -> BTreeSet<&'static str> {
        self.properties(shape).iter().map(|p| p.name()).collect()
    }
}

/// Scanner backed by the descriptors emitted by `shape!`
#[derive(Debug, Clone, Copy, Default)]
pub struct DescriptorScanner;

impl PropertyScanner for DescriptorScanner {
    fn properties(&self, shape: &TypeInfo) -> Vec<PropertyDescriptor> {
        shape
            .descriptor()
            .map(|descriptor| descriptor.properties().to_vec())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::Transmutable;

    #[derive(Debug, Clone, Default)]
    struct Point {
        x: f64,
        y: f64,
    }

    crate::shape! {
        Point {
            x: f64,
            y: f64,
        }
    }

    #[test]
    fn test_scans_described_shape() {
        let scanner = DescriptorScanner;
        let names: Vec<_> = scanner
            .properties(&Point::type_info())
            .iter()
            .map(|p| p.name())
            .collect();
        assert_eq!(names, vec!["x", "y"]);
        assert!(scanner.declared_names(&Point::type_info()).contains("y"));
    }

    #[test]
    fn test_leaf_types_have_no_properties() {
        let scanner = DescriptorScanner;
        assert!(scanner.properties(&String::type_info()).is_empty());
        assert!(scanner.declared_names(&i32::type_info()).is_empty());
    }
}
