//! Message formatting for errors and traces

use crate::shape::{PropertyDescriptor, ShapeId};

/// `"<origin> -> <target>: <detail>"`
pub fn message(origin: ShapeId, target: ShapeId, detail: &str) -> String {
    format!("{} -> {}: {}", origin, target, detail)
}

/// Property-level variant naming both properties and both property types
pub fn property_message(
    origin_property: &PropertyDescriptor,
    target_property: &PropertyDescriptor,
    detail: &str,
) -> String {
    format!(
        "properties {} -> {} of types {}",
        origin_property.name(),
        target_property.name(),
        message(
            origin_property.property_type().id(),
            target_property.property_type().id(),
            detail
        )
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::Transmutable;

    #[test]
    fn test_message() {
        let text = message(ShapeId::of::<i32>(), ShapeId::of::<String>(), "VERIFY MAPPING");
        assert_eq!(text, "i32 -> alloc::string::String: VERIFY MAPPING");
    }

    #[test]
    fn test_property_message() {
        let origin = PropertyDescriptor::new("age", i32::type_info(), None, None);
        let target = PropertyDescriptor::new("years", i32::optional_type_info(), None, None);
        let text = property_message(&origin, &target, "cannot write");
        assert!(text.starts_with("properties age -> years of types i32 -> "));
        assert!(text.ends_with("Option<i32>: cannot write"));
    }
}
