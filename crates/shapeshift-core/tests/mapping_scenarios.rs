//! End-to-end mapping scenarios
//!
//! Copyright (c) 2025 Shapeshift Team
//! Licensed under the Apache-2.0 license


use pretty_assertions::assert_eq;
use shapeshift_core::{
    Converter, Engine, Error, MapperBuilder, Repository, Transmuter,
};
use std::sync::Arc;
use std::thread;
use test_support::*;

#[test]
fn test_primitive_widening_between_shapes() {
    let repository = Repository::new();
    let source = Source {
        name: "ada".to_string(),
        age: 36,
    };

    let dest = Engine::<Source, Dest>::new(&repository)
        .map(source.clone())
        .unwrap()
        .unwrap();

    assert_eq!(
        dest,
        Dest {
            name: "ada".to_string(),
            age: Some(36),
        }
    );

    // and back
    let back = Engine::<Dest, Source>::new(&repository)
        .map(dest)
        .unwrap()
        .unwrap();
    assert_eq!(back, source);
}

#[test]
fn test_rename_required_for_differently_named_fields() {
    let repository = Repository::new();
    let engine = Engine::<Nicknamed, Named>::new(&repository);
    let origin = Nicknamed {
        nickname: "countess".to_string(),
    };

    let err = engine.map(origin.clone()).unwrap_err();
    match err {
        Error::PropertyAccess { property, .. } => assert_eq!(property, "nickname"),
        other => panic!("unexpected error: {:?}", other),
    }

    repository
        .store(
            MapperBuilder::<Nicknamed, Named>::new()
                .unwrap()
                .customize_name("nickname", "name")
                .unwrap()
                .build(),
        )
        .unwrap();

    let named = engine.map(origin).unwrap().unwrap();
    assert_eq!(named.name, "countess");
}

#[test]
fn test_nested_shapes_shallow_and_deep() {
    let repository = Repository::new();
    let engine = Engine::<OuterA, OuterB>::new(&repository);

    let shallow = engine.map(outer_a()).unwrap().unwrap();
    assert_eq!(shallow.id, 7);
    assert_eq!(shallow.inner, None);

    let deep = engine.map_deep(outer_a()).unwrap().unwrap();
    assert_eq!(
        deep.inner,
        Some(InnerB {
            label: "core".to_string(),
            weight: Some(42),
        })
    );
}

#[test]
fn test_exclude_all_fields_with_post_process() {
    let repository = Repository::new();
    repository
        .store(
            MapperBuilder::<Sum, Total>::new()
                .unwrap()
                .exclude_all_fields()
                .customize_post_process(|origin: &Sum, target: &mut Total| {
                    target.total = origin.a + origin.b;
                })
                .build(),
        )
        .unwrap();

    let total = Engine::<Sum, Total>::new(&repository)
        .map(Sum { a: 2, b: 3 })
        .unwrap()
        .unwrap();
    assert_eq!(
        total,
        Total {
            a: None,
            b: None,
            total: 5,
        }
    );
}

#[test]
fn test_duplicate_registration_keeps_converter() {
    let repository = Repository::new();
    repository
        .store(Converter::new(|source: Source| Dest {
            name: source.name.to_uppercase(),
            age: None,
        }))
        .unwrap();

    let err = repository
        .store(MapperBuilder::<Source, Dest>::new().unwrap().build())
        .unwrap_err();
    assert!(matches!(err, Error::DuplicateTransmuter { .. }));
    assert!(matches!(
        repository.get_for::<Source, Dest>(),
        Some(Transmuter::Converter(_))
    ));

    let dest = Engine::<Source, Dest>::new(&repository)
        .map(Source {
            name: "ada".to_string(),
            age: 36,
        })
        .unwrap()
        .unwrap();
    assert_eq!(dest.name, "ADA");
    assert_eq!(dest.age, None);
}

#[test]
fn test_identical_types_return_origin_without_copy() {
    let repository = Repository::new();
    let origin = String::from("shared buffer");
    let address = origin.as_ptr();

    let mapped = Engine::<String, String>::new(&repository)
        .map(origin)
        .unwrap()
        .unwrap();
    assert_eq!(mapped.as_ptr(), address);
}

#[test]
fn test_repository_shared_between_threads() {
    let repository = Arc::new(Repository::new());
    repository
        .store(Converter::new(|inner: InnerA| InnerB {
            label: inner.label,
            weight: Some(inner.weight * 2),
        }))
        .unwrap();

    let handles: Vec<_> = (0..4u64)
        .map(|id| {
            let repository = Arc::clone(&repository);
            thread::spawn(move || {
                let origin = OuterA {
                    id,
                    inner: inner_a(),
                };
                Engine::<OuterA, OuterB>::new(&repository)
                    .map(origin)
                    .unwrap()
                    .unwrap()
            })
        })
        .collect();

    for (id, handle) in handles.into_iter().enumerate() {
        let outer = handle.join().unwrap();
        assert_eq!(outer.id, id as u64);
        assert_eq!(outer.inner.unwrap().weight, Some(84));
    }
}

#[test]
fn test_mapping_plan_report() {
    let mapper = MapperBuilder::<Nicknamed, Named>::new()
        .unwrap()
        .customize_name("nickname", "name")
        .unwrap()
        .build();
    let plan = mapper.plan().unwrap();

    let json: serde_json::Value = serde_json::from_str(&plan.to_json().unwrap()).unwrap();
    assert_eq!(json["renames"]["nickname"], "name");
    assert_eq!(json["pairs"][0]["target_property"], "name");
    assert_eq!(json["pairs"][0]["target_type"], "String");
}
