//! Integration tests for layout table decoding and validation.
//!
//! Object entries may only reference reference types; array entries carry
//! their byte size negated and accept any element type. Both rules are
//! enforced while the table is read, so a decoded dump never contains an
//! invalid entry.

mod common;

use common::{push_i32, DumpBuilder};
use nbinscope::prelude::*;
use std::sync::Arc;

fn object_target(builder: DumpBuilder, type_id: i32) -> Result<NbinFile> {
    NbinFile::from_mem(builder.object_entry(type_id, 0, 16).build())
}

#[test]
fn object_entry_requires_class() {
    let Err(error) = object_target(
        DumpBuilder::new().struct_type(0, "Point", &[("x", 0, -3)]),
        0,
    ) else {
        panic!("object entry referencing a struct must be rejected");
    };
    assert!(matches!(error, Error::InvalidLayoutEntry(_)));
    assert_eq!(error.to_string(), "Invalid layout entry : not an object");

    let Err(error) = object_target(DumpBuilder::new().enum_type(0, "Color", &[("Red", 0)]), 0)
    else {
        panic!("object entry referencing an enum must be rejected");
    };
    assert!(matches!(error, Error::InvalidLayoutEntry(_)));

    let Err(error) = object_target(DumpBuilder::new(), -3) else {
        panic!("object entry referencing a primitive must be rejected");
    };
    assert!(matches!(error, Error::InvalidLayoutEntry(_)));
}

#[test]
fn object_entry_accepts_class() {
    let dump = object_target(
        DumpBuilder::new().class_type(0, "Node", &[("next", 0, 0)]),
        0,
    )
    .unwrap();

    let entries = dump.layout_entries();
    assert_eq!(entries.len(), 1);
    assert!(entries[0].is_object());
    assert_eq!(entries[0].entry_type().name(), "Node");
    assert_eq!(entries[0].size(), 16);
}

#[test]
fn array_entries_accept_any_element_type() {
    let dump = NbinFile::from_mem(
        DumpBuilder::new()
            .struct_type(0, "Point", &[("x", 0, -3)])
            .class_type(1, "Node", &[])
            .enum_type(2, "Color", &[("Red", 0)])
            .array_entry(-3, 0, 40, 10)
            .array_entry(0, 40, 80, 20)
            .array_entry(1, 120, 64, 8)
            .array_entry(2, 184, 16, 4)
            .build(),
    )
    .unwrap();

    let entries = dump.layout_entries();
    assert_eq!(entries.len(), 4);
    for entry in entries {
        assert!(entry.is_array());
        assert!(!entry.is_object());
    }

    assert_eq!(entries[0].size(), 40);
    assert_eq!(entries[0].length(), Some(10));
    assert!(entries[0].entry_type().is_primitive());
    assert!(entries[1].entry_type().is_struct());
    assert!(entries[2].entry_type().is_class());
    assert!(entries[3].entry_type().is_enum());
}

#[test]
fn unknown_type_id_rejected() {
    let Err(error) = object_target(DumpBuilder::new(), 42) else {
        panic!("layout entry referencing an unknown id must be rejected");
    };
    assert!(matches!(error, Error::UnresolvedType(TypeId(42))));
    assert_eq!(error.to_string(), "Failed to resolve type id - 42");
}

#[test]
fn table_order_preserved() {
    let dump = NbinFile::from_mem(
        DumpBuilder::new()
            .class_type(0, "Node", &[])
            .object_entry(0, 0, 24)
            .object_entry(0, 24, 24)
            .array_entry(-1, 48, 100, 100)
            .object_entry(0, 148, 24)
            .build(),
    )
    .unwrap();

    let offsets: Vec<i64> = dump.layout().map(|entry| entry.offset()).collect();
    assert_eq!(offsets, vec![0, 24, 48, 148]);
}

#[test]
fn object_element_count_ignored() {
    // Writers emit 1 here, but any value must be accepted and dropped
    let dump = NbinFile::from_mem(
        DumpBuilder::new()
            .class_type(0, "Node", &[])
            .raw_entry(0, 0, 24, 7)
            .build(),
    )
    .unwrap();

    let entries = dump.layout_entries();
    assert!(entries[0].is_object());
    assert_eq!(entries[0].length(), None);
}

#[test]
fn negative_array_length_folds() {
    let dump = NbinFile::from_mem(
        DumpBuilder::new()
            .class_type(0, "Node", &[])
            .raw_entry(0, 0, -96, -12)
            .build(),
    )
    .unwrap();

    let entries = dump.layout_entries();
    assert!(entries[0].is_array());
    assert_eq!(entries[0].size(), 96);
    assert_eq!(entries[0].length(), Some(12));
}

#[test]
fn empty_layout_table() {
    let dump = NbinFile::from_mem(
        DumpBuilder::new()
            .class_type(0, "Node", &[("next", 0, 0)])
            .build(),
    )
    .unwrap();

    assert_eq!(dump.layout().count(), 0);
    assert!(dump.layout_entries().is_empty());
}

#[test]
fn negative_table_count_reads_as_empty() {
    let mut buffer = Vec::new();
    buffer.extend_from_slice(b"NBIN");
    push_i32(&mut buffer, 0); // type table
    push_i32(&mut buffer, -1); // layout table
    buffer.extend_from_slice(&[0xEE; 16]);

    let dump = NbinFile::from_mem(buffer).unwrap();
    assert_eq!(dump.layout().count(), 0);
    assert_eq!(dump.instances_offset(), 12);
    assert_eq!(dump.instance_data(), [0xEE; 16]);
}

#[test]
fn entry_types_share_the_registry_graph() {
    let dump = NbinFile::from_mem(
        DumpBuilder::new()
            .struct_type(0, "Point", &[("x", 0, -3)])
            .class_type(1, "Path", &[("points", 1, 0)])
            .object_entry(1, 0, 24)
            .array_entry(0, 24, 160, 20)
            .build(),
    )
    .unwrap();

    let path = dump.types().get(&TypeId(1)).unwrap();
    let point = dump.types().get(&TypeId(0)).unwrap();

    let entries = dump.layout_entries();
    assert!(Arc::ptr_eq(entries[0].entry_type(), &path));
    assert!(Arc::ptr_eq(entries[1].entry_type(), &point));

    // The array element type is the same allocation the class field uses
    assert!(Arc::ptr_eq(
        path.fields().unwrap().get(0).unwrap().field_type(),
        entries[1].entry_type()
    ));
}

#[test]
fn display_formats() {
    let dump = NbinFile::from_mem(
        DumpBuilder::new()
            .class_type(0, "Node", &[])
            .object_entry(0, 64, 40)
            .array_entry(-3, 104, 40, 10)
            .build(),
    )
    .unwrap();

    let entries = dump.layout_entries();
    assert_eq!(entries[0].to_string(), "object Node: 40 bytes at offset 64");
    assert_eq!(entries[1].to_string(), "array int[10]: 40 bytes at offset 104");
}
