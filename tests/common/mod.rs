//! Shared helpers for crafting NBIN dump buffers in integration tests.
//!
//! The [`DumpBuilder`] assembles dump buffers the way a writer would: type
//! records carry their real encoded size, object layout entries are written
//! with an element count of `1`, and array entries encode their byte size as
//! a negative value.

// Each integration test binary compiles this module on its own and not every
// binary uses every helper.
#![allow(dead_code)]

/// Appends a little-endian `i32` to the buffer
pub fn push_i32(buffer: &mut Vec<u8>, value: i32) {
    buffer.extend_from_slice(&value.to_le_bytes());
}

/// Appends a little-endian `i64` to the buffer
pub fn push_i64(buffer: &mut Vec<u8>, value: i64) {
    buffer.extend_from_slice(&value.to_le_bytes());
}

/// Appends a length-prefixed UTF-8 string to the buffer
pub fn push_str(buffer: &mut Vec<u8>, value: &str) {
    push_i32(buffer, value.len() as i32);
    buffer.extend_from_slice(value.as_bytes());
}

/// A field of a struct or class record: name, dimension count, type id.
pub type FieldDef<'a> = (&'a str, i32, i32);

/// A constant of an enum record: name, value.
pub type ConstantDef<'a> = (&'a str, i32);

/// Incrementally assembles a complete NBIN dump buffer.
pub struct DumpBuilder {
    types: Vec<u8>,
    type_count: i32,
    layout: Vec<u8>,
    layout_count: i32,
    instances: Vec<u8>,
}

impl DumpBuilder {
    pub fn new() -> Self {
        DumpBuilder {
            types: Vec::new(),
            type_count: 0,
            layout: Vec::new(),
            layout_count: 0,
            instances: Vec::new(),
        }
    }

    /// Adds a value type record with the given fields
    pub fn struct_type(self, id: i32, name: &str, fields: &[FieldDef]) -> Self {
        self.type_with_code(id, name, 1, fields)
    }

    /// Adds a reference type record with the given fields
    pub fn class_type(self, id: i32, name: &str, fields: &[FieldDef]) -> Self {
        self.type_with_code(id, name, 0, fields)
    }

    /// Adds a struct or class record under an explicit kind code
    pub fn type_with_code(mut self, id: i32, name: &str, code: u8, fields: &[FieldDef]) -> Self {
        let mut members = Vec::new();
        for (field_name, dims, type_id) in fields {
            push_str(&mut members, field_name);
            push_i32(&mut members, *dims);
            push_i32(&mut members, *type_id);
        }

        self.type_record(id, name, code, fields.len() as i32, &members);
        self
    }

    /// Adds an enumeration record with the given constants
    pub fn enum_type(mut self, id: i32, name: &str, constants: &[ConstantDef]) -> Self {
        let mut members = Vec::new();
        for (constant_name, value) in constants {
            push_str(&mut members, constant_name);
            push_i32(&mut members, *value);
        }

        self.type_record(id, name, 2, constants.len() as i32, &members);
        self
    }

    /// Encodes one type record, with the size field a writer would emit:
    /// the number of bytes following it.
    fn type_record(&mut self, id: i32, name: &str, code: u8, count: i32, members: &[u8]) {
        let mut record = Vec::new();
        push_i32(&mut record, id);
        push_str(&mut record, name);
        record.push(code);
        push_i32(&mut record, count);
        record.extend_from_slice(members);

        push_i32(&mut self.types, record.len() as i32);
        self.types.extend_from_slice(&record);
        self.type_count += 1;
    }

    /// Adds an object layout entry; writers emit an element count of `1`
    pub fn object_entry(self, type_id: i32, offset: i64, size: i32) -> Self {
        self.raw_entry(type_id, offset, size, 1)
    }

    /// Adds an array layout entry, encoding the byte size as its negation
    pub fn array_entry(self, type_id: i32, offset: i64, size: i32, length: i32) -> Self {
        self.raw_entry(type_id, offset, -size, length)
    }

    /// Adds a layout entry with all four fields written verbatim
    pub fn raw_entry(mut self, type_id: i32, offset: i64, size: i32, length: i32) -> Self {
        push_i32(&mut self.layout, type_id);
        push_i64(&mut self.layout, offset);
        push_i32(&mut self.layout, size);
        push_i32(&mut self.layout, length);
        self.layout_count += 1;
        self
    }

    /// Appends an instance data region: the total size as `i64`, then the bytes
    pub fn instances(mut self, bytes: &[u8]) -> Self {
        push_i64(&mut self.instances, bytes.len() as i64);
        self.instances.extend_from_slice(bytes);
        self
    }

    /// Assembles the final dump buffer
    pub fn build(self) -> Vec<u8> {
        let mut buffer = Vec::new();
        buffer.extend_from_slice(b"NBIN");

        push_i32(&mut buffer, self.type_count);
        buffer.extend_from_slice(&self.types);

        push_i32(&mut buffer, self.layout_count);
        buffer.extend_from_slice(&self.layout);

        buffer.extend_from_slice(&self.instances);
        buffer
    }
}

impl Default for DumpBuilder {
    fn default() -> Self {
        Self::new()
    }
}
