//! Schema-driven decoding of raw account bytes into named records.

use arrayref::{array_mut_ref, array_ref};
use solana_pubkey::Pubkey;

use crate::layout::{EntityKind, FieldType, LayoutError, LayoutId, LayoutVersion};

/// A decoded field value. Integers are kept exact; nothing is converted to
/// floating point at this layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    U8(u8),
    U32(u32),
    U64(u64),
    U128(u128),
    PublicKey(Pubkey),
    Blob(Vec<u8>),
    Seq(Vec<Value>),
}

/// Named field values produced by applying one layout to one buffer.
///
/// Fields are kept in layout order. A record is never mutated after decoding;
/// decoding the same bytes again yields an equal record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    layout: LayoutId,
    fields: Vec<(&'static str, Value)>,
}

macro_rules! scalar_accessor {
    ($fn_name:ident, $variant:ident, $ty:ty) => {
        pub fn $fn_name(&self, name: &'static str) -> Result<$ty, LayoutError> {
            match self.get(name) {
                Some(Value::$variant(value)) => Ok(*value),
                Some(_) => Err(LayoutError::FieldTypeMismatch(name)),
                None => Err(LayoutError::MissingField(name)),
            }
        }
    };
}

impl Record {
    pub fn new(layout: LayoutId, fields: Vec<(&'static str, Value)>) -> Self {
        Self { layout, fields }
    }

    pub fn layout(&self) -> LayoutId {
        self.layout
    }

    pub fn fields(&self) -> &[(&'static str, Value)] {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value)
    }

    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    scalar_accessor!(u8, U8, u8);
    scalar_accessor!(u32, U32, u32);
    scalar_accessor!(u64, U64, u64);
    scalar_accessor!(u128, U128, u128);
    scalar_accessor!(pubkey, PublicKey, Pubkey);

    /// Reads an integer field of any width as u128.
    pub fn uint(&self, name: &'static str) -> Result<u128, LayoutError> {
        match self.get(name) {
            Some(Value::U8(v)) => Ok(u128::from(*v)),
            Some(Value::U32(v)) => Ok(u128::from(*v)),
            Some(Value::U64(v)) => Ok(u128::from(*v)),
            Some(Value::U128(v)) => Ok(*v),
            Some(_) => Err(LayoutError::FieldTypeMismatch(name)),
            None => Err(LayoutError::MissingField(name)),
        }
    }

    pub fn blob(&self, name: &'static str) -> Result<&[u8], LayoutError> {
        match self.get(name) {
            Some(Value::Blob(bytes)) => Ok(bytes),
            Some(_) => Err(LayoutError::FieldTypeMismatch(name)),
            None => Err(LayoutError::MissingField(name)),
        }
    }

    pub fn seq(&self, name: &'static str) -> Result<&[Value], LayoutError> {
        match self.get(name) {
            Some(Value::Seq(values)) => Ok(values),
            Some(_) => Err(LayoutError::FieldTypeMismatch(name)),
            None => Err(LayoutError::MissingField(name)),
        }
    }

    /// Replaces the value of an existing field, keeping layout order.
    pub fn with(mut self, name: &'static str, value: Value) -> Result<Self, LayoutError> {
        let slot = self
            .fields
            .iter_mut()
            .find(|(field, _)| *field == name)
            .ok_or(LayoutError::MissingField(name))?;
        slot.1 = value;
        Ok(self)
    }

    /// A record of the given layout with every field zeroed.
    pub fn zeroed(layout: LayoutId) -> Self {
        let fields = layout
            .schema()
            .fields
            .iter()
            .map(|field| (field.name, zero_value(&field.ty)))
            .collect();
        Self { layout, fields }
    }
}

fn zero_value(ty: &FieldType) -> Value {
    match ty {
        FieldType::U8 => Value::U8(0),
        FieldType::U32 => Value::U32(0),
        FieldType::U64 => Value::U64(0),
        FieldType::U128 => Value::U128(0),
        FieldType::PublicKey => Value::PublicKey(Pubkey::default()),
        FieldType::Blob(len) => Value::Blob(vec![0; *len]),
        FieldType::Seq(inner, len) => Value::Seq((0..*len).map(|_| zero_value(inner)).collect()),
    }
}

/// Decodes `data` with the layout registered for `kind` at `version`.
pub fn decode(
    kind: EntityKind,
    version: LayoutVersion,
    data: &[u8],
) -> Result<Record, LayoutError> {
    let layout = LayoutId::new(kind, version).ok_or(LayoutError::UnknownLayout { kind, version })?;
    decode_with(layout, data)
}

/// Decodes `data` with `layout`.
///
/// The buffer must be exactly the layout span; the length is checked before
/// any field is read.
pub fn decode_with(layout: LayoutId, data: &[u8]) -> Result<Record, LayoutError> {
    let schema = layout.schema();
    let expected = schema.span();
    if data.len() != expected {
        return Err(LayoutError::LayoutMismatch {
            layout,
            expected,
            actual: data.len(),
        });
    }

    let mut offset = 0;
    let mut fields = Vec::with_capacity(schema.fields.len());
    for field in schema.fields {
        fields.push((field.name, read_value(&field.ty, data, offset)));
        offset += field.ty.width();
    }

    Ok(Record { layout, fields })
}

fn read_u64(data: &[u8], offset: usize) -> u64 {
    u64::from_le_bytes(*array_ref![data, offset, 8])
}

fn read_value(ty: &FieldType, data: &[u8], offset: usize) -> Value {
    match ty {
        FieldType::U8 => Value::U8(data[offset]),
        FieldType::U32 => Value::U32(u32::from_le_bytes(*array_ref![data, offset, 4])),
        FieldType::U64 => Value::U64(read_u64(data, offset)),
        FieldType::U128 => {
            let lo = read_u64(data, offset);
            let hi = read_u64(data, offset + 8);
            Value::U128((u128::from(hi) << 64) | u128::from(lo))
        }
        FieldType::PublicKey => {
            Value::PublicKey(Pubkey::new_from_array(*array_ref![data, offset, 32]))
        }
        FieldType::Blob(len) => Value::Blob(data[offset..offset + len].to_vec()),
        FieldType::Seq(inner, len) => Value::Seq(
            (0..*len)
                .map(|i| read_value(inner, data, offset + i * inner.width()))
                .collect(),
        ),
    }
}

/// Encodes a record back into its layout's byte representation.
///
/// The record must carry every layout field, in layout order, with values of
/// the declared types.
pub fn encode(record: &Record) -> Result<Vec<u8>, LayoutError> {
    let schema = record.layout.schema();
    let mut output = vec![0u8; schema.span()];

    if record.fields.len() != schema.fields.len() {
        let missing = schema
            .fields
            .iter()
            .find(|field| !record.has(field.name))
            .map(|field| field.name)
            .unwrap_or(schema.name);
        return Err(LayoutError::MissingField(missing));
    }

    let mut offset = 0;
    for (field, (name, value)) in schema.fields.iter().zip(record.fields.iter()) {
        if field.name != *name {
            return Err(LayoutError::MissingField(field.name));
        }
        write_value(&field.ty, value, &mut output, offset)
            .ok_or(LayoutError::FieldTypeMismatch(field.name))?;
        offset += field.ty.width();
    }

    Ok(output)
}

fn write_u64(output: &mut [u8], offset: usize, value: u64) {
    *array_mut_ref![output, offset, 8] = value.to_le_bytes();
}

fn write_value(ty: &FieldType, value: &Value, output: &mut [u8], offset: usize) -> Option<()> {
    match (ty, value) {
        (FieldType::U8, Value::U8(v)) => output[offset] = *v,
        (FieldType::U32, Value::U32(v)) => *array_mut_ref![output, offset, 4] = v.to_le_bytes(),
        (FieldType::U64, Value::U64(v)) => write_u64(output, offset, *v),
        (FieldType::U128, Value::U128(v)) => {
            write_u64(output, offset, *v as u64);
            write_u64(output, offset + 8, (*v >> 64) as u64);
        }
        (FieldType::PublicKey, Value::PublicKey(key)) => {
            *array_mut_ref![output, offset, 32] = key.to_bytes()
        }
        (FieldType::Blob(len), Value::Blob(bytes)) if bytes.len() == *len => {
            output[offset..offset + len].copy_from_slice(bytes)
        }
        (FieldType::Seq(inner, len), Value::Seq(values)) if values.len() == *len => {
            for (i, item) in values.iter().enumerate() {
                write_value(inner, item, output, offset + i * inner.width())?;
            }
        }
        _ => return None,
    }
    Some(())
}
