//! Catalog of primitive little-endian element types and width validation.

use crate::errors::BuildError;

/// Primitive element type a data-bearing field can carry.
///
/// Closed set: unsigned/signed integers of 8/16/32/64 bits plus the two IEEE
/// floating types. Booleans and padding are not element types; they are
/// distinct field kinds (see [crate::field::FieldKind]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElemType {
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
    U64,
    I64,
    F32,
    F64,
}

impl ElemType {
    /// C-style type name used in type-info strings and emitted bindings.
    pub fn name(self) -> &'static str {
        match self {
            ElemType::U8 => "uint8_t",
            ElemType::I8 => "int8_t",
            ElemType::U16 => "uint16_t",
            ElemType::I16 => "int16_t",
            ElemType::U32 => "uint32_t",
            ElemType::I32 => "int32_t",
            ElemType::U64 => "uint64_t",
            ElemType::I64 => "int64_t",
            ElemType::F32 => "float",
            ElemType::F64 => "double",
        }
    }

    /// Native width of the type in bits.
    pub fn native_bits(self) -> usize {
        match self {
            ElemType::U8 | ElemType::I8 => 8,
            ElemType::U16 | ElemType::I16 => 16,
            ElemType::U32 | ElemType::I32 | ElemType::F32 => 32,
            ElemType::U64 | ElemType::I64 | ElemType::F64 => 64,
        }
    }

    /// Whether the type is a floating-point type (no sub-width packing).
    pub fn is_float(self) -> bool {
        matches!(self, ElemType::F32 | ElemType::F64)
    }

    /// Resolves the effective bit width of one element.
    ///
    /// `None` keeps the native width. Explicit widths must be in `1..=native`
    /// and exactly native for floating types. Validation happens here, at
    /// declaration time, so a malformed declaration fails before any layout
    /// runs.
    pub fn resolve_width(self, requested: Option<usize>) -> Result<usize, BuildError> {
        let Some(width) = requested else {
            return Ok(self.native_bits());
        };

        let invalid = || BuildError::InvalidWidth {
            type_name: self.name(),
            native_bits: self.native_bits(),
            requested: width,
        };

        if width < 1 {
            return Err(invalid());
        }
        if width > self.native_bits() {
            return Err(invalid());
        }
        if self.is_float() && width != self.native_bits() {
            return Err(invalid());
        }

        Ok(width)
    }
}
