//! Declaration-side field model used to build a [crate::record::Record].

use crate::errors::BuildError;
use crate::types::ElemType;

/// The five declarable field kinds, each with its sizing parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Single boolean bit.
    Bool,
    /// Fixed-size run of boolean bits.
    BoolArray { count: usize },
    /// One little-endian value, possibly packed below its native width.
    Scalar { elem: ElemType, width: usize },
    /// Fixed-size array of little-endian values with a shared element width.
    Array {
        elem: ElemType,
        width: usize,
        count: usize,
    },
    /// Filler that advances the layout cursor to the next multiple of
    /// `byte_align` bytes; zero-width when the cursor is already aligned.
    AlignPad { byte_align: usize },
}

/// A single declared, not yet named or positioned, record member.
///
/// Only constructible through the declaration constructors below; widths are
/// validated there, so a malformed declaration can never reach the layout.
#[derive(Debug, Clone)]
pub struct FieldDecl {
    kind: FieldKind,
    decl_line: usize,
}

impl FieldDecl {
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// 1-based source line of the declaration; used only for comment
    /// re-association and ordering disambiguation.
    pub fn decl_line(&self) -> usize {
        self.decl_line
    }

    pub fn boolean(decl_line: usize) -> Self {
        FieldDecl {
            kind: FieldKind::Bool,
            decl_line,
        }
    }

    pub fn boolean_array(count: usize, decl_line: usize) -> Self {
        FieldDecl {
            kind: FieldKind::BoolArray { count },
            decl_line,
        }
    }

    /// Declares a scalar of `elem`; `width` of `None` keeps the native width.
    pub fn scalar(
        elem: ElemType,
        width: Option<usize>,
        decl_line: usize,
    ) -> Result<Self, BuildError> {
        let width = elem.resolve_width(width)?;
        Ok(FieldDecl {
            kind: FieldKind::Scalar { elem, width },
            decl_line,
        })
    }

    /// Declares a fixed-size array of `count` elements of `elem`.
    pub fn array(
        elem: ElemType,
        width: Option<usize>,
        count: usize,
        decl_line: usize,
    ) -> Result<Self, BuildError> {
        let width = elem.resolve_width(width)?;
        Ok(FieldDecl {
            kind: FieldKind::Array { elem, width, count },
            decl_line,
        })
    }

    pub fn align_pad(byte_align: usize, decl_line: usize) -> Self {
        FieldDecl {
            kind: FieldKind::AlignPad { byte_align },
            decl_line,
        }
    }

    /// Width of one element in bits; 1 for booleans, 0 for padding.
    pub fn bit_width(&self) -> usize {
        match self.kind {
            FieldKind::Bool | FieldKind::BoolArray { .. } => 1,
            FieldKind::Scalar { width, .. } | FieldKind::Array { width, .. } => width,
            FieldKind::AlignPad { .. } => 0,
        }
    }

    /// Number of elements; 0 for padding.
    pub fn repeat(&self) -> usize {
        match self.kind {
            FieldKind::Bool | FieldKind::Scalar { .. } => 1,
            FieldKind::BoolArray { count } | FieldKind::Array { count, .. } => count,
            FieldKind::AlignPad { .. } => 0,
        }
    }

    /// Total storage of the field in bits; zero for padding, whose occupied
    /// range is only known once the layout cursor reaches it.
    pub fn total_bits(&self) -> usize {
        self.bit_width() * self.repeat()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boolean_sizes() {
        let b = FieldDecl::boolean(1);
        assert_eq!((b.bit_width(), b.repeat(), b.total_bits()), (1, 1, 1));

        let ba = FieldDecl::boolean_array(12, 2);
        assert_eq!((ba.bit_width(), ba.repeat(), ba.total_bits()), (1, 12, 12));
    }

    #[test]
    fn test_scalar_resolves_width() {
        let native = FieldDecl::scalar(ElemType::U16, None, 1).unwrap();
        assert_eq!(native.total_bits(), 16);

        let packed = FieldDecl::scalar(ElemType::U16, Some(14), 1).unwrap();
        assert_eq!(packed.total_bits(), 14);

        assert!(FieldDecl::scalar(ElemType::U16, Some(17), 1).is_err());
    }

    #[test]
    fn test_array_sizes() {
        let arr = FieldDecl::array(ElemType::I16, Some(11), 11, 1).unwrap();
        assert_eq!((arr.bit_width(), arr.repeat()), (11, 11));
        assert_eq!(arr.total_bits(), 121);

        assert!(FieldDecl::array(ElemType::F64, Some(63), 4, 1).is_err());
    }

    #[test]
    fn test_float_widths_checked_at_construction() {
        // floats support no sub-width packing; only the native width passes
        assert!(FieldDecl::scalar(ElemType::F32, Some(7), 1).is_err());
        assert!(FieldDecl::scalar(ElemType::F32, Some(32), 1).is_ok());
        assert!(FieldDecl::array(ElemType::F64, Some(32), 2, 1).is_err());
    }

    #[test]
    fn test_pad_has_no_storage() {
        let pad = FieldDecl::align_pad(4, 1);
        assert_eq!(pad.total_bits(), 0);
    }
}
