//! Positioned fields and the sequential bit-layout algorithm.

use crate::field::{FieldDecl, FieldKind};

/// A field with its final half-open bit range inside the record.
///
/// Produced once per build by [assign_offsets]; never mutated after the
/// record is finished.
#[derive(Debug, Clone)]
pub struct BuiltField {
    pub name: String,
    pub kind: FieldKind,
    pub decl_line: usize,
    /// First bit of the occupied range.
    pub start_bit: usize,
    /// One past the last bit of the occupied range. Equal to `start_bit` for
    /// a no-op pad.
    pub end_bit: usize,
    /// Comment lines recovered from the declaration source, in forward
    /// reading order. Empty when no commentary was written near the field.
    pub comments: Vec<String>,
}

impl BuiltField {
    pub(crate) fn new(name: &str, decl: &FieldDecl) -> Self {
        BuiltField {
            name: name.to_string(),
            kind: decl.kind(),
            decl_line: decl.decl_line(),
            start_bit: 0,
            end_bit: 0,
            comments: Vec::new(),
        }
    }

    /// Width of the occupied range in bits. Zero for a no-op pad.
    pub fn range_bits(&self) -> usize {
        self.end_bit - self.start_bit
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

    /// Short type descriptor used in the layout table, e.g. `uint16_t : 14`
    /// or `padding[5]`.
    pub fn type_info(&self) -> String {
        match self.kind {
            FieldKind::Bool => "bool".to_string(),
            FieldKind::BoolArray { count } => format!("bool[{count}]"),
            FieldKind::Scalar { elem, width } => format!("{} : {width}", elem.name()),
            FieldKind::Array { elem, width, count } => {
                format!("{}[{count}] : {width}", elem.name())
            }
            FieldKind::AlignPad { .. } => format!("padding[{}]", self.range_bits()),
        }
    }
}

/// Walks the fields once in declaration order, assigning each a range that
/// starts exactly where its predecessor ended.
///
/// An [FieldKind::AlignPad] with target `A` fills up to the next multiple of
/// `A * 8` bits, or occupies a zero-width range when the cursor is already on
/// that boundary. Consecutive pads are legal; a second pad targeting an
/// already-satisfied boundary is a zero-width no-op. There is no implicit
/// tail padding: the record's total length is the last field's `end_bit`.
pub(crate) fn assign_offsets(fields: &mut [BuiltField]) {
    let mut cursor = 0usize;

    for field in fields.iter_mut() {
        field.start_bit = cursor;
        field.end_bit = match field.kind {
            FieldKind::AlignPad { byte_align } => {
                let align_bits = byte_align * 8;
                // an alignment of zero is a no-op
                let fill = if align_bits == 0 { 0 } else { cursor % align_bits };
                if fill == 0 {
                    cursor
                } else {
                    cursor + (align_bits - fill)
                }
            }
            _ => cursor + field.bit_width() * field.repeat(),
        };
        cursor = field.end_bit;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ElemType;

    fn built(decls: &[FieldDecl]) -> Vec<BuiltField> {
        let mut fields: Vec<BuiltField> = decls
            .iter()
            .enumerate()
            .map(|(i, d)| BuiltField::new(&format!("f{i}"), d))
            .collect();
        assign_offsets(&mut fields);
        fields
    }

    #[test]
    fn test_pads_and_bools() {
        let fields = built(&[
            FieldDecl::align_pad(4, 1),
            FieldDecl::boolean(2),
            FieldDecl::boolean(3),
            FieldDecl::boolean(4),
            FieldDecl::align_pad(2, 5),
        ]);

        let ranges: Vec<(usize, usize)> =
            fields.iter().map(|f| (f.start_bit, f.end_bit)).collect();
        // trailing pad targets a 2-byte boundary, so bit 3 fills up to bit 16
        assert_eq!(ranges, [(0, 0), (0, 1), (1, 2), (2, 3), (3, 16)]);
        assert_eq!(fields[4].end_bit % 16, 0);
    }

    #[test]
    fn test_packed_scalars_after_byte_boundary() {
        let fields = built(&[
            FieldDecl::scalar(ElemType::U8, None, 1).unwrap(),
            FieldDecl::scalar(ElemType::U8, Some(2), 2).unwrap(),
            FieldDecl::scalar(ElemType::I8, Some(3), 3).unwrap(),
        ]);

        assert_eq!((fields[1].start_bit, fields[1].end_bit), (8, 10));
        assert_eq!((fields[2].start_bit, fields[2].end_bit), (10, 13));
    }

    #[test]
    fn test_consecutive_pads_same_alignment() {
        // pad to 2 bytes, then pad to 1 byte: the second one lands on a
        // boundary the first already satisfied and must be zero-width
        let fields = built(&[
            FieldDecl::boolean_array(3, 1),
            FieldDecl::align_pad(2, 2),
            FieldDecl::align_pad(1, 3),
        ]);

        assert_eq!((fields[1].start_bit, fields[1].end_bit), (3, 16));
        assert_eq!((fields[2].start_bit, fields[2].end_bit), (16, 16));
        assert_eq!(fields[2].range_bits(), 0);
    }

    #[test]
    fn test_pad_on_aligned_cursor_is_noop() {
        let fields = built(&[
            FieldDecl::scalar(ElemType::U32, None, 1).unwrap(),
            FieldDecl::align_pad(4, 2),
        ]);

        assert_eq!((fields[1].start_bit, fields[1].end_bit), (32, 32));
    }

    #[test]
    fn test_contiguity() {
        let fields = built(&[
            FieldDecl::align_pad(4, 1),
            FieldDecl::boolean(2),
            FieldDecl::array(ElemType::I16, Some(11), 11, 3).unwrap(),
            FieldDecl::align_pad(2, 4),
            FieldDecl::scalar(ElemType::F64, None, 5).unwrap(),
            FieldDecl::boolean_array(7, 6),
        ]);

        assert_eq!(fields[0].start_bit, 0);
        for pair in fields.windows(2) {
            assert_eq!(pair[0].end_bit, pair[1].start_bit);
        }
    }

    #[test]
    fn test_pad_alignment_invariant() {
        let fields = built(&[
            FieldDecl::boolean_array(13, 1),
            FieldDecl::align_pad(4, 2),
        ]);

        assert_eq!(fields[1].end_bit % 32, 0);
        assert_eq!(fields[1].end_bit, 32);
    }

    #[test]
    fn test_type_info_strings() {
        let fields = built(&[
            FieldDecl::boolean(1),
            FieldDecl::boolean_array(12, 2),
            FieldDecl::scalar(ElemType::U16, Some(14), 3).unwrap(),
            FieldDecl::array(ElemType::I16, Some(11), 11, 4).unwrap(),
            FieldDecl::align_pad(2, 5),
        ]);

        assert_eq!(fields[0].type_info(), "bool");
        assert_eq!(fields[1].type_info(), "bool[12]");
        assert_eq!(fields[2].type_info(), "uint16_t : 14");
        assert_eq!(fields[3].type_info(), "int16_t[11] : 11");
        // cursor at bit 148, next 16-bit boundary is 160
        assert_eq!(fields[4].type_info(), "padding[12]");
    }
}
