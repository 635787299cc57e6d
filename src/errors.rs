//! Error types for field declaration and record building.

use std::fmt;

/// Errors produced while declaring fields or building a [crate::record::Record].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// Requested bit width is incompatible with the element type: below 1,
    /// above the native width, or a sub-native width on a floating type.
    InvalidWidth {
        type_name: &'static str,
        native_bits: usize,
        requested: usize,
    },
    /// Field name is empty, reused within the record, or starts with the
    /// reserved `_` prefix.
    DuplicateOrReservedName { name: String },
    /// Number of recovered comment blocks does not match the number of field
    /// declaration lines. Indicates a bug in source segmentation, not a user
    /// error; the build must be discarded.
    MalformedCommentBlock { fields: usize, blocks: usize },
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::InvalidWidth {
                type_name,
                native_bits,
                requested,
            } => {
                if *requested < 1 {
                    write!(f, "bit width must be at least 1, got {requested} for {type_name}")
                } else if requested > native_bits {
                    write!(
                        f,
                        "bit width {requested} exceeds the {native_bits}-bit native width of {type_name}"
                    )
                } else {
                    write!(
                        f,
                        "no packing support for {type_name}, width must be exactly {native_bits}"
                    )
                }
            }
            BuildError::DuplicateOrReservedName { name } => {
                if name.is_empty() {
                    write!(f, "field name must not be empty")
                } else {
                    write!(
                        f,
                        "field name {name:?} is already used or starts with the reserved '_' prefix"
                    )
                }
            }
            BuildError::MalformedCommentBlock { fields, blocks } => {
                write!(
                    f,
                    "recovered {blocks} comment blocks for {fields} field declaration lines"
                )
            }
        }
    }
}

impl std::error::Error for BuildError {}
