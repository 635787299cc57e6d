//! JSON-deserializable record description.
//!
//! These types describe the *shape* of a record declaration. They are
//! intended to be constructed from JSON (for example a declaration file
//! shipped with your application) and then converted into core `bitlayout`
//! types. Width validation runs during conversion, so a malformed definition
//! fails before any layout is computed.

use serde::{Deserialize, Serialize};

use crate::errors::BuildError;
use crate::field::FieldDecl;
use crate::types::ElemType;

/// Top-level record definition: documentation plus ordered fields.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RecordDef {
    /// Record name used by the emission collaborator.
    pub name: String,
    /// Author-supplied documentation text, placed above the layout table.
    #[serde(default)]
    pub doc: String,
    /// Fields in the order they occupy the record.
    pub fields: Vec<FieldDef>,
}

/// Description of a single declared field.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FieldDef {
    /// Unique field name; must not start with `_`.
    pub name: String,
    /// Kind and sizing parameters.
    pub kind: FieldKindDef,
    /// 1-based line of the declaration in the source file the definition was
    /// derived from; used for comment re-association.
    pub line: usize,
}

/// Kind of field in the definition.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(tag = "type")]
pub enum FieldKindDef {
    /// Single boolean bit.
    Bool,
    /// Fixed-size run of boolean bits.
    BoolArray { count: usize },
    /// Little-endian scalar; omitted `width` keeps the native width.
    Scalar {
        elem: ElemTypeDef,
        #[serde(default)]
        width: Option<usize>,
    },
    /// Fixed-size little-endian array.
    Array {
        elem: ElemTypeDef,
        #[serde(default)]
        width: Option<usize>,
        count: usize,
    },
    /// Padding up to a multiple of `byte_align` bytes.
    AlignPad { byte_align: usize },
}

/// Element type of a scalar or array field.
#[derive(Debug, Deserialize, Serialize, Clone, Copy)]
pub enum ElemTypeDef {
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

impl From<ElemTypeDef> for ElemType {
    fn from(value: ElemTypeDef) -> Self {
        match value {
            ElemTypeDef::U8 => ElemType::U8,
            ElemTypeDef::I8 => ElemType::I8,
            ElemTypeDef::U16 => ElemType::U16,
            ElemTypeDef::I16 => ElemType::I16,
            ElemTypeDef::U32 => ElemType::U32,
            ElemTypeDef::I32 => ElemType::I32,
            ElemTypeDef::U64 => ElemType::U64,
            ElemTypeDef::I64 => ElemType::I64,
            ElemTypeDef::F32 => ElemType::F32,
            ElemTypeDef::F64 => ElemType::F64,
        }
    }
}

impl FieldDef {
    /// Converts into the `(key, declaration)` pair [crate::record::Record]
    /// builds from. Fails when an explicit width is invalid for the type.
    pub fn into_named_decl(self) -> Result<(String, FieldDecl), BuildError> {
        let decl = match self.kind {
            FieldKindDef::Bool => FieldDecl::boolean(self.line),
            FieldKindDef::BoolArray { count } => FieldDecl::boolean_array(count, self.line),
            FieldKindDef::Scalar { elem, width } => {
                FieldDecl::scalar(elem.into(), width, self.line)?
            }
            FieldKindDef::Array { elem, width, count } => {
                FieldDecl::array(elem.into(), width, count, self.line)?
            }
            FieldKindDef::AlignPad { byte_align } => FieldDecl::align_pad(byte_align, self.line),
        };
        Ok((self.name, decl))
    }
}

impl RecordDef {
    /// Converts every field definition, preserving order.
    pub fn into_named_decls(self) -> Result<Vec<(String, FieldDecl)>, BuildError> {
        self.fields
            .into_iter()
            .map(FieldDef::into_named_decl)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldKind;

    #[test]
    fn test_field_defs_convert() {
        let def = FieldDef {
            name: "speed".to_string(),
            kind: FieldKindDef::Scalar {
                elem: ElemTypeDef::U16,
                width: Some(10),
            },
            line: 4,
        };
        let (name, decl) = def.into_named_decl().unwrap();
        assert_eq!(name, "speed");
        assert_eq!(
            decl.kind(),
            FieldKind::Scalar {
                elem: ElemType::U16,
                width: 10,
            }
        );
        assert_eq!(decl.decl_line(), 4);
    }

    #[test]
    fn test_width_validation_runs_on_conversion() {
        let def = FieldDef {
            name: "f".to_string(),
            kind: FieldKindDef::Scalar {
                elem: ElemTypeDef::F32,
                width: Some(16),
            },
            line: 1,
        };
        assert!(def.into_named_decl().is_err());
    }

    #[test]
    fn test_record_def_preserves_order() {
        let def = RecordDef {
            name: "S".to_string(),
            doc: String::new(),
            fields: vec![
                FieldDef {
                    name: "a".to_string(),
                    kind: FieldKindDef::Bool,
                    line: 2,
                },
                FieldDef {
                    name: "b".to_string(),
                    kind: FieldKindDef::AlignPad { byte_align: 2 },
                    line: 3,
                },
            ],
        };
        let decls = def.into_named_decls().unwrap();
        let names: Vec<&str> = decls.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
    }
}
