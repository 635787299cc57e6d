//! Record: an ordered set of fields built once into an immutable layout.

use std::collections::BTreeSet;

use crate::comments::{self, SourceText};
use crate::errors::BuildError;
use crate::field::FieldDecl;
use crate::layout::{self, BuiltField};
use crate::render::{self, Binding};

/// Names beginning with this prefix are reserved for the record machinery.
const RESERVED_PREFIX: char = '_';

/// A fully built record: ordered fields with resolved bit ranges and
/// re-associated commentary, plus the record-level documentation block.
///
/// Built once by [Record::build]; immutable afterwards, so it is safe to hand
/// to any number of renderers or emission collaborators.
#[derive(Debug)]
pub struct Record {
    name: String,
    fields: Vec<BuiltField>,
    doc_block: Vec<String>,
}

impl Record {
    /// Builds a record from `(key, declaration)` pairs in the order they
    /// should appear, the author-supplied documentation text, and the raw
    /// declaration source for comment re-association.
    ///
    /// Fails with [BuildError::DuplicateOrReservedName] when a key is empty,
    /// reused, or starts with `_`, and with
    /// [BuildError::MalformedCommentBlock] when source segmentation cannot be
    /// reconciled with the declared fields. A failed build yields no record;
    /// there is no partial-success mode.
    pub fn build<K: AsRef<str>>(
        name: &str,
        doc: &str,
        decls: &[(K, FieldDecl)],
        source: &SourceText,
    ) -> Result<Record, BuildError> {
        let mut seen: BTreeSet<&str> = BTreeSet::new();
        let mut fields = Vec::with_capacity(decls.len());

        for (key, decl) in decls {
            let key = key.as_ref();
            if key.is_empty() || key.starts_with(RESERVED_PREFIX) || !seen.insert(key) {
                return Err(BuildError::DuplicateOrReservedName {
                    name: key.to_string(),
                });
            }
            fields.push(BuiltField::new(key, decl));
        }

        layout::assign_offsets(&mut fields);

        let decl_lines: Vec<usize> = fields.iter().map(|f| f.decl_line).collect();
        let blocks = comments::associate(source, &decl_lines)?;
        for (field, block) in fields.iter_mut().zip(blocks) {
            field.comments = block;
        }

        let mut doc_block: Vec<String> = doc.lines().map(str::to_string).collect();
        doc_block.extend(render::layout_table(&fields));

        Ok(Record {
            name: name.to_string(),
            fields,
            doc_block,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in declaration order, with final bit ranges and comments.
    pub fn fields(&self) -> &[BuiltField] {
        &self.fields
    }

    /// Total bit length of the record: the end of its last field. There is
    /// no implicit tail padding.
    pub fn total_bits(&self) -> usize {
        self.fields.last().map_or(0, |f| f.end_bit)
    }

    /// Record documentation followed by the aligned layout table, one plain
    /// text line per entry, ready for an emission collaborator.
    pub fn doc_block(&self) -> &[String] {
        &self.doc_block
    }

    /// Binding declarations in field order, each chained on its predecessor.
    pub fn bindings(&self) -> Vec<Binding> {
        render::bindings(&self.fields)
    }
}
