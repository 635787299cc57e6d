//! Re-associates free-form declaration-source commentary with fields.
//!
//! The caller hands over the raw text the record was declared in; this module
//! only segments it into per-field comment blocks. A hand-rolled line
//! classifier is enough: every line either declares a field (its line number
//! matches a known declaration line), is comment-only, is blank, or is other
//! code. Comments use the `#` marker; text after the last `#` on a line is
//! the comment.

use std::collections::{BTreeMap, BTreeSet};

use crate::errors::BuildError;

const COMMENT_MARKER: char = '#';

/// Immutable declaration-source buffer supplied by an introspection
/// collaborator.
#[derive(Debug, Clone)]
pub struct SourceText {
    text: String,
    first_line: usize,
}

impl SourceText {
    /// `first_line` is the 1-based line number of the first line of `text`
    /// within the original file, so field declaration lines (which are
    /// absolute) can be matched against the buffer.
    pub fn new(text: impl Into<String>, first_line: usize) -> Self {
        SourceText {
            text: text.into(),
            first_line,
        }
    }

    /// Lines paired with their absolute 1-based line numbers.
    fn numbered_lines(&self) -> Vec<(usize, &str)> {
        self.text
            .lines()
            .enumerate()
            .map(|(i, line)| (self.first_line + i, line))
            .collect()
    }
}

enum LineClass<'a> {
    Blank,
    CommentOnly(&'a str),
    /// Declares one or more fields; carries any trailing comment.
    Declaring(Option<&'a str>),
    /// Non-blank, non-comment, non-declaring; carries any trailing comment.
    Code(Option<&'a str>),
}

/// Byte offset of the first comment marker outside quoted literals, if any.
/// A `#` inside a `'...'` or `"..."` literal does not start a comment.
fn comment_start(line: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    for (i, ch) in line.char_indices() {
        match quote {
            Some(q) => {
                if ch == q {
                    quote = None;
                }
            }
            None => match ch {
                '"' | '\'' => quote = Some(ch),
                COMMENT_MARKER => return Some(i),
                _ => {}
            },
        }
    }
    None
}

fn classify<'a>(line: &'a str, declares_field: bool) -> LineClass<'a> {
    // the comment text is whatever follows the last marker within the comment
    let trailing = comment_start(line).map(|start| {
        let last = line[start..].rfind(COMMENT_MARKER).unwrap_or(0);
        line[start + last + 1..].trim_start()
    });

    if declares_field {
        return LineClass::Declaring(trailing);
    }

    let trimmed = line.trim_start();
    if trimmed.is_empty() {
        LineClass::Blank
    } else if trimmed.starts_with(COMMENT_MARKER) {
        LineClass::CommentOnly(trailing.unwrap_or(""))
    } else {
        LineClass::Code(trailing)
    }
}

/// Rebuilds, for each field, the commentary written adjacent to its
/// declaration: comment-only lines above it plus a trailing comment on the
/// declaration line itself, in forward reading order.
///
/// Walks the source bottom-up, accumulating comment lines into a pending
/// block. A declaring line closes the block below it and opens its own; any
/// other code line forces a block boundary so commentary separated from a
/// declaration by unrelated code is never misattributed. Fields sharing one
/// declaration line get disjoint sequences: the first field on the line
/// receives the block, the rest receive empty ones.
///
/// Returns one comment block per entry of `decl_lines` (declaration order).
/// Fails with [BuildError::MalformedCommentBlock] when segmentation does not
/// recover exactly one block per distinct declaration line.
pub(crate) fn associate(
    source: &SourceText,
    decl_lines: &[usize],
) -> Result<Vec<Vec<String>>, BuildError> {
    let declaring: BTreeSet<usize> = decl_lines.iter().copied().collect();

    // blocks come out bottom-up, each with its lines in reverse order
    let mut blocks: Vec<Vec<String>> = Vec::new();
    let mut pending: Vec<String> = Vec::new();
    let mut open = false;

    for &(lineno, line) in source.numbered_lines().iter().rev() {
        match classify(line, declaring.contains(&lineno)) {
            LineClass::Declaring(trailing) => {
                if open {
                    blocks.push(std::mem::take(&mut pending));
                }
                if let Some(comment) = trailing {
                    pending.push(comment.to_string());
                }
                open = true;
            }
            LineClass::Code(trailing) => {
                if open {
                    blocks.push(std::mem::take(&mut pending));
                    open = false;
                }
                if let Some(comment) = trailing {
                    pending.push(comment.to_string());
                }
            }
            LineClass::CommentOnly(comment) => pending.push(comment.to_string()),
            LineClass::Blank => {}
        }
    }
    // no code line above the first declaration
    if open {
        blocks.push(pending);
    }

    if blocks.len() != declaring.len() {
        return Err(BuildError::MalformedCommentBlock {
            fields: declaring.len(),
            blocks: blocks.len(),
        });
    }

    // restore top-down block order and forward reading order within blocks
    blocks.reverse();
    for block in &mut blocks {
        block.reverse();
    }

    // declaring is ascending, matching the top-down block order
    let mut by_line: BTreeMap<usize, Vec<String>> =
        declaring.into_iter().zip(blocks).collect();

    Ok(decl_lines
        .iter()
        .map(|line| by_line.remove(line).unwrap_or_default())
        .collect())
}
