//! Renderers over a finished layout: the aligned layout table and the
//! predecessor-chained binding declarations.

use crate::field::FieldKind;
use crate::layout::BuiltField;

/// Sentinel predecessor for the first field of a record.
pub const ROOT_MARKER: &str = "vstruct::Root";

/// One emitted declaration for the downstream vstruct compiler, together
/// with the commentary to place above it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub name: String,
    pub declaration: String,
    pub comments: Vec<String>,
}

/// Renders the byte.bit layout table, one line per field.
///
/// Start and end cells are `[byte].bit` coordinates derived from the bit
/// range; each column is padded to its widest cell so the table lines up.
/// Single-bit and zero-width fields print only the start cell. The exact
/// spacing is a contract: downstream tooling parses these lines.
pub(crate) fn layout_table(fields: &[BuiltField]) -> Vec<String> {
    struct Row {
        start: String,
        end: Option<String>,
        name: String,
        type_info: String,
    }

    let rows: Vec<Row> = fields
        .iter()
        .map(|field| {
            let start = format!("[{}].{}", field.start_bit / 8, field.start_bit % 8);
            let end = if field.range_bits() > 1 {
                let last = field.end_bit - 1;
                Some(format!("[{}].{}", last / 8, last % 8))
            } else {
                None
            };
            Row {
                start,
                end,
                name: field.name.clone(),
                type_info: field.type_info(),
            }
        })
        .collect();

    let max0 = rows.iter().map(|r| r.start.len()).max().unwrap_or(0);
    let max1 = rows
        .iter()
        .filter_map(|r| r.end.as_deref())
        .map(str::len)
        .max()
        .unwrap_or(0);

    rows.iter()
        .map(|row| {
            let end_cell = match &row.end {
                Some(end) => format!(" ... {end:<max1$}"),
                None => " ".repeat(5 + max1),
            };
            format!(
                "{start:<max0$}{end_cell} : {name} ({type_info})",
                start = row.start,
                name = row.name,
                type_info = row.type_info,
            )
        })
        .collect()
}

/// Emits one binding declaration per field, each referencing the name of the
/// immediately preceding field (or [ROOT_MARKER] for the first one).
///
/// Chaining on the predecessor instead of an absolute offset lets the
/// downstream vstruct compiler re-derive every cumulative offset and turn any
/// layout disagreement into a compile failure. Padding emits a structurally
/// distinct form with no storage-bearing member.
pub(crate) fn bindings(fields: &[BuiltField]) -> Vec<Binding> {
    let mut out = Vec::with_capacity(fields.len());
    let mut prior: Option<&str> = None;

    for field in fields {
        let prior_name = prior.unwrap_or(ROOT_MARKER);
        let name = &field.name;
        let declaration = match field.kind {
            FieldKind::Bool => {
                format!("typename vstruct::BoolItem<{prior_name}>::type {name}{{*this}};")
            }
            FieldKind::BoolArray { count } => format!(
                "typename vstruct::BoolArray<{prior_name}, {count}>::type {name}{{*this}};"
            ),
            FieldKind::Scalar { elem, width } => format!(
                "typename vstruct::LEItem<{prior_name}, {}, {width}>::type {name}{{*this}};",
                elem.name()
            ),
            FieldKind::Array { elem, width, count } => format!(
                "typename vstruct::LEArray<{prior_name}, {}, {width}, {count}>::type {name}{{*this}};",
                elem.name()
            ),
            FieldKind::AlignPad { byte_align } => {
                format!("typename vstruct::AlignPad<{prior_name}, {byte_align}>::type {name};")
            }
        };

        out.push(Binding {
            name: name.clone(),
            declaration,
            comments: field.comments.clone(),
        });
        prior = Some(name);
    }

    out
}
