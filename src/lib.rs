//! # bitlayout
//!
//! Deterministic bit-level layout for packed little-endian records.
//!
//! Declare a record as an ordered list of typed fields (booleans, fixed-width
//! little-endian integers and floats, fixed-size arrays, alignment padding)
//! and build it once: every field gets a contiguous half-open bit range, the
//! commentary written next to its declaration is re-associated with it, and
//! the finished record renders an aligned layout table plus
//! predecessor-chained binding declarations for a downstream strongly-typed
//! compiler.
//!
//! ## Example
//!
//! ```
//! use bitlayout::comments::SourceText;
//! use bitlayout::field::FieldDecl;
//! use bitlayout::record::Record;
//! use bitlayout::types::ElemType;
//!
//! let source = "\
//! record Status {
//!     ## link is up
//!     up = bool           # set by the driver
//!     speed = u16 : 10
//! }";
//! let decls = [
//!     ("up", FieldDecl::boolean(3)),
//!     ("speed", FieldDecl::scalar(ElemType::U16, Some(10), 4).unwrap()),
//! ];
//!
//! let record = Record::build(
//!     "Status",
//!     "link status word",
//!     &decls,
//!     &SourceText::new(source, 1),
//! )
//! .unwrap();
//!
//! assert_eq!(record.fields()[1].start_bit, 1);
//! assert_eq!(record.fields()[1].end_bit, 11);
//! assert_eq!(record.fields()[0].comments, ["link is up", "set by the driver"]);
//! ```

pub mod comments;
pub mod errors;
pub mod field;
pub mod layout;
pub mod record;
pub mod render;
#[cfg(feature = "serde")]
pub mod serde;
pub mod types;
