//! # dox-parser
//!
//! Doxygen XML parsing and documentation object model for Doxymark.
//!
//! Doxygen writes one `index.xml` plus one document per compound. This crate
//! resolves C identifiers against that output and rebuilds the documented
//! entities as typed objects:
//! - **Index** ([`DoxygenIndex`]): symbol lookup, lazy compound loading,
//!   cross-reference resolution
//! - **Builder** ([`ObjectBuilder`]): functions, macros, enums, variables,
//!   and struct/union/group compounds
//! - **Descriptions** ([`DescriptionParser`]): Doxygen's `<para>` content
//!   model as a [`Description`] tree with Markdown-compatible text
//!
//! [`Extraction`] drives the `doxygen` binary to produce the XML in the
//! first place.

mod builder;
mod description;
pub mod error;
mod extract;
mod index;
mod text;
pub mod types;
pub mod xml;

pub use builder::ObjectBuilder;
pub use description::{DescriptionParser, merge_into};
pub use error::ParserError;
pub use extract::Extraction;
pub use index::{DoxygenIndex, SCOPE_SEPARATOR};
pub use text::{
    CODE_MARKUP, Markup, ResolveReference, SIMPLE_MARKUP, TextRenderer, normalize_type, simple_text,
};
pub use types::*;
