//! Parser error types for dox-parser.

/// Errors that can occur while extracting, indexing, or parsing Doxygen XML.
///
/// Every variant is fatal to the operation that raised it: there is no
/// best-effort partial parse.
#[derive(Debug, thiserror::Error)]
pub enum ParserError {
    #[error("doxygen failed ({status}): {output}")]
    ExtractionFailed { status: String, output: String },

    #[error("Unknown identifier '{0}'")]
    UnknownIdentifier(String),

    #[error("Ambiguous identifier '{0}' in Doxygen XML")]
    AmbiguousIdentifier(String),

    #[error("Identifier '{0}' nests more than one scope; only `Compound::member` is supported")]
    NestedScope(String),

    #[error("{kindref} {refid} has two names: '{first}' and '{second}'")]
    AmbiguousReference {
        kindref: String,
        refid: String,
        first: String,
        second: String,
    },

    #[error("Unknown {kindref} reference {refid} in Doxygen XML")]
    UnresolvedReference { kindref: String, refid: String },

    #[error("Malformed markup: {0}")]
    MalformedMarkup(String),

    #[error("Illegal tag '{0}' in Doxygen XML")]
    IllegalMarkup(String),

    #[error("Unexpected tag '{0}' in Doxygen XML")]
    UnsupportedMarkup(String),

    #[error("Unexpected simplesect kind '{0}' in Doxygen XML")]
    UnsupportedSectionKind(String),

    #[error("Unsupported compound type '{0}' in Doxygen XML")]
    UnsupportedCompoundType(String),

    #[error("Unsupported member kind '{0}' in Doxygen XML")]
    UnsupportedMemberKind(String),

    #[error("<{element}> is missing required {field}")]
    MissingField { element: String, field: String },

    #[error("Parameter of function '{function}' has no type")]
    MissingParameterType { function: String },

    #[error("Parameter of macro '{name}' has no name")]
    MissingParameterName { name: String },

    #[error("Invalid refid '{0}' in Doxygen XML")]
    InvalidRefId(String),

    #[error("XML error: {0}")]
    Xml(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ParserError {
    pub(crate) fn missing(element: &str, field: &str) -> Self {
        Self::MissingField {
            element: element.to_string(),
            field: field.to_string(),
        }
    }
}
