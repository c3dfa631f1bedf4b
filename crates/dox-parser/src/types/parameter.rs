use serde::Serialize;

/// A formal parameter of a function or macro.
///
/// Function parameters always carry a `type`; macro parameters always carry
/// a `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    #[serde(rename = "type")]
    pub param_type: Option<String>,
    pub name: Option<String>,
}
