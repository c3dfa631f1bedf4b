use serde::Serialize;

/// Direction annotation of a documented parameter (`\param[in]`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterDirection {
    In,
    Out,
    Inout,
}

impl ParameterDirection {
    /// Parse Doxygen's `direction` attribute value.
    #[must_use]
    pub fn from_attr(value: &str) -> Option<Self> {
        match value {
            "in" => Some(Self::In),
            "out" => Some(Self::Out),
            "inout" => Some(Self::Inout),
            _ => None,
        }
    }
}

impl std::fmt::Display for ParameterDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::In => "in",
            Self::Out => "out",
            Self::Inout => "inout",
        };
        write!(f, "{s}")
    }
}

/// One unit of parsed documentation content.
///
/// `Paragraph` doubles as the generic container for a sequence of sibling
/// nodes. Composed sequences never hold two adjacent `Text` nodes, nor two
/// adjacent `List` nodes sharing a title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Description {
    Text {
        contents: String,
    },
    Paragraph {
        contents: Vec<Description>,
    },
    Admonition {
        style: String,
        title: String,
        contents: Box<Description>,
    },
    Parameter {
        name: String,
        #[serde(rename = "type")]
        param_type: Option<String>,
        direction: Option<ParameterDirection>,
        description: Box<Description>,
    },
    List {
        title: Option<String>,
        contents: Vec<Description>,
    },
    Return {
        title: String,
        description: Box<Description>,
    },
}

impl Description {
    pub fn text(contents: impl Into<String>) -> Self {
        Self::Text {
            contents: contents.into(),
        }
    }

    #[must_use]
    pub const fn paragraph(contents: Vec<Self>) -> Self {
        Self::Paragraph { contents }
    }

    /// Title of a `List` node, `None` for every other variant.
    #[must_use]
    pub fn list_title(&self) -> Option<&str> {
        match self {
            Self::List { title, .. } => title.as_deref(),
            _ => None,
        }
    }

    /// Flattened plain text of the node, in document order.
    ///
    /// Used for one-line summaries; markup already rendered into text is kept.
    #[must_use]
    pub fn plain_text(&self) -> String {
        let mut parts = Vec::new();
        self.collect_text(&mut parts);
        parts.join(" ")
    }

    fn collect_text<'a>(&'a self, parts: &mut Vec<&'a str>) {
        match self {
            Self::Text { contents } => parts.push(contents),
            Self::Paragraph { contents } | Self::List { contents, .. } => {
                for child in contents {
                    child.collect_text(parts);
                }
            }
            Self::Admonition { contents, .. } => contents.collect_text(parts),
            Self::Parameter { description, .. } | Self::Return { description, .. } => {
                description.collect_text(parts);
            }
        }
    }
}
