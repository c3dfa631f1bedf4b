//! Description-tree parser.
//!
//! Recursive descent over Doxygen's `<para>` content model. A paragraph
//! mixes character data, inline markup (rendered to text by
//! [`TextRenderer`]) and structural blocks (`simplesect`, `parameterlist`,
//! `itemizedlist`) that become dedicated [`Description`] nodes. Siblings are
//! folded together with [`merge_into`].

use crate::error::ParserError;
use crate::text::{ResolveReference, TextRenderer, simple_text};
use crate::types::{Description, Parameter, ParameterDirection};
use crate::xml::XmlElement;

/// Parses descriptions in the context of one documented entity.
pub struct DescriptionParser<'a> {
    text: TextRenderer<'a>,
    /// Declared parameters of the enclosing function or macro, used to look
    /// up the type of documented parameters.
    parameters: &'a [Parameter],
}

impl<'a> DescriptionParser<'a> {
    #[must_use]
    pub const fn new(
        resolver: Option<&'a dyn ResolveReference>,
        parameters: &'a [Parameter],
    ) -> Self {
        Self {
            text: TextRenderer::new(resolver),
            parameters,
        }
    }

    /// Parse the brief and detailed descriptions of a declaration element.
    ///
    /// Returns `None` when neither contains a paragraph.
    ///
    /// # Errors
    /// Propagates any markup error from the paragraphs.
    pub fn parse_description(&self, node: &XmlElement) -> Result<Option<Description>, ParserError> {
        let mut paras = node.find_all("briefdescription/para");
        paras.extend(node.find_all("detaileddescription/para"));
        if paras.is_empty() {
            return Ok(None);
        }
        self.parse_paragraphs(&paras).map(Some)
    }

    /// Parse a run of sibling paragraphs; a single paragraph is returned as
    /// is, several are wrapped in one `Paragraph`.
    ///
    /// # Errors
    /// Propagates any markup error from the paragraphs.
    pub fn parse_paragraphs(&self, nodes: &[&XmlElement]) -> Result<Description, ParserError> {
        let mut paragraphs = nodes
            .iter()
            .map(|node| self.parse_paragraph(node))
            .collect::<Result<Vec<_>, _>>()?;
        if paragraphs.len() == 1 {
            return Ok(paragraphs.remove(0));
        }
        Ok(Description::paragraph(paragraphs))
    }

    /// Parse one `<para>` element. Its tail is not part of the paragraph.
    ///
    /// # Errors
    /// Propagates any markup error from the children.
    pub fn parse_paragraph(&self, node: &XmlElement) -> Result<Description, ParserError> {
        if node.name != "para" {
            return Err(ParserError::MalformedMarkup(format!(
                "expected <para>, found <{}>",
                node.name
            )));
        }

        let mut contents = merge_into(Vec::new(), Description::text(node.text.as_str()));
        for child in &node.children {
            contents = match child.name.as_str() {
                "para" | "simplesect" | "parameterlist" | "itemizedlist" => {
                    let block = self.parse_block(child)?;
                    let contents = merge_into(contents, block);
                    merge_into(contents, Description::text(child.tail.as_str()))
                }
                // Inline markup renders its own tail.
                _ => merge_into(contents, Description::text(self.text.render(child)?)),
            };
        }
        Ok(Description::paragraph(contents))
    }

    fn parse_block(&self, node: &XmlElement) -> Result<Description, ParserError> {
        match node.name.as_str() {
            "para" => self.parse_paragraph(node),
            "simplesect" => self.parse_simplesect(node),
            "parameterlist" => self.parse_parameter_list(node),
            "itemizedlist" => self.parse_itemized_list(node),
            other => Err(ParserError::UnsupportedMarkup(other.to_string())),
        }
    }

    fn parse_simplesect(&self, node: &XmlElement) -> Result<Description, ParserError> {
        if node.has_direct_text() {
            return Err(ParserError::MalformedMarkup(
                "unexpected text in <simplesect>".to_string(),
            ));
        }
        let kind = node
            .attr("kind")
            .ok_or_else(|| ParserError::missing("simplesect", "kind"))?;
        let contents = self.parse_paragraphs(&node.find_all("para"))?;

        if kind == "return" {
            return Ok(Description::Return {
                title: "Returns".to_string(),
                description: Box::new(contents),
            });
        }
        if let Some((style, title)) = admonition(kind) {
            return Ok(Description::Admonition {
                style: style.to_string(),
                title: title.to_string(),
                contents: Box::new(contents),
            });
        }
        let title = match kind {
            "pre" => "Preconditions",
            "post" => "Postconditions",
            other => return Err(ParserError::UnsupportedSectionKind(other.to_string())),
        };
        Ok(Description::List {
            title: Some(title.to_string()),
            contents: vec![contents],
        })
    }

    fn parse_parameter_list(&self, node: &XmlElement) -> Result<Description, ParserError> {
        if node.has_direct_text() {
            return Err(ParserError::MalformedMarkup(
                "unexpected text in <parameterlist>".to_string(),
            ));
        }

        let mut params = Vec::new();
        for item in node.children_named("parameteritem") {
            let names = item.find_all("parameternamelist/parametername");
            let [name_node] = names.as_slice() else {
                return Err(ParserError::MalformedMarkup(format!(
                    "expected exactly one parameter name, got {}",
                    names.len()
                )));
            };
            let name = simple_text(name_node)?;
            let direction = match name_node.attr("direction") {
                Some(value) => Some(ParameterDirection::from_attr(value).ok_or_else(|| {
                    ParserError::MalformedMarkup(format!("invalid direction '{value}'"))
                })?),
                None => None,
            };
            let description = self.parse_paragraphs(&item.find_all("parameterdescription/para"))?;

            params.push(Description::Parameter {
                param_type: self.parameter_type(&name),
                name,
                direction,
                description: Box::new(description),
            });
        }

        Ok(Description::List {
            title: Some("Parameters".to_string()),
            contents: params,
        })
    }

    fn parse_itemized_list(&self, node: &XmlElement) -> Result<Description, ParserError> {
        let mut items = Vec::new();
        for child in &node.children {
            if child.name != "listitem" {
                return Err(ParserError::MalformedMarkup(format!(
                    "only <listitem> allowed in <itemizedlist>, found <{}>",
                    child.name
                )));
            }
            if let Some(other) = child.children.iter().find(|c| c.name != "para") {
                return Err(ParserError::MalformedMarkup(format!(
                    "only <para> allowed in <listitem>, found <{}>",
                    other.name
                )));
            }
            let paras: Vec<_> = child.children.iter().collect();
            items.push(self.parse_paragraphs(&paras)?);
        }
        Ok(Description::List {
            title: None,
            contents: items,
        })
    }

    fn parameter_type(&self, name: &str) -> Option<String> {
        self.parameters
            .iter()
            .find(|p| p.name.as_deref() == Some(name))
            .and_then(|p| p.param_type.clone())
    }
}

/// `(style, title)` of an admonition section kind.
fn admonition(kind: &str) -> Option<(&'static str, &'static str)> {
    match kind {
        "note" => Some(("note", "Note")),
        "warning" => Some(("warning", "Warning")),
        // TODO: give TODO sections their own admonition style once the site theme has one.
        "todo" => Some(("warning", "TODO")),
        "bug" => Some(("bug", "Bug")),
        "remark" => Some(("info", "Remark")),
        _ => None,
    }
}

/// Append `next` to a composed sequence, merging it into the last element
/// where the composition rules allow.
///
/// Text is trimmed and dropped when blank; text following text is joined
/// with a single space; a titled list following a list with the same title
/// extends it.
#[must_use]
pub fn merge_into(mut contents: Vec<Description>, next: Description) -> Vec<Description> {
    let next = match next {
        Description::Text { contents: text } => {
            let text = text.trim();
            if text.is_empty() {
                return contents;
            }
            Description::text(text)
        }
        other => other,
    };

    match next {
        Description::Text { contents: text } => {
            if let Some(Description::Text { contents: last }) = contents.last_mut() {
                last.push(' ');
                last.push_str(&text);
            } else {
                contents.push(Description::Text { contents: text });
            }
        }
        Description::List {
            title: Some(title),
            contents: items,
        } => {
            if let Some(Description::List {
                title: Some(last_title),
                contents: last_items,
            }) = contents.last_mut()
            {
                if *last_title == title {
                    last_items.extend(items);
                    return contents;
                }
            }
            contents.push(Description::List {
                title: Some(title),
                contents: items,
            });
        }
        other => contents.push(other),
    }
    contents
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::parse_document;
    use pretty_assertions::assert_eq;

    fn text(s: &str) -> Description {
        Description::text(s)
    }

    fn para(contents: Vec<Description>) -> Description {
        Description::paragraph(contents)
    }

    fn list(title: Option<&str>, contents: Vec<Description>) -> Description {
        Description::List {
            title: title.map(str::to_string),
            contents,
        }
    }

    fn parse(xml: &str) -> Result<Description, ParserError> {
        parse_with(xml, &[])
    }

    fn parse_with(xml: &str, parameters: &[Parameter]) -> Result<Description, ParserError> {
        let root = parse_document(xml).unwrap();
        DescriptionParser::new(None, parameters).parse_paragraph(&root)
    }

    #[test]
    fn merge_joins_adjacent_text() {
        let merged = [text("  a "), text("b"), text("\n  "), text("c")]
            .into_iter()
            .fold(Vec::new(), merge_into);
        assert_eq!(merged, vec![text("a b c")]);
    }

    #[test]
    fn merge_joins_lists_with_equal_titles() {
        let merged = [
            list(Some("Preconditions"), vec![text("a")]),
            list(Some("Preconditions"), vec![text("b")]),
            list(Some("Postconditions"), vec![text("c")]),
        ]
        .into_iter()
        .fold(Vec::new(), merge_into);
        assert_eq!(
            merged,
            vec![
                list(Some("Preconditions"), vec![text("a"), text("b")]),
                list(Some("Postconditions"), vec![text("c")]),
            ]
        );
    }

    #[test]
    fn merge_keeps_untitled_lists_apart() {
        let merged = [list(None, vec![text("a")]), list(None, vec![text("b")])]
            .into_iter()
            .fold(Vec::new(), merge_into);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn merge_drops_blank_text_between_lists() {
        let merged = [
            list(Some("Parameters"), vec![text("a")]),
            text("   "),
            list(Some("Parameters"), vec![text("b")]),
        ]
        .into_iter()
        .fold(Vec::new(), merge_into);
        assert_eq!(merged, vec![list(Some("Parameters"), vec![text("a"), text("b")])]);
    }

    #[test]
    fn paragraph_renders_inline_markup_into_text() {
        let desc = parse(
            "<para>Test markups like <bold>bold</bold> and \
             <emphasis>italics</emphasis> work as expected.</para>",
        )
        .unwrap();
        assert_eq!(
            desc,
            para(vec![text(
                "Test markups like <b>bold</b> and <em>italics</em> work as expected."
            )])
        );
    }

    #[test]
    fn blank_paragraph_is_empty() {
        assert_eq!(parse("<para>\n  </para>").unwrap(), para(vec![]));
    }

    #[test]
    fn simplesect_kinds_map_to_nodes() {
        let desc = parse(
            "<para>Intro <simplesect kind=\"return\"><para>zero</para></simplesect>\
             <simplesect kind=\"bug\"><para>leaks</para></simplesect>\
             <simplesect kind=\"remark\"><para>fast</para></simplesect>\
             <simplesect kind=\"todo\"><para>later</para></simplesect>\
             <simplesect kind=\"post\"><para>done</para></simplesect></para>",
        )
        .unwrap();
        assert_eq!(
            desc,
            para(vec![
                text("Intro"),
                Description::Return {
                    title: "Returns".to_string(),
                    description: Box::new(para(vec![text("zero")])),
                },
                Description::Admonition {
                    style: "bug".to_string(),
                    title: "Bug".to_string(),
                    contents: Box::new(para(vec![text("leaks")])),
                },
                Description::Admonition {
                    style: "info".to_string(),
                    title: "Remark".to_string(),
                    contents: Box::new(para(vec![text("fast")])),
                },
                Description::Admonition {
                    style: "warning".to_string(),
                    title: "TODO".to_string(),
                    contents: Box::new(para(vec![text("later")])),
                },
                list(Some("Postconditions"), vec![para(vec![text("done")])]),
            ])
        );
    }

    #[test]
    fn consecutive_preconditions_merge() {
        let desc = parse(
            "<para><simplesect kind=\"pre\"><para>a</para></simplesect>\n\
             <simplesect kind=\"pre\"><para>b</para></simplesect></para>",
        )
        .unwrap();
        assert_eq!(
            desc,
            para(vec![list(
                Some("Preconditions"),
                vec![para(vec![text("a")]), para(vec![text("b")])]
            )])
        );
    }

    #[test]
    fn unknown_simplesect_kind_fails() {
        let err = parse("<para><simplesect kind=\"author\"><para>me</para></simplesect></para>")
            .unwrap_err();
        assert!(
            matches!(err, ParserError::UnsupportedSectionKind(ref k) if k == "author"),
            "got {err:?}"
        );
    }

    #[test]
    fn simplesect_without_kind_fails() {
        let err = parse("<para><simplesect><para>x</para></simplesect></para>").unwrap_err();
        assert!(matches!(err, ParserError::MissingField { .. }), "got {err:?}");
    }

    #[test]
    fn text_directly_in_simplesect_fails() {
        let err = parse("<para><simplesect kind=\"note\">stray<para>x</para></simplesect></para>")
            .unwrap_err();
        assert!(matches!(err, ParserError::MalformedMarkup(_)), "got {err:?}");
    }

    #[test]
    fn text_after_simplesect_paragraph_fails() {
        let err = parse(
            "<para><simplesect kind=\"note\"><para>a</para>stray words</simplesect></para>",
        )
        .unwrap_err();
        assert!(matches!(err, ParserError::MalformedMarkup(_)), "got {err:?}");
    }

    #[test]
    fn text_between_parameter_items_fails() {
        let err = parse(
            "<para><parameterlist kind=\"param\">\
               <parameteritem>\
                 <parameternamelist><parametername>x</parametername></parameternamelist>\
                 <parameterdescription><para>first</para></parameterdescription></parameteritem>\
               lost text\
             </parameterlist></para>",
        )
        .unwrap_err();
        assert!(matches!(err, ParserError::MalformedMarkup(_)), "got {err:?}");
    }

    #[test]
    fn parameter_types_come_from_declaration() {
        let declared = vec![Parameter {
            param_type: Some("int".to_string()),
            name: Some("x".to_string()),
        }];
        let desc = parse_with(
            "<para><parameterlist kind=\"param\">\
               <parameteritem>\
                 <parameternamelist><parametername>x</parametername></parameternamelist>\
                 <parameterdescription><para>first</para></parameterdescription></parameteritem>\
               <parameteritem><parameternamelist>\
                 <parametername direction=\"inout\">y</parametername></parameternamelist>\
                 <parameterdescription><para>second</para></parameterdescription></parameteritem>\
             </parameterlist></para>",
            &declared,
        )
        .unwrap();
        assert_eq!(
            desc,
            para(vec![list(
                Some("Parameters"),
                vec![
                    Description::Parameter {
                        name: "x".to_string(),
                        param_type: Some("int".to_string()),
                        direction: None,
                        description: Box::new(para(vec![text("first")])),
                    },
                    Description::Parameter {
                        name: "y".to_string(),
                        param_type: None,
                        direction: Some(ParameterDirection::Inout),
                        description: Box::new(para(vec![text("second")])),
                    },
                ]
            )])
        );
    }

    #[test]
    fn parameter_item_needs_exactly_one_name() {
        let err = parse(
            "<para><parameterlist kind=\"param\"><parameteritem><parameternamelist>\
               <parametername>a</parametername><parametername>b</parametername>\
             </parameternamelist></parameteritem></parameterlist></para>",
        )
        .unwrap_err();
        assert!(matches!(err, ParserError::MalformedMarkup(_)), "got {err:?}");
    }

    #[test]
    fn invalid_direction_fails() {
        let err = parse(
            "<para><parameterlist kind=\"param\"><parameteritem><parameternamelist>\
               <parametername direction=\"up\">a</parametername>\
             </parameternamelist></parameteritem></parameterlist></para>",
        )
        .unwrap_err();
        assert!(matches!(err, ParserError::MalformedMarkup(_)), "got {err:?}");
    }

    #[test]
    fn itemized_list_items_are_paragraphs() {
        let desc = parse(
            "<para>text<itemizedlist>\n<listitem><para>item1</para></listitem>\n\
             <listitem><para>item2</para></listitem>\n</itemizedlist>\n</para>",
        )
        .unwrap();
        assert_eq!(
            desc,
            para(vec![
                text("text"),
                list(None, vec![para(vec![text("item1")]), para(vec![text("item2")])]),
            ])
        );
    }

    #[test]
    fn list_item_with_non_paragraph_fails() {
        let err =
            parse("<para><itemizedlist><listitem><bold>x</bold></listitem></itemizedlist></para>")
                .unwrap_err();
        assert!(matches!(err, ParserError::MalformedMarkup(_)), "got {err:?}");
    }

    #[test]
    fn itemized_list_with_stray_element_fails() {
        let err = parse("<para><itemizedlist><para>x</para></itemizedlist></para>").unwrap_err();
        assert!(matches!(err, ParserError::MalformedMarkup(_)), "got {err:?}");
    }

    #[test]
    fn unsupported_inline_markup_fails() {
        let err =
            parse("<para>see <ulink url=\"https://example.com\">here</ulink></para>").unwrap_err();
        assert!(
            matches!(err, ParserError::UnsupportedMarkup(ref tag) if tag == "ulink"),
            "got {err:?}"
        );
    }

    #[test]
    fn parsing_is_repeatable() {
        let xml = "<para>a <computeroutput>b</computeroutput>\
                   <simplesect kind=\"note\"><para>c</para></simplesect> d</para>";
        assert_eq!(parse(xml).unwrap(), parse(xml).unwrap());
    }

    #[test]
    fn description_is_none_without_paragraphs() {
        let root = parse_document(
            "<memberdef><briefdescription>\n</briefdescription>\
             <detaileddescription>\n</detaileddescription></memberdef>",
        )
        .unwrap();
        let desc = DescriptionParser::new(None, &[]).parse_description(&root).unwrap();
        assert_eq!(desc, None);
    }

    #[test]
    fn brief_and_detailed_are_wrapped_together() {
        let root = parse_document(
            "<memberdef><briefdescription><para>brief description</para></briefdescription>\
             <detaileddescription><para>Followed by a longer description</para>\
             </detaileddescription></memberdef>",
        )
        .unwrap();
        let desc = DescriptionParser::new(None, &[]).parse_description(&root).unwrap();
        assert_eq!(
            desc,
            Some(para(vec![
                para(vec![text("brief description")]),
                para(vec![text("Followed by a longer description")]),
            ]))
        );
    }
}
