//! Inline markup rendering.
//!
//! Converts Doxygen's inline markup elements into Markdown-compatible text
//! with embedded HTML tags. Every element contributes its own text, its
//! rendered children, and finally its tail, so a sequence of siblings renders
//! in document order.

use crate::error::ParserError;
use crate::xml::XmlElement;

/// Resolves in-text `<ref>` markers to the referenced entity's name.
pub trait ResolveReference {
    /// Declared name of the entity `refid` of kind `kindref`
    /// (`compound` or `member`).
    ///
    /// # Errors
    /// Fails when the reference is unknown or ambiguous.
    fn resolve_reference(&self, refid: &str, kindref: &str) -> Result<String, ParserError>;
}

/// Inline markup elements understood by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Markup {
    Bold,
    Emphasis,
    ComputerOutput,
    ProgramListing,
    Verbatim,
    CodeLine,
    Highlight,
    Ref,
    Space,
}

impl Markup {
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "bold" => Some(Self::Bold),
            "emphasis" => Some(Self::Emphasis),
            "computeroutput" => Some(Self::ComputerOutput),
            "programlisting" => Some(Self::ProgramListing),
            "verbatim" => Some(Self::Verbatim),
            "codeline" => Some(Self::CodeLine),
            "highlight" => Some(Self::Highlight),
            "ref" => Some(Self::Ref),
            "sp" => Some(Self::Space),
            _ => None,
        }
    }
}

/// Markup legal inside a `<programlisting>`.
pub const CODE_MARKUP: &[Markup] = &[
    Markup::CodeLine,
    Markup::Highlight,
    Markup::Space,
    Markup::Ref,
];

/// Markup legal inside names, types, and initializers.
pub const SIMPLE_MARKUP: &[Markup] = &[Markup::Ref];

/// Renders inline markup, optionally restricted to an allow-list and
/// optionally resolving references into Markdown reference links.
#[derive(Clone, Copy)]
pub struct TextRenderer<'a> {
    resolver: Option<&'a dyn ResolveReference>,
    allowlist: Option<&'a [Markup]>,
}

impl<'a> TextRenderer<'a> {
    #[must_use]
    pub const fn new(resolver: Option<&'a dyn ResolveReference>) -> Self {
        Self {
            resolver,
            allowlist: None,
        }
    }

    /// Same resolver, restricted to `allowlist`.
    #[must_use]
    pub const fn with_allowlist(self, allowlist: &'a [Markup]) -> Self {
        Self {
            resolver: self.resolver,
            allowlist: Some(allowlist),
        }
    }

    /// Render one markup element followed by its tail.
    ///
    /// # Errors
    /// `UnsupportedMarkup` for unknown tags, `IllegalMarkup` for known tags
    /// outside the allow-list, and `MalformedMarkup` for structurally invalid
    /// markup.
    pub fn render(&self, node: &XmlElement) -> Result<String, ParserError> {
        let markup = Markup::from_tag(&node.name)
            .ok_or_else(|| ParserError::UnsupportedMarkup(node.name.clone()))?;
        if self.allowlist.is_some_and(|allowed| !allowed.contains(&markup)) {
            return Err(ParserError::IllegalMarkup(node.name.clone()));
        }

        match markup {
            Markup::Bold => self.wrap(node, "<b>", "</b>"),
            Markup::Emphasis => self.wrap(node, "<em>", "</em>"),
            Markup::ComputerOutput => self.wrap(node, "<code>", "</code>"),
            Markup::Verbatim => {
                self.wrap(node, r#"<pre><code class="language-cpp">"#, "</code></pre>")
            }
            Markup::CodeLine | Markup::Highlight => self.wrap(node, "", ""),
            Markup::Space => self.wrap(node, " ", ""),
            Markup::ProgramListing => {
                let language = match node.attr("filename") {
                    Some(filename) => filename.strip_prefix('.').ok_or_else(|| {
                        ParserError::MalformedMarkup(format!(
                            "<programlisting> filename '{filename}' has no extension"
                        ))
                    })?,
                    None => "",
                };
                let prefix = format!("\n```{language}\n");
                self.with_allowlist(CODE_MARKUP).wrap(node, &prefix, "```\n")
            }
            Markup::Ref => self.render_ref(node),
        }
    }

    /// Render `node`'s own text and children, without its tail.
    ///
    /// # Errors
    /// Propagates rendering errors of the children.
    pub fn render_contents(&self, node: &XmlElement) -> Result<String, ParserError> {
        let mut out = node.text.clone();
        for child in &node.children {
            out.push_str(&self.render(child)?);
        }
        Ok(out)
    }

    fn wrap(&self, node: &XmlElement, prefix: &str, suffix: &str) -> Result<String, ParserError> {
        let mut out = String::from(prefix);
        out.push_str(&self.render_contents(node)?);
        out.push_str(suffix);
        out.push_str(&node.tail);
        Ok(out)
    }

    fn render_ref(&self, node: &XmlElement) -> Result<String, ParserError> {
        if !node.children.is_empty() {
            return Err(ParserError::MalformedMarkup(format!(
                "unexpected children in <ref> with refid={}",
                node.attr("refid").unwrap_or_default()
            )));
        }

        let mut out = match self.resolver {
            Some(resolver) => {
                let refid = node
                    .attr("refid")
                    .ok_or_else(|| ParserError::missing("ref", "refid"))?;
                let kindref = node
                    .attr("kindref")
                    .ok_or_else(|| ParserError::missing("ref", "kindref"))?;
                let target = resolver.resolve_reference(refid, kindref)?;
                format!("[{}][{target}]", escape_brackets(&node.text))
            }
            None => node.text.clone(),
        };
        out.push_str(&node.tail);
        Ok(out)
    }
}

fn escape_brackets(text: &str) -> String {
    text.replace('[', "\\[").replace(']', "\\]")
}

/// Text of a name, type, or initializer element.
///
/// Only `<ref>` markup is allowed; references keep their visible text and
/// are not turned into links. The result is trimmed.
///
/// # Errors
/// Fails if the element contains markup other than `<ref>`.
pub fn simple_text(node: &XmlElement) -> Result<String, ParserError> {
    let text = TextRenderer::new(None)
        .with_allowlist(SIMPLE_MARKUP)
        .render_contents(node)?;
    Ok(text.trim().to_string())
}

/// Compact Doxygen's spaced-out type punctuation: `struct s *` → `struct s*`.
#[must_use]
pub fn normalize_type(type_text: &str) -> String {
    type_text
        .replace("< ", "<")
        .replace(" >", ">")
        .replace(" &", "&")
        .replace(" *", "*")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::parse_document;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    struct FixedNames;

    impl ResolveReference for FixedNames {
        fn resolve_reference(&self, refid: &str, kindref: &str) -> Result<String, ParserError> {
            match (refid, kindref) {
                ("structs1", "compound") => Ok("s1".to_string()),
                _ => Err(ParserError::UnresolvedReference {
                    kindref: kindref.to_string(),
                    refid: refid.to_string(),
                }),
            }
        }
    }

    fn render(xml: &str) -> Result<String, ParserError> {
        let root = parse_document(xml).unwrap();
        TextRenderer::new(None).render(&root)
    }

    #[rstest]
    #[case("<bold>b</bold>", "<b>b</b>")]
    #[case("<emphasis>e</emphasis>", "<em>e</em>")]
    #[case("<computeroutput>x</computeroutput>", "<code>x</code>")]
    #[case("<verbatim>raw</verbatim>", r#"<pre><code class="language-cpp">raw</code></pre>"#)]
    #[case("<bold>a <emphasis>b</emphasis> c</bold>", "<b>a <em>b</em> c</b>")]
    #[case("<ref refid=\"structs1\" kindref=\"compound\">s1</ref>", "s1")]
    fn renders_inline_markup(#[case] xml: &str, #[case] expected: &str) {
        assert_eq!(render(xml).unwrap(), expected);
    }

    #[test]
    fn includes_tail_after_closing_tag() {
        let root = parse_document("<para><bold>b</bold> tail</para>").unwrap();
        let out = TextRenderer::new(None).render(&root.children[0]).unwrap();
        assert_eq!(out, "<b>b</b> tail");
    }

    #[test]
    fn renders_program_listing_as_fenced_block() {
        let xml = "<programlisting filename=\".c\">\
                   <codeline><highlight class=\"normal\">int<sp/>x;</highlight></codeline>\n\
                   <codeline><highlight class=\"normal\">return<sp/>x;</highlight></codeline>\n\
                   </programlisting>";
        assert_eq!(render(xml).unwrap(), "\n```c\nint x;\nreturn x;\n```\n");
    }

    #[test]
    fn program_listing_without_filename_has_no_language() {
        let xml = "<programlisting><codeline>a</codeline>\n</programlisting>";
        assert_eq!(render(xml).unwrap(), "\n```\na\n```\n");
    }

    #[test]
    fn program_listing_rejects_filename_without_dot() {
        let err = render("<programlisting filename=\"c\"></programlisting>").unwrap_err();
        assert!(matches!(err, ParserError::MalformedMarkup(_)), "got {err:?}");
    }

    #[test]
    fn program_listing_rejects_prose_markup() {
        let err = render("<programlisting><codeline><bold>x</bold></codeline></programlisting>")
            .unwrap_err();
        assert!(matches!(err, ParserError::IllegalMarkup(ref tag) if tag == "bold"), "got {err:?}");
    }

    #[test]
    fn unknown_tags_are_unsupported() {
        let err = render("<blink>x</blink>").unwrap_err();
        assert!(
            matches!(err, ParserError::UnsupportedMarkup(ref tag) if tag == "blink"),
            "got {err:?}"
        );
    }

    #[test]
    fn resolved_refs_become_reference_links() {
        let root =
            parse_document("<ref refid=\"structs1\" kindref=\"compound\">s[1]</ref>").unwrap();
        let out = TextRenderer::new(Some(&FixedNames)).render(&root).unwrap();
        assert_eq!(out, "[s\\[1\\]][s1]");
    }

    #[test]
    fn unresolved_refs_fail() {
        let root = parse_document("<ref refid=\"nope\" kindref=\"member\">n</ref>").unwrap();
        let err = TextRenderer::new(Some(&FixedNames)).render(&root).unwrap_err();
        assert!(matches!(err, ParserError::UnresolvedReference { .. }), "got {err:?}");
    }

    #[test]
    fn refs_with_children_are_malformed() {
        let err = render("<ref refid=\"a\" kindref=\"member\"><bold>x</bold></ref>").unwrap_err();
        assert!(matches!(err, ParserError::MalformedMarkup(_)), "got {err:?}");
    }

    #[test]
    fn simple_text_keeps_reference_text() {
        let root = parse_document(
            "<type>struct \
             <ref refid=\"structg1__struct\" kindref=\"compound\">g1_struct</ref> *</type>",
        )
        .unwrap();
        assert_eq!(simple_text(&root).unwrap(), "struct g1_struct *");
    }

    #[test]
    fn simple_text_rejects_other_markup() {
        let root = parse_document("<name><bold>x</bold></name>").unwrap();
        assert!(matches!(simple_text(&root), Err(ParserError::IllegalMarkup(_))));
    }

    #[rstest]
    #[case("struct1 *", "struct1*")]
    #[case("const char * const *", "const char* const*")]
    #[case("std::vector< int >", "std::vector<int>")]
    #[case("T &", "T&")]
    #[case("int", "int")]
    fn normalizes_type_spacing(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_type(input), expected);
    }
}
