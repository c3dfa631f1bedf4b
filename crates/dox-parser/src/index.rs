//! Doxygen XML document index.
//!
//! `index.xml` lists every compound (struct, union, group, file, ...) with
//! its members, but only records each member's reference id, not the
//! declaration itself. Declarations live in per-compound documents named
//! `<refid>.xml`, which are parsed on first use and kept for the lifetime of
//! the index.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::builder::ObjectBuilder;
use crate::error::ParserError;
use crate::text::{ResolveReference, simple_text};
use crate::types::DoxygenObject;
use crate::xml::{XmlElement, parse_document};

/// Separates a member's name from its compound's name in identifiers.
pub const SCOPE_SEPARATOR: &str = "::";

/// Parsed Doxygen XML output directory.
///
/// The compound cache uses `RefCell`, so the index is neither `Sync` nor
/// meant to be shared across threads.
pub struct DoxygenIndex {
    xml_dir: PathBuf,
    index: XmlElement,
    compounds: RefCell<HashMap<String, Rc<XmlElement>>>,
}

impl DoxygenIndex {
    /// Open the XML output directory and parse its `index.xml`.
    ///
    /// # Errors
    /// Returns `ParserError::Io` if the index cannot be read and
    /// `ParserError::Xml` if it is not well-formed.
    pub fn open(xml_dir: impl Into<PathBuf>) -> Result<Self, ParserError> {
        let xml_dir = xml_dir.into();
        let index = read_document(&xml_dir.join("index.xml"))?;
        tracing::debug!(
            dir = %xml_dir.display(),
            compounds = index.children_named("compound").count(),
            "opened doxygen index"
        );
        Ok(Self {
            xml_dir,
            index,
            compounds: RefCell::new(HashMap::new()),
        })
    }

    #[must_use]
    pub fn xml_dir(&self) -> &Path {
        &self.xml_dir
    }

    /// `(kind, name)` of every compound listed in the index.
    #[must_use]
    pub fn compound_names(&self) -> Vec<(String, String)> {
        self.index
            .children_named("compound")
            .filter_map(|c| {
                let kind = c.attr("kind")?.to_string();
                let name = simple_text(c.child("name")?).ok()?;
                Some((kind, name))
            })
            .collect()
    }

    /// Build the documentation object for `identifier`.
    ///
    /// The identifier is a member name, a compound name, or
    /// `Compound::member`. Members take precedence over compounds.
    ///
    /// # Errors
    /// `UnknownIdentifier` if nothing matches, `AmbiguousIdentifier` if
    /// several declarations match, or any error raised while parsing the
    /// matched declaration.
    pub fn collect(&self, identifier: &str) -> Result<DoxygenObject, ParserError> {
        let builder = ObjectBuilder::new(self);

        if let Some((compound, member)) = self.find_member(identifier)? {
            let def = compound_def(&compound)?;
            let node = locate_member(def, &member, identifier)?;
            return builder.build_member(node);
        }

        if let Some(compound) = self.find_compound(identifier)? {
            return builder.build_compound(&compound);
        }

        Err(ParserError::UnknownIdentifier(identifier.to_string()))
    }

    /// Locate the compound document declaring member `identifier`.
    ///
    /// Returns the loaded compound document and the bare member name.
    fn find_member(
        &self,
        identifier: &str,
    ) -> Result<Option<(Rc<XmlElement>, String)>, ParserError> {
        let (scope, name) = split_scope(identifier)?;

        let mut refids: Vec<&str> = Vec::new();
        for compound in self.index.children_named("compound") {
            if let Some(scope) = scope {
                if !has_name(compound, scope) {
                    continue;
                }
            }
            for member in compound.children_named("member") {
                if !has_name(member, name) {
                    continue;
                }
                let refid = member
                    .attr("refid")
                    .ok_or_else(|| ParserError::missing("member", "refid"))?;
                if !refids.contains(&refid) {
                    refids.push(refid);
                }
            }
        }

        let refid = match refids.as_slice() {
            [] => return Ok(None),
            [refid] => *refid,
            _ => return Err(ParserError::AmbiguousIdentifier(identifier.to_string())),
        };

        let compound_id = owning_compound_id(refid)?;
        let document = self.load_compound(compound_id)?;
        Ok(Some((document, name.to_string())))
    }

    fn find_compound(&self, name: &str) -> Result<Option<Rc<XmlElement>>, ParserError> {
        let matches: Vec<_> = self
            .index
            .children_named("compound")
            .filter(|c| has_name(c, name))
            .collect();
        let compound = match matches.as_slice() {
            [] => return Ok(None),
            [compound] => *compound,
            _ => return Err(ParserError::AmbiguousIdentifier(name.to_string())),
        };
        let refid = compound
            .attr("refid")
            .ok_or_else(|| ParserError::missing("compound", "refid"))?;
        self.load_compound(refid).map(Some)
    }

    /// Load (or fetch from cache) the compound document `<refid>.xml`.
    ///
    /// # Errors
    /// Returns `ParserError::Io` or `ParserError::Xml` if the document cannot
    /// be read or parsed.
    pub fn load_compound(&self, refid: &str) -> Result<Rc<XmlElement>, ParserError> {
        if let Some(document) = self.compounds.borrow().get(refid) {
            tracing::trace!(refid, "compound cache hit");
            return Ok(Rc::clone(document));
        }

        let path = self.xml_dir.join(format!("{refid}.xml"));
        tracing::debug!(refid, path = %path.display(), "loading compound document");
        let document = Rc::new(read_document(&path)?);
        self.compounds
            .borrow_mut()
            .insert(refid.to_string(), Rc::clone(&document));
        Ok(document)
    }
}

impl ResolveReference for DoxygenIndex {
    fn resolve_reference(&self, refid: &str, kindref: &str) -> Result<String, ParserError> {
        let mut resolved: Option<String> = None;
        let targets = self
            .index
            .descendants()
            .filter(|node| node.name == kindref && node.attr("refid") == Some(refid));

        for target in targets {
            let name_node = target
                .child("name")
                .ok_or_else(|| ParserError::missing(kindref, "name"))?;
            if !name_node.children.is_empty() {
                return Err(ParserError::MalformedMarkup(format!(
                    "unexpected children in name of {kindref} reference {refid}"
                )));
            }
            let name = name_node.text.trim();
            match &resolved {
                None => resolved = Some(name.to_string()),
                Some(first) if first != name => {
                    return Err(ParserError::AmbiguousReference {
                        kindref: kindref.to_string(),
                        refid: refid.to_string(),
                        first: first.clone(),
                        second: name.to_string(),
                    });
                }
                Some(_) => {}
            }
        }

        resolved.ok_or_else(|| ParserError::UnresolvedReference {
            kindref: kindref.to_string(),
            refid: refid.to_string(),
        })
    }
}

/// The `<compounddef>` root of a compound document.
pub(crate) fn compound_def(document: &XmlElement) -> Result<&XmlElement, ParserError> {
    document
        .child("compounddef")
        .ok_or_else(|| ParserError::missing(&document.name, "compounddef"))
}

/// Derive the owning compound's refid from a member refid.
///
/// Doxygen builds member ids as `<compound refid>_<suffix>`; the suffix
/// itself never contains an underscore.
fn owning_compound_id(member_refid: &str) -> Result<&str, ParserError> {
    member_refid
        .rsplit_once('_')
        .map(|(compound, _)| compound)
        .filter(|compound| !compound.is_empty())
        .ok_or_else(|| ParserError::InvalidRefId(member_refid.to_string()))
}

/// Find the single `memberdef` called `name` in a compound definition.
fn locate_member<'a>(
    compound_def: &'a XmlElement,
    name: &str,
    identifier: &str,
) -> Result<&'a XmlElement, ParserError> {
    let matches: Vec<_> = compound_def
        .find_all("sectiondef/memberdef")
        .into_iter()
        .filter(|m| has_name(m, name))
        .collect();
    match matches.as_slice() {
        [] => Err(ParserError::UnknownIdentifier(identifier.to_string())),
        [member] => Ok(*member),
        _ => Err(ParserError::AmbiguousIdentifier(identifier.to_string())),
    }
}

/// Split `Compound::member` into its scope and member name.
fn split_scope(identifier: &str) -> Result<(Option<&str>, &str), ParserError> {
    match identifier.split_once(SCOPE_SEPARATOR) {
        Some((_, name)) if name.contains(SCOPE_SEPARATOR) => {
            Err(ParserError::NestedScope(identifier.to_string()))
        }
        Some((scope, name)) => Ok((Some(scope), name)),
        None => Ok((None, identifier)),
    }
}

fn has_name(node: &XmlElement, name: &str) -> bool {
    node.child("name").is_some_and(|n| n.text.trim() == name)
}

fn read_document(path: &Path) -> Result<XmlElement, ParserError> {
    let content = fs::read_to_string(path)?;
    parse_document(&content)
        .map_err(|e| ParserError::Xml(format!("{}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("structs1_1a3c6e0f1ad7b1fa5e5a4d5b2c7e9f0a11", "structs1")]
    #[case("group__g1_1ga2f1e5b6e5a7c9d8f3b4a1c2d3e4f5a6b", "group__g1")]
    #[case("file1_8h_1a0b1c2d3e4f5a6b7c8d9e0f1a2b3c4d5e", "file1_8h")]
    fn trims_member_suffix(#[case] refid: &str, #[case] compound: &str) {
        assert_eq!(owning_compound_id(refid).unwrap(), compound);
    }

    #[rstest]
    #[case("nounderscore")]
    #[case("_leading")]
    fn rejects_refids_without_compound(#[case] refid: &str) {
        assert!(matches!(
            owning_compound_id(refid),
            Err(ParserError::InvalidRefId(_))
        ));
    }

    #[rstest]
    #[case("x", None, "x")]
    #[case("s1::x", Some("s1"), "x")]
    fn splits_one_scope_level(
        #[case] identifier: &str,
        #[case] scope: Option<&str>,
        #[case] name: &str,
    ) {
        assert_eq!(split_scope(identifier).unwrap(), (scope, name));
    }

    #[test]
    fn rejects_nested_scopes() {
        assert!(matches!(
            split_scope("g1::s1::x"),
            Err(ParserError::NestedScope(ref id)) if id == "g1::s1::x"
        ));
    }

    #[test]
    fn locate_member_requires_unique_name() {
        let def = parse_document(
            "<compounddef><sectiondef>\
               <memberdef kind=\"variable\"><name>a</name></memberdef>\
               <memberdef kind=\"variable\"><name>a</name></memberdef>\
               <memberdef kind=\"variable\"><name>b</name></memberdef>\
             </sectiondef></compounddef>",
        )
        .unwrap();
        assert!(locate_member(&def, "b", "b").is_ok());
        assert!(matches!(
            locate_member(&def, "a", "a"),
            Err(ParserError::AmbiguousIdentifier(_))
        ));
        assert!(matches!(
            locate_member(&def, "c", "c"),
            Err(ParserError::UnknownIdentifier(_))
        ));
    }
}
