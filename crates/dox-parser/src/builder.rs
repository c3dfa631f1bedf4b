//! Builds documentation objects from located declaration elements.

use crate::description::DescriptionParser;
use crate::error::ParserError;
use crate::index::{DoxygenIndex, compound_def};
use crate::text::{normalize_type, simple_text};
use crate::types::{
    Compound, CompoundType, Define, Description, DoxygenObject, Enum, EnumValue, Function, Location,
    Parameter, Variable,
};
use crate::xml::XmlElement;

/// Turns `memberdef` and `compounddef` elements into [`DoxygenObject`]s.
///
/// Holds the index for loading nested compounds and for resolving
/// cross-references inside descriptions.
pub struct ObjectBuilder<'a> {
    index: &'a DoxygenIndex,
}

impl<'a> ObjectBuilder<'a> {
    #[must_use]
    pub const fn new(index: &'a DoxygenIndex) -> Self {
        Self { index }
    }

    /// Build a member declaration (`<memberdef>`).
    ///
    /// # Errors
    /// `UnsupportedMemberKind` for kinds other than function, define, enum,
    /// and variable; otherwise any field or description error.
    pub fn build_member(&self, node: &XmlElement) -> Result<DoxygenObject, ParserError> {
        let kind = node
            .attr("kind")
            .ok_or_else(|| ParserError::missing(&node.name, "kind"))?;
        match kind {
            "function" => self.build_function(node).map(DoxygenObject::Function),
            "define" => self.build_define(node).map(DoxygenObject::Define),
            "enum" => self.build_enum(node).map(DoxygenObject::Enum),
            "variable" => self.build_variable(node).map(DoxygenObject::Variable),
            other => Err(ParserError::UnsupportedMemberKind(other.to_string())),
        }
    }

    /// Build a compound from its document (the `<doxygen>` root holding a
    /// `<compounddef>`), recursing into inner classes.
    ///
    /// # Errors
    /// `UnsupportedCompoundType` for kinds other than struct, union, and
    /// group; otherwise any member, field, or I/O error.
    pub fn build_compound(&self, document: &XmlElement) -> Result<DoxygenObject, ParserError> {
        let node = compound_def(document)?;
        let name = required_name(node, "compoundname")?;
        let kind = node
            .attr("kind")
            .ok_or_else(|| ParserError::missing("compounddef", "kind"))?;
        let compound_type = CompoundType::from_kind(kind)
            .ok_or_else(|| ParserError::UnsupportedCompoundType(kind.to_string()))?;
        let title = match node.child("title") {
            Some(title) => simple_text(title)?,
            None => name.clone(),
        };

        let mut members = Vec::new();
        for inner in node.children_named("innerclass") {
            let refid = inner
                .attr("refid")
                .ok_or_else(|| ParserError::missing("innerclass", "refid"))?;
            let inner_document = self.index.load_compound(refid)?;
            members.push(self.build_compound(&inner_document)?);
        }
        for member in node.find_all("sectiondef/memberdef") {
            members.push(self.build_member(member)?);
        }

        tracing::debug!(%name, %compound_type, members = members.len(), "built compound");
        Ok(DoxygenObject::Compound(Compound {
            compound_type,
            description: self.description(node, &[])?,
            location: parse_location(node)?,
            name,
            title,
            members,
        }))
    }

    fn build_function(&self, node: &XmlElement) -> Result<Function, ParserError> {
        let name = required_name(node, "name")?;
        let return_type = parse_type(node.child("type"))?
            .ok_or_else(|| ParserError::missing("memberdef", "type"))?;
        let parameters = parse_function_parameters(node, &name)?;
        Ok(Function {
            description: self.description(node, &parameters)?,
            location: required_location(node)?,
            return_type,
            name,
            parameters,
        })
    }

    fn build_define(&self, node: &XmlElement) -> Result<Define, ParserError> {
        let name = required_name(node, "name")?;
        let parameters = parse_macro_parameters(node, &name)?;
        Ok(Define {
            value: parse_initializer(node)?,
            description: self.description(node, &[])?,
            location: required_location(node)?,
            name,
            parameters,
        })
    }

    fn build_enum(&self, node: &XmlElement) -> Result<Enum, ParserError> {
        let values = node
            .children_named("enumvalue")
            .map(|value| -> Result<EnumValue, ParserError> {
                Ok(EnumValue {
                    name: required_name(value, "name")?,
                    initializer: parse_initializer(value)?,
                    description: self.description(value, &[])?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Enum {
            name: required_name(node, "name")?,
            values,
            description: self.description(node, &[])?,
            location: required_location(node)?,
        })
    }

    fn build_variable(&self, node: &XmlElement) -> Result<Variable, ParserError> {
        let name = required_name(node, "name")?;
        let var_type = parse_type(node.child("type"))?
            .ok_or_else(|| ParserError::missing("memberdef", "type"))?;
        let qualified_name = match node.child("qualifiedname") {
            Some(qualified) => simple_text(qualified)?,
            None => name.clone(),
        };
        Ok(Variable {
            var_type,
            qualified_name,
            initializer: parse_initializer(node)?,
            description: self.description(node, &[])?,
            location: required_location(node)?,
            name,
        })
    }

    fn description(
        &self,
        node: &XmlElement,
        parameters: &[Parameter],
    ) -> Result<Option<Description>, ParserError> {
        DescriptionParser::new(Some(self.index), parameters).parse_description(node)
    }
}

fn required_name(node: &XmlElement, tag: &str) -> Result<String, ParserError> {
    let name_node = node
        .child(tag)
        .ok_or_else(|| ParserError::missing(&node.name, tag))?;
    simple_text(name_node)
}

fn parse_type(node: Option<&XmlElement>) -> Result<Option<String>, ParserError> {
    node.map(|n| simple_text(n).map(|t| normalize_type(&t)))
        .transpose()
}

fn parse_initializer(node: &XmlElement) -> Result<Option<String>, ParserError> {
    node.child("initializer").map(simple_text).transpose()
}

fn parse_function_parameters(
    node: &XmlElement,
    function: &str,
) -> Result<Vec<Parameter>, ParserError> {
    node.children_named("param")
        .map(|param| -> Result<Parameter, ParserError> {
            let param_type = parse_type(param.child("type"))?;
            if param_type.is_none() {
                return Err(ParserError::MissingParameterType {
                    function: function.to_string(),
                });
            }
            Ok(Parameter {
                param_type,
                name: param.child("declname").map(simple_text).transpose()?,
            })
        })
        .collect()
}

/// Macro parameters. `None` means an object-like macro; a single `<param>`
/// without a name is Doxygen's encoding of `NAME()`.
fn parse_macro_parameters(
    node: &XmlElement,
    name: &str,
) -> Result<Option<Vec<Parameter>>, ParserError> {
    let params: Vec<_> = node.children_named("param").collect();
    if params.is_empty() {
        return Ok(None);
    }

    let mut parameters = Vec::with_capacity(params.len());
    for param in &params {
        let Some(defname) = param.child("defname") else {
            if params.len() == 1 {
                return Ok(Some(Vec::new()));
            }
            return Err(ParserError::MissingParameterName {
                name: name.to_string(),
            });
        };
        parameters.push(Parameter {
            param_type: parse_type(param.child("type"))?,
            name: Some(simple_text(defname)?),
        });
    }
    Ok(Some(parameters))
}

fn parse_location(node: &XmlElement) -> Result<Option<Location>, ParserError> {
    let Some(location) = node.child("location") else {
        return Ok(None);
    };
    let file = location
        .attr("file")
        .ok_or_else(|| ParserError::missing("location", "file"))?;
    Ok(Some(Location {
        file: file.to_string(),
        line: numeric_attr(location, "line")?,
        column: numeric_attr(location, "column")?,
    }))
}

fn required_location(node: &XmlElement) -> Result<Location, ParserError> {
    parse_location(node)?.ok_or_else(|| ParserError::missing(&node.name, "location"))
}

fn numeric_attr(node: &XmlElement, attr: &str) -> Result<u32, ParserError> {
    node.attr(attr)
        .and_then(|value| value.parse().ok())
        .ok_or_else(|| ParserError::missing(&node.name, attr))
}
