//! Applies rendering visibility toggles to collected objects.

use dox_config::RenderOptions;
use dox_parser::{Description, DoxygenObject, merge_into};

/// Remove everything `options` hides from `object` and its members.
pub fn apply(object: &mut DoxygenObject, options: &RenderOptions) {
    if options.shows_everything() {
        return;
    }

    match object {
        DoxygenObject::Function(function) => {
            function.description = description(function.description.take(), options);
        }
        DoxygenObject::Define(define) => {
            define.description = description(define.description.take(), options);
            if !options.show_initializer {
                define.value = None;
            }
        }
        DoxygenObject::Enum(enumeration) => {
            enumeration.description = description(enumeration.description.take(), options);
            for value in &mut enumeration.values {
                value.description = description(value.description.take(), options);
            }
        }
        DoxygenObject::Variable(variable) => {
            variable.description = description(variable.description.take(), options);
            if !options.show_initializer {
                variable.initializer = None;
            }
        }
        DoxygenObject::Compound(compound) => {
            compound.description = description(compound.description.take(), options);
            for member in &mut compound.members {
                apply(member, options);
            }
        }
    }
}

fn description(desc: Option<Description>, options: &RenderOptions) -> Option<Description> {
    if !options.show_description {
        return None;
    }
    desc.and_then(|d| prune(d, options))
        .filter(|d| !matches!(d, Description::Paragraph { contents } if contents.is_empty()))
}

fn hidden(node: &Description, options: &RenderOptions) -> bool {
    match node {
        Description::Return { .. } => !options.show_return,
        Description::List { title: Some(title), .. } => match title.as_str() {
            "Preconditions" => !options.show_preconditions,
            "Postconditions" => !options.show_postconditions,
            _ => false,
        },
        _ => false,
    }
}

fn prune(node: Description, options: &RenderOptions) -> Option<Description> {
    if hidden(&node, options) {
        return None;
    }
    let node = match node {
        Description::Paragraph { contents } => Description::Paragraph {
            contents: prune_all(contents, options),
        },
        Description::List { title, contents } => Description::List {
            title,
            contents: prune_all(contents, options),
        },
        Description::Admonition {
            style,
            title,
            contents,
        } => Description::Admonition {
            style,
            title,
            contents: Box::new(prune_boxed(*contents, options)),
        },
        Description::Parameter {
            name,
            param_type,
            direction,
            description,
        } => Description::Parameter {
            name,
            param_type,
            direction,
            description: Box::new(prune_boxed(*description, options)),
        },
        Description::Return { title, description } => Description::Return {
            title,
            description: Box::new(prune_boxed(*description, options)),
        },
        text @ Description::Text { .. } => text,
    };
    Some(node)
}

/// Removing a node can leave two text runs side by side; recompose so they
/// merge again.
fn prune_all(contents: Vec<Description>, options: &RenderOptions) -> Vec<Description> {
    contents
        .into_iter()
        .filter_map(|node| prune(node, options))
        .fold(Vec::new(), merge_into)
}

fn prune_boxed(node: Description, options: &RenderOptions) -> Description {
    prune(node, options).unwrap_or_else(|| Description::paragraph(Vec::new()))
}
