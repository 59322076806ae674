//! Style token derivation for the web target.

use crate::utils::join_to_kebab_case;
use indexmap::IndexSet;
use motif_compiler::Output;
use serde::Serialize;

/// Scalar target types eligible for style promotion.
const SCALAR_TYPES: [&str; 3] = ["string", "number", "boolean"];

/// A promoted style variable.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleVariable {
    pub name: String,
    pub value: String,
    /// Numeric tokens are tracked so the renderer can decide on unit-less
    /// vs. unit-bearing emission.
    pub is_number: bool,
}

/// A named group of style rules.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleRuleGroup {
    pub name: String,
    pub values: Vec<String>,
}

/// Read-only projection of the output's style buckets, consumed by the
/// style-sheet templates at render time. Not persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleTokens {
    pub style_variables: Vec<StyleVariable>,
    pub style_rule_groups: Vec<StyleRuleGroup>,
    pub style_fonts: Vec<Vec<String>>,
}

/// Promote scalar properties of unbound components into named style
/// variables and project the style buckets for rendering.
///
/// The variable name joins the component and property names with the fixed
/// kebab-case convention, so derivation is deterministic.
pub fn style_tokens(output: &mut Output) -> StyleTokens {
    let mut number_variables = IndexSet::new();

    let Output {
        ref processed_components,
        ref mut styles,
        ..
    } = *output;

    for (component_name, component) in processed_components {
        if component.binding.is_some() {
            continue;
        }
        for (property_name, property) in &component.spec.properties {
            if !SCALAR_TYPES.contains(&property.type_name.as_str()) {
                continue;
            }
            let variable = join_to_kebab_case(&[component_name.as_str(), property_name.as_str()]);
            if property.type_name == "number" {
                number_variables.insert(variable.clone());
            }
            styles.variables.insert(variable, property.initializer.clone());
        }
    }

    StyleTokens {
        style_variables: styles
            .variables
            .iter()
            .map(|(name, value)| StyleVariable {
                name: name.clone(),
                value: value.clone(),
                is_number: number_variables.contains(name),
            })
            .collect(),
        style_rule_groups: styles
            .rule_groups
            .iter()
            .map(|(name, values)| StyleRuleGroup {
                name: name.clone(),
                values: values.iter().cloned().collect(),
            })
            .collect(),
        style_fonts: styles
            .fonts
            .values()
            .map(|fonts| fonts.iter().cloned().collect())
            .collect(),
    }
}
