//! Derived views over the catalog: availability filtering and grouping

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use super::{list_variables, Category, VariableDescriptor};
use crate::context::{ContextState, ContextValue, TemplateDataContext};
use crate::path::{strip_tag, SEGMENT_SEPARATOR};

/// Group descriptors by category.
///
/// Order inside each category follows the input; categories without members
/// are left out of the map.
pub fn group_by_category(
    descriptors: &[VariableDescriptor],
) -> BTreeMap<Category, Vec<VariableDescriptor>> {
    let mut groups: BTreeMap<Category, Vec<VariableDescriptor>> = BTreeMap::new();
    for descriptor in descriptors {
        groups.entry(descriptor.category).or_default().push(*descriptor);
    }
    groups
}

/// Keep only the descriptors whose path is in `available`
pub fn filter_available(
    descriptors: &[VariableDescriptor],
    available: &BTreeSet<String>,
) -> Vec<VariableDescriptor> {
    descriptors
        .iter()
        .filter(|descriptor| available.contains(strip_tag(descriptor.path)))
        .copied()
        .collect()
}

/// Paths the context can supply, flattened one level deep.
///
/// Nested top-level values contribute `key.subkey` for each sub-key; scalar
/// top-level values contribute `key`. Deeper levels are not visited.
pub fn available_paths(context: &TemplateDataContext) -> BTreeSet<String> {
    let mut paths = BTreeSet::new();
    for (key, value) in context.iter() {
        match value {
            ContextValue::Nested(children) => {
                for subkey in children.keys() {
                    paths.insert(format!("{key}{SEGMENT_SEPARATOR}{subkey}"));
                }
            }
            ContextValue::Text(_) | ContextValue::Number(_) => {
                paths.insert(key.to_string());
            }
        }
    }
    paths
}

/// One category section of the authoring panel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelSection {
    pub category: Category,
    pub title: &'static str,
    pub variables: Vec<VariableDescriptor>,
}

/// Variables offered to the author for the current contract
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariablePanel {
    /// The context has not arrived yet
    pub loading: bool,
    pub sections: Vec<PanelSection>,
}

impl VariablePanel {
    pub fn variable_count(&self) -> usize {
        self.sections.iter().map(|s| s.variables.len()).sum()
    }
}

/// Build the panel for a context state: the catalog filtered by what the
/// context provides, grouped by category. Empty while loading.
pub fn variable_panel(state: &ContextState) -> VariablePanel {
    let Some(context) = state.context() else {
        return VariablePanel {
            loading: true,
            sections: Vec::new(),
        };
    };

    let available = filter_available(list_variables(), &available_paths(context));
    let sections = group_by_category(&available)
        .into_iter()
        .map(|(category, variables)| PanelSection {
            category,
            title: category.title(),
            variables,
        })
        .collect();

    VariablePanel {
        loading: false,
        sections,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn context_with_name_and_rent() -> TemplateDataContext {
        TemplateDataContext::new()
            .with(
                "landlord",
                ContextValue::nested([("name", ContextValue::text("Carlos Souza"))]),
            )
            .with("rentAmount", ContextValue::text("R$ 1.500,00"))
    }

    #[test]
    fn test_available_paths_flatten_one_level() {
        let context = TemplateDataContext::new()
            .with(
                "property",
                ContextValue::nested([
                    ("city", ContextValue::text("Recife")),
                    (
                        "owner",
                        ContextValue::nested([("name", ContextValue::text("X"))]),
                    ),
                ]),
            )
            .with("todayDate", ContextValue::text("01/02/2026"))
            .with("rentAmount", ContextValue::Number(1500.0));

        let paths: Vec<String> = available_paths(&context).into_iter().collect();
        assert_eq!(
            paths,
            vec![
                "property.city".to_string(),
                "property.owner".to_string(),
                "rentAmount".to_string(),
                "todayDate".to_string(),
            ]
        );
    }

    #[test]
    fn test_group_preserves_order_and_omits_empty() {
        let descriptors: Vec<VariableDescriptor> = list_variables()
            .iter()
            .filter(|d| d.category != Category::Property)
            .copied()
            .collect();

        let groups = group_by_category(&descriptors);
        assert!(!groups.contains_key(&Category::Property));

        let tenant_paths: Vec<&str> = groups[&Category::Tenant].iter().map(|d| d.path).collect();
        let expected: Vec<&str> = list_variables()
            .iter()
            .filter(|d| d.category == Category::Tenant)
            .map(|d| d.path)
            .collect();
        assert_eq!(tenant_paths, expected);
    }

    #[test]
    fn test_group_empty_input() {
        assert!(group_by_category(&[]).is_empty());
    }

    #[test]
    fn test_filter_available_only_keeps_listed_paths() {
        let available: BTreeSet<String> =
            ["tenant.name".to_string(), "unknown.path".to_string()].into();
        let filtered = filter_available(list_variables(), &available);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].path, "tenant.name");
    }

    #[test]
    fn test_grouped_availability_filter() {
        let context = context_with_name_and_rent();
        let groups = group_by_category(&filter_available(
            list_variables(),
            &available_paths(&context),
        ));

        assert_eq!(
            groups.keys().copied().collect::<Vec<_>>(),
            vec![Category::Landlord, Category::Monetary]
        );
        assert_eq!(groups[&Category::Landlord].len(), 1);
        assert_eq!(groups[&Category::Landlord][0].path, "landlord.name");
        assert_eq!(groups[&Category::Monetary].len(), 1);
        assert_eq!(groups[&Category::Monetary][0].path, "rentAmount");
    }

    #[test]
    fn test_panel_while_loading() {
        let panel = variable_panel(&ContextState::Loading);
        assert!(panel.loading);
        assert!(panel.sections.is_empty());
    }

    #[test]
    fn test_panel_for_ready_context() {
        let panel = variable_panel(&ContextState::Ready(context_with_name_and_rent()));
        assert!(!panel.loading);
        assert_eq!(panel.variable_count(), 2);
        assert_eq!(panel.sections[0].title, "Locador");
        assert_eq!(panel.sections[1].category, Category::Monetary);
    }
}
