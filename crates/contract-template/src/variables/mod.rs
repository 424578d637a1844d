//! Variable registry: the placeholder catalog and the views the authoring
//! panel builds from it

pub mod catalog;
pub mod grouping;

pub use catalog::{find_variable, list_variables};
pub use grouping::{
    available_paths, filter_available, group_by_category, variable_panel, PanelSection, VariablePanel,
};

use serde::Serialize;

use crate::document::PlaceholderNode;
use crate::path::VariablePath;

/// Grouping label used to organize the authoring panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Landlord,
    Tenant,
    Property,
    Monetary,
    DatesAndTerms,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Landlord,
        Category::Tenant,
        Category::Property,
        Category::Monetary,
        Category::DatesAndTerms,
    ];

    /// Heading shown above the category in the panel
    pub fn title(self) -> &'static str {
        match self {
            Category::Landlord => "Locador",
            Category::Tenant => "Locatário",
            Category::Property => "Imóvel",
            Category::Monetary => "Valores",
            Category::DatesAndTerms => "Datas e prazos",
        }
    }
}

/// A known placeholder with its panel label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VariableDescriptor {
    /// Dot-separated path, e.g. `landlord.name`
    pub path: &'static str,
    /// Human-readable label
    pub display_label: &'static str,
    pub category: Category,
}

impl VariableDescriptor {
    /// Text copied to the clipboard from the panel
    pub fn tag(&self) -> String {
        format!("{{{{{}}}}}", self.path)
    }

    pub fn variable_path(&self) -> Option<VariablePath> {
        VariablePath::parse(self.path)
    }

    /// Node inserted into the editor when the descriptor is picked from the panel
    pub fn to_node(&self) -> Option<PlaceholderNode> {
        self.variable_path()
            .map(|path| PlaceholderNode::with_label(path, self.display_label))
    }
}
