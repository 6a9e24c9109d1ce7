//! Algorithm metadata published by the registry.

use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Algorithm family used for catalog filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Category {
    /// Comparison sorts.
    Sorting,
    /// Sequence searches.
    Searching,
    /// Graph traversal, shortest path, spanning tree and ordering.
    Graph,
    /// Tree algorithms.
    Tree,
    /// Dynamic programming.
    DynamicProgramming,
    /// Greedy algorithms.
    Greedy,
    /// Backtracking.
    Backtracking,
    /// Divide and conquer.
    DivideConquer,
}

impl Category {
    /// Every category, in catalog order.
    pub const ALL: [Self; 8] = [
        Self::Sorting,
        Self::Searching,
        Self::Graph,
        Self::Tree,
        Self::DynamicProgramming,
        Self::Greedy,
        Self::Backtracking,
        Self::DivideConquer,
    ];

    /// The wire name of the category.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sorting => "sorting",
            Self::Searching => "searching",
            Self::Graph => "graph",
            Self::Tree => "tree",
            Self::DynamicProgramming => "dynamic_programming",
            Self::Greedy => "greedy",
            Self::Backtracking => "backtracking",
            Self::DivideConquer => "divide_conquer",
        }
    }

    /// Looks up a category by wire name.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == name)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The graph forms a graph algorithm accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum GraphShape {
    /// Directed graphs only.
    Directed,
    /// Undirected graphs only.
    Undirected,
    /// Directed or undirected.
    Both,
    /// Any directedness, non-negative weights.
    Weighted,
    /// Undirected with weights.
    UndirectedWeighted,
}

impl fmt::Display for GraphShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Directed => "directed",
            Self::Undirected => "undirected",
            Self::Both => "directed or undirected",
            Self::Weighted => "weighted",
            Self::UndirectedWeighted => "undirected weighted",
        };
        f.write_str(name)
    }
}

/// Asymptotic bounds for one resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ComplexityBounds {
    /// Best case.
    pub best: String,
    /// Average case.
    pub average: String,
    /// Worst case.
    pub worst: String,
}

impl ComplexityBounds {
    /// Bounds with distinct best, average and worst cases.
    pub fn new(best: &str, average: &str, worst: &str) -> Self {
        Self {
            best: best.to_owned(),
            average: average.to_owned(),
            worst: worst.to_owned(),
        }
    }

    /// Bounds identical in every case.
    pub fn uniform(bound: &str) -> Self {
        Self::new(bound, bound, bound)
    }
}

/// Time and space complexity of an algorithm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Complexity {
    /// Running time.
    pub time_complexity: ComplexityBounds,
    /// Auxiliary space.
    pub space_complexity: ComplexityBounds,
}

/// Value type of an algorithm parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum ParameterType {
    /// Integer.
    Int,
    /// Floating point.
    Float,
    /// Free text or one of `options`.
    String,
    /// Boolean flag.
    Bool,
    /// A sequence element (integer, float or string).
    Element,
}

/// Declaration of a tunable algorithm parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct ParameterSpec {
    /// Parameter key in the request's `parameters` object.
    pub name: String,
    /// Value type.
    #[serde(rename = "type")]
    pub kind: ParameterType,
    /// Human-readable description.
    pub description: String,
    /// Value used when the parameter is omitted.
    pub default_value: serde_json::Value,
    /// Whether the request must supply the parameter.
    pub required: bool,
    /// Lower bound for numeric parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub min: Option<serde_json::Value>,
    /// Upper bound for numeric parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub max: Option<serde_json::Value>,
    /// Allowed values for enumerated parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub options: Option<Vec<String>>,
}

impl ParameterSpec {
    /// An optional string parameter restricted to `options`.
    pub fn choice(name: &str, description: &str, default: &str, options: &[&str]) -> Self {
        Self {
            name: name.to_owned(),
            kind: ParameterType::String,
            description: description.to_owned(),
            default_value: serde_json::Value::String(default.to_owned()),
            required: false,
            min: None,
            max: None,
            options: Some(options.iter().map(|o| (*o).to_owned()).collect()),
        }
    }

    /// A required element-valued parameter.
    pub fn required_element(name: &str, description: &str) -> Self {
        Self {
            name: name.to_owned(),
            kind: ParameterType::Element,
            description: description.to_owned(),
            default_value: serde_json::Value::Null,
            required: true,
            min: None,
            max: None,
            options: None,
        }
    }

    /// An optional free-text parameter.
    pub fn optional_string(name: &str, description: &str) -> Self {
        Self {
            name: name.to_owned(),
            kind: ParameterType::String,
            description: description.to_owned(),
            default_value: serde_json::Value::Null,
            required: false,
            min: None,
            max: None,
            options: None,
        }
    }
}

/// Catalog entry describing a registered algorithm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct AlgorithmInfo {
    /// Registry key.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Family.
    pub category: Category,
    /// Short description.
    pub description: String,
    /// Headline time complexity.
    pub time_complexity: String,
    /// Headline space complexity.
    pub space_complexity: String,
    /// Tunable parameters.
    pub parameters: Vec<ParameterSpec>,
    /// Preserves the relative order of equal elements.
    pub stable: bool,
    /// Uses constant auxiliary storage for the data itself.
    pub in_place: bool,
    /// Runs faster on partially ordered input.
    pub adaptive: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_names_round_trip_through_parse() {
        for category in Category::ALL {
            assert_eq!(Category::parse(category.as_str()), Some(category));
        }
        assert_eq!(Category::parse("quantum"), None);
    }

    #[test]
    fn choice_parameter_serializes_options() {
        let spec = ParameterSpec::choice("method", "traversal", "kahn", &["kahn", "dfs"]);
        let json = serde_json::to_value(&spec).unwrap_or_default();
        assert_eq!(json["type"], "string");
        assert_eq!(json["defaultValue"], "kahn");
        assert_eq!(json["options"][1], "dfs");
        assert!(json.get("min").is_none());
    }
}
