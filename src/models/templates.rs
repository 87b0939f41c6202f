use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// CommandBody holds the templated command text of one entry. The preferred
/// form is a single multi-line template; the list form is the legacy layout
/// where every element is rendered on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommandBody {
    Text(String),
    Lines(Vec<String>),
}

/// ParameterSpec documents one input field of a template
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParameterSpec {
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

/// TemplateEntry is one config type inside a vendor template document
#[derive(Debug, Clone, Deserialize)]
pub struct TemplateEntry {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub parameters: BTreeMap<String, ParameterSpec>,
    #[serde(default)]
    pub example: Map<String, Value>,
    pub commands: CommandBody,
}

/// TemplateInfo is what the UI needs to build a form for a template
#[derive(Debug, Clone, Serialize)]
pub struct TemplateInfo {
    pub description: String,
    pub parameters: BTreeMap<String, ParameterSpec>,
    pub example: Map<String, Value>,
}
