use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A build-time extension. Only carried by the descriptor; invoking it is the
/// host tool's job, in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "PluginRepr")]
pub struct PluginSpec {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,
}

impl PluginSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: None,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PluginRepr {
    Name(String),
    Full {
        name: String,
        #[serde(default)]
        options: Option<Value>,
    },
}

impl From<PluginRepr> for PluginSpec {
    fn from(repr: PluginRepr) -> Self {
        match repr {
            PluginRepr::Name(name) => PluginSpec::new(name),
            PluginRepr::Full { name, options } => PluginSpec { name, options },
        }
    }
}
