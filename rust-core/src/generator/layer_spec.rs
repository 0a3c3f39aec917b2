use serde::{Deserialize, Serialize};

/// One entry of the stacking sequence: `count` consecutive copies of the base layer `name`.
///
/// The count is signed so that invalid requests survive parsing and are rejected by the
/// generator with a proper error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerSpec {
    pub name: String,
    pub count: i64,
}

impl LayerSpec {
    pub fn new(name: impl Into<String>, count: i64) -> Self {
        LayerSpec {
            name: name.into(),
            count,
        }
    }
}

impl std::fmt::Display for LayerSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} x{}", self.name, self.count)
    }
}
