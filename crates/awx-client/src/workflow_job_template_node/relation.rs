//! Edges between workflow nodes.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

/// Kind of edge between two workflow nodes.
///
/// The server runs the target node after the source node finishes with the
/// matching outcome. Parsing is case-insensitive and also accepts the
/// `*_nodes` spelling used by AWX's node fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(AsRefStr, Display, EnumIter, EnumString, IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(ascii_case_insensitive)]
pub enum RelationType {
    /// Run the target when the source succeeds.
    #[strum(to_string = "success", serialize = "success_nodes")]
    Success,
    /// Run the target when the source fails.
    #[strum(to_string = "failure", serialize = "failure_nodes")]
    Failure,
    /// Run the target whatever the outcome of the source.
    #[strum(to_string = "always", serialize = "always_nodes")]
    Always,
}

impl RelationType {
    /// Returns the URL path segment of the edge sub-resource.
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

/// Body posted to an edge sub-resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRelation {
    /// Target node id.
    pub id: i64,
    /// Removes the edge instead of creating it.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub disassociate: bool,
}

impl NodeRelation {
    /// Body that creates an edge to `target_id`.
    pub fn associate(target_id: i64) -> Self {
        Self {
            id: target_id,
            disassociate: false,
        }
    }

    /// Body that removes the edge to `target_id`.
    pub fn disassociate(target_id: i64) -> Self {
        Self {
            id: target_id,
            disassociate: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use serde_json::json;
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_relation_display() {
        let names: Vec<_> = RelationType::iter().map(|r| r.to_string()).collect();
        assert_eq!(names, ["success", "failure", "always"]);
        assert_eq!(RelationType::Failure.as_str(), "failure");
    }

    #[test]
    fn test_relation_parse() {
        assert_eq!(RelationType::from_str("success").unwrap(), RelationType::Success);
        assert_eq!(RelationType::from_str("ALWAYS").unwrap(), RelationType::Always);
        assert_eq!(
            RelationType::from_str("failure_nodes").unwrap(),
            RelationType::Failure
        );
        assert!(RelationType::from_str("sometimes").is_err());
    }

    #[test]
    fn test_relation_bodies() {
        assert_eq!(
            serde_json::to_string(&NodeRelation::associate(9)).unwrap(),
            r#"{"id":9}"#
        );
        assert_eq!(
            serde_json::to_value(NodeRelation::disassociate(9)).unwrap(),
            json!({"id": 9, "disassociate": true})
        );
    }
}
