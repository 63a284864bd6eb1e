//! Workflow job template node payloads.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use super::RelationType;

/// A node of a workflow job template, as returned by the API.
///
/// Keys the struct does not name are kept in [`extra`](Self::extra), so a
/// node fetched from a newer server serializes back without losing fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowJobTemplateNode {
    /// Database id of the node.
    #[serde(default)]
    pub id: i64,
    /// Resource type, always `workflow_job_template_node`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    /// Canonical API URL of the node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Links to related resources.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub related: Map<String, Value>,
    /// Denormalized summaries of related resources.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub summary_fields: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<Timestamp>,
    /// Workflow the node belongs to.
    #[serde(default)]
    pub workflow_job_template: Option<i64>,
    /// Job template, project, inventory source or workflow to run.
    #[serde(default)]
    pub unified_job_template: Option<i64>,
    /// Caller-assigned key, unique within the workflow.
    #[serde(default)]
    pub identifier: String,
    /// Nodes run when this node succeeds.
    #[serde(default)]
    pub success_nodes: Vec<i64>,
    /// Nodes run when this node fails.
    #[serde(default)]
    pub failure_nodes: Vec<i64>,
    /// Nodes run whatever the outcome.
    #[serde(default)]
    pub always_nodes: Vec<i64>,
    /// Run only once every parent reached the matching outcome.
    #[serde(default)]
    pub all_parents_must_converge: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inventory: Option<i64>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub extra_data: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scm_branch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_tags: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_tags: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diff_mode: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verbosity: Option<u8>,
    /// Any other field returned by the server.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WorkflowJobTemplateNode {
    /// Returns the ids of the nodes connected by edges of `relation`.
    pub fn children(&self, relation: RelationType) -> &[i64] {
        match relation {
            RelationType::Success => &self.success_nodes,
            RelationType::Failure => &self.failure_nodes,
            RelationType::Always => &self.always_nodes,
        }
    }
}

/// Keys backed by a typed member of the request payloads.
const TYPED_FIELDS: &[&str] = &[
    "workflow_job_template",
    "unified_job_template",
    "identifier",
    "all_parents_must_converge",
    "inventory",
    "extra_data",
    "scm_branch",
    "job_type",
    "job_tags",
    "skip_tags",
    "limit",
    "diff_mode",
    "verbosity",
];

/// Payload for creating a node.
///
/// The three workflow keys are mandatory; they are optional here so a
/// payload assembled from user input can be checked with [`Validate`] before
/// anything is sent.
#[must_use]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct CreateWorkflowJobTemplateNode {
    /// Workflow the node belongs to.
    #[validate(required)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_job_template: Option<i64>,
    /// Template the node runs.
    #[validate(required)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unified_job_template: Option<i64>,
    /// Caller-assigned key, unique within the workflow.
    #[validate(required)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all_parents_must_converge: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inventory: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_data: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scm_branch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_tags: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_tags: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diff_mode: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verbosity: Option<u8>,
    /// Additional keys passed through unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CreateWorkflowJobTemplateNode {
    /// Creates a payload with every mandatory key set.
    pub fn new(
        workflow_job_template: i64,
        unified_job_template: i64,
        identifier: impl Into<String>,
    ) -> Self {
        Self {
            workflow_job_template: Some(workflow_job_template),
            unified_job_template: Some(unified_job_template),
            identifier: Some(identifier.into()),
            ..Self::default()
        }
    }

    /// Sets the inventory prompted at launch.
    pub fn with_inventory(mut self, inventory: i64) -> Self {
        self.inventory = Some(inventory);
        self
    }

    /// Sets the extra variables prompted at launch.
    pub fn with_extra_data(mut self, extra_data: Map<String, Value>) -> Self {
        self.extra_data = Some(extra_data);
        self
    }

    /// Sets the host limit prompted at launch.
    pub fn with_limit(mut self, limit: impl Into<String>) -> Self {
        self.limit = Some(limit.into());
        self
    }

    /// Requires every parent to converge before this node runs.
    pub fn with_all_parents_must_converge(mut self, converge: bool) -> Self {
        self.all_parents_must_converge = Some(converge);
        self
    }

    /// Adds a key the struct does not name.
    ///
    /// Keys of typed members are ignored so the body never repeats a key;
    /// use the matching setter instead.
    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        let key = key.into();
        if !TYPED_FIELDS.contains(&key.as_str()) {
            self.extra.insert(key, value);
        }
        self
    }
}

/// Payload for a partial update of a node.
///
/// Only the members that are set are sent.
#[must_use]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateWorkflowJobTemplateNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_job_template: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unified_job_template: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all_parents_must_converge: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inventory: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_data: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scm_branch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_tags: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_tags: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diff_mode: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verbosity: Option<u8>,
    /// Additional keys passed through unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UpdateWorkflowJobTemplateNode {
    /// Creates an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the node to another template.
    pub fn with_unified_job_template(mut self, unified_job_template: i64) -> Self {
        self.unified_job_template = Some(unified_job_template);
        self
    }

    /// Renames the node.
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    /// Sets the inventory prompted at launch.
    pub fn with_inventory(mut self, inventory: i64) -> Self {
        self.inventory = Some(inventory);
        self
    }

    /// Sets the host limit prompted at launch.
    pub fn with_limit(mut self, limit: impl Into<String>) -> Self {
        self.limit = Some(limit.into());
        self
    }

    /// Adds a key the struct does not name.
    ///
    /// Keys of typed members are ignored so the body never repeats a key;
    /// use the matching setter instead.
    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        let key = key.into();
        if !TYPED_FIELDS.contains(&key.as_str()) {
            self.extra.insert(key, value);
        }
        self
    }

    /// Returns true if nothing would be sent.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_node_deserialize_keeps_unknown_fields() {
        let body = json!({
            "id": 17,
            "type": "workflow_job_template_node",
            "url": "/api/v2/workflow_job_template_nodes/17/",
            "created": "2024-05-01T12:00:00.123456Z",
            "workflow_job_template": 4,
            "unified_job_template": 9,
            "identifier": "deploy",
            "success_nodes": [18, 19],
            "failure_nodes": [],
            "always_nodes": [20],
            "all_parents_must_converge": false,
            "verbosity": null,
            "execution_environment": 2
        });

        let node: WorkflowJobTemplateNode = serde_json::from_value(body).unwrap();
        assert_eq!(node.id, 17);
        assert_eq!(node.resource_type.as_deref(), Some("workflow_job_template_node"));
        assert!(node.created.is_some());
        assert_eq!(node.children(RelationType::Success), &[18, 19]);
        assert_eq!(node.children(RelationType::Always), &[20]);
        assert!(node.verbosity.is_none());
        assert_eq!(node.extra.get("execution_environment"), Some(&json!(2)));
    }

    #[test]
    fn test_create_serializes_only_set_fields() {
        let payload = CreateWorkflowJobTemplateNode::new(4, 9, "deploy")
            .with_limit("web")
            .with_field("execution_environment", json!(2));

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "workflow_job_template": 4,
                "unified_job_template": 9,
                "identifier": "deploy",
                "limit": "web",
                "execution_environment": 2
            })
        );
    }

    #[test]
    fn test_create_validation() {
        assert!(CreateWorkflowJobTemplateNode::new(4, 9, "deploy")
            .validate()
            .is_ok());

        let errors = CreateWorkflowJobTemplateNode::default()
            .validate()
            .unwrap_err();
        assert_eq!(errors.field_errors().len(), 3);
    }

    #[test]
    fn test_with_field_skips_typed_members() {
        let payload = CreateWorkflowJobTemplateNode::new(4, 9, "deploy")
            .with_field("identifier", json!("other"))
            .with_field("limit", json!("db"));
        assert!(payload.extra.is_empty());
        assert_eq!(
            serde_json::to_string(&payload).unwrap(),
            r#"{"workflow_job_template":4,"unified_job_template":9,"identifier":"deploy"}"#
        );

        let update = UpdateWorkflowJobTemplateNode::new()
            .with_identifier("renamed")
            .with_field("identifier", json!("other"))
            .with_field("execution_environment", json!(2));
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({"identifier": "renamed", "execution_environment": 2})
        );
    }

    #[test]
    fn test_update_is_empty() {
        assert!(UpdateWorkflowJobTemplateNode::new().is_empty());
        let update = UpdateWorkflowJobTemplateNode::new().with_identifier("renamed");
        assert!(!update.is_empty());
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({"identifier": "renamed"})
        );
    }
}
