// Common model definitions shared across all policy kinds
use serde::{Deserialize, Serialize};

use super::context::NginxContext;

pub const GATEWAY_GROUP: &str = "gateway.networking.k8s.io";
pub const GATEWAY_KIND: &str = "Gateway";
pub const SNIPPETS_POLICY_KIND: &str = "SnippetsPolicy";

/// Capability shared by every policy kind the generator can consume
pub trait Policy: Send + Sync {
    /// Kind name used as the file name prefix, e.g. `SnippetsPolicy`
    fn kind(&self) -> &str;
    fn namespace(&self) -> &str;
    fn name(&self) -> &str;
    fn target_ref(&self) -> &TargetRef;

    /// Snippets carried by the policy; kinds without snippets carry none
    fn snippets(&self) -> &[Snippet] {
        &[]
    }

    /// Namespace of the targeted resource
    fn target_namespace(&self) -> &str {
        self.target_ref()
            .namespace
            .as_deref()
            .unwrap_or_else(|| self.namespace())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ObjectMeta {
    #[serde(default = "default_namespace")]
    pub namespace: String,
    pub name: String,
}

pub(crate) fn default_namespace() -> String {
    "default".to_string()
}

/// Reference to the resource a policy applies to
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TargetRef {
    #[serde(default = "default_group")]
    pub group: String,
    #[serde(default = "default_kind")]
    pub kind: String,
    pub name: String,
    /// Unset for local references, which resolve in the policy's namespace
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

fn default_group() -> String {
    GATEWAY_GROUP.to_string()
}

fn default_kind() -> String {
    GATEWAY_KIND.to_string()
}

impl TargetRef {
    /// Local reference to a Gateway
    pub fn gateway(name: impl Into<String>) -> Self {
        Self {
            group: default_group(),
            kind: default_kind(),
            name: name.into(),
            namespace: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Snippet {
    pub context: NginxContext,
    pub value: String,
}

impl Snippet {
    pub fn new(context: NginxContext, value: impl Into<String>) -> Self {
        Self {
            context,
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnippetsPolicySpec {
    pub target_ref: TargetRef,
    #[serde(default)]
    pub snippets: Vec<Snippet>,
}

/// Injects NGINX snippets into the configuration generated for a Gateway
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SnippetsPolicy {
    pub metadata: ObjectMeta,
    pub spec: SnippetsPolicySpec,
}

impl SnippetsPolicy {
    pub fn new(
        namespace: impl Into<String>,
        name: impl Into<String>,
        target_ref: TargetRef,
        snippets: Vec<Snippet>,
    ) -> Self {
        Self {
            metadata: ObjectMeta {
                namespace: namespace.into(),
                name: name.into(),
            },
            spec: SnippetsPolicySpec {
                target_ref,
                snippets,
            },
        }
    }
}

impl Policy for SnippetsPolicy {
    fn kind(&self) -> &str {
        SNIPPETS_POLICY_KIND
    }

    fn namespace(&self) -> &str {
        &self.metadata.namespace
    }

    fn name(&self) -> &str {
        &self.metadata.name
    }

    fn target_ref(&self) -> &TargetRef {
        &self.spec.target_ref
    }

    fn snippets(&self) -> &[Snippet] {
        &self.spec.snippets
    }
}
