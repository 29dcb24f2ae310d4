use std::{fmt, str::FromStr};

use thiserror::Error;

use crate::policy::{Policy, SnippetScope};

/// Directory, relative to the NGINX config root, that holds policy includes
pub const POLICY_INCLUDE_ROOT: &str = "includes/policy";

/// Generated include file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Path relative to the NGINX config root
    pub path: String,
    pub content: Vec<u8>,
}

/// Identity of a listener (server block) under a gateway, e.g. its listen address
///
/// The key becomes one directory segment of the include path, so it must be
/// non-empty, free of path separators, and neither `.` nor `..`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerKey(String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid listener key '{key}': {reason}")]
pub struct InvalidListenerKey {
    pub key: String,
    pub reason: &'static str,
}

impl ListenerKey {
    pub fn new(key: impl Into<String>) -> Result<Self, InvalidListenerKey> {
        let key = key.into();
        let reason = if key.is_empty() {
            Some("must not be empty")
        } else if key.contains(['/', '\\']) {
            Some("must not contain path separators")
        } else if key == "." || key == ".." {
            Some("must not be a relative path segment")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(InvalidListenerKey { key, reason }),
            None => Ok(Self(key)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ListenerKey {
    type Err = InvalidListenerKey;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        Self::new(key)
    }
}

impl fmt::Display for ListenerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Directory shared by every policy attached to the same target
///
/// `includes/policy/<targetNamespace>-<targetName>`
pub fn target_dir(policy: &dyn Policy) -> String {
    format!(
        "{POLICY_INCLUDE_ROOT}/{}-{}",
        policy.target_namespace(),
        policy.target_ref().name
    )
}

/// File name of a policy's include for one scope
///
/// A policy living in the target's namespace is named `<Kind>_<scope>_<name>.conf`.
/// A policy referencing a target in another namespace also embeds its own
/// namespace, `<Kind>_<scope>_<namespace>_<name>.conf`, since its name is only
/// unique within its namespace. Validation restricts names to DNS-1123,
/// which excludes `_`, so the two forms cannot produce the same file name.
pub fn file_name(policy: &dyn Policy, scope: SnippetScope) -> String {
    if policy.namespace() == policy.target_namespace() {
        format!(
            "{}_{}_{}.conf",
            policy.kind(),
            scope.file_label(),
            policy.name()
        )
    } else {
        format!(
            "{}_{}_{}_{}.conf",
            policy.kind(),
            scope.file_label(),
            policy.namespace(),
            policy.name()
        )
    }
}

/// Full include path for a policy at a gateway-wide scope (`main` or `http`)
pub fn gateway_path(policy: &dyn Policy, scope: SnippetScope) -> String {
    format!("{}/{}", target_dir(policy), file_name(policy, scope))
}

/// Full include path for a policy rendered into one listener's server block
pub fn listener_path(policy: &dyn Policy, listener: &ListenerKey) -> String {
    format!(
        "{}/{}/{}",
        target_dir(policy),
        listener,
        file_name(policy, SnippetScope::Server)
    )
}
