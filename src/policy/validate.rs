use thiserror::Error;

use super::context::{NginxContext, SnippetScope};
use super::model::{GATEWAY_GROUP, GATEWAY_KIND, SnippetsPolicy};

/// Maximum number of snippets a single policy may carry
pub const MAX_SNIPPETS: usize = 3;

/// Reason a SnippetsPolicy is rejected at admission
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Too many snippets: {count} provided, at most {max} allowed")]
    TooManySnippets { count: usize, max: usize },

    #[error("Only one snippet allowed per context (duplicate context '{context}')")]
    DuplicateContext { context: NginxContext },

    #[error("{context} context is not supported in SnippetsPolicy")]
    UnsupportedContext { context: NginxContext },

    #[error("{field} '{value}' is not a valid {expected}")]
    InvalidName {
        field: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("targetRef must reference a gateway.networking.k8s.io/Gateway, got {group}/{kind}")]
    UnsupportedTargetRef { group: String, kind: String },
}

/// Validate a SnippetsPolicy before it is accepted
///
/// Rules are checked in order and the first failure is returned:
/// 1. at most [`MAX_SNIPPETS`] snippets
/// 2. every context appears exactly once
/// 3. no snippet uses a context outside [`SnippetScope`]
/// 4. namespaces are DNS-1123 labels and names are DNS-1123 subdomains,
///    for both the policy and its target
/// 5. the target is a Gateway
pub fn validate(policy: &SnippetsPolicy) -> Result<(), ValidationError> {
    let snippets = &policy.spec.snippets;

    if snippets.len() > MAX_SNIPPETS {
        return Err(ValidationError::TooManySnippets {
            count: snippets.len(),
            max: MAX_SNIPPETS,
        });
    }

    for snippet in snippets {
        let occurrences = snippets
            .iter()
            .filter(|other| other.context == snippet.context)
            .count();
        if occurrences != 1 {
            return Err(ValidationError::DuplicateContext {
                context: snippet.context,
            });
        }
    }

    if let Some(snippet) = snippets
        .iter()
        .find(|s| SnippetScope::try_from(s.context).is_err())
    {
        return Err(ValidationError::UnsupportedContext {
            context: snippet.context,
        });
    }

    let target = &policy.spec.target_ref;
    check_label("metadata.namespace", &policy.metadata.namespace)?;
    check_subdomain("metadata.name", &policy.metadata.name)?;
    if let Some(namespace) = &target.namespace {
        check_label("targetRef.namespace", namespace)?;
    }
    check_subdomain("targetRef.name", &target.name)?;

    if target.group != GATEWAY_GROUP || target.kind != GATEWAY_KIND {
        return Err(ValidationError::UnsupportedTargetRef {
            group: target.group.clone(),
            kind: target.kind.clone(),
        });
    }

    Ok(())
}

const DNS1123_LABEL: &str = "DNS-1123 label";
const DNS1123_SUBDOMAIN: &str = "DNS-1123 subdomain";

fn check_label(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if is_dns1123_label(value) {
        Ok(())
    } else {
        Err(ValidationError::InvalidName {
            field,
            value: value.to_string(),
            expected: DNS1123_LABEL,
        })
    }
}

fn check_subdomain(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if is_dns1123_subdomain(value) {
        Ok(())
    } else {
        Err(ValidationError::InvalidName {
            field,
            value: value.to_string(),
            expected: DNS1123_SUBDOMAIN,
        })
    }
}

/// Lowercase alphanumerics and `-`, starting and ending alphanumeric, at most 63 bytes
pub fn is_dns1123_label(value: &str) -> bool {
    value.len() <= 63 && is_label_part(value)
}

/// Dot-separated DNS-1123 label parts, at most 253 bytes
pub fn is_dns1123_subdomain(value: &str) -> bool {
    value.len() <= 253 && value.split('.').all(is_label_part)
}

fn is_label_part(part: &str) -> bool {
    let alnum = |c: char| c.is_ascii_lowercase() || c.is_ascii_digit();
    match (part.chars().next(), part.chars().last()) {
        (Some(first), Some(last)) => {
            alnum(first) && alnum(last) && part.chars().all(|c| alnum(c) || c == '-')
        }
        _ => false,
    }
}

impl SnippetsPolicy {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate(self)
    }
}
