use std::collections::HashSet;

use crate::{
    error::SnipolError,
    generator::{Artifact, Generator, ListenerKey},
    policy::{Policy, SnippetsPolicy, model::{GATEWAY_GROUP, GATEWAY_KIND}},
};

/// Gateway whose NGINX configuration includes the rendered snippets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gateway {
    pub namespace: String,
    pub name: String,
    /// Listener keys of the gateway's server blocks, unique per gateway
    pub listeners: Vec<ListenerKey>,
}

impl Gateway {
    /// Whether `policy` targets this gateway
    pub fn is_targeted_by(&self, policy: &dyn Policy) -> bool {
        let target = policy.target_ref();
        target.group == GATEWAY_GROUP
            && target.kind == GATEWAY_KIND
            && target.name == self.name
            && policy.target_namespace() == self.namespace
    }

    /// Policies attached to this gateway, in input order
    pub fn attached<'a>(&self, policies: &'a [SnippetsPolicy]) -> Vec<&'a dyn Policy> {
        policies
            .iter()
            .map(|p| p as &dyn Policy)
            .filter(|p| self.is_targeted_by(*p))
            .collect()
    }
}

/// Validated gateways and policies, ready to render
#[derive(Debug, Clone, Default)]
pub struct RenderPlan {
    pub gateways: Vec<Gateway>,
    pub policies: Vec<SnippetsPolicy>,
}

impl RenderPlan {
    /// Policies whose target is not one of the plan's gateways
    pub fn unattached(&self) -> impl Iterator<Item = &SnippetsPolicy> {
        self.policies
            .iter()
            .filter(|p| !self.gateways.iter().any(|gw| gw.is_targeted_by(*p)))
    }

    /// Render every scope instance of every gateway
    ///
    /// For each gateway in declaration order: `main`, then `http`, then the
    /// `server` block of each listener. Fails if two artifacts would land on
    /// the same path.
    pub fn render(&self) -> Result<Vec<Artifact>, SnipolError> {
        let generator = Generator::new();
        let mut artifacts = Vec::new();

        for policy in self.unattached() {
            log::warn!(
                "SnippetsPolicy {}/{} targets unknown gateway {}/{}, skipping",
                policy.namespace(),
                policy.name(),
                policy.target_namespace(),
                policy.target_ref().name
            );
        }

        for gateway in &self.gateways {
            let attached = gateway.attached(&self.policies);
            log::debug!(
                "Gateway {}/{} has {} attached policies",
                gateway.namespace,
                gateway.name,
                attached.len()
            );

            artifacts.extend(generator.generate_for_main(&attached));
            artifacts.extend(generator.generate_for_http(&attached));
            for listener in &gateway.listeners {
                artifacts.extend(generator.generate_for_server(&attached, listener));
            }
        }

        ensure_unique_paths(&artifacts)?;
        log::info!("Rendered {} include files", artifacts.len());
        Ok(artifacts)
    }
}

/// Reject artifact lists in which two entries share a path
pub fn ensure_unique_paths(artifacts: &[Artifact]) -> Result<(), SnipolError> {
    let mut seen = HashSet::new();
    for artifact in artifacts {
        if !seen.insert(artifact.path.as_str()) {
            return Err(SnipolError::ArtifactCollision {
                path: artifact.path.clone(),
            });
        }
    }
    Ok(())
}
