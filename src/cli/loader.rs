use std::collections::HashSet;

use crate::error::SnipolError;
use crate::generator::ListenerKey;
use crate::render::{Gateway, RenderPlan};

use super::args::Args;
use super::config::ConfigFile;

/// Load, validate and assemble the render plan
pub struct PolicyLoader;

impl PolicyLoader {
    /// Load complete render plan from CLI arguments
    pub fn load(args: &Args) -> Result<RenderPlan, SnipolError> {
        let config = ConfigFile::load(&args.config)?;
        Self::from_config(config)
    }

    /// Build a render plan from a parsed configuration file
    ///
    /// Every policy must pass validation; the first rejected policy aborts the
    /// load. Gateways must be unique and so must listeners within a gateway;
    /// each listener key must be usable as a single path segment.
    pub fn from_config(config: ConfigFile) -> Result<RenderPlan, SnipolError> {
        for policy in &config.policies {
            policy
                .validate()
                .map_err(|source| SnipolError::InvalidPolicy {
                    namespace: policy.metadata.namespace.clone(),
                    name: policy.metadata.name.clone(),
                    source,
                })?;
        }
        log::debug!("Validated {} policies", config.policies.len());

        let mut seen_gateways = HashSet::new();
        let mut gateways = Vec::with_capacity(config.gateways.len());
        for gw in config.gateways {
            let key = format!("{}/{}", gw.namespace, gw.name);
            if !seen_gateways.insert(key.clone()) {
                return Err(SnipolError::DuplicateGateway { gateway: key });
            }

            let mut seen_listeners = HashSet::new();
            let mut listeners = Vec::with_capacity(gw.listeners.len());
            for listener in &gw.listeners {
                if !seen_listeners.insert(listener.as_str()) {
                    return Err(SnipolError::DuplicateListener {
                        gateway: key,
                        listener: listener.clone(),
                    });
                }
                let listener = ListenerKey::new(listener.as_str()).map_err(|source| {
                    SnipolError::InvalidListener {
                        gateway: key.clone(),
                        source,
                    }
                })?;
                listeners.push(listener);
            }

            gateways.push(Gateway {
                namespace: gw.namespace,
                name: gw.name,
                listeners,
            });
        }

        Ok(RenderPlan {
            gateways,
            policies: config.policies,
        })
    }
}
