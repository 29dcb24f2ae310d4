use std::fmt;

use serde::{Deserialize, Serialize};

/// NGINX configuration context a snippet is inserted into
///
/// Every context NGINX knows about is representable so that a policy can be
/// parsed and then rejected with a precise reason. Only the subset covered by
/// [`SnippetScope`] can be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
pub enum NginxContext {
    #[serde(rename = "main")]
    Main,
    #[serde(rename = "http")]
    Http,
    #[serde(rename = "http.server")]
    HttpServer,
    #[serde(rename = "http.server.location")]
    HttpServerLocation,
}

impl NginxContext {
    pub fn as_str(&self) -> &'static str {
        match self {
            NginxContext::Main => "main",
            NginxContext::Http => "http",
            NginxContext::HttpServer => "http.server",
            NginxContext::HttpServerLocation => "http.server.location",
        }
    }
}

impl fmt::Display for NginxContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Context a SnippetsPolicy can be rendered into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnippetScope {
    /// Top-level `main` block, once per gateway
    Main,
    /// Shared `http` block, once per gateway
    Http,
    /// `server` block, once per listener
    Server,
}

impl SnippetScope {
    /// Context the scope corresponds to in a policy's snippet list
    pub fn context(&self) -> NginxContext {
        match self {
            SnippetScope::Main => NginxContext::Main,
            SnippetScope::Http => NginxContext::Http,
            SnippetScope::Server => NginxContext::HttpServer,
        }
    }

    /// Segment used in generated file names
    pub fn file_label(&self) -> &'static str {
        match self {
            SnippetScope::Main => "main",
            SnippetScope::Http => "http",
            SnippetScope::Server => "server",
        }
    }
}

impl TryFrom<NginxContext> for SnippetScope {
    type Error = NginxContext;

    fn try_from(context: NginxContext) -> Result<Self, Self::Error> {
        match context {
            NginxContext::Main => Ok(SnippetScope::Main),
            NginxContext::Http => Ok(SnippetScope::Http),
            NginxContext::HttpServer => Ok(SnippetScope::Server),
            NginxContext::HttpServerLocation => Err(context),
        }
    }
}
