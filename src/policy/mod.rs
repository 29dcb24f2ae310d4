pub mod context;
pub mod model;
pub mod validate;

// Re-export main types for convenience
pub use context::{NginxContext, SnippetScope};
pub use model::{ObjectMeta, Policy, Snippet, SnippetsPolicy, SnippetsPolicySpec, TargetRef};
pub use validate::{MAX_SNIPPETS, ValidationError, validate};
