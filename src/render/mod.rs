pub mod plan;
pub mod sink;

pub use plan::{Gateway, RenderPlan, ensure_unique_paths};
pub use sink::{ArtifactSink, DirectorySink, StdoutSink, publish};
