use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

#[cfg(test)]
use mockall::automock;

use crate::{error::SnipolError, generator::Artifact};

/// Destination for rendered include files
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ArtifactSink: Send + Sync {
    async fn write(&self, artifact: &Artifact) -> Result<(), SnipolError>;
}

/// Writes artifacts below a root directory, creating parent directories
pub struct DirectorySink {
    root: PathBuf,
}

impl DirectorySink {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl ArtifactSink for DirectorySink {
    async fn write(&self, artifact: &Artifact) -> Result<(), SnipolError> {
        let path = self.root.join(&artifact.path);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, &artifact.content).await?;
        log::info!("Wrote {}", path.display());
        Ok(())
    }
}

/// Prints each artifact to stdout, preceded by a `# <path>` header line
pub struct StdoutSink;

#[async_trait]
impl ArtifactSink for StdoutSink {
    async fn write(&self, artifact: &Artifact) -> Result<(), SnipolError> {
        let mut stdout = tokio::io::stdout();
        stdout
            .write_all(format!("# {}\n", artifact.path).as_bytes())
            .await?;
        stdout.write_all(&artifact.content).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
        Ok(())
    }
}

/// Write all artifacts in order, stopping at the first failure
pub async fn publish<S>(sink: &S, artifacts: &[Artifact]) -> Result<usize, SnipolError>
where
    S: ArtifactSink + ?Sized,
{
    for artifact in artifacts {
        sink.write(artifact).await?;
    }
    Ok(artifacts.len())
}
