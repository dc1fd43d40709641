use crate::config::PdfConfig;
use crate::error::{Result, SiteError};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, warn};

/// Turns a rendered print view into a PDF document.
#[async_trait]
pub trait PdfConverter: Send + Sync {
    async fn convert(&self, html: &str) -> Result<Vec<u8>>;
}

/// Pipes HTML through an external converter (stdin to stdout).
#[derive(Debug, Clone)]
pub struct CommandPdfConverter {
    program: String,
    args: Vec<String>,
}

impl CommandPdfConverter {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// `None` when no command is configured.
    pub fn from_config(config: &PdfConfig) -> Option<Self> {
        let (program, args) = config.command.split_first()?;
        Some(Self::new(program.clone(), args.to_vec()))
    }
}

#[async_trait]
impl PdfConverter for CommandPdfConverter {
    async fn convert(&self, html: &str) -> Result<Vec<u8>> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| SiteError::Pdf {
                message: format!("Failed to start '{}': {}", self.program, e),
            })?;

        // Feed stdin concurrently so a converter that streams output cannot block on a full pipe
        let mut stdin = child.stdin.take().ok_or_else(|| SiteError::Pdf {
            message: "Converter stdin unavailable".to_string(),
        })?;
        let input = html.as_bytes().to_vec();
        let writer = tokio::spawn(async move {
            let written = stdin.write_all(&input).await;
            // Dropping stdin sends EOF
            drop(stdin);
            written
        });

        let output = child.wait_with_output().await?;
        if let Err(e) = writer.await.map_err(|e| SiteError::Pdf {
            message: format!("Writer task failed: {}", e),
        })? {
            warn!("Converter closed stdin early: {}", e);
        }

        if !output.status.success() {
            return Err(SiteError::Pdf {
                message: format!(
                    "'{}' exited with {}: {}",
                    self.program,
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }
        if output.stdout.is_empty() {
            return Err(SiteError::Pdf {
                message: format!("'{}' produced no output", self.program),
            });
        }

        debug!(bytes = output.stdout.len(), "PDF converted");
        Ok(output.stdout)
    }
}
