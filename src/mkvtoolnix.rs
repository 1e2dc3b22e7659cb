/*!
 * Container tools.
 *
 * The decision logic never talks to MKVToolNix directly; it goes through the
 * [`ContainerTools`] trait so it can run against fakes in tests.
 * [`MkvToolNix`] is the real implementation, driving `mkvmerge -J` for
 * inspection and `mkvpropedit` for flag edits.
 */

use async_trait::async_trait;
use log::debug;
use std::path::{Path, PathBuf};
use std::process::Output;
use tokio::process::Command;

use crate::errors::ToolError;
use crate::selection::EditBatch;
use crate::tracks::TrackStructure;

pub const MKVMERGE: &str = "mkvmerge";
pub const MKVPROPEDIT: &str = "mkvpropedit";

// MKVToolNix exit codes: 0 success, 1 warnings, 2 error
const ERROR_STATUS: i32 = 2;

/// Inspection and mutation of container track metadata
#[async_trait]
pub trait ContainerTools: Send + Sync {
    /// Read the track structure of a container
    async fn inspect(&self, path: &Path) -> Result<TrackStructure, ToolError>;

    /// Apply a batch of default-flag edits in a single invocation
    async fn apply_edits(&self, path: &Path, edits: &EditBatch) -> Result<(), ToolError>;
}

/// Information about an external tool
#[derive(Debug, Clone)]
pub struct ToolInfo {
    pub name: String,
    pub available: bool,
    /// First line of the `--version` output
    pub version: Option<String>,
    pub path: Option<PathBuf>,
}

/// Check if a tool is on PATH and get its version
pub async fn check_tool(name: &str) -> ToolInfo {
    let path = match which::which(name) {
        Ok(path) => path,
        Err(_) => {
            return ToolInfo {
                name: name.to_string(),
                available: false,
                version: None,
                path: None,
            };
        }
    };

    let version = match Command::new(&path).arg("--version").output().await {
        Ok(output) if output.status.success() => String::from_utf8_lossy(&output.stdout)
            .lines()
            .next()
            .map(|s| s.trim().to_string()),
        _ => None,
    };

    ToolInfo {
        name: name.to_string(),
        available: true,
        version,
        path: Some(path),
    }
}

/// Build the `mkvpropedit` argument list for a batch
pub fn propedit_args(path: &Path, edits: &EditBatch) -> Vec<String> {
    let mut args = Vec::with_capacity(1 + edits.len() * 4);
    args.push(path.to_string_lossy().to_string());
    for edit in edits.iter() {
        args.push("--edit".to_string());
        args.push(format!("track:{}", edit.track_id));
        args.push("--set".to_string());
        args.push(format!("flag-default={}", u8::from(edit.default)));
    }
    args
}

/// MKVToolNix-backed container tools
#[derive(Debug, Clone)]
pub struct MkvToolNix {
    mkvmerge: PathBuf,
    mkvpropedit: PathBuf,
}

impl MkvToolNix {
    /// Locate both executables on PATH
    pub fn locate() -> Result<Self, ToolError> {
        let mkvmerge = which::which(MKVMERGE).map_err(|_| ToolError::NotFound(MKVMERGE.to_string()))?;
        let mkvpropedit =
            which::which(MKVPROPEDIT).map_err(|_| ToolError::NotFound(MKVPROPEDIT.to_string()))?;
        Ok(Self { mkvmerge, mkvpropedit })
    }

    /// Use explicit executable paths
    pub fn with_paths(mkvmerge: PathBuf, mkvpropedit: PathBuf) -> Self {
        Self { mkvmerge, mkvpropedit }
    }

    async fn run(tool: &str, program: &Path, args: &[String]) -> Result<Output, ToolError> {
        debug!("{} {}", tool, args.join(" "));

        let output = Command::new(program)
            .args(args)
            .output()
            .await
            .map_err(|e| ToolError::ExecutionFailed {
                tool: tool.to_string(),
                message: e.to_string(),
            })?;

        let status = output.status.code().unwrap_or(-1);
        if status == -1 || status >= ERROR_STATUS {
            // mkvmerge reports identification errors on stdout
            let mut stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            if stderr.is_empty() {
                stderr = String::from_utf8_lossy(&output.stdout).trim().to_string();
            }
            return Err(ToolError::ToolFailed {
                tool: tool.to_string(),
                status,
                stderr,
            });
        }

        Ok(output)
    }
}

#[async_trait]
impl ContainerTools for MkvToolNix {
    async fn inspect(&self, path: &Path) -> Result<TrackStructure, ToolError> {
        let args = vec!["-J".to_string(), path.to_string_lossy().to_string()];
        let output = Self::run(MKVMERGE, &self.mkvmerge, &args).await?;

        serde_json::from_slice(&output.stdout).map_err(|e| ToolError::ParseError(e.to_string()))
    }

    async fn apply_edits(&self, path: &Path, edits: &EditBatch) -> Result<(), ToolError> {
        let args = propedit_args(path, edits);
        Self::run(MKVPROPEDIT, &self.mkvpropedit, &args).await?;
        Ok(())
    }
}
