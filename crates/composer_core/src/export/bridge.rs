//! Export request orchestration.

use crate::export::options::{ExportOptions, ExportOptionsError};
use crate::export::snapshot::RenderSnapshot;
use crate::logging::sanitize_message;
use async_trait::async_trait;
use futures_util::FutureExt;
use log::{error, info, warn};
use std::any::Any;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::panic::AssertUnwindSafe;
use uuid::Uuid;

const MAX_FAILURE_REASON_CHARS: usize = 160;

/// External collaborator that turns a snapshot into a paginated document.
///
/// The bridge treats implementations as opaque and never inspects output.
#[async_trait]
pub trait Rasterizer: Send + Sync {
    async fn rasterize(
        &self,
        snapshot: RenderSnapshot,
        options: &ExportOptions,
    ) -> Result<(), RasterizeError>;
}

/// Failure reported by a rasterization collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterizeError {
    message: String,
}

impl RasterizeError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for RasterizeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "rasterization failed: {}", self.message)
    }
}

impl Error for RasterizeError {}

impl From<std::io::Error> for RasterizeError {
    fn from(value: std::io::Error) -> Self {
        Self::new(value.to_string())
    }
}

/// Why one export request failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportFailure {
    /// Collaborator returned an error.
    Collaborator(RasterizeError),
    /// Collaborator panicked; payload is sanitized and length-capped.
    CollaboratorPanicked(String),
}

impl Display for ExportFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Collaborator(err) => write!(f, "{err}"),
            Self::CollaboratorPanicked(payload) => {
                write!(f, "rasterization aborted unexpectedly: {payload}")
            }
        }
    }
}

impl Error for ExportFailure {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Collaborator(err) => Some(err),
            Self::CollaboratorPanicked(_) => None,
        }
    }
}

/// Outcome of one export request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportResult {
    Success {
        request_id: Uuid,
    },
    Failure {
        request_id: Uuid,
        reason: ExportFailure,
    },
}

impl ExportResult {
    pub fn request_id(&self) -> Uuid {
        match self {
            Self::Success { request_id } | Self::Failure { request_id, .. } => *request_id,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// User-visible, non-fatal notification for this outcome.
    pub fn notice(&self, destination_name: &str) -> ExportNotice {
        match self {
            Self::Success { .. } => ExportNotice {
                level: NoticeLevel::Info,
                message: format!("Exported {destination_name}."),
            },
            Self::Failure { reason, .. } => ExportNotice {
                level: NoticeLevel::Error,
                message: format!(
                    "Export of {destination_name} failed: {reason}. Your edits are kept; try again."
                ),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// Notification shown to the user after an export attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportNotice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Hands render snapshots to a rasterizer with fixed options.
pub struct ExportBridge<R: Rasterizer> {
    rasterizer: R,
    options: ExportOptions,
}

impl<R: Rasterizer> ExportBridge<R> {
    /// Creates a bridge after validating options.
    ///
    /// # Errors
    /// - Returns `ExportOptionsError` when options violate their invariants.
    pub fn new(rasterizer: R, options: ExportOptions) -> Result<Self, ExportOptionsError> {
        options.validate()?;
        Ok(Self {
            rasterizer,
            options,
        })
    }

    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    pub fn rasterizer(&self) -> &R {
        &self.rasterizer
    }

    /// Runs one export request.
    ///
    /// The collaborator is invoked exactly once. Its errors and panics are
    /// converted into `ExportResult::Failure`.
    pub async fn export(&self, snapshot: RenderSnapshot) -> ExportResult {
        let request_id = Uuid::new_v4();
        if snapshot.includes_edit_chrome() {
            warn!(
                "event=export_start module=export status=warn request_id={} reason=edit_chrome_included",
                request_id
            );
        }
        info!(
            "event=export_start module=export status=ok request_id={} sections={} page_size={} scale={}",
            request_id,
            snapshot.section_order().len(),
            self.options.page_size.css_name(),
            self.options.raster_scale
        );

        let outcome = AssertUnwindSafe(self.rasterizer.rasterize(snapshot, &self.options))
            .catch_unwind()
            .await;

        match outcome {
            Ok(Ok(())) => {
                info!(
                    "event=export_finish module=export status=ok request_id={}",
                    request_id
                );
                ExportResult::Success { request_id }
            }
            Ok(Err(err)) => {
                error!(
                    "event=export_finish module=export status=error request_id={} error={}",
                    request_id,
                    sanitize_message(&err.to_string(), MAX_FAILURE_REASON_CHARS)
                );
                ExportResult::Failure {
                    request_id,
                    reason: ExportFailure::Collaborator(err),
                }
            }
            Err(payload) => {
                let summary = panic_payload_summary(payload.as_ref());
                error!(
                    "event=export_finish module=export status=error request_id={} panic={}",
                    request_id, summary
                );
                ExportResult::Failure {
                    request_id,
                    reason: ExportFailure::CollaboratorPanicked(summary),
                }
            }
        }
    }
}

fn panic_payload_summary(payload: &(dyn Any + Send)) -> String {
    let message = if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    };
    sanitize_message(&message, MAX_FAILURE_REASON_CHARS)
}
