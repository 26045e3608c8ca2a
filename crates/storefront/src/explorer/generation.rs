//! Data-generation triggers: control gating and status messaging.
//!
//! Generation jobs run asynchronously on the catalog server. From here we can
//! only observe whether the server accepted the job, so controls are released
//! as soon as the trigger request resolves, and a product reload is scheduled
//! after a short delay to pick up the first generated records.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use catalog_explorer_core::CustomVolume;
use tracing::{info, instrument, warn};

use crate::catalog::CatalogClient;

/// In-flight text for a custom job shown by the page, before the submitted
/// volume is known.
pub const CUSTOM_PROGRESS_MESSAGE: &str = "Generating custom data... This may take a while.";

/// Which generation job to start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationKind {
    /// Server-defined volume of 50,000 products.
    Fixed,
    /// Caller-chosen volume.
    Custom(CustomVolume),
}

impl GenerationKind {
    /// Status text while the trigger is in flight.
    #[must_use]
    pub fn progress_message(&self) -> String {
        match self {
            Self::Fixed => {
                "Generating 50,000 products... This may take several minutes.".to_string()
            }
            Self::Custom(volume) => format!("Generating {volume}..."),
        }
    }

    /// Status text once the server has accepted the job.
    #[must_use]
    pub fn success_message(&self) -> String {
        match self {
            Self::Fixed => "Data generation started! Check server logs for progress. \
                            This will take several minutes."
                .to_string(),
            Self::Custom(volume) => {
                format!("Custom data generation started! Generating {volume}.")
            }
        }
    }

    /// Delay before the product list is reloaded after a successful trigger.
    #[must_use]
    pub const fn reload_delay(&self) -> Duration {
        match self {
            Self::Fixed => Duration::from_secs(5),
            Self::Custom(_) => Duration::from_secs(3),
        }
    }
}

/// Visual tone of a status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Progress,
    Success,
    Error,
}

impl StatusTone {
    /// CSS modifier class.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Progress => "progress",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// Status shown in the generation panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationStatus {
    pub tone: StatusTone,
    pub message: String,
    /// Reload the product list after this delay (successful triggers only).
    pub reload_after: Option<Duration>,
}

impl GenerationStatus {
    /// In-flight status for a job.
    #[must_use]
    pub fn progress(kind: &GenerationKind) -> Self {
        Self {
            tone: StatusTone::Progress,
            message: kind.progress_message(),
            reload_after: None,
        }
    }

    /// Accepted status for a job.
    #[must_use]
    pub fn success(kind: &GenerationKind) -> Self {
        Self {
            tone: StatusTone::Success,
            message: kind.success_message(),
            reload_after: Some(kind.reload_delay()),
        }
    }

    /// Failure status.
    #[must_use]
    pub fn error(message: &str) -> Self {
        Self {
            tone: StatusTone::Error,
            message: format!("Error: {message}"),
            reload_after: None,
        }
    }

    /// Reload delay in whole milliseconds, for templates.
    #[must_use]
    pub fn reload_after_ms(&self) -> Option<u128> {
        self.reload_after.map(|delay| delay.as_millis())
    }
}

// =============================================================================
// Controls
// =============================================================================

/// Enabled/disabled state of the generation controls.
#[derive(Debug, Default)]
pub struct GenerationControls {
    busy: AtomicBool,
}

/// Holds the controls disabled; dropping it re-enables them.
#[derive(Debug)]
#[must_use = "controls are re-enabled as soon as the guard is dropped"]
pub struct GenerationGuard<'a> {
    controls: &'a GenerationControls,
}

impl GenerationControls {
    /// Create enabled controls.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            busy: AtomicBool::new(false),
        }
    }

    /// Whether a trigger may be started.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !self.busy.load(Ordering::SeqCst)
    }

    /// Disable the controls, or return `None` if a trigger is already in flight.
    pub fn try_begin(&self) -> Option<GenerationGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| GenerationGuard { controls: self })
    }
}

impl Drop for GenerationGuard<'_> {
    fn drop(&mut self) {
        self.controls.busy.store(false, Ordering::SeqCst);
    }
}

/// Start a generation job and report the resulting status.
///
/// Errors never propagate: they are turned into an error status.
#[instrument(skip(client, controls))]
pub async fn trigger(
    client: &CatalogClient,
    controls: &GenerationControls,
    kind: GenerationKind,
) -> GenerationStatus {
    let Some(_guard) = controls.try_begin() else {
        warn!("Generation trigger rejected, another is in flight");
        return GenerationStatus::error("Data generation is already being started");
    };

    info!(status = %kind.progress_message(), "Starting data generation");

    let result = match &kind {
        GenerationKind::Fixed => client.generate_fixed().await,
        GenerationKind::Custom(volume) => client.generate_custom(volume).await,
    };

    match result {
        Ok(_) => GenerationStatus::success(&kind),
        Err(e) => GenerationStatus::error(&e.to_string()),
    }
}
