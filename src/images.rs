//! Image budget enforcement for embedded pieces and signatures.
//!
//! Images travel as data URLs inside the dossier JSON. Actual downscaling
//! and recompression happen outside this application; here an optimizer
//! only decides whether an image fits its budget. `None` always means
//! "could not meet the budget", never a crash.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tracing::debug;

use model::config::ImageLimits;

/// Size constraints an embedded image has to satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageBudget {
    pub max_dimension: u32,
    pub max_bytes: usize,
    pub mime_type: &'static str,
    pub background: &'static str,
}

impl ImageBudget {
    /// Budget for receipt photos attached to pieces.
    pub fn ticket(limits: &ImageLimits) -> Self {
        Self {
            max_dimension: limits.ticket_max_dimension,
            max_bytes: limits.ticket_max_bytes,
            mime_type: "image/jpeg",
            background: "#ffffff",
        }
    }

    /// Budget for the dossier signature image.
    pub fn signature(limits: &ImageLimits) -> Self {
        Self {
            max_dimension: limits.signature_max_dimension,
            max_bytes: limits.signature_max_bytes,
            mime_type: "image/png",
            background: "transparent",
        }
    }
}

pub trait ImageOptimizer {
    /// Returns the image to store, or `None` when the input cannot be
    /// brought within the budget.
    fn optimize(&self, data_url: &str, budget: &ImageBudget) -> Option<String>;
}

/// Validates data URLs against a budget without re-encoding them.
///
/// Anything that is not a `data:image` URL passes through unchanged; it is
/// an external reference the application never inspects. Data URLs must
/// carry a well-formed base64 payload whose decoded size fits `max_bytes`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataUrlOptimizer;

impl ImageOptimizer for DataUrlOptimizer {
    fn optimize(&self, data_url: &str, budget: &ImageBudget) -> Option<String> {
        if !data_url.starts_with("data:image") {
            return Some(data_url.to_string());
        }
        let payload = data_url.split_once(";base64,").map(|(_, p)| p)?;
        // ceil(len * 3 / 4) bounds the decoded size without decoding.
        let estimated = payload.len().div_ceil(4) * 3;
        if estimated > budget.max_bytes {
            debug!(
                estimated,
                max_bytes = budget.max_bytes,
                "image exceeds its byte budget"
            );
            return None;
        }
        if STANDARD.decode(payload).is_err() {
            debug!("image payload is not valid base64");
            return None;
        }
        Some(data_url.to_string())
    }
}
