//! Shared web application state.

use std::path::Path;

use crate::model::RiskModel;
use crate::prelude::*;

/// The model artifact, loaded once at process start-up and shared read-only
/// across all requests.
#[derive(Clone)]
pub enum ModelState {
    Ready(Arc<RiskModel>),

    /// The artifact could not be loaded. The service still starts, answering
    /// every prediction request with an explicit «model unavailable» page.
    Unavailable,
}

impl ModelState {
    pub fn load(path: &Path) -> Self {
        match RiskModel::load(path) {
            Ok(model) => {
                info!(
                    path = %path.display(),
                    n_features = model.encoder.n_features(),
                    n_samples = model.n_samples,
                    "model loaded",
                );
                Self::Ready(Arc::new(model))
            }
            Err(error) => {
                warn!(path = %path.display(), "serving without a model: {:#}", error);
                Self::Unavailable
            }
        }
    }
}
