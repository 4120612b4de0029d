use std::sync::{Mutex, MutexGuard, PoisonError};

use log::{debug, warn};

use super::{encode_png, render_raster, render_svg};
use crate::error::RenderError;
use crate::models::settings::QrSettings;

/// The artifacts of one successful render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedQr {
    pub svg: String,
    pub png: Vec<u8>,
}

/// What the preview currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderState {
    pub generation: u64,
    pub rendered: Option<RenderedQr>,
    pub is_loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The result was applied; this is the state afterwards.
    Applied(RenderState),
    /// A newer render started first, so this result was dropped.
    Superseded { generation: u64 },
}

/// Renders the preview for one editing session.
///
/// Every call to [`RenderSession::render`] starts a new generation. A result is only
/// applied while its generation is still the newest, so a slow render can never
/// overwrite the output of a later input.
#[derive(Debug, Default)]
pub struct RenderSession {
    state: Mutex<RenderState>,
}

pub fn render_both(payload: &str, settings: &QrSettings) -> Result<RenderedQr, RenderError> {
    let svg = render_svg(payload, settings)?;
    let png = encode_png(&render_raster(payload, settings)?)?;
    Ok(RenderedQr { svg, png })
}

impl RenderSession {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, RenderState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> RenderState {
        self.lock().clone()
    }

    /// Start a new generation and mark the preview as loading.
    fn begin(&self) -> u64 {
        let mut state = self.lock();
        state.generation += 1;
        state.is_loading = true;
        state.error = None;
        state.generation
    }

    /// Apply a finished render if nothing newer has started since.
    fn finish(&self, generation: u64, result: Result<RenderedQr, RenderError>) -> RenderOutcome {
        let mut state = self.lock();
        if state.generation != generation {
            debug!(
                "Dropping render {} (current generation is {})",
                generation, state.generation
            );
            return RenderOutcome::Superseded { generation };
        }
        state.is_loading = false;
        match result {
            Ok(rendered) => {
                state.rendered = Some(rendered);
                state.error = None;
            }
            Err(e) => {
                // The last good image stays on screen next to the error
                warn!("Render {} failed: {}", generation, e);
                state.error = Some(e.to_string());
            }
        }
        RenderOutcome::Applied(state.clone())
    }

    pub async fn render(&self, payload: String, settings: QrSettings) -> RenderOutcome {
        let generation = self.begin();

        if payload.is_empty() {
            let mut state = self.lock();
            if state.generation != generation {
                return RenderOutcome::Superseded { generation };
            }
            state.rendered = None;
            state.is_loading = false;
            return RenderOutcome::Applied(state.clone());
        }

        let result = tokio::task::spawn_blocking(move || render_both(&payload, &settings))
            .await
            .unwrap_or_else(|e| Err(RenderError::Worker(e.to_string())));
        self.finish(generation, result)
    }
}
