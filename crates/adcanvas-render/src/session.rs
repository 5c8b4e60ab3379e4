//! Re-rendering on input changes.
//!
//! A [`RenderSession`] owns the current inputs and runs the full pipeline
//! each time one of them changes. Every pass draws into its own scratch frame
//! and is numbered from one counter; only the newest pass issued may replace
//! the frame on the [`SharedSurface`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::task::{AbortHandle, JoinHandle};

use adcanvas_core::{CanvasResult, Color, FrameBuffer, SURFACE_SIZE};
use adcanvas_ir::{RenderState, TemplateModel};

use crate::pipeline::{CompositingPipeline, RenderReport};

struct SurfaceSlot {
    frame: FrameBuffer,
    generation: u64,
}

/// The drawing surface owned by the host. Cheap to clone; clones share pixels.
#[derive(Clone)]
pub struct SharedSurface {
    slot: Arc<Mutex<SurfaceSlot>>,
}

impl SharedSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            slot: Arc::new(Mutex::new(SurfaceSlot {
                frame: FrameBuffer::new(width, height),
                generation: 0,
            })),
        }
    }

    /// The 1080x1080 creative surface.
    pub fn square() -> Self {
        Self::new(SURFACE_SIZE, SURFACE_SIZE)
    }

    pub fn dimensions(&self) -> (u32, u32) {
        let slot = self.slot.lock();
        (slot.frame.width, slot.frame.height)
    }

    /// Copy of the frame currently on the surface.
    pub fn snapshot(&self) -> FrameBuffer {
        self.slot.lock().frame.clone()
    }

    /// Generation of the pass that last wrote the surface, 0 if none has.
    pub fn committed_generation(&self) -> u64 {
        self.slot.lock().generation
    }

    /// Replace the frame if `generation` is still the newest issued and newer
    /// than what is already shown.
    fn commit(&self, generation: u64, latest: &AtomicU64, frame: FrameBuffer) -> bool {
        let mut slot = self.slot.lock();
        if generation != latest.load(Ordering::SeqCst) || generation <= slot.generation {
            return false;
        }
        slot.frame = frame;
        slot.generation = generation;
        true
    }
}

impl std::fmt::Debug for SharedSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let slot = self.slot.lock();
        f.debug_struct("SharedSurface")
            .field("frame", &slot.frame)
            .field("generation", &slot.generation)
            .finish()
    }
}

/// Everything one pass reads.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderInputs {
    pub state: RenderState,
    pub template: TemplateModel,
}

impl RenderInputs {
    pub fn new(state: RenderState, template: TemplateModel) -> Self {
        Self { state, template }
    }

    /// Fresh editor state for `template`.
    pub fn from_template(template: TemplateModel) -> Self {
        Self {
            state: RenderState::from_template(&template),
            template,
        }
    }
}

impl Default for RenderInputs {
    fn default() -> Self {
        Self::from_template(TemplateModel::default())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The pass finished and its frame is on the surface.
    Committed { generation: u64, report: RenderReport },
    /// A newer pass was issued before this one finished; its frame was dropped.
    Superseded { generation: u64 },
}

impl RenderOutcome {
    pub fn generation(&self) -> u64 {
        match self {
            Self::Committed { generation, .. } | Self::Superseded { generation } => *generation,
        }
    }

    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Committed { .. })
    }

    pub fn report(&self) -> Option<&RenderReport> {
        match self {
            Self::Committed { report, .. } => Some(report),
            Self::Superseded { .. } => None,
        }
    }
}

struct SessionInner {
    pipeline: CompositingPipeline,
    surface: SharedSurface,
    inputs: Mutex<RenderInputs>,
    generation: AtomicU64,
    in_flight: Mutex<Option<AbortHandle>>,
}

/// Drives the pipeline for one editor. Clones share the same session.
#[derive(Clone)]
pub struct RenderSession {
    inner: Arc<SessionInner>,
}

impl RenderSession {
    pub fn new(pipeline: CompositingPipeline, surface: SharedSurface, inputs: RenderInputs) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                pipeline,
                surface,
                inputs: Mutex::new(inputs),
                generation: AtomicU64::new(0),
                in_flight: Mutex::new(None),
            }),
        }
    }

    /// Snapshot of the current inputs.
    pub fn inputs(&self) -> RenderInputs {
        self.inner.inputs.lock().clone()
    }

    /// Newest generation issued so far.
    pub fn generation(&self) -> u64 {
        self.inner.generation.load(Ordering::SeqCst)
    }

    /// Change the inputs without rendering.
    pub fn modify_inputs<F>(&self, f: F)
    where
        F: FnOnce(&mut RenderInputs),
    {
        f(&mut self.inner.inputs.lock());
    }

    /// Run one pass on the current task.
    pub async fn render(&self) -> CanvasResult<RenderOutcome> {
        let generation = self.next_generation();
        self.run(generation).await
    }

    /// Start a pass on the tokio runtime, aborting the pass started by the
    /// previous `submit`. Must be called from within a runtime.
    pub fn submit(&self) -> JoinHandle<CanvasResult<RenderOutcome>> {
        // Held from numbering to bookkeeping so the stored task is always the newest.
        let mut in_flight = self.inner.in_flight.lock();
        let generation = self.next_generation();
        let session = self.clone();
        let handle = tokio::spawn(async move { session.run(generation).await });
        if let Some(previous) = in_flight.replace(handle.abort_handle()) {
            previous.abort();
        }
        handle
    }

    pub fn set_background_color(&self, color: Color) -> JoinHandle<CanvasResult<RenderOutcome>> {
        self.modify_inputs(|i| i.state.background_color = color);
        self.submit()
    }

    /// Only the live caption changes; `template.caption.text` keeps its value.
    pub fn set_caption_text(
        &self,
        text: impl Into<String>,
    ) -> JoinHandle<CanvasResult<RenderOutcome>> {
        let text = text.into();
        self.modify_inputs(|i| i.state.caption_text = text);
        self.submit()
    }

    /// Writes both the state and the template, since the CTA is drawn from the template.
    pub fn set_cta_text(&self, text: impl Into<String>) -> JoinHandle<CanvasResult<RenderOutcome>> {
        let text = text.into();
        self.modify_inputs(|i| {
            i.state.cta_text = text.clone();
            i.template.cta.text = text;
        });
        self.submit()
    }

    pub fn set_uploaded_image(
        &self,
        image: Arc<FrameBuffer>,
    ) -> JoinHandle<CanvasResult<RenderOutcome>> {
        self.modify_inputs(|i| i.state.uploaded_image = Some(image));
        self.submit()
    }

    pub fn clear_uploaded_image(&self) -> JoinHandle<CanvasResult<RenderOutcome>> {
        self.modify_inputs(|i| i.state.uploaded_image = None);
        self.submit()
    }

    pub fn set_template(&self, template: TemplateModel) -> JoinHandle<CanvasResult<RenderOutcome>> {
        self.modify_inputs(|i| i.template = template);
        self.submit()
    }

    fn next_generation(&self) -> u64 {
        self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    async fn run(&self, generation: u64) -> CanvasResult<RenderOutcome> {
        let inputs = self.inputs();
        let (width, height) = self.inner.surface.dimensions();
        let mut scratch = FrameBuffer::new(width, height);
        tracing::info!("render pass {} started", generation);

        let result = self
            .inner
            .pipeline
            .render_into(&mut scratch, &inputs.state, &inputs.template)
            .await;
        let committed = self
            .inner
            .surface
            .commit(generation, &self.inner.generation, scratch);

        match result {
            Ok(report) if committed => {
                tracing::info!("render pass {} committed", generation);
                Ok(RenderOutcome::Committed { generation, report })
            }
            Ok(_) => {
                tracing::warn!("render pass {} superseded", generation);
                Ok(RenderOutcome::Superseded { generation })
            }
            Err(e) => {
                // A failed pass still shows what it drew, if nothing newer was issued.
                tracing::warn!(
                    "render pass {} failed (partial frame {}): {}",
                    generation,
                    if committed { "committed" } else { "dropped" },
                    e
                );
                Err(e)
            }
        }
    }
}

impl std::fmt::Debug for RenderSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderSession")
            .field("generation", &self.generation())
            .field("surface", &self.inner.surface)
            .finish_non_exhaustive()
    }
}
