use rowwindow::{
    Error, RenderTarget, RendererOptions, RowSource, WindowDelta, WindowedRowRenderer,
};

use crate::{EditAction, EventBus, StyleBatcher, TableEvent, apply_edit};

/// What a single [`Controller::tick`] did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameOutcome {
    /// Rows that entered/left the window this frame.
    pub delta: WindowDelta,
    /// Writes flushed to the render target this frame.
    pub writes: usize,
}

/// A frame-driven driver for a [`WindowedRowRenderer`].
///
/// Scroll notifications only mark a sync as pending; each `tick` (one per paint) runs at most
/// one window sync and flushes all row writes of the frame through a [`StyleBatcher`]. A burst
/// of scroll events therefore costs one sync and one write per changed row, and the final
/// window always matches the final scroll offset.
///
/// This type does not hold any UI objects; adapters call:
/// - `on_scroll` when the container reports a scroll
/// - `tick` once per frame
pub struct Controller<S: RowSource, T> {
    renderer: WindowedRowRenderer<S, StyleBatcher<T, S::Row>>,
    events: EventBus<TableEvent>,
}

impl<S, T> Controller<S, T>
where
    S: RowSource,
    S::Row: Clone,
    T: RenderTarget<S::Row>,
{
    /// Initializes the renderer with coalesced scrolling and draws the initial window
    /// immediately.
    pub fn new(options: RendererOptions, source: S, target: T) -> Result<Self, Error> {
        let options = options.with_coalesce_scroll(true);
        let mut renderer = WindowedRowRenderer::init(options, source, StyleBatcher::new(target))?;
        if let Some(batcher) = renderer.target_mut() {
            batcher.flush();
        }
        adebug!(window = ?renderer.window(), "Controller::new");
        Ok(Self {
            renderer,
            events: EventBus::new(),
        })
    }

    pub fn renderer(&self) -> &WindowedRowRenderer<S, StyleBatcher<T, S::Row>> {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut WindowedRowRenderer<S, StyleBatcher<T, S::Row>> {
        &mut self.renderer
    }

    pub fn events(&self) -> &EventBus<TableEvent> {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut EventBus<TableEvent> {
        &mut self.events
    }

    /// The wrapped render target, or `None` after `destroy`.
    pub fn target(&self) -> Option<&T> {
        self.renderer.target().map(StyleBatcher::inner)
    }

    pub fn target_mut(&mut self) -> Option<&mut T> {
        self.renderer.target_mut().map(StyleBatcher::inner_mut)
    }

    /// Call this when the container reports a scroll.
    pub fn on_scroll(&mut self) {
        self.renderer.on_scroll();
    }

    /// Advances one frame: runs the pending window sync, flushes writes, publishes events.
    pub fn tick(&mut self) -> FrameOutcome {
        let delta = self.renderer.on_frame();
        let writes = self.flush();
        if !delta.is_empty() {
            self.publish(TableEvent::WindowChanged {
                window: self.renderer.window(),
                delta,
            });
        }
        FrameOutcome { delta, writes }
    }

    /// Writes field values into a row. The visual refresh lands on the next `tick`.
    pub fn update_row<I, F, V>(&mut self, index: usize, fields: I) -> bool
    where
        I: IntoIterator<Item = (F, V)>,
        F: AsRef<str>,
        V: AsRef<str>,
    {
        let changed = self.renderer.update_row(index, fields);
        if changed {
            self.publish(TableEvent::RowUpdated { index });
        }
        changed
    }

    /// Applies a text-edit action to a cell. See [`apply_edit`].
    pub fn apply_edit(
        &mut self,
        index: usize,
        field: &str,
        current: &str,
        action: EditAction,
    ) -> bool {
        let changed = apply_edit(&mut self.renderer, index, field, current, action);
        if changed {
            self.publish(TableEvent::RowUpdated { index });
        }
        changed
    }

    /// Adopts a new row count and draws the adjusted window immediately.
    pub fn resize(&mut self, row_count: usize) -> FrameOutcome {
        let delta = self.renderer.resize(row_count);
        let writes = self.flush();
        if self.renderer.is_destroyed() {
            return FrameOutcome::default();
        }
        self.publish(TableEvent::Resized { row_count });
        if !delta.is_empty() {
            self.publish(TableEvent::WindowChanged {
                window: self.renderer.window(),
                delta,
            });
        }
        FrameOutcome { delta, writes }
    }

    /// Tears down the renderer. Pending writes are dropped.
    pub fn destroy(&mut self) {
        if let Some(batcher) = self.renderer.target_mut() {
            batcher.discard();
        }
        self.renderer.destroy();
    }

    fn flush(&mut self) -> usize {
        self.renderer.target_mut().map_or(0, StyleBatcher::flush)
    }

    fn publish(&self, event: TableEvent) {
        self.events.publish(event.channel(), &event);
    }
}

impl<S: RowSource, T> core::fmt::Debug for Controller<S, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Controller")
            .field("renderer", &self.renderer)
            .field("events", &self.events)
            .finish()
    }
}
