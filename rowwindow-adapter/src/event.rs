use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use rowwindow::{WindowDelta, WindowRange};

/// Handle returned by [`EventBus::subscribe`], used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Handler<E> = Box<dyn Fn(&E)>;

/// Named-channel publish/subscribe.
///
/// Handlers on a channel run in the order they subscribed.
pub struct EventBus<E> {
    next_id: u64,
    channels: BTreeMap<String, Vec<(SubscriptionId, Handler<E>)>>,
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> EventBus<E> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            channels: BTreeMap::new(),
        }
    }

    pub fn subscribe(
        &mut self,
        channel: impl Into<String>,
        handler: impl Fn(&E) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.channels
            .entry(channel.into())
            .or_default()
            .push((id, Box::new(handler)));
        id
    }

    /// Removes a handler. Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let mut emptied = None;
        let mut removed = false;
        for (channel, handlers) in self.channels.iter_mut() {
            if let Some(pos) = handlers.iter().position(|(h, _)| *h == id) {
                handlers.remove(pos);
                removed = true;
                if handlers.is_empty() {
                    emptied = Some(channel.clone());
                }
                break;
            }
        }
        if let Some(channel) = emptied {
            self.channels.remove(&channel);
        }
        removed
    }

    /// Calls every handler on `channel` with `event`. Returns how many ran.
    pub fn publish(&self, channel: &str, event: &E) -> usize {
        let Some(handlers) = self.channels.get(channel) else {
            return 0;
        };
        for (_, handler) in handlers {
            handler(event);
        }
        atrace!(channel, handlers = handlers.len(), "EventBus::publish");
        handlers.len()
    }

    pub fn handler_count(&self, channel: &str) -> usize {
        self.channels.get(channel).map_or(0, Vec::len)
    }

    /// Drops every handler on `channel`.
    pub fn clear(&mut self, channel: &str) {
        self.channels.remove(channel);
    }
}

impl<E> core::fmt::Debug for EventBus<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut map = f.debug_map();
        for (channel, handlers) in &self.channels {
            map.entry(channel, &handlers.len());
        }
        map.finish()
    }
}

/// Events a [`crate::Controller`] publishes about its table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TableEvent {
    /// A frame changed the set of visible rows.
    WindowChanged {
        window: WindowRange,
        delta: WindowDelta,
    },
    /// Field values of a row were written.
    RowUpdated { index: usize },
    /// The row count changed.
    Resized { row_count: usize },
}

impl TableEvent {
    pub const WINDOW_CHANGED: &'static str = "window-changed";
    pub const ROW_UPDATED: &'static str = "row-updated";
    pub const RESIZED: &'static str = "resized";

    /// The channel this event is published on.
    pub fn channel(&self) -> &'static str {
        match self {
            Self::WindowChanged { .. } => Self::WINDOW_CHANGED,
            Self::RowUpdated { .. } => Self::ROW_UPDATED,
            Self::Resized { .. } => Self::RESIZED,
        }
    }
}
