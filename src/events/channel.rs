//! Event channel built on crossbeam-channel.
//!
//! Events flow from ingestion worker threads to whichever UI layer is
//! listening (CLI progress bar, GUI, a test).

use crossbeam_channel::{bounded, unbounded, Receiver, Sender};

use super::{Event, IngestEvent, ScanEvent};

/// Cloneable sending half handed to scanners and ingestors.
#[derive(Clone)]
pub struct EventSender {
    inner: Sender<Event>,
}

impl EventSender {
    /// Wrap a raw crossbeam sender.
    pub fn new(sender: Sender<Event>) -> Self {
        Self { inner: sender }
    }

    /// Send an event. Non-blocking unless a bounded channel is full.
    ///
    /// A dropped receiver discards the event; progress reporting is optional.
    pub fn send(&self, event: Event) {
        let _ = self.inner.send(event);
    }

    pub fn scan(&self, event: ScanEvent) {
        self.send(Event::Scan(event));
    }

    pub fn ingest(&self, event: IngestEvent) {
        self.send(Event::Ingest(event));
    }
}

/// Receiving half used by UI layers.
pub struct EventReceiver {
    inner: Receiver<Event>,
}

impl EventReceiver {
    /// Block until the next event, or `None` once every sender is gone
    pub fn recv(&self) -> Option<Event> {
        self.inner.recv().ok()
    }

    /// Try to receive an event without blocking
    pub fn try_recv(&self) -> Option<Event> {
        self.inner.try_recv().ok()
    }

    /// Blocking iterator that ends when every sender is dropped
    pub fn iter(&self) -> impl Iterator<Item = Event> + '_ {
        self.inner.iter()
    }

    /// Everything queued right now, without blocking
    pub fn drain(&self) -> Vec<Event> {
        self.inner.try_iter().collect()
    }

    /// Queued ingestion events only
    pub fn drain_ingest(&self) -> Vec<IngestEvent> {
        self.drain()
            .into_iter()
            .filter_map(|event| match event {
                Event::Ingest(e) => Some(e),
                _ => None,
            })
            .collect()
    }
}

/// Factory for sender/receiver pairs.
pub struct EventChannel;

impl EventChannel {
    /// Unbounded channel. Events are small, so this is the usual choice.
    pub fn new() -> (EventSender, EventReceiver) {
        let (sender, receiver) = unbounded();
        (
            EventSender { inner: sender },
            EventReceiver { inner: receiver },
        )
    }

    /// Bounded channel for a UI that needs backpressure.
    pub fn bounded(capacity: usize) -> (EventSender, EventReceiver) {
        let (sender, receiver) = bounded(capacity);
        (
            EventSender { inner: sender },
            EventReceiver { inner: receiver },
        )
    }
}

impl Default for EventChannel {
    fn default() -> Self {
        EventChannel
    }
}

/// A sender nobody listens to, for callers that don't want progress.
pub fn null_sender() -> EventSender {
    let (sender, _receiver) = EventChannel::new();
    sender
}
