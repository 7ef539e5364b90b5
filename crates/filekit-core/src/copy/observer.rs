use crossbeam_channel::Sender;

/// Notification emitted by a progress copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyEvent {
    /// A block was written; `percent` is `copied * 100 / total`.
    Progress {
        percent: u8,
        copied: u64,
        total: u64,
    },
    /// The source was exhausted and every byte was written.
    Complete { total: u64 },
}

/// Receives progress from a running copy.
///
/// Calls arrive on the copying thread, in order, and must not block for long.
pub trait CopyObserver {
    fn on_event(&mut self, event: CopyEvent);
}

impl<F> CopyObserver for F
where
    F: FnMut(CopyEvent),
{
    fn on_event(&mut self, event: CopyEvent) {
        self(event)
    }
}

/// Observer that discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl CopyObserver for NullObserver {
    fn on_event(&mut self, _event: CopyEvent) {}
}

/// Forwards events to another thread. A disconnected receiver is ignored.
#[derive(Clone)]
pub struct ChannelObserver {
    sender: Sender<CopyEvent>,
}

impl ChannelObserver {
    pub fn new(sender: Sender<CopyEvent>) -> Self {
        Self { sender }
    }
}

impl CopyObserver for ChannelObserver {
    fn on_event(&mut self, event: CopyEvent) {
        let _ = self.sender.send(event);
    }
}
