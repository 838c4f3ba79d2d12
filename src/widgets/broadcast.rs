use tokio::sync::broadcast;

/// Marker sent to widget instances after a snapshot commit; receivers
/// re-read the shared store rather than carrying data through the channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SnapshotUpdate;

/// Fan-out "data changed" signal for all registered widget instances.
pub struct UpdateBroadcast {
    sender: broadcast::Sender<SnapshotUpdate>,
}

impl UpdateBroadcast {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(16);
        UpdateBroadcast { sender }
    }

    pub fn register(&self) -> broadcast::Receiver<SnapshotUpdate> {
        self.sender.subscribe()
    }

    /// Returns the number of widget instances signalled.
    pub fn notify_all(&self) -> usize {
        self.sender.send(SnapshotUpdate).unwrap_or(0)
    }
}

impl Default for UpdateBroadcast {
    fn default() -> Self {
        UpdateBroadcast::new()
    }
}
