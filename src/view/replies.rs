use dashmap::DashMap;
use tokio::sync::oneshot;
use tracing::debug;
use uuid::Uuid;

/// The page's answer to a command that asked for one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageReply {
    pub ok: bool,
    pub value: Option<String>,
    pub error: Option<String>,
}

/// Commands sent to the page that are still waiting for its reply.
#[derive(Debug, Default)]
pub struct PendingReplies {
    waiting: DashMap<Uuid, oneshot::Sender<PageReply>>,
}

impl PendingReplies {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self) -> (Uuid, oneshot::Receiver<PageReply>) {
        let id = Uuid::new_v4();
        let (tx, rx) = oneshot::channel();
        self.waiting.insert(id, tx);
        (id, rx)
    }

    /// Hand `reply` to whoever is waiting on `id`. False when nobody is.
    pub fn resolve(&self, id: &Uuid, reply: PageReply) -> bool {
        match self.waiting.remove(id) {
            Some((_, tx)) => tx.send(reply).is_ok(),
            None => {
                debug!("Reply {} has no waiter", id);
                false
            }
        }
    }

    pub fn forget(&self, id: &Uuid) {
        self.waiting.remove(id);
    }

    /// Fail every outstanding request; their receivers see the sender dropped.
    pub fn close(&self) {
        self.waiting.clear();
    }
}
