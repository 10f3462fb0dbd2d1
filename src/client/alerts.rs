use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Weak,
    },
    time::Duration,
};

use tokio::{runtime::Handle, sync::watch};
use tracing::{trace, warn};

pub const DEFAULT_TTL: Duration = Duration::from_secs(3);

pub type AlertId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Warning,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub id: AlertId,
    pub kind: AlertKind,
    pub content: String,
}

/// Transient notifications shown to the user. Clones share the same list;
/// hand one to every component that needs to raise or render alerts.
#[derive(Clone)]
pub struct AlertStore {
    inner: Arc<Inner>,
}

struct Inner {
    next_id: AtomicU64,
    alerts: watch::Sender<Vec<Alert>>,
    ttl: Duration,
}

impl Default for AlertStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AlertStore {
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        let (alerts, _) = watch::channel(Vec::new());
        Self {
            inner: Arc::new(Inner {
                next_id: AtomicU64::new(0),
                alerts,
                ttl,
            }),
        }
    }

    /// Adds an alert and schedules its removal after the store's ttl.
    /// Outside a tokio runtime the alert stays until [`Self::dismiss`].
    pub fn show(&self, kind: AlertKind, content: impl Into<String>) -> AlertId {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let alert = Alert {
            id,
            kind,
            content: content.into(),
        };
        self.inner.alerts.send_modify(|alerts| alerts.push(alert));

        let Ok(runtime) = Handle::try_current() else {
            warn!(alert_id = id, "no tokio runtime, alert will not auto-dismiss");
            return id;
        };

        let store = Arc::downgrade(&self.inner);
        let ttl = self.inner.ttl;
        runtime.spawn(async move {
            tokio::time::sleep(ttl).await;
            dismiss_in(&store, id);
        });

        id
    }

    /// Removes the alert. Unknown or already dismissed ids are ignored.
    pub fn dismiss(&self, id: AlertId) {
        remove(&self.inner, id);
    }

    pub fn current(&self) -> Vec<Alert> {
        self.inner.alerts.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<Alert>> {
        self.inner.alerts.subscribe()
    }
}

fn dismiss_in(store: &Weak<Inner>, id: AlertId) {
    if let Some(inner) = store.upgrade() {
        trace!(alert_id = id, "auto-dismissing alert");
        remove(&inner, id);
    }
}

fn remove(inner: &Inner, id: AlertId) {
    inner.alerts.send_if_modified(|alerts| {
        let before = alerts.len();
        alerts.retain(|alert| alert.id != id);
        alerts.len() != before
    });
}
