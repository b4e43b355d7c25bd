use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use tracing::warn;

use crate::domain::models::StatusEvent;

/// Receives upload status events.
///
/// `emit` must not block: it is called from inside the upload future and,
/// for `RequestStarted`, synchronously from `upload` itself.
pub trait StatusSink: Send + Sync + 'static {
    fn emit(&self, event: StatusEvent);
}

impl<S: StatusSink + ?Sized> StatusSink for Arc<S> {
    fn emit(&self, event: StatusEvent) {
        (**self).emit(event)
    }
}

impl StatusSink for UnboundedSender<StatusEvent> {
    fn emit(&self, event: StatusEvent) {
        if let Err(err) = self.send(event) {
            warn!(
                action = err.0.action_type(),
                "Status receiver dropped, event discarded"
            );
        }
    }
}

/// Adapts a closure into a [`StatusSink`].
pub struct FnSink<F>(F);

impl<F> FnSink<F>
where
    F: Fn(StatusEvent) + Send + Sync + 'static,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> StatusSink for FnSink<F>
where
    F: Fn(StatusEvent) + Send + Sync + 'static,
{
    fn emit(&self, event: StatusEvent) {
        (self.0)(event)
    }
}
