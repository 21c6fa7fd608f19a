//! The artificial "generating…" pause before a recommendation becomes visible.
//!
//! The wait runs as a task owned by the result step. Dropping the [`DelayedTask`]
//! aborts it, and every completion carries the [`Ticket`] it was issued for so a
//! late arrival for a step that is gone can be recognized and dropped.

use crate::flow::ResultParams;
use async_channel::Sender;
use std::time::Duration;
use tokio::task::JoinHandle;

pub const DEFAULT_DELAY: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Ticket(u64);

impl Ticket {
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub ticket: Ticket,
    pub text: String,
}

pub async fn deliver_after(
    delay: Duration,
    ticket: Ticket,
    params: ResultParams,
    tx: Sender<Completion>,
) {
    tokio::time::sleep(delay).await;
    let text = params.style_guide().to_string();
    if tx.send(Completion { ticket, text }).await.is_err() {
        log::debug!("Recommendation receiver gone, dropping {:?}", ticket);
    }
}

/// Aborts the wrapped task when dropped.
#[derive(Debug)]
pub struct DelayedTask {
    ticket: Ticket,
    handle: JoinHandle<()>,
}

impl DelayedTask {
    pub fn new(ticket: Ticket, handle: JoinHandle<()>) -> Self {
        Self { ticket, handle }
    }

    pub fn ticket(&self) -> Ticket {
        self.ticket
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for DelayedTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
