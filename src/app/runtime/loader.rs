use std::{
    sync::mpsc::{self, Receiver, TryRecvError},
    thread,
};

use anyhow::{Result, anyhow};
use tracing::debug;

use crate::{domain::View, io::ViewSource};

/// A one-shot fetch running off the UI thread. No retry, no cancellation:
/// the editor keeps polling until a result (or a dead loader) shows up.
pub(crate) struct PendingLoad {
    rx: Receiver<Result<View>>,
    description: String,
}

impl PendingLoad {
    pub(crate) fn spawn(mut source: Box<dyn ViewSource + Send>) -> Self {
        let description = source.describe();
        let (tx, rx) = mpsc::channel();
        debug!(source = %description, "starting view fetch");
        thread::spawn(move || {
            let _ = tx.send(source.fetch());
        });
        Self { rx, description }
    }

    pub(crate) fn description(&self) -> &str {
        &self.description
    }

    pub(crate) fn poll(&self) -> Option<Result<View>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                Some(Err(anyhow!("loader stopped without producing a view")))
            }
        }
    }
}
