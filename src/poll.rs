//! Background feed polling.
//!
//! Runs on a dedicated thread, fetching every source in turn and sending the
//! results to the UI thread over an [`mpsc`] channel. Between rounds it waits
//! for the poll interval or for a refetch request from [`Poller::refetch`],
//! whichever comes first.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use tracing::{info, warn};

use crate::source::{DataSource, Entry};

/// Messages sent from the poller thread to the UI thread.
#[derive(Debug)]
pub enum PollMsg {
    /// A successful fetch returned these entries.
    Entries { source: String, entries: Vec<Entry> },
    /// A fetch failed with this error description.
    Error(String),
}

enum PollCmd {
    Refetch,
}

/// UI-side end of the poller.
pub struct Poller {
    pub rx: mpsc::Receiver<PollMsg>,
    cmd: mpsc::Sender<PollCmd>,
}

impl Poller {
    /// Ask for an immediate round. Requests made while a round is running are
    /// coalesced into the next one.
    pub fn refetch(&self) {
        // A closed channel means the thread is gone; nothing left to wake.
        let _ = self.cmd.send(PollCmd::Refetch);
    }
}

/// Spawn the background polling thread.
///
/// The thread stops when the [`Poller`] is dropped.
pub fn spawn(sources: Vec<Box<dyn DataSource>>, interval: Duration) -> Poller {
    let (tx, rx) = mpsc::channel();
    let (cmd, cmd_rx) = mpsc::channel();

    thread::spawn(move || loop {
        for src in &sources {
            let msg = match src.fetch() {
                Ok(entries) => {
                    info!(source = src.name(), count = entries.len(), "fetched");
                    PollMsg::Entries {
                        source: src.name().to_string(),
                        entries,
                    }
                }
                Err(e) => {
                    warn!(source = src.name(), error = %e, "fetch failed");
                    PollMsg::Error(format!("{}: {e:#}", src.name()))
                }
            };
            if tx.send(msg).is_err() {
                return;
            }
        }

        match cmd_rx.recv_timeout(interval) {
            Ok(PollCmd::Refetch) => while cmd_rx.try_recv().is_ok() {},
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => return,
        }
    });

    Poller { rx, cmd }
}
