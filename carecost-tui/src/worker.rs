//! Background worker thread - ZIP checks run here while the user keeps typing.
//!
//! Communication with the TUI main thread is via `mpsc` channels. Answers carry
//! the ticket they were issued for; the controller decides whether they are stale.

use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use carecost_core::api::{ApiError, CareCostApi};
use carecost_core::workflow::ZipTicket;
use tracing::debug;

/// Commands sent from the TUI to the worker.
#[derive(Debug)]
pub enum WorkerCommand {
    ValidateZip { ticket: ZipTicket },
    Shutdown,
}

/// Responses sent from the worker back to the TUI.
#[derive(Debug, Clone)]
pub enum WorkerResponse {
    ZipChecked {
        ticket: ZipTicket,
        outcome: Result<bool, ApiError>,
    },
}

/// Spawn the background worker thread.
pub fn spawn_worker(
    api: Arc<dyn CareCostApi>,
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("carecost-worker".into())
        .spawn(move || worker_loop(api, rx, tx))
}

fn worker_loop(api: Arc<dyn CareCostApi>, rx: Receiver<WorkerCommand>, tx: Sender<WorkerResponse>) {
    loop {
        match rx.recv() {
            Ok(WorkerCommand::Shutdown) | Err(_) => break,
            Ok(WorkerCommand::ValidateZip { ticket }) => {
                debug!(zip = ticket.zip_code(), seq = ticket.seq(), "checking zip");
                let outcome = api.validate_zip(ticket.zip_code());
                if tx.send(WorkerResponse::ZipChecked { ticket, outcome }).is_err() {
                    break;
                }
            }
        }
    }
    debug!("worker exiting");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::time::Duration;

    use carecost_core::testing::{FakeApi, RecordingView};
    use carecost_core::workflow::{WorkflowController, ZipStatus};

    #[test]
    fn worker_answers_tickets_in_order() {
        let api = Arc::new(FakeApi::new().with_zip(Ok(true)).with_zip(Ok(false)));
        let mut ctl = WorkflowController::new(api.clone(), RecordingView::default());

        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();
        let handle = spawn_worker(api, cmd_rx, resp_tx).unwrap();

        let first = ctl.begin_zip_validation("10001").unwrap();
        let second = ctl.begin_zip_validation("00000").unwrap();
        cmd_tx.send(WorkerCommand::ValidateZip { ticket: first }).unwrap();
        cmd_tx.send(WorkerCommand::ValidateZip { ticket: second }).unwrap();

        for _ in 0..2 {
            let WorkerResponse::ZipChecked { ticket, outcome } =
                resp_rx.recv_timeout(Duration::from_secs(5)).unwrap();
            ctl.complete_zip_validation(ticket, outcome);
        }
        assert_eq!(ctl.zip_status(), ZipStatus::Invalid);

        cmd_tx.send(WorkerCommand::Shutdown).unwrap();
        handle.join().unwrap();
    }

    #[test]
    fn worker_stops_when_channel_closes() {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, _resp_rx) = mpsc::channel();
        let handle = spawn_worker(Arc::new(FakeApi::new()), cmd_rx, resp_tx).unwrap();
        drop(cmd_tx);
        handle.join().unwrap();
    }
}
