//! Test helpers for building app state against a scripted backend

use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use carecost_core::testing::FakeApi;
use carecost_core::workflow::ZipTicket;

use crate::app::AppState;
use crate::worker::{WorkerCommand, WorkerResponse};

/// App with no worker thread; ZIP checks land on the returned receiver.
pub fn app_with(api: FakeApi) -> (AppState, Receiver<WorkerCommand>) {
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (_resp_tx, resp_rx) = mpsc::channel();
    (AppState::new(Arc::new(api), cmd_tx, resp_rx), cmd_rx)
}

pub fn zip_answer(ticket: ZipTicket, valid: bool) -> WorkerResponse {
    WorkerResponse::ZipChecked {
        ticket,
        outcome: Ok(valid),
    }
}

pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

pub fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

pub fn type_text(app: &mut AppState, text: &str) {
    for c in text.chars() {
        crate::input::handle_key(app, key(KeyCode::Char(c)));
    }
}
