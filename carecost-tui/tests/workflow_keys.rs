//! Drive the TUI with synthetic key presses against a scripted backend and a
//! real worker thread.

use std::sync::mpsc;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use carecost_core::api::ApiError;
use carecost_core::testing::{sample_analysis, sample_codes, ApiCall, FakeApi};
use carecost_core::workflow::{Section, ZipStatus, BAD_ZIP_MESSAGE};
use carecost_tui::app::{AppState, Overlay};
use carecost_tui::view::SELECT_REVEAL_DELAY;
use carecost_tui::worker::{spawn_worker, WorkerCommand};
use carecost_tui::handle_key;

struct Harness {
    app: AppState,
    api: Arc<FakeApi>,
    worker: Option<std::thread::JoinHandle<()>>,
}

impl Harness {
    fn new(api: FakeApi) -> Self {
        let api = Arc::new(api);
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();
        let worker = spawn_worker(api.clone(), cmd_rx, resp_tx).unwrap();
        let app = AppState::new(api.clone(), cmd_tx, resp_rx);
        Self {
            app,
            api,
            worker: Some(worker),
        }
    }

    fn press(&mut self, code: KeyCode) {
        handle_key(&mut self.app, KeyEvent::new(code, KeyModifiers::NONE));
        self.app.run_pending();
    }

    fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.press(KeyCode::Char(c));
        }
    }

    fn settle(&mut self) {
        self.app.tick(Instant::now() + SELECT_REVEAL_DELAY * 2);
    }

    /// Wait until the worker has answered and the indicator shows `expected`.
    fn wait_for_zip(&mut self, expected: ZipStatus) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            self.app.drain_worker();
            if self.app.view().zip_status == expected {
                return;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        panic!(
            "zip status stayed {:?}, expected {expected:?}",
            self.app.view().zip_status
        );
    }
}

impl Drop for Harness {
    fn drop(&mut self) {
        let _ = self.app.worker_tx.send(WorkerCommand::Shutdown);
        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
        }
    }
}

#[test]
fn keyboard_walkthrough_reaches_results() {
    let api = FakeApi::new()
        .with_search(Ok(sample_codes()))
        .with_zip(Ok(true))
        .with_analysis(Ok(sample_analysis()));
    let mut h = Harness::new(api);

    h.type_text("chest pain");
    h.press(KeyCode::Enter);
    assert_eq!(h.app.section(), Section::Diagnosis);

    h.press(KeyCode::Enter);
    h.settle();
    assert_eq!(h.app.section(), Section::ZipEntry);

    h.type_text("10001");
    h.wait_for_zip(ZipStatus::Valid);

    h.press(KeyCode::Enter);
    assert_eq!(h.app.section(), Section::Results);
    let report = h.app.view().report.as_ref().unwrap();
    let summary = report.summary.as_ref().unwrap();
    assert_eq!(summary.items[0].amount.as_str(), "$1,200 - $3,400");

    let analyses: Vec<ApiCall> = h
        .api
        .calls()
        .into_iter()
        .filter(|c| matches!(c, ApiCall::AnalyzeCosts(_)))
        .collect();
    assert_eq!(analyses.len(), 1);
}

#[test]
fn short_zip_is_refused_before_any_request() {
    let mut h = Harness::new(FakeApi::new().with_search(Ok(sample_codes())));
    h.type_text("chest pain");
    h.press(KeyCode::Enter);
    h.press(KeyCode::Enter);
    h.settle();

    h.type_text("100");
    h.press(KeyCode::Enter);
    assert_eq!(h.app.overlay, Overlay::Alert(BAD_ZIP_MESSAGE.into()));
    assert_eq!(h.app.section(), Section::ZipEntry);
    assert_eq!(h.api.calls().len(), 1);
}

#[test]
fn failed_search_keeps_user_on_symptom() {
    let mut h = Harness::new(FakeApi::new().with_search(Err(ApiError::Backend {
        status: 500,
        message: None,
    })));
    h.type_text("headache");
    h.press(KeyCode::Enter);

    assert_eq!(h.app.section(), Section::Symptom);
    assert_eq!(
        h.app.overlay,
        Overlay::Alert("Failed to search ICD codes".into())
    );
    assert_eq!(h.app.error_history.len(), 1);
}

#[test]
fn back_and_new_search_from_results() {
    let api = FakeApi::new()
        .with_search(Ok(sample_codes()))
        .with_zip(Ok(true))
        .with_analysis(Ok(sample_analysis()));
    let mut h = Harness::new(api);
    h.type_text("chest pain");
    h.press(KeyCode::Enter);
    h.press(KeyCode::Enter);
    h.settle();
    h.type_text("10001");
    h.press(KeyCode::Enter);
    assert_eq!(h.app.section(), Section::Results);

    h.press(KeyCode::Esc);
    assert_eq!(h.app.section(), Section::ZipEntry);
    h.press(KeyCode::Enter);
    // No second analysis scripted: the fake answers with a network error.
    assert_eq!(
        h.app.overlay,
        Overlay::Alert("Network error. Please try again.".into())
    );
    h.press(KeyCode::Char('x'));

    h.app.restart();
    assert_eq!(h.app.section(), Section::Symptom);
    assert!(h.app.zip_input.is_empty());
}
