//! Keyboard input dispatch - global keys → overlays → section-specific handlers.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use carecost_core::workflow::{Section, ZIP_LENGTH};

use crate::app::{AppState, Overlay, PendingAction};

/// Handle a key event.
pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.running = false;
        return;
    }

    // Nothing else is accepted while a request is outstanding.
    if app.is_busy() {
        return;
    }

    // 1. Overlays consume input first.
    match &app.overlay {
        Overlay::Welcome | Overlay::Alert(_) => {
            app.overlay = Overlay::None;
            return;
        }
        Overlay::Help => {
            if matches!(
                key.code,
                KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') | KeyCode::F(1)
            ) {
                app.overlay = Overlay::None;
            }
            return;
        }
        Overlay::ErrorHistory => {
            handle_error_overlay(app, key);
            return;
        }
        Overlay::Ask { .. } => {
            handle_ask_overlay(app, key);
            return;
        }
        Overlay::None => {}
    }

    // 2. Function keys work everywhere, including inside text inputs.
    match key.code {
        KeyCode::F(1) => {
            app.overlay = Overlay::Help;
            return;
        }
        KeyCode::F(2) => {
            open_error_history(app);
            return;
        }
        KeyCode::F(3) => {
            open_ask(app);
            return;
        }
        _ => {}
    }

    // 3. Section-specific keys.
    match app.section() {
        Section::Symptom => handle_symptom_key(app, key),
        Section::Diagnosis => handle_diagnosis_key(app, key),
        Section::ZipEntry => handle_zip_key(app, key),
        Section::Results => handle_results_key(app, key),
    }
}

/// Plain-letter shortcuts for sections without a text input. Returns true if consumed.
fn handle_command_key(app: &mut AppState, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') => app.running = false,
        KeyCode::Char('?') => app.overlay = Overlay::Help,
        KeyCode::Char('e') => open_error_history(app),
        KeyCode::Char('a') => open_ask(app),
        _ => return false,
    }
    true
}

fn open_error_history(app: &mut AppState) {
    app.overlay = Overlay::ErrorHistory;
    app.error_scroll = 0;
}

fn open_ask(app: &mut AppState) {
    app.overlay = Overlay::Ask {
        input: String::new(),
        answer: None,
    };
}

fn handle_error_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('e') | KeyCode::F(2) => {
            app.overlay = Overlay::None;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if app.error_scroll + 1 < app.error_history.len() {
                app.error_scroll += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.error_scroll = app.error_scroll.saturating_sub(1);
        }
        _ => {}
    }
}

fn handle_ask_overlay(app: &mut AppState, key: KeyEvent) {
    let Overlay::Ask { input, answer } = &mut app.overlay else {
        return;
    };
    match key.code {
        KeyCode::Esc => app.overlay = Overlay::None,
        KeyCode::Enter => {
            *answer = None;
            app.queue(PendingAction::Ask);
        }
        KeyCode::Backspace => {
            input.pop();
        }
        KeyCode::Char(c) => input.push(c),
        _ => {}
    }
}

fn handle_symptom_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.queue(PendingAction::Search),
        KeyCode::Backspace => {
            app.symptom_input.pop();
        }
        KeyCode::Char(c) => app.symptom_input.push(c),
        KeyCode::Esc => app.symptom_input.clear(),
        _ => {}
    }
}

fn handle_diagnosis_key(app: &mut AppState, key: KeyEvent) {
    if handle_command_key(app, key) {
        return;
    }
    let count = app.view().diagnoses.len();

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            if count > 0 && app.diagnosis_cursor + 1 < count {
                app.diagnosis_cursor += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.diagnosis_cursor = app.diagnosis_cursor.saturating_sub(1);
        }
        KeyCode::Char(c @ '1'..='9') => {
            let index = c as usize - '1' as usize;
            if index < count {
                app.diagnosis_cursor = index;
                app.select_current();
            }
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            if count == 0 {
                app.set_warning("No codes to choose from. Press Esc to search again.");
            } else {
                app.select_current();
            }
        }
        KeyCode::Esc | KeyCode::Backspace => {
            app.controller.view_mut().go_back();
        }
        _ => {}
    }
}

fn handle_zip_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.queue(PendingAction::Analyze),
        KeyCode::Backspace => {
            if app.zip_input.pop().is_some() {
                app.zip_changed();
            }
        }
        KeyCode::Char(c) if c.is_ascii_digit() => {
            if app.zip_input.chars().count() < ZIP_LENGTH {
                app.zip_input.push(c);
                app.zip_changed();
            }
        }
        KeyCode::Esc => {
            app.controller.view_mut().go_back();
        }
        _ => {}
    }
}

fn handle_results_key(app: &mut AppState, key: KeyEvent) {
    if handle_command_key(app, key) {
        return;
    }
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            app.results_scroll += 1;
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.results_scroll = app.results_scroll.saturating_sub(1);
        }
        KeyCode::Char('n') => app.restart(),
        KeyCode::Esc => {
            app.controller.view_mut().go_back();
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{app_with, ctrl, key, type_text};
    use crate::worker::WorkerCommand;
    use carecost_core::testing::{sample_codes, FakeApi};

    #[test]
    fn ctrl_c_quits_from_text_input() {
        let (mut app, _cmds) = app_with(FakeApi::new());
        type_text(&mut app, "q?e");
        assert!(app.running);
        assert_eq!(app.symptom_input, "q?e");
        handle_key(&mut app, ctrl('c'));
        assert!(!app.running);
    }

    #[test]
    fn enter_queues_search() {
        let (mut app, _cmds) = app_with(FakeApi::new().with_search(Ok(sample_codes())));
        type_text(&mut app, "chest pain");
        handle_key(&mut app, key(KeyCode::Enter));
        assert_eq!(app.pending, Some(PendingAction::Search));

        // Input is ignored until the request has run.
        type_text(&mut app, "x");
        assert_eq!(app.symptom_input, "chest pain");

        app.run_pending();
        assert_eq!(app.section(), Section::Diagnosis);
    }

    #[test]
    fn diagnosis_cursor_is_clamped() {
        let (mut app, _cmds) = app_with(FakeApi::new().with_search(Ok(sample_codes())));
        type_text(&mut app, "chest pain");
        handle_key(&mut app, key(KeyCode::Enter));
        app.run_pending();

        for _ in 0..5 {
            handle_key(&mut app, key(KeyCode::Down));
        }
        assert_eq!(app.diagnosis_cursor, 1);
        handle_key(&mut app, key(KeyCode::Char('k')));
        handle_key(&mut app, key(KeyCode::Char('k')));
        assert_eq!(app.diagnosis_cursor, 0);
    }

    #[test]
    fn number_key_selects_directly() {
        let (mut app, _cmds) = app_with(FakeApi::new().with_search(Ok(sample_codes())));
        type_text(&mut app, "chest pain");
        handle_key(&mut app, key(KeyCode::Enter));
        app.run_pending();

        handle_key(&mut app, key(KeyCode::Char('2')));
        assert_eq!(app.controller.session().selected_index(), Some(1));
        handle_key(&mut app, key(KeyCode::Char('9')));
        assert_eq!(app.controller.session().selected_index(), Some(1));
    }

    #[test]
    fn zip_input_accepts_five_digits_and_checks_each_edit() {
        let (mut app, cmds) = app_with(FakeApi::new().with_search(Ok(sample_codes())));
        type_text(&mut app, "chest pain");
        handle_key(&mut app, key(KeyCode::Enter));
        app.run_pending();
        handle_key(&mut app, key(KeyCode::Enter));
        app.tick(std::time::Instant::now() + crate::view::SELECT_REVEAL_DELAY * 2);
        assert_eq!(app.section(), Section::ZipEntry);

        type_text(&mut app, "1a00019");
        assert_eq!(app.zip_input, "10001");
        let sent: Vec<String> = cmds
            .try_iter()
            .filter_map(|c| match c {
                WorkerCommand::ValidateZip { ticket } => Some(ticket.zip_code().to_string()),
                WorkerCommand::Shutdown => None,
            })
            .collect();
        assert_eq!(sent, vec!["10001".to_string()]);

        handle_key(&mut app, key(KeyCode::Backspace));
        assert_eq!(app.zip_input, "1000");
    }

    #[test]
    fn alert_is_dismissed_by_any_key() {
        let (mut app, _cmds) = app_with(FakeApi::new());
        handle_key(&mut app, key(KeyCode::Enter));
        app.run_pending();
        assert!(matches!(app.overlay, Overlay::Alert(_)));
        handle_key(&mut app, key(KeyCode::Char('x')));
        assert_eq!(app.overlay, Overlay::None);
        assert!(app.symptom_input.is_empty());
    }

    #[test]
    fn ask_overlay_collects_query() {
        let (mut app, _cmds) =
            app_with(FakeApi::new().with_answer(Ok("See a doctor.".into())));
        handle_key(&mut app, key(KeyCode::F(3)));
        type_text(&mut app, "is R51 serious?");
        handle_key(&mut app, key(KeyCode::Enter));
        app.run_pending();
        assert_eq!(
            app.overlay,
            Overlay::Ask {
                input: "is R51 serious?".into(),
                answer: Some("See a doctor.".into()),
            }
        );
        handle_key(&mut app, key(KeyCode::Esc));
        assert_eq!(app.overlay, Overlay::None);
    }

    mod zip_entry_props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(64))]

            #[test]
            fn zip_input_holds_at_most_five_digits(typed in "[0-9a-z ]{0,16}") {
                let (mut app, _cmds) = app_with(FakeApi::new().with_search(Ok(sample_codes())));
                type_text(&mut app, "chest pain");
                handle_key(&mut app, key(KeyCode::Enter));
                app.run_pending();
                handle_key(&mut app, key(KeyCode::Enter));
                app.tick(std::time::Instant::now() + crate::view::SELECT_REVEAL_DELAY * 2);
                prop_assert_eq!(app.section(), Section::ZipEntry);

                type_text(&mut app, &typed);
                let expected: String = typed.chars().filter(|c| c.is_ascii_digit()).take(ZIP_LENGTH).collect();
                prop_assert_eq!(&app.zip_input, &expected);
                prop_assert_eq!(app.section(), Section::ZipEntry);
            }
        }
    }
}
