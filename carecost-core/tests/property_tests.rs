//! Property tests for workflow invariants.
//!
//! Uses proptest to verify:
//! 1. Blank symptoms never reach the backend
//! 2. A successful search replaces candidates and clears the selection
//! 3. Selection only ever lands inside the candidate list
//! 4. A stale ZIP answer never overwrites a fresher one
//! 5. Amount formatting only inserts digit grouping

use carecost_core::domain::DiagnosisCode;
use carecost_core::format::format_amount;
use carecost_core::testing::{FakeApi, RecordingView};
use carecost_core::workflow::{WorkflowController, WorkflowError, ZipStatus};
use proptest::prelude::*;

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_codes() -> impl Strategy<Value = Vec<DiagnosisCode>> {
    prop::collection::vec(("[A-Z][0-9]{2}(\\.[0-9]{1,2})?", "[a-z ]{3,20}"), 0..8).prop_map(
        |pairs| {
            pairs
                .into_iter()
                .map(|(code, name)| DiagnosisCode {
                    code,
                    name,
                    description: String::new(),
                })
                .collect()
        },
    )
}

fn arb_blank() -> impl Strategy<Value = String> {
    "[ \t\n\r]{0,10}"
}

fn arb_zip() -> impl Strategy<Value = String> {
    "[0-9]{5}"
}

fn controller(api: FakeApi) -> WorkflowController<FakeApi, RecordingView> {
    WorkflowController::new(api, RecordingView::default())
}

// ── 1. Blank symptoms ────────────────────────────────────────────────

proptest! {
    #[test]
    fn blank_symptom_never_calls_backend(symptom in arb_blank()) {
        let mut ctl = controller(FakeApi::new());
        let err = ctl.search_diagnoses(&symptom).unwrap_err();
        prop_assert!(err.is_validation());
        prop_assert!(ctl.api().calls().is_empty());
    }
}

// ── 2. Search replaces session ───────────────────────────────────────

proptest! {
    #[test]
    fn search_replaces_candidates_and_clears_selection(
        first in arb_codes(),
        second in arb_codes(),
        pick in 0usize..8,
    ) {
        let api = FakeApi::new()
            .with_search(Ok(first.clone()))
            .with_search(Ok(second.clone()));
        let mut ctl = controller(api);

        ctl.search_diagnoses("first").unwrap();
        let _ = ctl.select_diagnosis(pick);
        ctl.search_diagnoses("second").unwrap();

        prop_assert_eq!(ctl.session().candidates(), second.as_slice());
        prop_assert_eq!(ctl.session().selected_index(), None);
        prop_assert_eq!(ctl.session().symptom_text(), "second");
    }
}

// ── 3. Selection stays in range ──────────────────────────────────────

proptest! {
    #[test]
    fn selection_is_in_range_or_refused(codes in arb_codes(), picks in prop::collection::vec(0usize..10, 1..6)) {
        let len = codes.len();
        let mut ctl = controller(FakeApi::new().with_search(Ok(codes)));
        ctl.search_diagnoses("symptom").unwrap();

        let mut expected = None;
        for index in picks {
            match ctl.select_diagnosis(index) {
                Ok(()) => {
                    prop_assert!(index < len);
                    expected = Some(index);
                }
                Err(e) => {
                    prop_assert_eq!(e, WorkflowError::SelectionOutOfRange { index, len });
                }
            }
            prop_assert_eq!(ctl.session().selected_index(), expected);
        }
    }
}

// ── 4. ZIP sequencing ────────────────────────────────────────────────

proptest! {
    /// Answers complete in arbitrary order; the indicator always reflects the
    /// answer for the last input, or nothing if it has not arrived.
    #[test]
    fn stale_zip_answers_never_win(
        zips in prop::collection::vec((arb_zip(), any::<bool>()), 1..6),
        order in any::<u64>(),
    ) {
        let mut ctl = controller(FakeApi::new());
        let mut pending: Vec<_> = zips
            .iter()
            .map(|(zip, valid)| (ctl.begin_zip_validation(zip).unwrap(), *valid))
            .collect();
        let last = pending.len() - 1;
        let latest_valid = pending[last].1;

        // Deterministic shuffle from the generated seed.
        let n = pending.len();
        for i in (1..n).rev() {
            let j = ((order >> (i % 32)) as usize + i) % (i + 1);
            pending.swap(i, j);
        }

        let mut latest_done = false;
        for (ticket, valid) in pending {
            let is_latest = ticket.seq() as usize == n;
            ctl.complete_zip_validation(ticket, Ok(valid));
            latest_done |= is_latest;
            let expected = if latest_done {
                if latest_valid { ZipStatus::Valid } else { ZipStatus::Invalid }
            } else {
                ZipStatus::Unknown
            };
            prop_assert_eq!(ctl.zip_status(), expected);
        }
    }
}

// ── 5. Formatting ────────────────────────────────────────────────────

proptest! {
    #[test]
    fn grouping_is_the_only_change_for_cent_amounts(cents in 0u64..10_000_000_000) {
        let value = cents as f64 / 100.0;
        let formatted = format_amount(value);
        let plain = formatted.replace(',', "");
        let parsed: f64 = plain.parse().unwrap();
        prop_assert!((parsed - value).abs() < 1e-6);

        let int_part = formatted.split('.').next().unwrap();
        for group in int_part.split(',').skip(1) {
            prop_assert_eq!(group.len(), 3);
        }
    }
}
