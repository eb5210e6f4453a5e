//! Property tests for the conversation editor session: pagination and
//! selection must hold up under arbitrary edit sequences, not just the
//! happy paths the unit tests walk through.

use app_lib::editor::{ChatMessage, EditorSession, Role, ViewMode, PAGE_SIZE};
use proptest::prelude::*;

fn transcript(n: usize) -> Vec<ChatMessage> {
    (0..n)
        .map(|i| ChatMessage::new(Role::User, format!("m{i}"), None))
        .collect()
}

fn loaded(n: usize) -> EditorSession {
    let mut session = EditorSession::default();
    session.load("group:-1001", transcript(n));
    session
}

#[derive(Debug, Clone)]
enum Op {
    Add,
    Remove(usize),
    Toggle(usize),
    GoTo(usize),
    Change(i64),
    EnterEdit,
    LeaveEdit,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Add),
        (0usize..80).prop_map(Op::Remove),
        (0usize..80).prop_map(Op::Toggle),
        (0usize..12).prop_map(Op::GoTo),
        (-3i64..=3).prop_map(Op::Change),
        Just(Op::EnterEdit),
        Just(Op::LeaveEdit),
    ]
}

fn apply(session: &mut EditorSession, op: &Op) {
    // Out-of-range indices are legitimate inputs here: they must be
    // rejected without corrupting the session.
    match op {
        Op::Add => {
            let _ = session.add_message();
        }
        Op::Remove(i) => {
            let _ = session.remove_message(*i);
        }
        Op::Toggle(i) => {
            let _ = session.toggle_selection(*i);
        }
        Op::GoTo(p) => session.go_to_page(*p),
        Op::Change(d) => session.change_page(*d),
        Op::EnterEdit => {
            let _ = session.set_mode(ViewMode::Editing);
        }
        Op::LeaveEdit => {
            let _ = session.set_mode(ViewMode::Readonly);
        }
    }
}

proptest! {
    #[test]
    fn page_count_is_ceiling_division_with_floor_one(n in 0usize..200) {
        let session = loaded(n);
        prop_assert_eq!(session.total_pages(), n.div_ceil(PAGE_SIZE).max(1));
    }

    #[test]
    fn arbitrary_edit_sequences_keep_the_session_consistent(
        n in 0usize..60,
        ops in proptest::collection::vec(op_strategy(), 0..40),
    ) {
        let mut session = loaded(n);
        for op in &ops {
            apply(&mut session, op);

            let total = session.total_pages();
            prop_assert!(total >= 1);
            prop_assert!((1..=total).contains(&session.page()),
                "page {} escaped [1, {}] after {:?}", session.page(), total, op);
            prop_assert!(
                session.selected_indices().iter().all(|&i| i < session.message_count()),
                "stale selection after {:?}", op
            );
        }
    }

    #[test]
    fn toggling_an_index_twice_is_a_no_op(
        n in 1usize..60,
        seed in proptest::collection::btree_set(0usize..60, 0..10),
        index in 0usize..60,
    ) {
        let mut session = loaded(n);
        for &i in seed.iter().filter(|&&i| i < n) {
            session.toggle_selection(i).unwrap();
        }
        prop_assume!(index < n);

        let before = session.selected_indices();
        session.toggle_selection(index).unwrap();
        session.toggle_selection(index).unwrap();
        prop_assert_eq!(before, session.selected_indices());
    }

    #[test]
    fn bulk_delete_retains_exactly_the_complement_in_order(
        n in 0usize..60,
        picks in proptest::collection::btree_set(0usize..60, 0..20),
    ) {
        let mut session = loaded(n);
        let selected: Vec<usize> = picks.into_iter().filter(|&i| i < n).collect();
        for &i in &selected {
            session.toggle_selection(i).unwrap();
        }

        let retained = session.retained_messages();
        let expected: Vec<String> = (0..n)
            .filter(|i| !selected.contains(i))
            .map(|i| format!("m{i}"))
            .collect();

        prop_assert_eq!(retained.len(), n - selected.len());
        let got: Vec<String> = retained.into_iter().map(|m| m.content).collect();
        prop_assert_eq!(got, expected);
        // And the working copy itself is untouched until a save succeeds.
        prop_assert_eq!(session.message_count(), n);
    }

    #[test]
    fn removing_messages_walks_the_page_back_never_past_one(
        n in 1usize..60,
    ) {
        let mut session = loaded(n);
        session.set_mode(ViewMode::Editing).unwrap();

        // Delete from the tail with the view parked on the last page.
        for remaining in (1..=n).rev() {
            session.go_to_page(session.total_pages());
            let last_page_before = session.total_pages();
            session.remove_message(remaining - 1).unwrap();

            let expected = if (remaining - 1) % PAGE_SIZE == 0 {
                // The removed message was alone on the last page.
                last_page_before.saturating_sub(1).max(1)
            } else {
                last_page_before
            };
            prop_assert_eq!(session.page(), expected);
        }
        prop_assert_eq!(session.message_count(), 0);
        prop_assert_eq!(session.total_pages(), 1);
        prop_assert_eq!(session.page(), 1);
    }
}
