use std::collections::BTreeSet;

use serde::Serialize;
use ts_rs::TS;

use crate::editor::message::{self, ChatMessage, Role};
use crate::error::AppError;

/// Fixed page size of the edit view.
pub const PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Bubble view; clicking a bubble toggles its selection.
    #[default]
    Readonly,
    /// Paginated per-message editing.
    Editing,
}

/// In-memory editing state for the currently open conversation.
///
/// The working copy is authoritative from load until an explicit save; the
/// server copy is not consulted in between. All transitions are synchronous
/// and side-effect free — the command layer does the network round-trips and
/// feeds results back in via [`EditorSession::load`].
#[derive(Debug, Clone, Default)]
pub struct EditorSession {
    key: Option<String>,
    messages: Vec<ChatMessage>,
    /// Indices into `messages` selected in the bubble view. Cleared by every
    /// structural edit so it can never point past the end.
    selection: BTreeSet<usize>,
    /// Current page of the edit view, 1-based. Meaningless while unloaded.
    page: usize,
    mode: ViewMode,
    /// True for a created-but-never-saved conversation; the frontend hides
    /// the delete action until the first save.
    unsaved_new: bool,
}

impl EditorSession {
    pub fn is_loaded(&self) -> bool {
        self.key.is_some()
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Replace the session with a server-fetched transcript: selection
    /// emptied, page reset, bubble view.
    pub fn load(&mut self, key: impl Into<String>, messages: Vec<ChatMessage>) {
        self.key = Some(key.into());
        self.messages = messages;
        self.selection.clear();
        self.page = 1;
        self.mode = ViewMode::Readonly;
        self.unsaved_new = false;
    }

    /// Start a brand-new conversation seeded with the default template,
    /// opened directly in the edit view. No server call happens until save.
    ///
    /// An empty key aborts with no state change.
    pub fn create(&mut self, key: &str) -> Result<(), AppError> {
        let key = key.trim();
        if key.is_empty() {
            return Err(AppError::Validation(
                "Conversation key cannot be empty".into(),
            ));
        }
        self.key = Some(key.to_string());
        self.messages = message::default_template();
        self.selection.clear();
        self.page = 1;
        self.mode = ViewMode::Editing;
        self.unsaved_new = true;
        Ok(())
    }

    /// Discard everything; back to the no-conversation state.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_unsaved_new(&self) -> bool {
        self.unsaved_new
    }

    /// Called after the working copy has been accepted by the server.
    pub fn mark_saved(&mut self) {
        self.unsaved_new = false;
    }

    fn require_loaded(&self) -> Result<(), AppError> {
        if self.is_loaded() {
            Ok(())
        } else {
            Err(AppError::Validation("No conversation is open".into()))
        }
    }

    fn check_index(&self, index: usize) -> Result<(), AppError> {
        if index < self.messages.len() {
            Ok(())
        } else {
            Err(AppError::Validation(format!(
                "Message index {index} out of range"
            )))
        }
    }

    // ── Selection (bubble view) ─────────────────────────────────────────

    /// Pure membership toggle of `index` in the selection set.
    /// Returns the new selection size.
    pub fn toggle_selection(&mut self, index: usize) -> Result<usize, AppError> {
        self.require_loaded()?;
        self.check_index(index)?;
        if !self.selection.remove(&index) {
            self.selection.insert(index);
        }
        Ok(self.selection.len())
    }

    pub fn selection_count(&self) -> usize {
        self.selection.len()
    }

    pub fn selected_indices(&self) -> Vec<usize> {
        self.selection.iter().copied().collect()
    }

    /// The working copy minus every selected message, relative order kept.
    /// Does not mutate — the caller persists this and, on success, reloads.
    pub fn retained_messages(&self) -> Vec<ChatMessage> {
        self.messages
            .iter()
            .enumerate()
            .filter(|(i, _)| !self.selection.contains(i))
            .map(|(_, m)| m.clone())
            .collect()
    }

    // ── Pagination (edit view) ──────────────────────────────────────────

    /// Page count over the working copy; at least 1 even when empty.
    pub fn total_pages(&self) -> usize {
        self.messages.len().div_ceil(PAGE_SIZE).max(1)
    }

    /// Jump to an absolute page. Out-of-range requests are no-ops.
    pub fn go_to_page(&mut self, page: usize) {
        if (1..=self.total_pages()).contains(&page) {
            self.page = page;
        }
    }

    /// Move by `delta` pages, clamped to `[1, total_pages]`.
    pub fn change_page(&mut self, delta: i64) {
        let target = self.page as i64 + delta;
        let clamped = target.clamp(1, self.total_pages() as i64) as usize;
        self.page = clamped;
    }

    fn clamp_page(&mut self) {
        self.page = self.page.clamp(1, self.total_pages());
    }

    /// Switch between bubble and edit view. Entering the edit view always
    /// lands on page 1.
    pub fn set_mode(&mut self, mode: ViewMode) -> Result<(), AppError> {
        self.require_loaded()?;
        if mode == ViewMode::Editing && self.mode != ViewMode::Editing {
            self.page = 1;
        }
        self.mode = mode;
        Ok(())
    }

    /// The messages visible on the current page, paired with their global
    /// indices so mutations can never desynchronize from pagination.
    pub fn page_items(&self) -> Vec<(usize, &ChatMessage)> {
        let start = (self.page.max(1) - 1) * PAGE_SIZE;
        self.messages
            .iter()
            .enumerate()
            .skip(start)
            .take(PAGE_SIZE)
            .collect()
    }

    // ── In-place mutations (edit view, global indices) ──────────────────

    pub fn set_role(&mut self, index: usize, role: Role) -> Result<(), AppError> {
        self.require_loaded()?;
        self.check_index(index)?;
        self.messages[index].role = role;
        Ok(())
    }

    pub fn set_content(&mut self, index: usize, content: String) -> Result<(), AppError> {
        self.require_loaded()?;
        self.check_index(index)?;
        self.messages[index].content = content;
        Ok(())
    }

    /// Remove one message. Structural: the selection is cleared and the page
    /// re-clamped, so removing the last item of the last page steps the view
    /// back one page.
    pub fn remove_message(&mut self, index: usize) -> Result<(), AppError> {
        self.require_loaded()?;
        self.check_index(index)?;
        self.messages.remove(index);
        self.selection.clear();
        self.clamp_page();
        Ok(())
    }

    /// Append an empty user message stamped with the current time and jump
    /// to the last page so it is visible and ready for input.
    /// Returns the new message's index.
    pub fn add_message(&mut self) -> Result<usize, AppError> {
        self.require_loaded()?;
        self.messages.push(ChatMessage::new(
            Role::User,
            "",
            Some(message::now_stamp()),
        ));
        self.selection.clear();
        self.page = self.total_pages();
        Ok(self.messages.len() - 1)
    }

    // ── Snapshot for the frontend ───────────────────────────────────────

    pub fn snapshot(&self) -> EditorSnapshot {
        EditorSnapshot {
            key: self.key.clone(),
            mode: self.mode,
            messages: self.messages.clone(),
            selected: self.selection.iter().map(|&i| i as u32).collect(),
            selection_count: self.selection.len() as u32,
            page: self.page.max(1) as u32,
            total_pages: self.total_pages() as u32,
            page_items: self
                .page_items()
                .into_iter()
                .map(|(index, message)| PageItem {
                    index: index as u32,
                    message: message.clone(),
                })
                .collect(),
            message_count: self.messages.len() as u32,
            unsaved_new: self.unsaved_new,
        }
    }
}

/// One edit-view row: a message plus its global index.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct PageItem {
    pub index: u32,
    pub message: ChatMessage,
}

/// Everything the frontend needs to render the memory panel.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct EditorSnapshot {
    pub key: Option<String>,
    pub mode: ViewMode,
    pub messages: Vec<ChatMessage>,
    pub selected: Vec<u32>,
    pub selection_count: u32,
    pub page: u32,
    pub total_pages: u32,
    pub page_items: Vec<PageItem>,
    pub message_count: u32,
    pub unsaved_new: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(content: &str) -> ChatMessage {
        ChatMessage::new(Role::User, content, None)
    }

    fn loaded(n: usize) -> EditorSession {
        let mut session = EditorSession::default();
        session.load(
            "group:-1001",
            (0..n).map(|i| msg(&format!("m{i}"))).collect(),
        );
        session
    }

    #[test]
    fn page_count_rounds_up_with_minimum_one() {
        for (n, pages) in [(0, 1), (1, 1), (9, 1), (10, 1), (11, 2), (95, 10)] {
            assert_eq!(loaded(n).total_pages(), pages, "n = {n}");
        }
    }

    #[test]
    fn load_resets_selection_page_and_mode() {
        let mut session = loaded(25);
        session.set_mode(ViewMode::Editing).unwrap();
        session.go_to_page(3);
        session.set_mode(ViewMode::Readonly).unwrap();
        session.toggle_selection(7).unwrap();

        session.load("group:-2002", vec![msg("fresh")]);
        assert_eq!(session.key(), Some("group:-2002"));
        assert_eq!(session.selection_count(), 0);
        assert_eq!(session.page(), 1);
        assert_eq!(session.mode(), ViewMode::Readonly);
    }

    #[test]
    fn toggle_twice_restores_selection() {
        let mut session = loaded(4);
        session.toggle_selection(2).unwrap();
        assert_eq!(session.selected_indices(), vec![2]);
        session.toggle_selection(2).unwrap();
        assert!(session.selected_indices().is_empty());
    }

    #[test]
    fn toggle_out_of_range_is_rejected() {
        let mut session = loaded(4);
        assert!(matches!(
            session.toggle_selection(4),
            Err(AppError::Validation(_))
        ));
        assert_eq!(session.selection_count(), 0);
    }

    #[test]
    fn retained_messages_keep_the_complement_in_order() {
        let mut session = loaded(4);
        session.toggle_selection(1).unwrap();
        session.toggle_selection(3).unwrap();

        let retained: Vec<_> = session
            .retained_messages()
            .into_iter()
            .map(|m| m.content)
            .collect();
        assert_eq!(retained, vec!["m0", "m2"]);
        // The working copy itself is untouched until the save succeeds.
        assert_eq!(session.message_count(), 4);
    }

    #[test]
    fn entering_edit_mode_lands_on_page_one() {
        let mut session = loaded(30);
        session.set_mode(ViewMode::Editing).unwrap();
        session.go_to_page(3);
        session.set_mode(ViewMode::Readonly).unwrap();
        session.set_mode(ViewMode::Editing).unwrap();
        assert_eq!(session.page(), 1);
    }

    #[test]
    fn out_of_range_page_jumps_are_no_ops() {
        let mut session = loaded(25); // 3 pages
        session.set_mode(ViewMode::Editing).unwrap();
        session.go_to_page(2);

        session.go_to_page(0);
        assert_eq!(session.page(), 2);
        session.go_to_page(4);
        assert_eq!(session.page(), 2);
    }

    #[test]
    fn change_page_clamps_at_both_ends() {
        let mut session = loaded(25);
        session.set_mode(ViewMode::Editing).unwrap();
        session.change_page(-1);
        assert_eq!(session.page(), 1);
        session.change_page(10);
        assert_eq!(session.page(), 3);
        session.change_page(1);
        assert_eq!(session.page(), 3);
    }

    #[test]
    fn removing_the_only_message_on_the_last_page_steps_back() {
        let mut session = loaded(21); // pages: 10 + 10 + 1
        session.set_mode(ViewMode::Editing).unwrap();
        session.go_to_page(3);

        session.remove_message(20).unwrap();
        assert_eq!(session.total_pages(), 2);
        assert_eq!(session.page(), 2);
    }

    #[test]
    fn structural_edits_clear_the_selection() {
        let mut session = loaded(12);
        session.toggle_selection(5).unwrap();
        session.remove_message(0).unwrap();
        assert_eq!(session.selection_count(), 0);

        session.toggle_selection(5).unwrap();
        session.add_message().unwrap();
        assert_eq!(session.selection_count(), 0);
    }

    #[test]
    fn add_message_appends_empty_user_entry_and_jumps_to_last_page() {
        let mut session = loaded(10); // exactly one full page
        session.set_mode(ViewMode::Editing).unwrap();

        let index = session.add_message().unwrap();
        assert_eq!(index, 10);
        assert_eq!(session.total_pages(), 2);
        assert_eq!(session.page(), 2);

        let added = &session.messages()[index];
        assert_eq!(added.role, Role::User);
        assert_eq!(added.content, "");
        assert!(added.timestamp.is_some());
    }

    #[test]
    fn mutations_by_global_index_hit_the_right_message() {
        let mut session = loaded(25);
        session.set_mode(ViewMode::Editing).unwrap();
        session.go_to_page(3);

        session.set_role(20, Role::Assistant).unwrap();
        session.set_content(20, "edited".into()).unwrap();
        assert_eq!(session.messages()[20].role, Role::Assistant);
        assert_eq!(session.messages()[20].content, "edited");

        // Content may legitimately be set to empty.
        session.set_content(20, String::new()).unwrap();
        assert_eq!(session.messages()[20].content, "");
    }

    #[test]
    fn page_items_carry_global_indices() {
        let mut session = loaded(25);
        session.set_mode(ViewMode::Editing).unwrap();
        session.go_to_page(3);

        let items = session.page_items();
        assert_eq!(items.len(), 5);
        assert_eq!(items[0].0, 20);
        assert_eq!(items[0].1.content, "m20");
    }

    #[test]
    fn create_seeds_the_default_template_in_edit_mode() {
        let mut session = EditorSession::default();
        session.create("-1001").unwrap();

        assert_eq!(session.key(), Some("-1001"));
        assert_eq!(session.mode(), ViewMode::Editing);
        assert_eq!(session.page(), 1);
        assert!(session.is_unsaved_new());

        // Saving without edits would persist exactly this template.
        let roles: Vec<_> = session.messages().iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::System, Role::User, Role::Assistant]);
        assert_eq!(session.messages()[0].content, "You are ZUZU Bot.");
        assert_eq!(session.messages()[1].content, "Hello!");
        assert_eq!(session.messages()[2].content, "Hi there! How can I help?");
    }

    #[test]
    fn create_with_blank_key_aborts_without_state_change() {
        let mut session = loaded(3);
        let before = session.messages().to_vec();

        assert!(matches!(
            session.create("   "),
            Err(AppError::Validation(_))
        ));
        assert_eq!(session.key(), Some("group:-1001"));
        assert_eq!(session.messages(), &before[..]);
    }

    #[test]
    fn clear_returns_to_the_unloaded_state() {
        let mut session = loaded(5);
        session.toggle_selection(1).unwrap();
        session.clear();

        assert!(!session.is_loaded());
        assert_eq!(session.message_count(), 0);
        assert_eq!(session.selection_count(), 0);
        assert!(matches!(
            session.toggle_selection(0),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn snapshot_reflects_the_session() {
        let mut session = loaded(12);
        session.toggle_selection(3).unwrap();
        session.set_mode(ViewMode::Editing).unwrap();
        session.change_page(1);

        let snap = session.snapshot();
        assert_eq!(snap.key.as_deref(), Some("group:-1001"));
        assert_eq!(snap.mode, ViewMode::Editing);
        assert_eq!(snap.message_count, 12);
        assert_eq!(snap.selected, vec![3]);
        assert_eq!(snap.selection_count, 1);
        assert_eq!(snap.page, 2);
        assert_eq!(snap.total_pages, 2);
        assert_eq!(snap.page_items.len(), 2);
        assert_eq!(snap.page_items[0].index, 10);
    }
}
