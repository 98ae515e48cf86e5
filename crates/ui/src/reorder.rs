//! Interaction state for editing an ordered list of primitive values.
//!
//! [`ListEditor`] never owns the list. Every gesture takes the current items
//! and, when something changed, returns the complete new list for the host
//! setter.

use std::{
    marker::PhantomData,
    time::{Duration, Instant},
};

use crate::{
    error::{ControlError, Result},
    validate::{format_number, parse_number, NumberRange, TextLimit},
};

/// Quiet period before a drag-over target is applied.
pub const REORDER_DEBOUNCE: Duration = Duration::from_millis(200);

/// A value that can live in an editable list.
pub trait ListItem: Clone + PartialEq + 'static {
    type Constraint: Clone + Default;

    /// Validate pending text and turn it into an item.
    fn parse(text: &str, constraint: &Self::Constraint) -> Result<Self>;

    /// Text used to seed the edit buffer.
    fn to_text(&self) -> String;

    /// Whether a pending buffer may hold `text` at all.
    fn accepts_buffer(_text: &str, _constraint: &Self::Constraint) -> bool {
        true
    }
}

impl ListItem for f64 {
    type Constraint = NumberRange;

    fn parse(text: &str, range: &NumberRange) -> Result<Self> {
        parse_number(text).and_then(|value| range.check(value))
    }

    fn to_text(&self) -> String {
        format_number(*self)
    }
}

impl ListItem for String {
    type Constraint = TextLimit;

    fn parse(text: &str, limit: &TextLimit) -> Result<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ControlError::Empty);
        }
        limit.check(text)?;
        Ok(trimmed.to_string())
    }

    fn to_text(&self) -> String {
        self.clone()
    }

    fn accepts_buffer(text: &str, limit: &TextLimit) -> bool {
        limit.check(text).is_ok()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PendingMove {
    pub over: usize,
    pub due: Instant,
}

/// One drag gesture. `from` follows the dragged item as moves are applied.
#[derive(Clone, Debug, PartialEq)]
pub struct DragSession {
    pub from: usize,
    pub over: Option<usize>,
    pub pending: Option<PendingMove>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum ListMode {
    #[default]
    Idle,
    Adding {
        buffer: String,
    },
    Editing {
        index: usize,
        buffer: String,
    },
    Dragging(DragSession),
}

pub struct ListEditor<T: ListItem> {
    mode: ListMode,
    constraint: T::Constraint,
    _marker: PhantomData<T>,
}

impl<T: ListItem> Default for ListEditor<T> {
    fn default() -> Self {
        Self::new(T::Constraint::default())
    }
}

impl<T: ListItem> ListEditor<T> {
    pub fn new(constraint: T::Constraint) -> Self {
        Self {
            mode: ListMode::Idle,
            constraint,
            _marker: PhantomData,
        }
    }

    pub fn mode(&self) -> &ListMode {
        &self.mode
    }

    pub fn constraint(&self) -> &T::Constraint {
        &self.constraint
    }

    pub fn set_constraint(&mut self, constraint: T::Constraint) {
        self.constraint = constraint;
    }

    /// Text waiting in the add field.
    pub fn pending_text(&self) -> &str {
        match &self.mode {
            ListMode::Adding { buffer } => buffer,
            _ => "",
        }
    }

    /// Replace the add buffer, returns `false` if the text was rejected.
    ///
    /// Typing into the add field leaves any edit in progress.
    pub fn set_pending(&mut self, text: &str) -> bool {
        if matches!(self.mode, ListMode::Dragging(_)) {
            return false;
        }
        if !T::accepts_buffer(text, &self.constraint) {
            return false;
        }

        self.mode = if text.is_empty() {
            ListMode::Idle
        } else {
            ListMode::Adding {
                buffer: text.to_string(),
            }
        };
        true
    }

    pub fn can_add(&self) -> bool {
        T::parse(self.pending_text(), &self.constraint).is_ok()
    }

    /// Append the pending item. Invalid input keeps the buffer untouched.
    pub fn commit_add(&mut self, items: &[T]) -> Option<Vec<T>> {
        let ListMode::Adding { buffer } = &self.mode else {
            return None;
        };

        match T::parse(buffer, &self.constraint) {
            Ok(item) => {
                let mut next = items.to_vec();
                next.push(item);
                self.mode = ListMode::Idle;
                Some(next)
            }
            Err(err) => {
                tracing::debug!("rejected new list item {:?}: {}", buffer, err);
                None
            }
        }
    }

    /// Enter editing for `index`, seeding the buffer with its current text.
    pub fn begin_edit(&mut self, index: usize, items: &[T]) -> bool {
        let Some(item) = items.get(index) else {
            return false;
        };

        self.mode = ListMode::Editing {
            index,
            buffer: item.to_text(),
        };
        true
    }

    pub fn editing(&self) -> Option<(usize, &str)> {
        match &self.mode {
            ListMode::Editing { index, buffer } => Some((*index, buffer.as_str())),
            _ => None,
        }
    }

    /// Replace the edit buffer, returns `false` if not editing or rejected.
    pub fn set_edit_buffer(&mut self, text: &str) -> bool {
        let constraint = &self.constraint;
        match &mut self.mode {
            ListMode::Editing { buffer, .. } if T::accepts_buffer(text, constraint) => {
                *buffer = text.to_string();
                true
            }
            _ => false,
        }
    }

    /// Leave editing, replacing the edited index when the buffer is valid.
    pub fn save_edit(&mut self, items: &[T]) -> Option<Vec<T>> {
        if !matches!(self.mode, ListMode::Editing { .. }) {
            return None;
        }
        let ListMode::Editing { index, buffer } = std::mem::take(&mut self.mode) else {
            return None;
        };

        if index >= items.len() {
            return None;
        }

        match T::parse(&buffer, &self.constraint) {
            Ok(item) => {
                let mut next = items.to_vec();
                next[index] = item;
                Some(next)
            }
            Err(err) => {
                tracing::debug!("discarded edit of item {}: {}", index, err);
                None
            }
        }
    }

    pub fn cancel_edit(&mut self) {
        if matches!(self.mode, ListMode::Editing { .. }) {
            self.mode = ListMode::Idle;
        }
    }

    /// Remove `index`, keeping an edit in progress pointed at the same item.
    pub fn delete(&mut self, index: usize, items: &[T]) -> Option<Vec<T>> {
        if index >= items.len() {
            return None;
        }

        if let ListMode::Editing { index: editing, .. } = &mut self.mode {
            if *editing == index {
                self.mode = ListMode::Idle;
            } else if *editing > index {
                *editing -= 1;
            }
        }

        let mut next = items.to_vec();
        next.remove(index);
        Some(next)
    }

    pub fn drag_start(&mut self, from: usize) {
        self.mode = ListMode::Dragging(DragSession {
            from,
            over: None,
            pending: None,
        });
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.mode, ListMode::Dragging(_))
    }

    /// Index of the dragged item at its current position.
    pub fn dragged_index(&self) -> Option<usize> {
        match &self.mode {
            ListMode::Dragging(session) => Some(session.from),
            _ => None,
        }
    }

    pub fn drag_over_index(&self) -> Option<usize> {
        match &self.mode {
            ListMode::Dragging(session) => session.over,
            _ => None,
        }
    }

    /// Pointer entered row `over`, returns the due instant of a newly
    /// scheduled move.
    ///
    /// A new target replaces any pending move. Moving back over the dragged
    /// row cancels the pending move on purpose, so returning to the origin
    /// before the quiet period ends leaves the list untouched. Repeated
    /// reports for the current target keep the first deadline.
    pub fn drag_enter(&mut self, over: usize, now: Instant) -> Option<Instant> {
        let ListMode::Dragging(session) = &mut self.mode else {
            return None;
        };

        if over == session.from {
            session.over = None;
            session.pending = None;
            return None;
        }

        if session.pending.as_ref().is_some_and(|p| p.over == over) {
            return None;
        }

        let due = now + REORDER_DEBOUNCE;
        session.over = Some(over);
        session.pending = Some(PendingMove { over, due });
        Some(due)
    }

    /// Apply the pending move once its quiet period has elapsed.
    pub fn commit_due(&mut self, now: Instant, items: &[T]) -> Option<Vec<T>> {
        let ListMode::Dragging(session) = &mut self.mode else {
            return None;
        };

        let due = session.pending.as_ref().is_some_and(|p| now >= p.due);
        if !due {
            return None;
        }

        let pending = session.pending.take()?;
        if session.from >= items.len() || pending.over >= items.len() {
            return None;
        }

        let mut next = items.to_vec();
        let item = next.remove(session.from);
        next.insert(pending.over, item);
        tracing::trace!("moved list item {} -> {}", session.from, pending.over);
        session.from = pending.over;
        Some(next)
    }

    /// Drop or cancel: forget the session and any pending move.
    pub fn drag_end(&mut self) {
        if self.is_dragging() {
            self.mode = ListMode::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(values: &[f64]) -> Vec<f64> {
        values.to_vec()
    }

    fn texts(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn after(start: Instant, ms: u64) -> Instant {
        start + Duration::from_millis(ms)
    }

    #[test]
    fn test_add_number() {
        let items = numbers(&[1., 2., 3.]);
        let mut editor = ListEditor::<f64>::default();

        assert!(editor.set_pending("4"));
        assert!(editor.can_add());
        assert_eq!(editor.commit_add(&items), Some(numbers(&[1., 2., 3., 4.])));
        assert_eq!(editor.mode(), &ListMode::Idle);
        assert_eq!(editor.pending_text(), "");

        editor.set_pending("abc");
        assert!(!editor.can_add());
        assert_eq!(editor.commit_add(&items), None);
        assert_eq!(
            editor.mode(),
            &ListMode::Adding {
                buffer: "abc".into()
            }
        );
    }

    #[test]
    fn test_add_empty_is_noop() {
        let mut editor = ListEditor::<String>::default();
        assert!(editor.set_pending(""));
        assert_eq!(editor.mode(), &ListMode::Idle);
        assert_eq!(editor.commit_add(&[]), None);

        editor.set_pending("   ");
        assert_eq!(editor.commit_add(&[]), None);
        assert_eq!(editor.pending_text(), "   ");
    }

    #[test]
    fn test_add_respects_constraints() {
        let mut editor = ListEditor::<f64>::new(NumberRange::new(0., 10.));
        editor.set_pending("11");
        assert_eq!(editor.commit_add(&[]), None);
        editor.set_pending("10");
        assert_eq!(editor.commit_add(&[]), Some(vec![10.]));

        let mut editor = ListEditor::<String>::new(TextLimit::default().max_length(3));
        assert!(editor.set_pending("abc"));
        assert!(!editor.set_pending("abcd"));
        assert_eq!(editor.pending_text(), "abc");
        assert_eq!(editor.commit_add(&texts(&["x"])), Some(texts(&["x", "abc"])));

        let mut editor = ListEditor::<String>::default();
        editor.set_pending("  padded ");
        assert_eq!(editor.commit_add(&[]), Some(texts(&["padded"])));
    }

    #[test]
    fn test_delete() {
        let items = texts(&["a", "b", "c"]);
        let mut editor = ListEditor::<String>::default();
        assert_eq!(editor.delete(1, &items), Some(texts(&["a", "c"])));
        assert_eq!(editor.delete(3, &items), None);
    }

    #[test]
    fn test_delete_while_editing() {
        let items = texts(&["a", "b", "c"]);
        let mut editor = ListEditor::<String>::default();

        editor.begin_edit(2, &items);
        let items = editor.delete(0, &items).unwrap();
        assert_eq!(editor.editing(), Some((1, "c")));

        editor.delete(1, &items);
        assert_eq!(editor.mode(), &ListMode::Idle);
    }

    #[test]
    fn test_edit_save_and_cancel() {
        let items = numbers(&[1., 2., 3.]);
        let mut editor = ListEditor::<f64>::default();

        assert!(editor.begin_edit(1, &items));
        assert_eq!(editor.editing(), Some((1, "2")));
        assert!(editor.set_edit_buffer("9"));
        assert_eq!(editor.save_edit(&items), Some(numbers(&[1., 9., 3.])));
        assert_eq!(editor.mode(), &ListMode::Idle);

        editor.begin_edit(1, &items);
        editor.set_edit_buffer("9");
        editor.cancel_edit();
        assert_eq!(editor.mode(), &ListMode::Idle);
        assert_eq!(editor.save_edit(&items), None);
        assert_eq!(items, numbers(&[1., 2., 3.]));

        assert!(!editor.begin_edit(3, &items));
    }

    #[test]
    fn test_edit_invalid_exits_without_saving() {
        let items = numbers(&[1., 2., 3.]);
        let mut editor = ListEditor::<f64>::default();
        editor.begin_edit(0, &items);
        editor.set_edit_buffer("nope");
        assert_eq!(editor.save_edit(&items), None);
        assert_eq!(editor.mode(), &ListMode::Idle);
    }

    #[test]
    fn test_typing_new_item_leaves_edit() {
        let items = texts(&["a"]);
        let mut editor = ListEditor::<String>::default();
        editor.begin_edit(0, &items);
        editor.set_pending("b");
        assert_eq!(editor.editing(), None);
        assert!(!editor.set_edit_buffer("x"));
    }

    #[test]
    fn test_drag_reorder() {
        let items = numbers(&[1., 2., 3., 4.]);
        let start = Instant::now();
        let mut editor = ListEditor::<f64>::default();

        editor.drag_start(0);
        assert_eq!(editor.drag_enter(2, start), Some(after(start, 200)));
        assert_eq!(editor.drag_over_index(), Some(2));

        assert_eq!(editor.commit_due(after(start, 199), &items), None);
        let items = editor.commit_due(after(start, 200), &items).unwrap();
        assert_eq!(items, numbers(&[2., 3., 1., 4.]));
        assert_eq!(editor.dragged_index(), Some(2));

        // Nothing left to apply.
        assert_eq!(editor.commit_due(after(start, 500), &items), None);

        editor.drag_end();
        assert_eq!(editor.mode(), &ListMode::Idle);
    }

    #[test]
    fn test_drag_tracks_moved_item() {
        let items = texts(&["a", "b", "c", "d"]);
        let start = Instant::now();
        let mut editor = ListEditor::<String>::default();

        editor.drag_start(0);
        editor.drag_enter(1, start);
        let items = editor.commit_due(after(start, 200), &items).unwrap();
        assert_eq!(items, texts(&["b", "a", "c", "d"]));

        editor.drag_enter(3, after(start, 300));
        let items = editor.commit_due(after(start, 500), &items).unwrap();
        assert_eq!(items, texts(&["b", "c", "d", "a"]));
        assert_eq!(editor.dragged_index(), Some(3));
    }

    #[test]
    fn test_rapid_enters_apply_only_last_target() {
        let items = numbers(&[1., 2., 3., 4.]);
        let start = Instant::now();
        let mut editor = ListEditor::<f64>::default();

        editor.drag_start(0);
        editor.drag_enter(1, start);
        editor.drag_enter(2, after(start, 50));
        let last_due = editor.drag_enter(3, after(start, 100)).unwrap();

        // The first target's deadline passes without any change.
        assert_eq!(editor.commit_due(after(start, 200), &items), None);
        assert_eq!(editor.commit_due(after(start, 250), &items), None);

        let items = editor.commit_due(last_due, &items).unwrap();
        assert_eq!(items, numbers(&[2., 3., 4., 1.]));
        assert_eq!(editor.commit_due(after(start, 1000), &items), None);
    }

    #[test]
    fn test_repeated_enter_keeps_deadline() {
        let start = Instant::now();
        let mut editor = ListEditor::<f64>::default();
        editor.drag_start(0);
        assert!(editor.drag_enter(2, start).is_some());
        assert_eq!(editor.drag_enter(2, after(start, 150)), None);

        let items = editor
            .commit_due(after(start, 200), &numbers(&[1., 2., 3.]))
            .unwrap();
        assert_eq!(items, numbers(&[2., 3., 1.]));
    }

    #[test]
    fn test_reenter_origin_cancels_pending() {
        let start = Instant::now();
        let mut editor = ListEditor::<f64>::default();
        editor.drag_start(1);
        editor.drag_enter(2, start);
        assert_eq!(editor.drag_enter(1, after(start, 10)), None);
        assert_eq!(editor.drag_over_index(), None);
        assert_eq!(
            editor.commit_due(after(start, 400), &numbers(&[1., 2., 3.])),
            None
        );
    }

    #[test]
    fn test_drag_end_cancels_pending() {
        let items = numbers(&[1., 2., 3.]);
        let start = Instant::now();
        let mut editor = ListEditor::<f64>::default();

        editor.drag_start(0);
        editor.drag_enter(2, start);
        editor.drag_end();
        assert_eq!(editor.commit_due(after(start, 400), &items), None);
        assert_eq!(editor.drag_enter(1, start), None);
    }

    #[test]
    fn test_stale_move_after_list_shrank() {
        let start = Instant::now();
        let mut editor = ListEditor::<f64>::default();
        editor.drag_start(0);
        editor.drag_enter(3, start);
        assert_eq!(
            editor.commit_due(after(start, 200), &numbers(&[1., 2.])),
            None
        );
    }

    #[test]
    fn test_drag_start_replaces_edit() {
        let items = numbers(&[1., 2.]);
        let mut editor = ListEditor::<f64>::default();
        editor.begin_edit(0, &items);
        editor.drag_start(1);
        assert_eq!(editor.editing(), None);
        assert!(!editor.set_pending("3"));
        assert_eq!(editor.dragged_index(), Some(1));
    }
}
