//! Plain-text rendering of the todo list

use crate::types::TodoState;
use std::fmt::Write;

/// Renders the whole view for a state snapshot
///
/// The creation prompt comes first, then the error line if one is set, then
/// either the loading line or the list.
#[must_use]
pub fn render(state: &TodoState) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Todos ({}/{} done)", state.completed_count(), state.count());
    let _ = writeln!(out, "new> {}", state.draft);

    if let Some(message) = &state.error_message {
        let _ = writeln!(out, "error: {message}");
    }

    if state.is_loading {
        out.push_str("Loading…\n");
    } else if state.is_empty() {
        out.push_str("  (no todos)\n");
    } else {
        for (position, item) in state.items.iter().enumerate() {
            let mark = if item.completed { 'x' } else { ' ' };
            let _ = writeln!(out, "{:>3}. [{mark}] {} #{}", position + 1, item.title, item.id);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TodoItem;

    #[test]
    fn renders_rows_in_order() {
        let state = TodoState::with_items(vec![
            TodoItem::new(2, "write spec", false),
            TodoItem::new(1, "buy milk", true),
        ]);

        assert_eq!(
            render(&state),
            "Todos (1/2 done)\nnew> \n  1. [ ] write spec #2\n  2. [x] buy milk #1\n"
        );
    }

    #[test]
    fn loading_hides_the_list() {
        let state = TodoState {
            is_loading: true,
            ..TodoState::with_items(vec![TodoItem::new(1, "buy milk", false)])
        };

        let view = render(&state);
        assert!(view.contains("Loading…"));
        assert!(!view.contains("buy milk"));
    }

    #[test]
    fn error_and_draft_are_shown() {
        let state = TodoState {
            error_message: Some("Failed to add todo".to_string()),
            draft: "write spec".to_string(),
            ..TodoState::new()
        };

        assert_eq!(
            render(&state),
            "Todos (0/0 done)\nnew> write spec\nerror: Failed to add todo\n  (no todos)\n"
        );
    }
}
