use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Context rows kept between the selection and the window edge (vim-style).
pub const SCROLLOFF: usize = 3;

/// Result of feeding one key into the navigation state machine.
///
/// `selected`/`scroll` are the new cursor state; the intent flags tell the
/// event loop what the key asked for beyond navigation. An unrecognized key
/// returns the input state with every flag false.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct NavUpdate {
    pub selected: usize,
    pub scroll: usize,
    pub quit: bool,
    pub delete: bool,
    pub mark: bool,
}

impl NavUpdate {
    fn unchanged(selected: usize, scroll: usize) -> Self {
        Self {
            selected,
            scroll,
            quit: false,
            delete: false,
            mark: false,
        }
    }
}

/// Maps one key event onto new selection/scroll state and intent flags.
///
/// Pure: reads nothing but its arguments, mutates nothing. Movement keys
/// clamp the selection to `[0, count-1]` and re-apply the scroll-off rule;
/// intent keys leave the cursor untouched.
pub fn apply_key(
    key: KeyEvent,
    selected: usize,
    scroll: usize,
    count: usize,
    viewport: usize,
) -> NavUpdate {
    let mut update = NavUpdate::unchanged(selected, scroll);
    let max_index = count.saturating_sub(1);

    let moved = match key.code {
        KeyCode::Up | KeyCode::Char('k') => Some(selected.saturating_sub(1)),
        KeyCode::Down | KeyCode::Char('j') => Some((selected + 1).min(max_index)),
        KeyCode::PageUp => Some(selected.saturating_sub(viewport.max(1))),
        KeyCode::PageDown => Some((selected + viewport.max(1)).min(max_index)),
        KeyCode::Char('g') => Some(0),
        KeyCode::Char('G') => Some(max_index),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
            update.quit = true;
            None
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            update.quit = true;
            None
        }
        KeyCode::Char('D') => {
            update.delete = true;
            None
        }
        KeyCode::Char(' ') => {
            update.mark = true;
            None
        }
        // lowercase 'd' intentionally ignored
        _ => None,
    };

    if let Some(selected) = moved {
        update.selected = if count == 0 { 0 } else { selected };
        update.scroll = apply_scrolloff(update.selected, scroll, count, viewport);
    }

    update
}

/// Adjusts `scroll` so the selection keeps [`SCROLLOFF`] context rows from
/// the window edges where the list length allows it.
///
/// The margin is capped at half the viewport, so short windows relax the
/// rule instead of violating it. The returned offset never scrolls past the
/// end of the list and never goes negative.
pub fn apply_scrolloff(selected: usize, scroll: usize, count: usize, viewport: usize) -> usize {
    let viewport = viewport.max(1);
    let margin = SCROLLOFF.min(viewport / 2);
    let mut scroll = scroll;

    if selected < scroll + margin {
        scroll = selected.saturating_sub(margin);
    }
    if selected + margin >= scroll + viewport {
        scroll = (selected + margin + 1).saturating_sub(viewport);
    }

    scroll.min(count.saturating_sub(viewport))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn up_and_down_move_by_one_and_clamp() {
        let update = apply_key(key(KeyCode::Down), 0, 0, 3, 10);
        assert_eq!(update.selected, 1);

        let update = apply_key(key(KeyCode::Char('j')), 2, 0, 3, 10);
        assert_eq!(update.selected, 2, "down clamps at the last row");

        let update = apply_key(key(KeyCode::Char('k')), 0, 0, 3, 10);
        assert_eq!(update.selected, 0, "up clamps at the first row");
    }

    #[test]
    fn paging_moves_by_the_viewport_height() {
        let update = apply_key(key(KeyCode::PageDown), 0, 0, 100, 20);
        assert_eq!(update.selected, 20);

        let update = apply_key(key(KeyCode::PageUp), 5, 0, 100, 20);
        assert_eq!(update.selected, 0);

        let update = apply_key(key(KeyCode::PageDown), 95, 80, 100, 20);
        assert_eq!(update.selected, 99);
    }

    #[test]
    fn jump_keys_hit_both_ends() {
        let update = apply_key(key(KeyCode::Char('G')), 2, 0, 50, 10);
        assert_eq!(update.selected, 49);

        let update = apply_key(key(KeyCode::Char('g')), 49, 42, 50, 10);
        assert_eq!(update.selected, 0);
        assert_eq!(update.scroll, 0);
    }

    #[test]
    fn quit_aliases_set_only_the_quit_flag() {
        for code in [KeyCode::Char('q'), KeyCode::Char('Q'), KeyCode::Esc] {
            let update = apply_key(key(code), 4, 2, 50, 10);
            assert!(update.quit);
            assert!(!update.delete && !update.mark);
            assert_eq!((update.selected, update.scroll), (4, 2));
        }

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(apply_key(ctrl_c, 0, 0, 5, 10).quit);
    }

    #[test]
    fn intent_keys_do_not_move_the_cursor() {
        let update = apply_key(key(KeyCode::Char('D')), 7, 3, 50, 10);
        assert!(update.delete);
        assert_eq!((update.selected, update.scroll), (7, 3));

        let update = apply_key(key(KeyCode::Char(' ')), 7, 3, 50, 10);
        assert!(update.mark);
        assert_eq!((update.selected, update.scroll), (7, 3));

        let update = apply_key(key(KeyCode::Char('d')), 7, 3, 50, 10);
        assert_eq!(update, NavUpdate::unchanged(7, 3), "lowercase d is a no-op");

        let update = apply_key(key(KeyCode::Char('z')), 7, 3, 50, 10);
        assert_eq!(update, NavUpdate::unchanged(7, 3));
    }

    #[test]
    fn empty_list_pins_the_cursor_at_zero() {
        for code in [
            KeyCode::Up,
            KeyCode::Down,
            KeyCode::PageUp,
            KeyCode::PageDown,
            KeyCode::Char('g'),
            KeyCode::Char('G'),
        ] {
            let update = apply_key(key(code), 0, 0, 0, 10);
            assert_eq!((update.selected, update.scroll), (0, 0));
        }
    }

    #[test]
    fn scrolloff_keeps_context_rows_around_the_selection() {
        // Moving down near the bottom edge pulls the window along.
        let scroll = apply_scrolloff(8, 0, 30, 10);
        assert_eq!(scroll, 2, "selection stays 3 rows above the bottom edge");

        // Moving up near the top edge pulls the window back.
        let scroll = apply_scrolloff(3, 2, 30, 10);
        assert_eq!(scroll, 0);

        // Short viewports relax the margin instead of oscillating.
        let scroll = apply_scrolloff(1, 0, 30, 2);
        assert_eq!(scroll, 1);
    }

    #[test]
    fn scrolloff_never_scrolls_past_the_content() {
        let scroll = apply_scrolloff(29, 28, 30, 10);
        assert_eq!(scroll, 20, "window is clamped to the last full page");

        let scroll = apply_scrolloff(0, 5, 3, 10);
        assert_eq!(scroll, 0, "lists shorter than the viewport never scroll");
    }

    #[test]
    fn selection_stays_in_bounds_for_arbitrary_key_sequences() {
        let keys = [
            KeyCode::Down,
            KeyCode::PageDown,
            KeyCode::Char('G'),
            KeyCode::Up,
            KeyCode::PageUp,
            KeyCode::Char('g'),
            KeyCode::Char('j'),
            KeyCode::Char('k'),
        ];

        for count in [0usize, 1, 2, 7, 40] {
            let mut selected = 0;
            let mut scroll = 0;
            for _ in 0..4 {
                for code in keys {
                    let update = apply_key(key(code), selected, scroll, count, 5);
                    selected = update.selected;
                    scroll = update.scroll;
                    assert!(selected <= count.saturating_sub(1));
                    assert!(scroll <= count.saturating_sub(1).max(0));
                    assert!(selected >= scroll || count == 0);
                }
            }
        }
    }
}
