// Keyboard input handling and command dispatch.
//
// Most keys mutate `ViewState` directly (cursor moves, selections, threshold).
// Keys that need resources outside the view state come back as a
// `UserCommand` for the event loop.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::{Focus, UserCommand, ViewState};

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the event loop must act (export, quit),
/// `None` when the key was handled locally or ignored.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // On Windows crossterm reports both press and release.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    // Ctrl+C always quits immediately regardless of mode.
    if key_event.modifiers.contains(KeyModifiers::CONTROL) && key_event.code == KeyCode::Char('c') {
        return Some(UserCommand::Quit);
    }

    if view_state.confirm_quit {
        return handle_confirm_quit(key_event, view_state);
    }

    match key_event.code {
        // Threshold control
        KeyCode::Char('+') | KeyCode::Char('=') => {
            view_state.raise_threshold();
            None
        }
        KeyCode::Char('-') => {
            view_state.lower_threshold();
            None
        }

        // Player stepping works from either focus
        KeyCode::Char('[') => {
            view_state.move_player(-1);
            None
        }
        KeyCode::Char(']') => {
            view_state.move_player(1);
            None
        }

        KeyCode::Tab | KeyCode::BackTab => {
            view_state.toggle_focus();
            None
        }

        KeyCode::Char('e') => Some(UserCommand::ExportRoster),

        KeyCode::Char('q') => {
            view_state.confirm_quit = true;
            None
        }

        code => {
            match view_state.focus {
                Focus::Teams => handle_team_grid(code, view_state),
                Focus::Players => handle_player_list(code, view_state),
            }
            None
        }
    }
}

fn handle_team_grid(code: KeyCode, view_state: &mut ViewState) {
    match code {
        KeyCode::Left | KeyCode::Char('h') => view_state.move_team_cursor(-1, 0),
        KeyCode::Right | KeyCode::Char('l') => view_state.move_team_cursor(1, 0),
        KeyCode::Up | KeyCode::Char('k') => view_state.move_team_cursor(0, -1),
        KeyCode::Down | KeyCode::Char('j') => view_state.move_team_cursor(0, 1),
        KeyCode::Enter | KeyCode::Char(' ') => view_state.select_team_at_cursor(),
        _ => {}
    }
}

fn handle_player_list(code: KeyCode, view_state: &mut ViewState) {
    match code {
        KeyCode::Up | KeyCode::Char('k') => view_state.move_player(-1),
        KeyCode::Down | KeyCode::Char('j') => view_state.move_player(1),
        KeyCode::Home => view_state.move_player(isize::MIN / 2),
        KeyCode::End => view_state.move_player(isize::MAX / 2),
        KeyCode::Esc => view_state.focus = Focus::Teams,
        _ => {}
    }
}

/// In quit confirmation mode `y`/`q` confirm, `n`/Esc cancel, everything else
/// is blocked.
fn handle_confirm_quit(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Char('q') | KeyCode::Char('Q') => {
            Some(UserCommand::Quit)
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            view_state.confirm_quit = false;
            None
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::tests::test_state;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn press(state: &mut ViewState, code: KeyCode) -> Option<UserCommand> {
        handle_key(key(code), state)
    }

    #[test]
    fn ctrl_c_quits_from_any_mode() {
        let mut state = test_state(300);
        state.confirm_quit = true;
        let ev = KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        };
        assert_eq!(handle_key(ev, &mut state), Some(UserCommand::Quit));
    }

    #[test]
    fn release_events_are_ignored() {
        let mut state = test_state(300);
        let mut ev = key(KeyCode::Char('e'));
        ev.kind = KeyEventKind::Release;
        assert_eq!(handle_key(ev, &mut state), None);
    }

    #[test]
    fn q_asks_for_confirmation() {
        let mut state = test_state(300);
        assert_eq!(press(&mut state, KeyCode::Char('q')), None);
        assert!(state.confirm_quit);

        // Other keys are blocked while confirming.
        assert_eq!(press(&mut state, KeyCode::Char('+')), None);
        assert_eq!(state.session.min_minutes(), 300);

        assert_eq!(press(&mut state, KeyCode::Char('n')), None);
        assert!(!state.confirm_quit);

        press(&mut state, KeyCode::Char('q'));
        assert_eq!(press(&mut state, KeyCode::Char('y')), Some(UserCommand::Quit));
    }

    #[test]
    fn arrows_and_enter_select_a_team() {
        let mut state = test_state(300);
        press(&mut state, KeyCode::Right);
        assert_eq!(state.team_cursor, 1);
        press(&mut state, KeyCode::Enter);
        assert_eq!(state.session.team(), Some("Betis Florida"));
        assert_eq!(state.focus, Focus::Players);
    }

    #[test]
    fn player_focus_steps_through_players() {
        let mut state = test_state(0);
        press(&mut state, KeyCode::Enter);
        assert_eq!(state.session.player(), Some("Adrian Roca"));
        press(&mut state, KeyCode::Down);
        assert_eq!(state.session.player(), Some("Javi Soler"));
        press(&mut state, KeyCode::End);
        assert_eq!(state.session.player(), Some("Pablo Ruiz"));
        press(&mut state, KeyCode::Home);
        assert_eq!(state.session.player(), Some("Adrian Roca"));

        press(&mut state, KeyCode::Esc);
        assert_eq!(state.focus, Focus::Teams);
        press(&mut state, KeyCode::Char(']'));
        assert_eq!(state.session.player(), Some("Javi Soler"));
    }

    #[test]
    fn plus_minus_change_threshold() {
        let mut state = test_state(300);
        press(&mut state, KeyCode::Char('+'));
        assert_eq!(state.session.min_minutes(), 350);
        press(&mut state, KeyCode::Char('-'));
        press(&mut state, KeyCode::Char('-'));
        assert_eq!(state.session.min_minutes(), 250);
    }

    #[test]
    fn tab_only_focuses_players_when_roster_exists() {
        let mut state = test_state(300);
        press(&mut state, KeyCode::Tab);
        assert_eq!(state.focus, Focus::Teams);

        press(&mut state, KeyCode::Enter);
        press(&mut state, KeyCode::Tab);
        assert_eq!(state.focus, Focus::Teams);
        press(&mut state, KeyCode::Tab);
        assert_eq!(state.focus, Focus::Players);
    }

    #[test]
    fn e_requests_export() {
        let mut state = test_state(300);
        assert_eq!(press(&mut state, KeyCode::Char('e')), Some(UserCommand::ExportRoster));
    }
}
