//! Keyboard input handling.
//!
//! Translates key events into application state changes. The form page owns
//! text editing and focus cycling; the list page owns selection movement.

use crossterm::event::{KeyCode, KeyEvent};

use crate::app::{App, FormFocus, Page, PAGE_SCROLL_SIZE};

/// Handle keyboard input. Returns true if the app should quit.
pub fn handle_input(app: &mut App, key: KeyEvent) -> bool {
    match app.page {
        Page::Form => handle_form_input(app, key),
        Page::Show => handle_list_input(app, key),
    }
}

fn handle_form_input(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => {
            return true;
        }
        KeyCode::Tab | KeyCode::Down => {
            app.form_focus = app.form_focus.next();
        }
        KeyCode::BackTab | KeyCode::Up => {
            app.form_focus = app.form_focus.prev();
        }
        KeyCode::Enter => match app.form_focus {
            FormFocus::FirstName => {
                app.form_focus = FormFocus::LastName;
            }
            FormFocus::LastName => {
                app.form_focus = FormFocus::AddButton;
            }
            FormFocus::AddButton => {
                app.submit();
            }
            FormFocus::ShowButton => {
                app.show_students();
            }
        },
        KeyCode::Backspace => match app.form_focus {
            FormFocus::FirstName => {
                app.first_name.pop();
            }
            FormFocus::LastName => {
                app.last_name.pop();
            }
            _ => {}
        },
        KeyCode::Char(c) => match app.form_focus {
            FormFocus::FirstName => {
                if App::can_add_name_char(app.first_name.len()) {
                    app.first_name.push(c);
                }
            }
            FormFocus::LastName => {
                if App::can_add_name_char(app.last_name.len()) {
                    app.last_name.push(c);
                }
            }
            _ => {}
        },
        _ => {}
    }
    false
}

fn handle_list_input(app: &mut App, key: KeyEvent) -> bool {
    let max_index = app.students().len().saturating_sub(1);

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            return true;
        }
        KeyCode::Char('a') | KeyCode::Enter => {
            app.add_new();
        }
        KeyCode::Up => {
            app.list_selection = app.list_selection.saturating_sub(1);
        }
        KeyCode::Down => {
            app.list_selection = (app.list_selection + 1).min(max_index);
        }
        KeyCode::PageUp => {
            app.list_selection = app.list_selection.saturating_sub(PAGE_SCROLL_SIZE);
        }
        KeyCode::PageDown => {
            app.list_selection = (app.list_selection + PAGE_SCROLL_SIZE).min(max_index);
        }
        KeyCode::Home => {
            app.list_selection = 0;
        }
        KeyCode::End => {
            app.list_selection = max_index;
        }
        _ => {}
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::MemoryStore;
    use crossterm::event::KeyModifiers;
    use std::sync::Arc;

    fn test_app() -> App {
        App::with_storage(Arc::new(MemoryStore::new()))
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_typing_fills_focused_field() {
        let mut app = test_app();

        for c in "Ada".chars() {
            handle_input(&mut app, press(KeyCode::Char(c)));
        }
        assert_eq!(app.first_name, "Ada");
        assert!(app.last_name.is_empty());

        handle_input(&mut app, press(KeyCode::Tab));
        for c in "Lovelace".chars() {
            handle_input(&mut app, press(KeyCode::Char(c)));
        }
        assert_eq!(app.last_name, "Lovelace");

        handle_input(&mut app, press(KeyCode::Backspace));
        assert_eq!(app.last_name, "Lovelac");
    }

    #[tokio::test]
    async fn test_enter_walks_fields_then_submits() {
        let mut app = test_app();

        for c in "Ada".chars() {
            handle_input(&mut app, press(KeyCode::Char(c)));
        }
        handle_input(&mut app, press(KeyCode::Enter));
        assert_eq!(app.form_focus, FormFocus::LastName);

        for c in "Lovelace".chars() {
            handle_input(&mut app, press(KeyCode::Char(c)));
        }
        handle_input(&mut app, press(KeyCode::Enter));
        assert_eq!(app.form_focus, FormFocus::AddButton);

        handle_input(&mut app, press(KeyCode::Enter));
        assert_eq!(app.students().len(), 1);
        assert_eq!(app.students()[0].full_name(), "Ada Lovelace");
    }

    #[test]
    fn test_show_button_switches_page() {
        let mut app = test_app();

        // FirstName -> LastName -> AddButton -> ShowButton
        handle_input(&mut app, press(KeyCode::Tab));
        handle_input(&mut app, press(KeyCode::Tab));
        handle_input(&mut app, press(KeyCode::Tab));
        handle_input(&mut app, press(KeyCode::Enter));

        assert_eq!(app.page, Page::Show);
    }

    #[test]
    fn test_list_keys_navigate_and_return_to_form() {
        let storage = MemoryStore::with_entry(
            crate::store::ROSTER_KEY,
            r#"[{"firstName":"Ada","lastName":"Lovelace"},
                {"firstName":"Alan","lastName":"Turing"},
                {"firstName":"Grace","lastName":"Hopper"}]"#,
        );
        let mut app = App::with_storage(Arc::new(storage));
        app.load_roster();
        app.show_students();

        handle_input(&mut app, press(KeyCode::Down));
        assert_eq!(app.list_selection, 1);
        handle_input(&mut app, press(KeyCode::End));
        assert_eq!(app.list_selection, 2);
        // Movement clamps at the last entry
        handle_input(&mut app, press(KeyCode::Down));
        assert_eq!(app.list_selection, 2);
        handle_input(&mut app, press(KeyCode::PageUp));
        assert_eq!(app.list_selection, 0);

        handle_input(&mut app, press(KeyCode::Char('a')));
        assert_eq!(app.page, Page::Form);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = test_app();
        assert!(handle_input(&mut app, press(KeyCode::Esc)));

        let mut app = test_app();
        app.show_students();
        assert!(handle_input(&mut app, press(KeyCode::Char('q'))));
    }
}
