use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use speculate2::speculate;
use strike::models::Filter;
use strike::storage::MemoryStorage;
use strike::store::TaskStore;
use strike::ui::{App, Focus, Mode};

fn new_app() -> (MemoryStorage, App) {
    let storage = MemoryStorage::new();
    let store = TaskStore::load(Box::new(storage.clone())).expect("Failed to load store");
    (storage, App::new(store))
}

fn press(app: &mut App, code: KeyCode) {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

/// Drive the add form: focus the input, type, submit.
fn add_task(app: &mut App, text: &str) {
    if app.focus != Focus::Input {
        press(app, KeyCode::Tab);
    }
    type_text(app, text);
    press(app, KeyCode::Enter);
}

speculate! {
    describe "adding tasks" {
        it "creates an incomplete task from submitted text" {
            let (_, mut app) = new_app();

            add_task(&mut app, "Buy milk");

            assert_eq!(app.tasks().len(), 1);
            assert_eq!(app.tasks()[0].text, "Buy milk");
            assert!(!app.tasks()[0].completed);
            assert!(app.input.is_empty());
        }

        it "ignores a blank submission" {
            let (_, mut app) = new_app();

            add_task(&mut app, "   ");
            press(&mut app, KeyCode::Enter);

            assert!(app.tasks().is_empty());
        }

        it "selects the first task once one exists" {
            let (_, mut app) = new_app();
            assert_eq!(app.selected, None);

            add_task(&mut app, "Buy milk");
            assert_eq!(app.selected, Some(0));
        }
    }

    describe "toggling and filtering" {
        it "partitions toggled tasks between the Incomplete and Completed views" {
            let (_, mut app) = new_app();
            add_task(&mut app, "A");
            add_task(&mut app, "B");
            press(&mut app, KeyCode::Esc);

            // Selection starts on "A"; toggle it
            press(&mut app, KeyCode::Char(' '));

            press(&mut app, KeyCode::Char('2'));
            assert_eq!(app.filter, Filter::Incomplete);
            let incomplete = app.visible_tasks();
            assert_eq!(incomplete.len(), 1);
            assert_eq!(incomplete[0].text, "B");

            press(&mut app, KeyCode::Char('3'));
            let completed = app.visible_tasks();
            assert_eq!(completed.len(), 1);
            assert_eq!(completed[0].text, "A");
        }

        it "toggles back to incomplete on a second press" {
            let (_, mut app) = new_app();
            add_task(&mut app, "A");
            press(&mut app, KeyCode::Esc);

            press(&mut app, KeyCode::Char(' '));
            assert!(app.tasks()[0].completed);
            press(&mut app, KeyCode::Char(' '));
            assert!(!app.tasks()[0].completed);
        }

        it "cycles the filter with f" {
            let (_, mut app) = new_app();
            press(&mut app, KeyCode::Esc);

            press(&mut app, KeyCode::Char('f'));
            assert_eq!(app.filter, Filter::Incomplete);
            press(&mut app, KeyCode::Char('f'));
            assert_eq!(app.filter, Filter::Completed);
            press(&mut app, KeyCode::Char('f'));
            assert_eq!(app.filter, Filter::All);
        }

        it "keeps the selection on the same task across a filter switch" {
            let (_, mut app) = new_app();
            add_task(&mut app, "A");
            add_task(&mut app, "B");
            press(&mut app, KeyCode::Esc);
            press(&mut app, KeyCode::Char(' '));     // complete "A"
            press(&mut app, KeyCode::Down);          // select "B"

            press(&mut app, KeyCode::Char('2'));     // "B" is the only incomplete task
            assert_eq!(app.selected, Some(0));
            assert_eq!(app.visible_tasks()[0].text, "B");
        }
    }

    describe "deleting tasks" {
        it "removes the selected task" {
            let (_, mut app) = new_app();
            add_task(&mut app, "A");
            add_task(&mut app, "B");
            press(&mut app, KeyCode::Esc);

            press(&mut app, KeyCode::Char('d'));

            assert_eq!(app.tasks().len(), 1);
            assert_eq!(app.tasks()[0].text, "B");
        }

        it "clamps the selection when the last task is removed" {
            let (_, mut app) = new_app();
            add_task(&mut app, "A");
            add_task(&mut app, "B");
            add_task(&mut app, "C");
            press(&mut app, KeyCode::Esc);
            press(&mut app, KeyCode::Down);
            press(&mut app, KeyCode::Down);
            assert_eq!(app.selected, Some(2));

            press(&mut app, KeyCode::Char('d'));

            assert_eq!(app.tasks().len(), 2);
            assert_eq!(app.selected, Some(1));
        }
    }

    describe "delete-completed confirmation" {
        it "opens the dialog without mutating the list" {
            let (_, mut app) = new_app();
            add_task(&mut app, "A");
            press(&mut app, KeyCode::Esc);
            press(&mut app, KeyCode::Char(' '));

            press(&mut app, KeyCode::Char('x'));

            assert_eq!(app.mode, Mode::Confirming);
            assert_eq!(app.tasks().len(), 1);
        }

        it "confirm removes exactly the completed tasks" {
            let (_, mut app) = new_app();
            add_task(&mut app, "A");
            add_task(&mut app, "B");
            press(&mut app, KeyCode::Esc);
            press(&mut app, KeyCode::Char(' '));     // complete "A"

            press(&mut app, KeyCode::Char('x'));
            press(&mut app, KeyCode::Char('y'));

            assert_eq!(app.mode, Mode::Normal);
            assert_eq!(app.tasks().len(), 1);
            assert_eq!(app.tasks()[0].text, "B");
            assert!(!app.tasks()[0].completed);
        }

        it "cancel leaves the list unchanged" {
            let (_, mut app) = new_app();
            add_task(&mut app, "A");
            add_task(&mut app, "B");
            press(&mut app, KeyCode::Esc);
            press(&mut app, KeyCode::Char(' '));     // complete "A"

            press(&mut app, KeyCode::Char('x'));
            press(&mut app, KeyCode::Char('n'));

            assert_eq!(app.mode, Mode::Normal);
            assert_eq!(app.tasks().len(), 2);
            assert!(app.tasks()[0].completed);
            assert!(!app.tasks()[1].completed);
        }

        it "swallows other keys while the dialog is open" {
            let (_, mut app) = new_app();
            add_task(&mut app, "A");
            press(&mut app, KeyCode::Esc);
            press(&mut app, KeyCode::Char('x'));

            press(&mut app, KeyCode::Char(' '));
            press(&mut app, KeyCode::Char('d'));

            assert_eq!(app.mode, Mode::Confirming);
            assert_eq!(app.tasks().len(), 1);
            assert!(!app.tasks()[0].completed);
        }
    }

    describe "persistence through the UI" {
        it "saves after each mutation so a restart sees the same list" {
            let (storage, mut app) = new_app();
            add_task(&mut app, "A");
            add_task(&mut app, "B");
            press(&mut app, KeyCode::Esc);
            press(&mut app, KeyCode::Char(' '));

            let restarted = TaskStore::load(Box::new(storage))
                .expect("Failed to reload store");
            assert_eq!(restarted.tasks(), app.tasks());
            assert!(restarted.tasks()[0].completed);
        }
    }

    describe "quitting" {
        it "quits on q in list focus" {
            let (_, mut app) = new_app();
            press(&mut app, KeyCode::Esc);
            press(&mut app, KeyCode::Char('q'));
            assert!(app.should_quit());
        }

        it "treats q as text while typing" {
            let (_, mut app) = new_app();
            type_text(&mut app, "q");
            assert!(!app.should_quit());
            assert_eq!(app.input, "q");
        }

        it "quits on ctrl-c anywhere" {
            let (_, mut app) = new_app();
            app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
            assert!(app.should_quit());
        }
    }
}
