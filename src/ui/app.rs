use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::models::{visible, Filter, Task};
use crate::storage::StorageError;
use crate::store::TaskStore;

/// Which pane receives printable keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    List,
}

/// Dialog dimension of the interaction state machine: the bulk-delete
/// confirmation is either closed (`Normal`) or open (`Confirming`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Confirming,
}

/// Interaction state for the terminal UI.
///
/// Every mutation goes through [`TaskStore`], which persists before this
/// struct recomputes the visible list for the next frame. Selection is an
/// index into the visible list and is clamped whenever that list shrinks.
pub struct App {
    store: TaskStore,
    pub filter: Filter,
    pub focus: Focus,
    pub mode: Mode,
    pub input: String,
    pub selected: Option<usize>,
    pub status: Option<String>,
    should_quit: bool,
}

impl App {
    pub fn new(store: TaskStore) -> Self {
        let mut app = Self {
            store,
            filter: Filter::default(),
            focus: Focus::Input,
            mode: Mode::Normal,
            input: String::new(),
            selected: None,
            status: None,
            should_quit: false,
        };
        app.clamp_selection();
        app
    }

    pub fn tasks(&self) -> &[Task] {
        self.store.tasks()
    }

    /// Tasks shown under the active filter. Fresh list every call.
    pub fn visible_tasks(&self) -> Vec<Task> {
        visible(self.store.tasks(), self.filter)
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Route a key press through the state machine.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.mode {
            Mode::Confirming => self.handle_confirm_key(key),
            Mode::Normal => match self.focus {
                Focus::Input => self.handle_input_key(key),
                Focus::List => self.handle_list_key(key),
            },
        }
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => {
                self.dispatch(|store| store.remove_completed());
                self.mode = Mode::Normal;
            }
            KeyCode::Char('n') | KeyCode::Esc => {
                self.mode = Mode::Normal;
            }
            _ => {}
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                let text = std::mem::take(&mut self.input);
                self.dispatch(move |store| store.add(&text));
            }
            KeyCode::Esc | KeyCode::Tab => {
                self.focus = Focus::List;
            }
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(c) => {
                self.input.push(c);
            }
            _ => {}
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Tab | KeyCode::Char('i') | KeyCode::Char('/') => {
                self.focus = Focus::Input;
            }
            KeyCode::Up | KeyCode::Char('k') => self.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::Char(' ') => {
                if let Some(id) = self.selected_id() {
                    self.dispatch(move |store| store.toggle(&id));
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(id) = self.selected_id() {
                    self.dispatch(move |store| store.remove(&id));
                }
            }
            KeyCode::Char('1') => self.set_filter(Filter::All),
            KeyCode::Char('2') => self.set_filter(Filter::Incomplete),
            KeyCode::Char('3') => self.set_filter(Filter::Completed),
            KeyCode::Char('f') => self.set_filter(self.filter.cycle()),
            KeyCode::Char('x') => self.mode = Mode::Confirming,
            _ => {}
        }
    }

    /// Switch filters, keeping the selection on the same task when it
    /// remains visible.
    fn set_filter(&mut self, filter: Filter) {
        let keep = self.selected_id();
        self.filter = filter;
        let visible = self.visible_tasks();
        self.selected = match keep.and_then(|id| visible.iter().position(|t| t.id == id)) {
            Some(idx) => Some(idx),
            None if visible.is_empty() => None,
            None => Some(0),
        };
    }

    /// Id of the task under the cursor, resolved against the visible list.
    fn selected_id(&self) -> Option<String> {
        let visible = self.visible_tasks();
        self.selected
            .and_then(|idx| visible.get(idx))
            .map(|task| task.id.clone())
    }

    fn select_next(&mut self) {
        let len = self.visible_tasks().len();
        if let Some(idx) = self.selected {
            if idx + 1 < len {
                self.selected = Some(idx + 1);
            }
        }
    }

    fn select_prev(&mut self) {
        if let Some(idx) = self.selected {
            if idx > 0 {
                self.selected = Some(idx - 1);
            }
        }
    }

    /// Run a store mutation, then re-clamp the selection against the new
    /// visible list. A failed save is reported in the status line; the
    /// in-memory list stays authoritative for the session.
    fn dispatch<F>(&mut self, mutate: F)
    where
        F: FnOnce(&mut TaskStore) -> Result<(), StorageError>,
    {
        match mutate(&mut self.store) {
            Ok(()) => self.status = None,
            Err(e) => {
                tracing::error!("Failed to persist task list: {}", e);
                self.status = Some(format!("Save failed: {}", e));
            }
        }
        self.clamp_selection();
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_tasks().len();
        self.selected = if len == 0 {
            None
        } else {
            Some(self.selected.map_or(0, |idx| idx.min(len - 1)))
        };
    }
}
