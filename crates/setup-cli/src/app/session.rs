//! The installer session state machine.
//!
//! [`Session::handle`] dispatches one [`Input`] to the handler of the current
//! [`View`]. Handlers only mutate session state; anything with side effects
//! outside the session (quitting, running the batch) is returned as a
//! [`Command`] for the caller to carry out.

use setup_meta::{DetectedTarget, Environment, Scope, TargetDescriptor};
use setup_tools::{Credentials, InjectionResult, ValidationResult, validate};

use super::form::CredentialsForm;
use super::input::{Input, Key};

/// The screen the session is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Menu,
    MultiSelect,
    ScopeSelect,
    Credentials,
    Confirm,
    Installing,
    /// Per-target outcomes of a multi-target batch.
    Results,
    /// A single-target install succeeded.
    Success,
    /// A single-target install failed.
    Error,
}

/// Whether the session installs into one target picked from the menu or a
/// multi-select set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Index into the session's target list.
    Single(usize),
    Multi,
}

/// One row of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    MultiInstall,
    /// Index into the session's target list.
    Target(usize),
}

/// Work the session asks its driver to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    None,
    Quit,
    /// Run the batch, then report back with [`Session::finish_batch`].
    RunBatch(BatchRequest),
}

/// Everything the batch installer needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchRequest {
    pub targets: Vec<TargetDescriptor>,
    pub scope: Scope,
    pub credentials: Credentials,
}

#[derive(Debug, Clone)]
pub struct Session {
    env: Environment,
    targets: Vec<DetectedTarget>,
    prefill: Option<String>,

    view: View,
    flow: Flow,
    menu_cursor: usize,
    select_cursor: usize,
    selected: Vec<bool>,
    scope: Scope,
    form: CredentialsForm,
    /// Cached validation of the current selection and scope; `None` when
    /// stale.
    validation: Option<Vec<ValidationResult>>,
    notice: Option<String>,
    results: Vec<InjectionResult>,
}

impl Session {
    /// Start a session on the menu. `targets` are the menu entries in display
    /// order; installed ones start selected in the multi-select view.
    pub fn new(targets: Vec<DetectedTarget>, env: Environment, prefill: Option<String>) -> Self {
        let selected = targets.iter().map(|t| t.installed).collect();
        Self {
            env,
            form: CredentialsForm::new(prefill.as_deref()),
            prefill,
            targets,
            view: View::Menu,
            flow: Flow::Multi,
            menu_cursor: 0,
            select_cursor: 0,
            selected,
            scope: Scope::Project,
            validation: None,
            notice: None,
            results: Vec::new(),
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn flow(&self) -> Flow {
        self.flow
    }

    pub fn targets(&self) -> &[DetectedTarget] {
        &self.targets
    }

    pub fn menu_items(&self) -> Vec<MenuItem> {
        std::iter::once(MenuItem::MultiInstall)
            .chain((0..self.targets.len()).map(MenuItem::Target))
            .collect()
    }

    pub fn menu_cursor(&self) -> usize {
        self.menu_cursor
    }

    pub fn select_cursor(&self) -> usize {
        self.select_cursor
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.get(index).copied().unwrap_or(false)
    }

    pub fn selected_count(&self) -> usize {
        self.selected.iter().filter(|&&s| s).count()
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn form(&self) -> &CredentialsForm {
        &self.form
    }

    pub fn validation(&self) -> Option<&[ValidationResult]> {
        self.validation.as_deref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn results(&self) -> &[InjectionResult] {
        &self.results
    }

    /// Targets the batch will run against, in display order.
    pub fn chosen_targets(&self) -> Vec<TargetDescriptor> {
        match self.flow {
            Flow::Single(index) => self
                .targets
                .get(index)
                .map(|t| vec![t.descriptor.clone()])
                .unwrap_or_default(),
            Flow::Multi => self
                .targets
                .iter()
                .zip(&self.selected)
                .filter(|(_, selected)| **selected)
                .map(|(t, _)| t.descriptor.clone())
                .collect(),
        }
    }

    /// Feed one input event to the current view.
    pub fn handle(&mut self, input: Input) -> Command {
        match self.view {
            View::Menu => self.on_menu(input),
            View::MultiSelect => self.on_multi_select(input),
            View::ScopeSelect => self.on_scope_select(input),
            View::Credentials => self.on_credentials(input),
            View::Confirm => self.on_confirm(input),
            View::Installing => Command::None,
            View::Results | View::Success | View::Error => self.on_finished(input),
        }
    }

    /// Record batch results and move to the matching result view.
    pub fn finish_batch(&mut self, results: Vec<InjectionResult>) {
        self.view = match self.flow {
            Flow::Multi => View::Results,
            Flow::Single(_) if results.first().is_some_and(|r| r.success) => View::Success,
            Flow::Single(_) => View::Error,
        };
        self.results = results;
    }

    fn on_menu(&mut self, input: Input) -> Command {
        let Input::Key(key) = input else {
            return Command::None;
        };
        let count = self.targets.len() + 1;
        match key {
            Key::Char('q') | Key::Esc | Key::Ctrl('c') => return Command::Quit,
            Key::Up => self.menu_cursor = wrap_prev(self.menu_cursor, count),
            Key::Down => self.menu_cursor = wrap_next(self.menu_cursor, count),
            Key::Enter => match self.menu_items()[self.menu_cursor] {
                MenuItem::MultiInstall => {
                    if self.flow != Flow::Multi {
                        self.validation = None;
                    }
                    self.flow = Flow::Multi;
                    self.view = View::MultiSelect;
                }
                MenuItem::Target(index) => {
                    self.flow = Flow::Single(index);
                    self.scope = self.targets[index].descriptor.preferred_scope();
                    self.revalidate();
                    self.notice = None;
                    self.view = View::Credentials;
                }
            },
            _ => {}
        }
        Command::None
    }

    fn on_multi_select(&mut self, input: Input) -> Command {
        let Input::Key(key) = input else {
            return Command::None;
        };
        let count = self.targets.len();
        match key {
            Key::Ctrl('c') => return Command::Quit,
            Key::Esc => {
                self.notice = None;
                self.view = View::Menu;
            }
            Key::Up => self.select_cursor = wrap_prev(self.select_cursor, count),
            Key::Down => self.select_cursor = wrap_next(self.select_cursor, count),
            Key::Char(' ') => {
                if let Some(selected) = self.selected.get_mut(self.select_cursor) {
                    *selected = !*selected;
                    self.validation = None;
                }
            }
            Key::Char('a') => self.select_all(true),
            Key::Char('n') => self.select_all(false),
            Key::Enter => {
                if self.selected_count() == 0 {
                    self.notice = Some("Select at least one tool".to_string());
                } else {
                    self.notice = None;
                    self.view = View::ScopeSelect;
                }
            }
            _ => {}
        }
        Command::None
    }

    fn on_scope_select(&mut self, input: Input) -> Command {
        let Input::Key(key) = input else {
            return Command::None;
        };
        match key {
            Key::Ctrl('c') => return Command::Quit,
            Key::Esc => self.view = View::MultiSelect,
            Key::Up | Key::Down | Key::Char(' ') => {
                self.scope = self.scope.toggled();
                self.validation = None;
            }
            Key::Enter => {
                self.revalidate();
                self.notice = None;
                self.view = View::Credentials;
            }
            _ => {}
        }
        Command::None
    }

    fn on_credentials(&mut self, input: Input) -> Command {
        let key = match input {
            Input::Paste(text) => {
                self.form.focused_mut().insert_str(&text);
                return Command::None;
            }
            Input::Key(key) => key,
        };

        match key {
            Key::Ctrl('c') => return Command::Quit,
            Key::Esc => {
                self.form = CredentialsForm::new(self.prefill.as_deref());
                self.notice = None;
                self.view = View::Menu;
            }
            Key::Enter => self.submit_credentials(),
            Key::Up | Key::BackTab => self.form.focus_prev(),
            Key::Down | Key::Tab => self.form.focus_next(),
            Key::Left => self.form.focused_mut().move_left(),
            Key::Right => self.form.focused_mut().move_right(),
            Key::Home => self.form.focused_mut().move_home(),
            Key::End => self.form.focused_mut().move_end(),
            Key::Backspace => self.form.focused_mut().backspace(),
            Key::Delete => self.form.focused_mut().delete(),
            Key::Ctrl('w') => self.form.focused_mut().delete_word(),
            Key::Ctrl('u') => self.form.focused_mut().clear(),
            Key::Char(c) => self.form.focused_mut().insert_char(c),
            Key::Ctrl(_) => {}
        }
        Command::None
    }

    fn submit_credentials(&mut self) {
        if let Some(field) = self.form.first_invalid() {
            self.form.set_focus(field);
            self.notice = Some(if self.form.field(field).value().trim().is_empty() {
                format!("{} is required", field.label())
            } else {
                format!("{} must start with http:// or https://", field.label())
            });
            return;
        }
        if self.validation.is_none() {
            self.revalidate();
        }
        self.notice = None;
        self.view = View::Confirm;
    }

    fn on_confirm(&mut self, input: Input) -> Command {
        let Input::Key(key) = input else {
            return Command::None;
        };
        match key {
            Key::Char('y') | Key::Char('Y') => {
                self.view = View::Installing;
                Command::RunBatch(BatchRequest {
                    targets: self.chosen_targets(),
                    scope: self.scope,
                    credentials: self.form.credentials(),
                })
            }
            Key::Char('n') | Key::Char('N') | Key::Esc => {
                self.view = View::Credentials;
                Command::None
            }
            _ => Command::None,
        }
    }

    fn on_finished(&mut self, input: Input) -> Command {
        match input {
            Input::Key(Key::Char('q') | Key::Esc | Key::Enter | Key::Ctrl('c')) => Command::Quit,
            _ => Command::None,
        }
    }

    fn select_all(&mut self, value: bool) {
        self.selected.iter_mut().for_each(|s| *s = value);
        self.validation = None;
    }

    fn revalidate(&mut self) {
        let targets = self.chosen_targets();
        let results = validate(&targets, self.scope, &self.env);
        for result in results.iter().filter(|r| !r.is_eligible()) {
            tracing::debug!(
                target_id = %result.target_id,
                reason = ?result.reason,
                "Target flagged"
            );
        }
        self.validation = Some(results);
    }
}

fn wrap_next(current: usize, count: usize) -> usize {
    if count == 0 { 0 } else { (current + 1) % count }
}

fn wrap_prev(current: usize, count: usize) -> usize {
    if count == 0 {
        0
    } else {
        (current + count - 1) % count
    }
}
