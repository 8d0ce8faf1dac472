pub mod ui;
mod widgets;

use crate::api::{QueueBackend, User};
use crate::config::WizardConfig;
use crate::events::EventSink;
use crate::ui::Theme;
use crate::vim::{Command, InputBuffer, ModeAction, VimMode, parse_command};
use crate::wizard::{AddQueueWizard, WizardError, WizardStep};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Actions that need the backend and therefore bubble up to the run loop.
#[derive(Debug)]
pub enum AppAction {
    AddHost(String),
    Submit,
}

/// Which panel is focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelFocus {
    /// Tab list on the left
    Sidebar,
    /// The active tab's pane
    Content,
}

/// Focusable spots on the General tab
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneralField {
    Name,
    Description,
    Categories,
}

/// Focusable spots on the Manage Hosts tab
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostsField {
    Uniqname,
    Roster,
}

/// Message displayed to the user
pub struct Message {
    pub text: String,
    pub is_error: bool,
}

/// TUI state for the add-queue wizard: the engine plus everything the
/// terminal needs (focus, vim mode, input buffers, dialogs).
pub struct App {
    pub config: WizardConfig,
    pub theme: Theme,
    pub wizard: AddQueueWizard,
    pub current_user: User,

    // Vim mode state
    pub vim_mode: VimMode,
    pub command_buffer: InputBuffer,

    // Panel navigation
    pub panel_focus: PanelFocus,
    pub sidebar_cursor: usize,
    pub general_focus: GeneralField,
    pub hosts_focus: HostsField,

    // Form state
    pub name_input: InputBuffer,
    pub description_input: InputBuffer,
    pub uniqname_input: InputBuffer,
    pub category_cursor: usize,
    pub roster_cursor: usize,

    // UI state
    pub message: Option<Message>,
    pub confirm_cancel: bool,
    pub show_help: bool,
    pub should_exit: bool,
    pub demo_mode: bool,
    spinner_frame: usize,
}

impl App {
    pub fn new(config: WizardConfig, current_user: User, demo_mode: bool) -> Self {
        let wizard = AddQueueWizard::new(current_user.clone());
        Self {
            config,
            theme: Theme::default(),
            wizard,
            current_user,
            vim_mode: VimMode::Normal,
            command_buffer: InputBuffer::new(),
            panel_focus: PanelFocus::Content,
            sidebar_cursor: 0,
            general_focus: GeneralField::Name,
            hosts_focus: HostsField::Uniqname,
            name_input: InputBuffer::new(),
            description_input: InputBuffer::new(),
            uniqname_input: InputBuffer::new(),
            category_cursor: 0,
            roster_cursor: 0,
            message: None,
            confirm_cancel: false,
            show_help: false,
            should_exit: false,
            demo_mode,
            spinner_frame: 0,
        }
    }

    pub fn set_error(&mut self, text: String) {
        self.message = Some(Message {
            text,
            is_error: true,
        });
    }

    pub fn set_info(&mut self, text: String) {
        self.message = Some(Message {
            text,
            is_error: false,
        });
    }

    pub fn tick(&mut self) {
        self.spinner_frame = (self.spinner_frame + 1) % 4;
    }

    pub fn spinner_char(&self) -> char {
        const SPINNER: [char; 4] = ['|', '/', '-', '\\'];
        SPINNER[self.spinner_frame]
    }

    pub fn available_categories(&self) -> &[String] {
        &self.config.categories.available
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<AppAction> {
        // Clear transient message on any key (unless an action is running)
        if self.message.is_some() && !self.wizard.is_changing() {
            self.message = None;
        }

        if self.confirm_cancel {
            return self.handle_confirm_key(key);
        }

        if self.show_help {
            if key.code == KeyCode::Esc || key.code == KeyCode::Char('q') {
                self.show_help = false;
            }
            return None;
        }

        // Forbidden failures surface as a login prompt overlay; it swallows
        // input until dismissed
        if self.wizard.login_required() {
            if key.code == KeyCode::Esc || key.code == KeyCode::Enter {
                self.wizard.dismiss_errors();
            }
            return None;
        }

        // Coarse gate: no mutating input while either remote action runs
        if self.wizard.is_changing() {
            return None;
        }

        match self.vim_mode {
            VimMode::Normal => self.handle_normal_mode(key),
            VimMode::Insert => self.handle_insert_mode(key),
            VimMode::Command => self.handle_command_mode(key),
        }
    }

    fn handle_normal_mode(&mut self, key: KeyEvent) -> Option<AppAction> {
        // Ctrl+h/l for panel navigation
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('h') => {
                    self.panel_focus = PanelFocus::Sidebar;
                    return None;
                }
                KeyCode::Char('l') => {
                    self.panel_focus = PanelFocus::Content;
                    return None;
                }
                _ => {}
            }
        }

        match key.code {
            KeyCode::Char(':') => {
                self.vim_mode = self.vim_mode.transition(ModeAction::EnterCommand);
                self.command_buffer.clear();
            }

            // Navigation
            KeyCode::Char('j') | KeyCode::Down | KeyCode::Tab => {
                self.navigate_down();
            }
            KeyCode::Char('k') | KeyCode::Up | KeyCode::BackTab => {
                self.navigate_up();
            }

            // Enter insert mode on a text field
            KeyCode::Char('i') | KeyCode::Char('a') => {
                if self.current_input().is_some() {
                    self.vim_mode = self.vim_mode.transition(ModeAction::EnterInsert);
                }
            }

            KeyCode::Enter => {
                return self.handle_enter();
            }
            KeyCode::Char('l') | KeyCode::Right => {
                if self.panel_focus == PanelFocus::Sidebar {
                    return self.handle_enter();
                }
            }
            KeyCode::Char('h') | KeyCode::Left => {
                if self.panel_focus == PanelFocus::Content {
                    self.panel_focus = PanelFocus::Sidebar;
                }
            }
            KeyCode::Esc => {
                if self.panel_focus == PanelFocus::Content {
                    self.panel_focus = PanelFocus::Sidebar;
                } else {
                    // Dismiss action error banners
                    self.wizard.dismiss_errors();
                }
            }

            // Toggle the selected category
            KeyCode::Char(' ') => {
                if self.on_categories() {
                    self.toggle_selected_category();
                }
            }

            // Remove the selected host
            KeyCode::Char('x') | KeyCode::Char('d') => {
                if self.on_roster() {
                    self.remove_selected_host();
                }
            }

            // Quick tab select
            KeyCode::Char('1') => {
                self.select_tab(WizardStep::General);
            }
            KeyCode::Char('2') => {
                self.select_tab(WizardStep::Hosts);
            }

            KeyCode::Char('?') | KeyCode::F(1) => {
                self.show_help = true;
            }

            _ => {}
        }
        None
    }

    fn handle_insert_mode(&mut self, key: KeyEvent) -> Option<AppAction> {
        match key.code {
            KeyCode::Esc => {
                self.vim_mode = self.vim_mode.transition(ModeAction::Escape);
            }
            KeyCode::Enter => {
                return self.handle_insert_enter();
            }
            KeyCode::Tab => {
                if self.wizard.step() == WizardStep::General {
                    self.navigate_down();
                    if self.current_input().is_none() {
                        self.vim_mode = VimMode::Normal;
                    }
                }
            }
            KeyCode::BackTab => {
                if self.wizard.step() == WizardStep::General {
                    self.navigate_up();
                }
            }
            KeyCode::Backspace => {
                if let Some(buffer) = self.current_input_mut() {
                    buffer.delete_back();
                    self.sync_focused_field();
                }
            }
            KeyCode::Delete => {
                if let Some(buffer) = self.current_input_mut() {
                    buffer.delete_forward();
                    self.sync_focused_field();
                }
            }
            KeyCode::Left => {
                if let Some(buffer) = self.current_input_mut() {
                    buffer.move_left();
                }
            }
            KeyCode::Right => {
                if let Some(buffer) = self.current_input_mut() {
                    buffer.move_right();
                }
            }
            KeyCode::Home => {
                if let Some(buffer) = self.current_input_mut() {
                    buffer.move_start();
                }
            }
            KeyCode::End => {
                if let Some(buffer) = self.current_input_mut() {
                    buffer.move_end();
                }
            }
            KeyCode::Char(c) => {
                if key.modifiers.contains(KeyModifiers::CONTROL) {
                    match c {
                        'u' => {
                            if let Some(buffer) = self.current_input_mut() {
                                buffer.clear();
                                self.sync_focused_field();
                            }
                        }
                        'a' => {
                            if let Some(buffer) = self.current_input_mut() {
                                buffer.move_start();
                            }
                        }
                        'e' => {
                            if let Some(buffer) = self.current_input_mut() {
                                buffer.move_end();
                            }
                        }
                        _ => {}
                    }
                } else if let Some(buffer) = self.current_input_mut() {
                    buffer.insert(c);
                    self.sync_focused_field();
                }
            }
            _ => {}
        }
        None
    }

    fn handle_command_mode(&mut self, key: KeyEvent) -> Option<AppAction> {
        match key.code {
            KeyCode::Esc => {
                self.vim_mode = self.vim_mode.transition(ModeAction::Escape);
                self.command_buffer.clear();
            }
            KeyCode::Enter => {
                let cmd = self.command_buffer.content().to_string();
                self.vim_mode = self.vim_mode.transition(ModeAction::Execute);
                self.command_buffer.clear();
                return self.execute_command(&cmd);
            }
            KeyCode::Backspace => {
                if self.command_buffer.is_empty() {
                    self.vim_mode = self.vim_mode.transition(ModeAction::Escape);
                } else {
                    self.command_buffer.delete_back();
                }
            }
            KeyCode::Char(c) => {
                self.command_buffer.insert(c);
            }
            _ => {}
        }
        None
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) -> Option<AppAction> {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                self.confirm_cancel = false;
                self.should_exit = true;
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.confirm_cancel = false;
            }
            _ => {}
        }
        None
    }

    fn handle_enter(&mut self) -> Option<AppAction> {
        match self.panel_focus {
            PanelFocus::Sidebar => {
                let step = if self.sidebar_cursor == 0 {
                    WizardStep::General
                } else {
                    WizardStep::Hosts
                };
                if self.select_tab(step) {
                    self.panel_focus = PanelFocus::Content;
                }
            }
            PanelFocus::Content => match self.wizard.step() {
                WizardStep::General => match self.general_focus {
                    GeneralField::Name | GeneralField::Description => {
                        self.vim_mode = self.vim_mode.transition(ModeAction::EnterInsert);
                    }
                    GeneralField::Categories => {
                        self.toggle_selected_category();
                    }
                },
                WizardStep::Hosts => match self.hosts_focus {
                    HostsField::Uniqname => {
                        if self.uniqname_input.is_empty() {
                            self.vim_mode = self.vim_mode.transition(ModeAction::EnterInsert);
                        } else {
                            return Some(AppAction::AddHost(
                                self.uniqname_input.content().to_string(),
                            ));
                        }
                    }
                    HostsField::Roster => {}
                },
            },
        }
        None
    }

    fn handle_insert_enter(&mut self) -> Option<AppAction> {
        match self.wizard.step() {
            WizardStep::General => match self.general_focus {
                GeneralField::Name => {
                    self.general_focus = GeneralField::Description;
                }
                GeneralField::Description => {
                    self.general_focus = GeneralField::Categories;
                    self.category_cursor = 0;
                    self.vim_mode = VimMode::Normal;
                }
                GeneralField::Categories => {
                    self.vim_mode = VimMode::Normal;
                }
            },
            WizardStep::Hosts => {
                if self.hosts_focus == HostsField::Uniqname && !self.uniqname_input.is_empty() {
                    self.vim_mode = VimMode::Normal;
                    return Some(AppAction::AddHost(
                        self.uniqname_input.content().to_string(),
                    ));
                }
            }
        }
        None
    }

    fn execute_command(&mut self, cmd: &str) -> Option<AppAction> {
        match parse_command(cmd) {
            Ok(Command::Next) => {
                self.attempt_advance();
            }
            Ok(Command::Back) => {
                self.select_tab(WizardStep::General);
            }
            Ok(Command::Finish) => {
                if self.wizard.step() == WizardStep::Hosts {
                    return Some(AppAction::Submit);
                }
                self.set_error("Finish is available from the Manage Hosts tab".to_string());
            }
            Ok(Command::Tab(arg)) => match arg.as_deref() {
                Some("general") | Some("g") => {
                    self.select_tab(WizardStep::General);
                }
                Some("hosts") | Some("h") => {
                    self.select_tab(WizardStep::Hosts);
                }
                _ => self.set_error("Usage: :tab general|hosts".to_string()),
            },
            Ok(Command::Host(arg)) => match arg {
                Some(uniqname) if self.wizard.step() == WizardStep::Hosts => {
                    return Some(AppAction::AddHost(uniqname));
                }
                Some(_) => {
                    self.set_error("Hosts are managed on the Manage Hosts tab".to_string());
                }
                None => self.set_error("Usage: :host <uniqname>".to_string()),
            },
            Ok(Command::Cancel) | Ok(Command::Quit) => {
                self.confirm_cancel = true;
            }
            Ok(Command::Help) => {
                self.show_help = true;
            }
            Err(e) => {
                self.set_error(e.to_string());
            }
        }
        None
    }

    /// Next-button semantics: run the step gate and land on the host pane
    /// when it passes.
    fn attempt_advance(&mut self) -> bool {
        let advanced = self.wizard.advance_to_hosts();
        if advanced {
            self.hosts_focus = HostsField::Uniqname;
            self.panel_focus = PanelFocus::Content;
        }
        self.sidebar_cursor = self.step_index(self.wizard.step());
        advanced
    }

    /// Direct tab selection runs through the same gate as Next.
    fn select_tab(&mut self, step: WizardStep) -> bool {
        let selected = match step {
            WizardStep::General => {
                self.wizard.return_to_general();
                self.general_focus = GeneralField::Name;
                true
            }
            WizardStep::Hosts => self.attempt_advance(),
        };
        self.sidebar_cursor = self.step_index(self.wizard.step());
        selected
    }

    fn step_index(&self, step: WizardStep) -> usize {
        match step {
            WizardStep::General => 0,
            WizardStep::Hosts => 1,
        }
    }

    fn navigate_down(&mut self) {
        match self.panel_focus {
            PanelFocus::Sidebar => {
                if self.sidebar_cursor == 0 {
                    self.sidebar_cursor = 1;
                }
            }
            PanelFocus::Content => match self.wizard.step() {
                WizardStep::General => match self.general_focus {
                    GeneralField::Name => self.general_focus = GeneralField::Description,
                    GeneralField::Description => {
                        self.general_focus = GeneralField::Categories;
                        self.category_cursor = 0;
                    }
                    GeneralField::Categories => {
                        let last = self.available_categories().len().saturating_sub(1);
                        if self.category_cursor < last {
                            self.category_cursor += 1;
                        }
                    }
                },
                WizardStep::Hosts => match self.hosts_focus {
                    HostsField::Uniqname => {
                        self.hosts_focus = HostsField::Roster;
                        self.roster_cursor = 0;
                    }
                    HostsField::Roster => {
                        let last = self.wizard.hosts().len().saturating_sub(1);
                        if self.roster_cursor < last {
                            self.roster_cursor += 1;
                        }
                    }
                },
            },
        }
    }

    fn navigate_up(&mut self) {
        match self.panel_focus {
            PanelFocus::Sidebar => {
                self.sidebar_cursor = 0;
            }
            PanelFocus::Content => match self.wizard.step() {
                WizardStep::General => match self.general_focus {
                    GeneralField::Name => {}
                    GeneralField::Description => self.general_focus = GeneralField::Name,
                    GeneralField::Categories => {
                        if self.category_cursor > 0 {
                            self.category_cursor -= 1;
                        } else {
                            self.general_focus = GeneralField::Description;
                        }
                    }
                },
                WizardStep::Hosts => match self.hosts_focus {
                    HostsField::Uniqname => {}
                    HostsField::Roster => {
                        if self.roster_cursor > 0 {
                            self.roster_cursor -= 1;
                        } else {
                            self.hosts_focus = HostsField::Uniqname;
                        }
                    }
                },
            },
        }
    }

    fn on_categories(&self) -> bool {
        self.panel_focus == PanelFocus::Content
            && self.wizard.step() == WizardStep::General
            && self.general_focus == GeneralField::Categories
    }

    fn on_roster(&self) -> bool {
        self.panel_focus == PanelFocus::Content
            && self.wizard.step() == WizardStep::Hosts
            && self.hosts_focus == HostsField::Roster
    }

    fn toggle_selected_category(&mut self) {
        let category = self
            .available_categories()
            .get(self.category_cursor)
            .cloned();
        if let Some(category) = category {
            self.wizard.toggle_category(&category);
        }
    }

    fn remove_selected_host(&mut self) {
        let target = self
            .wizard
            .hosts()
            .get(self.roster_cursor)
            .map(|host| (host.id, host.uniqname.clone()));
        if let Some((id, uniqname)) = target {
            match self.wizard.remove_host(id) {
                Some(_) => {
                    self.set_info(format!("Removed host {uniqname}"));
                    if self.roster_cursor > 0 {
                        self.roster_cursor -= 1;
                    }
                }
                None => {
                    self.set_error("A queue must keep at least one host".to_string());
                }
            }
        }
    }

    fn current_input(&self) -> Option<&InputBuffer> {
        if self.panel_focus != PanelFocus::Content {
            return None;
        }
        match self.wizard.step() {
            WizardStep::General => match self.general_focus {
                GeneralField::Name => Some(&self.name_input),
                GeneralField::Description => Some(&self.description_input),
                GeneralField::Categories => None,
            },
            WizardStep::Hosts => match self.hosts_focus {
                HostsField::Uniqname => Some(&self.uniqname_input),
                HostsField::Roster => None,
            },
        }
    }

    fn current_input_mut(&mut self) -> Option<&mut InputBuffer> {
        if self.panel_focus != PanelFocus::Content {
            return None;
        }
        match self.wizard.step() {
            WizardStep::General => match self.general_focus {
                GeneralField::Name => Some(&mut self.name_input),
                GeneralField::Description => Some(&mut self.description_input),
                GeneralField::Categories => None,
            },
            WizardStep::Hosts => match self.hosts_focus {
                HostsField::Uniqname => Some(&mut self.uniqname_input),
                HostsField::Roster => None,
            },
        }
    }

    /// Mirror the focused buffer into the wizard so every edit re-validates.
    fn sync_focused_field(&mut self) {
        if self.wizard.step() != WizardStep::General {
            return;
        }
        match self.general_focus {
            GeneralField::Name => {
                self.wizard.set_name(self.name_input.content());
            }
            GeneralField::Description => {
                self.wizard.set_description(self.description_input.content());
            }
            GeneralField::Categories => {}
        }
    }

    /// Resolve a uniqname and append the host; called from the run loop.
    pub async fn add_host<B: QueueBackend>(&mut self, backend: &B, uniqname: &str) {
        let uniqname = uniqname.trim().to_string();
        if uniqname.is_empty() {
            self.set_error("Enter a uniqname to add".to_string());
            return;
        }
        if self.wizard.add_host(backend, &uniqname).await {
            self.uniqname_input.clear();
            self.set_info(format!("Added host {uniqname}"));
        }
    }

    /// Submit the draft; called from the run loop. A `WizardError` here is a
    /// programming error and takes the whole app down.
    pub async fn submit<B: QueueBackend, E: EventSink>(
        &mut self,
        backend: &B,
        events: &E,
    ) -> Result<(), WizardError> {
        if self.wizard.submit(backend, events).await? {
            self.should_exit = true;
        }
        Ok(())
    }
}
