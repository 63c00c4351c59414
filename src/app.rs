use crate::event::AppEvent;
use chrono::{DateTime, Local};
use std::cell::Cell;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use recall_coach::config::{AppConfig, Theme};
use recall_coach::tutor::{ContentLibrary, LearningMode, Persona, TutorSession};

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Branding and the start button
    Welcome,
    /// Session requested, coach not joined yet
    Connecting,
    /// Coach connected, transcript visible
    Session,
}

/// Command/view state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    Closed, // Normal view for the current screen
    About,  // Configuration overview
}

/// Input mode for text editing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Normal mode - navigation with keyboard
    Normal,
    /// Editing mode - typing text
    Editing,
}

/// Who said a transcript line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    Coach(Persona),
    Learner,
}

#[derive(Debug, Clone)]
pub struct Utterance {
    pub speaker: Speaker,
    pub text: String,
    pub timestamp: DateTime<Local>,
}

const SLASH_COMMANDS: &[(&str, &str)] = &[
    ("/learn", "Learn mode with Matthew"),
    ("/quiz", "Quiz mode with Alicia"),
    ("/teach", "Teach Back mode with Ken"),
    ("/concept", "Pick a concept (/concept <id>, random if empty)"),
    ("/theme", "Toggle light/dark theme"),
    ("/about", "Show app configuration"),
    ("/reset", "End session and return to start"),
    ("/quit", "Exit"),
];

/// Main application state
pub struct App {
    /// Static presentation and feature flags
    pub config: &'static AppConfig,
    /// Active color scheme
    pub theme: Theme,
    /// Mode and concept of the running session
    pub tutor: TutorSession,
    /// Conversation so far
    pub transcript: Vec<Utterance>,

    // Navigation state
    pub screen: Screen,
    pub menu_state: MenuState,
    pub input_mode: InputMode,

    // Message input
    /// Current message being typed
    pub message_input: String,
    /// Cursor position in the input (char index)
    pub input_cursor: usize,
    /// Slash command menu state
    pub show_slash_menu: bool,
    /// Selected command in slash menu
    pub slash_menu_index: usize,

    /// Learner input captured before the coach connected
    pub pre_connect_buffer: Vec<String>,

    // Media toggles (only reachable when the matching feature flag is on)
    pub camera_enabled: bool,
    pub screen_share_enabled: bool,

    /// Status message to display
    pub status_message: String,
    /// Transcript scroll offset (0 = at bottom, higher = scrolled up)
    pub chat_scroll_offset: usize,
    /// Furthest the transcript can scroll up, as of the last render
    pub transcript_scroll_limit: Cell<usize>,
    /// Should the app quit
    pub should_quit: bool,
    /// Whether keyboard enhancements are supported (for Shift+Enter)
    pub keyboard_enhancements_supported: bool,
}

impl App {
    pub fn new(config: &'static AppConfig, library: ContentLibrary) -> Self {
        Self {
            config,
            theme: Theme::default(),
            tutor: TutorSession::new(library),
            transcript: Vec::new(),

            screen: Screen::Welcome,
            menu_state: MenuState::Closed,
            input_mode: InputMode::Normal,

            message_input: String::new(),
            input_cursor: 0,
            show_slash_menu: false,
            slash_menu_index: 0,

            pre_connect_buffer: Vec::new(),

            camera_enabled: false,
            screen_share_enabled: false,

            status_message: String::new(),
            chat_scroll_offset: 0,
            transcript_scroll_limit: Cell::new(0),
            should_quit: false,
            keyboard_enhancements_supported: false, // Will be set by main.rs
        }
    }

    /// Handle incoming events
    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Paste(text) => self.handle_paste(text),
            AppEvent::Tick => self.handle_tick(),
        }
    }

    fn handle_tick(&mut self) {
        if self.screen == Screen::Connecting {
            self.connect();
        }
    }

    fn handle_paste(&mut self, text: String) {
        if !self.can_type() {
            return;
        }
        self.input_mode = InputMode::Editing;
        for c in text.chars() {
            self.handle_char_input(c);
        }
    }

    /// Handle keyboard input
    fn handle_key(&mut self, key: KeyEvent) {
        // Global shortcuts (work in any mode)
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if let KeyCode::Char('c') | KeyCode::Char('q') = key.code {
                self.should_quit = true;
                return;
            }
        }

        match key.code {
            KeyCode::F(5) => return self.toggle_camera(),
            KeyCode::F(6) => return self.toggle_screen_share(),
            _ => {}
        }

        match self.input_mode {
            InputMode::Normal => self.handle_key_normal(key),
            InputMode::Editing => self.handle_key_editing(key),
        }
    }

    /// Handle keyboard input in Normal mode (navigation)
    fn handle_key_normal(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.menu_state = MenuState::Closed;
                self.status_message.clear();
            }

            KeyCode::Enter if self.screen == Screen::Welcome && self.menu_state == MenuState::Closed => {
                self.start_session();
            }

            KeyCode::Up if self.screen == Screen::Session => {
                self.chat_scroll_offset = (self.chat_scroll_offset + 1).min(self.transcript_scroll_limit.get());
            }
            KeyCode::Down if self.screen == Screen::Session => {
                self.chat_scroll_offset = self.chat_scroll_offset.saturating_sub(1);
            }

            // Without chat input the keyboard is a control bar
            KeyCode::Char(c) if !self.config.supports_chat_input => match c {
                '1' | '2' | '3' if self.screen == Screen::Session => {
                    let mode = LearningMode::ALL[(c as u8 - b'1') as usize];
                    self.run_mode_switch(mode.as_str());
                }
                'c' if self.screen == Screen::Session => self.run_concept(""),
                't' => self.toggle_theme(),
                'a' => self.menu_state = MenuState::About,
                'q' => self.should_quit = true,
                _ => {}
            },

            KeyCode::Char('/') => {
                self.input_mode = InputMode::Editing;
                self.message_input.push('/');
                self.input_cursor = self.message_input.chars().count();
                self.show_slash_menu = true;
                self.slash_menu_index = 0;
            }

            KeyCode::Char(c) if self.can_type() => {
                self.input_mode = InputMode::Editing;
                self.handle_char_input(c);
            }

            _ => {}
        }
    }

    /// Handle keyboard input in Editing mode
    fn handle_key_editing(&mut self, key: KeyEvent) {
        if self.show_slash_menu {
            match key.code {
                KeyCode::Esc => {
                    self.input_mode = InputMode::Normal;
                    self.clear_message_input();
                    self.show_slash_menu = false;
                    self.status_message.clear();
                }
                KeyCode::Up => {
                    self.slash_menu_index = self.slash_menu_index.saturating_sub(1);
                }
                KeyCode::Down => {
                    let commands = self.get_filtered_slash_commands();
                    if self.slash_menu_index < commands.len().saturating_sub(1) {
                        self.slash_menu_index += 1;
                    }
                }
                KeyCode::Enter => {
                    // Typed arguments win over the highlighted entry
                    if !self.message_input.contains(' ') {
                        let commands = self.get_filtered_slash_commands();
                        if let Some((cmd, _)) = commands.get(self.slash_menu_index) {
                            self.message_input = cmd.to_string();
                        }
                    }
                    self.show_slash_menu = false;
                    self.handle_submit();
                }
                KeyCode::Backspace => {
                    self.handle_backspace();
                    if !self.message_input.starts_with('/') {
                        self.show_slash_menu = false;
                    }
                    self.slash_menu_index = 0;
                }
                KeyCode::Char(c) => {
                    self.handle_char_input(c);
                    self.slash_menu_index = 0;
                }
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
                self.clear_message_input();
                self.status_message.clear();
            }
            KeyCode::Char('j') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.handle_char_input('\n');
            }
            KeyCode::Enter => {
                if key.modifiers.contains(KeyModifiers::SHIFT) {
                    self.handle_char_input('\n');
                } else {
                    self.handle_submit();
                }
            }
            KeyCode::Backspace => self.handle_backspace(),
            KeyCode::Delete => self.handle_delete(),
            KeyCode::Left => {
                self.input_cursor = self.input_cursor.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.input_cursor < self.message_input.chars().count() {
                    self.input_cursor += 1;
                }
            }
            KeyCode::Home => self.input_cursor = 0,
            KeyCode::End => self.input_cursor = self.message_input.chars().count(),
            KeyCode::Char(c) => self.handle_char_input(c),
            _ => {}
        }
    }

    /// Free text is accepted while connecting or connected, and only with chat input on
    fn can_type(&self) -> bool {
        self.config.supports_chat_input
            && self.menu_state == MenuState::Closed
            && matches!(self.screen, Screen::Connecting | Screen::Session)
    }

    /// Handle submit action (Enter in editing mode)
    fn handle_submit(&mut self) {
        let input = self.message_input.trim().to_string();
        self.clear_message_input();
        self.input_mode = InputMode::Normal;

        if input.starts_with('/') {
            self.handle_slash_command(&input);
        } else {
            self.submit_message(input);
        }
    }

    /// Handle slash commands
    fn handle_slash_command(&mut self, input: &str) {
        let (command, arg) = match input.split_once(char::is_whitespace) {
            Some((command, arg)) => (command, arg.trim()),
            None => (input, ""),
        };

        match command {
            "/learn" | "/l" => self.run_mode_switch("learn"),
            "/quiz" => self.run_mode_switch("quiz"),
            "/teach" | "/t" => self.run_mode_switch("teach_back"),
            "/concept" | "/c" => self.run_concept(arg),
            "/theme" => self.toggle_theme(),
            "/about" | "/a" => self.menu_state = MenuState::About,
            "/reset" | "/r" => self.end_session(),
            "/quit" | "/q" => self.should_quit = true,
            _ => self.status_message = format!("Unknown command: {}", command),
        }
    }

    /// Record a learner message and let the coach answer
    fn submit_message(&mut self, text: String) {
        if text.is_empty() {
            self.status_message.clear();
            return;
        }

        match self.screen {
            Screen::Session => {
                self.push_learner(text.clone());
                let reply = self.tutor.respond(&text);
                self.push_coach(reply);
                self.chat_scroll_offset = 0;
                self.status_message.clear();
            }
            Screen::Connecting if self.config.is_pre_connect_buffer_enabled => {
                self.pre_connect_buffer.push(text);
                self.status_message = format!(
                    "Buffered {} message(s) until the coach connects",
                    self.pre_connect_buffer.len()
                );
            }
            Screen::Connecting => {
                self.status_message = "Still connecting, please wait".to_string();
            }
            Screen::Welcome => {
                self.status_message = format!("Press Enter to {}", self.config.start_button_text);
            }
        }
    }

    fn run_mode_switch(&mut self, mode: &str) {
        if !self.require_session() {
            return;
        }
        match self.tutor.switch_mode(mode) {
            Ok(reply) => {
                self.push_coach(reply);
                self.status_message = format!("Mode: {}", self.tutor.speaker().name());
            }
            Err(e) => self.status_message = e.to_string(),
        }
    }

    fn run_concept(&mut self, id: &str) {
        if !self.require_session() {
            return;
        }
        let result = if id.is_empty() {
            self.tutor.random_concept()
        } else {
            self.tutor.get_concept(id)
        };
        match result {
            Ok(reply) => self.push_coach(reply),
            Err(e) => self.push_coach(e.to_string()),
        }
    }

    fn require_session(&mut self) -> bool {
        if self.screen != Screen::Session {
            self.status_message = "Start a session first".to_string();
            return false;
        }
        true
    }

    /// Welcome -> Connecting
    pub fn start_session(&mut self) {
        self.tutor.reset();
        self.transcript.clear();
        self.pre_connect_buffer.clear();
        self.chat_scroll_offset = 0;
        self.transcript_scroll_limit.set(0);
        self.screen = Screen::Connecting;
        self.status_message = "Connecting...".to_string();
        tracing::info!("Starting session");
    }

    /// Connecting -> Session; the greeter speaks, then buffered input is replayed
    pub fn connect(&mut self) {
        self.screen = Screen::Session;
        self.status_message.clear();
        let greeting = self.tutor.greeting();
        self.push_coach(greeting);

        let buffered = std::mem::take(&mut self.pre_connect_buffer);
        if !buffered.is_empty() {
            tracing::info!("Replaying {} buffered message(s)", buffered.len());
        }
        for text in buffered {
            self.submit_message(text);
        }
    }

    /// Back to the welcome screen
    pub fn end_session(&mut self) {
        self.tutor.reset();
        self.transcript.clear();
        self.pre_connect_buffer.clear();
        self.chat_scroll_offset = 0;
        self.transcript_scroll_limit.set(0);
        self.camera_enabled = false;
        self.screen_share_enabled = false;
        self.screen = Screen::Welcome;
        self.menu_state = MenuState::Closed;
        self.status_message = "Session ended".to_string();
        tracing::info!("Session ended");
    }

    fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        self.status_message = format!("Theme: {}", self.theme.label());
    }

    fn toggle_camera(&mut self) {
        if !self.config.supports_video_input {
            self.status_message = "Video input is not supported".to_string();
            return;
        }
        self.camera_enabled = !self.camera_enabled;
        self.status_message = format!("Camera {}", on_off(self.camera_enabled));
    }

    fn toggle_screen_share(&mut self) {
        if !self.config.supports_screen_share {
            self.status_message = "Screen share is not supported".to_string();
            return;
        }
        self.screen_share_enabled = !self.screen_share_enabled;
        self.status_message = format!("Screen share {}", on_off(self.screen_share_enabled));
    }

    fn push_coach(&mut self, text: String) {
        let persona = self.tutor.speaker();
        tracing::debug!("{} speaking: {}", persona.name(), text.chars().take(100).collect::<String>());
        self.transcript.push(Utterance {
            speaker: Speaker::Coach(persona),
            text,
            timestamp: Local::now(),
        });
    }

    fn push_learner(&mut self, text: String) {
        tracing::debug!("Learner said: {}", text);
        self.transcript.push(Utterance {
            speaker: Speaker::Learner,
            text,
            timestamp: Local::now(),
        });
    }

    fn handle_backspace(&mut self) {
        if self.input_cursor == 0 {
            return;
        }
        let byte_idx = char_to_byte_index(&self.message_input, self.input_cursor - 1);
        self.message_input.remove(byte_idx);
        self.input_cursor -= 1;
    }

    fn handle_delete(&mut self) {
        if self.input_cursor < self.message_input.chars().count() {
            let byte_idx = char_to_byte_index(&self.message_input, self.input_cursor);
            self.message_input.remove(byte_idx);
        }
    }

    fn handle_char_input(&mut self, c: char) {
        let byte_idx = char_to_byte_index(&self.message_input, self.input_cursor);
        self.message_input.insert(byte_idx, c);
        self.input_cursor += 1;
    }

    fn clear_message_input(&mut self) {
        self.message_input.clear();
        self.input_cursor = 0;
    }

    /// Slash commands matching what has been typed so far
    pub fn get_filtered_slash_commands(&self) -> Vec<(&'static str, &'static str)> {
        let typed = self.message_input.split_whitespace().next().unwrap_or("");
        SLASH_COMMANDS
            .iter()
            .copied()
            .filter(|(cmd, _)| cmd.starts_with(typed))
            .collect()
    }
}

pub fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}

/// Byte offset of the char at `char_idx` (or the end of the string)
pub fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(idx, _)| idx)
        .unwrap_or(s.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use recall_coach::config::APP_CONFIG_DEFAULTS;

    fn app() -> App {
        App::new(&APP_CONFIG_DEFAULTS, ContentLibrary::bundled().unwrap())
    }

    fn app_with(config: AppConfig) -> App {
        App::new(Box::leak(Box::new(config)), ContentLibrary::bundled().unwrap())
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_event(AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE)));
    }

    fn type_line(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
        press(app, KeyCode::Enter);
    }

    fn connected() -> App {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        app.handle_event(AppEvent::Tick);
        app
    }

    #[test]
    fn test_start_button_connects_on_tick() {
        let mut app = app();
        assert_eq!(app.screen, Screen::Welcome);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen, Screen::Connecting);

        app.handle_event(AppEvent::Tick);
        assert_eq!(app.screen, Screen::Session);
        assert_eq!(app.transcript.len(), 1);
        assert_eq!(app.transcript[0].speaker, Speaker::Coach(Persona::Matthew));
    }

    #[test]
    fn test_typing_on_welcome_is_ignored() {
        let mut app = app();
        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(app.message_input.is_empty());
    }

    #[test]
    fn test_chat_message_gets_reply() {
        let mut app = connected();
        type_line(&mut app, "quiz");

        assert_eq!(app.transcript.len(), 3);
        assert_eq!(app.transcript[1].speaker, Speaker::Learner);
        assert_eq!(app.transcript[1].text, "quiz");
        assert_eq!(app.transcript[2].speaker, Speaker::Coach(Persona::Alicia));
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_pre_connect_buffer_replays_after_connect() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        type_line(&mut app, "learn");

        assert_eq!(app.pre_connect_buffer, vec!["learn".to_string()]);
        assert_eq!(app.transcript.len(), 0);

        app.handle_event(AppEvent::Tick);
        assert!(app.pre_connect_buffer.is_empty());
        // greeting, learner "learn", Matthew's Learn reply
        assert_eq!(app.transcript.len(), 3);
        assert_eq!(app.tutor.current_mode(), Some(LearningMode::Learn));
    }

    #[test]
    fn test_input_rejected_while_connecting_without_buffer() {
        let mut app = app_with(AppConfig {
            is_pre_connect_buffer_enabled: false,
            ..APP_CONFIG_DEFAULTS
        });
        press(&mut app, KeyCode::Enter);
        type_line(&mut app, "learn");

        assert!(app.pre_connect_buffer.is_empty());
        assert_eq!(app.status_message, "Still connecting, please wait");

        app.handle_event(AppEvent::Tick);
        assert_eq!(app.transcript.len(), 1);
    }

    #[test]
    fn test_slash_commands() {
        let mut app = connected();

        type_line(&mut app, "/teach");
        assert_eq!(app.tutor.current_mode(), Some(LearningMode::TeachBack));

        type_line(&mut app, "/concept loops");
        assert_eq!(app.tutor.current_concept().unwrap().id, "loops");
        assert!(app.transcript.last().unwrap().text.starts_with("Concept: Loops"));

        type_line(&mut app, "/concept pointers");
        assert!(app
            .transcript
            .last()
            .unwrap()
            .text
            .starts_with("I don't have information about 'pointers'"));

        type_line(&mut app, "/theme");
        assert_eq!(app.theme, Theme::Dark);

        type_line(&mut app, "/bogus");
        assert_eq!(app.status_message, "Unknown command: /bogus");

        type_line(&mut app, "/quit");
        assert!(app.should_quit);
    }

    #[test]
    fn test_slash_menu_selects_highlighted_command() {
        let mut app = connected();
        press(&mut app, KeyCode::Char('/'));
        assert!(app.show_slash_menu);
        press(&mut app, KeyCode::Char('q'));
        assert_eq!(app.get_filtered_slash_commands(), vec![("/quiz", "Quiz mode with Alicia"), ("/quit", "Exit")]);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.tutor.current_mode(), Some(LearningMode::Quiz));
        assert!(!app.should_quit);
    }

    #[test]
    fn test_mode_commands_need_a_session() {
        let mut app = app();
        app.handle_slash_command("/learn");
        assert_eq!(app.status_message, "Start a session first");
        assert_eq!(app.tutor.current_mode(), None);
    }

    #[test]
    fn test_reset_returns_to_welcome() {
        let mut app = connected();
        type_line(&mut app, "/quiz");
        type_line(&mut app, "/reset");

        assert_eq!(app.screen, Screen::Welcome);
        assert!(app.transcript.is_empty());
        assert_eq!(app.tutor.current_mode(), None);
    }

    #[test]
    fn test_chat_disabled_uses_control_keys() {
        let mut app = app_with(AppConfig {
            supports_chat_input: false,
            ..APP_CONFIG_DEFAULTS
        });
        press(&mut app, KeyCode::Enter);
        app.handle_event(AppEvent::Tick);

        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(app.message_input.is_empty());
        assert_eq!(app.tutor.current_mode(), Some(LearningMode::Quiz));

        press(&mut app, KeyCode::Char('c'));
        assert!(app.tutor.current_concept().is_some());
        assert!(app.transcript.last().unwrap().text.starts_with("Concept: "));

        app.handle_event(AppEvent::Paste("hello".to_string()));
        assert!(app.message_input.is_empty());

        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_media_toggles_follow_feature_flags() {
        let mut app = connected();
        press(&mut app, KeyCode::F(5));
        assert!(!app.camera_enabled);
        assert_eq!(app.status_message, "Video input is not supported");

        let mut app = app_with(AppConfig {
            supports_video_input: true,
            supports_screen_share: true,
            ..APP_CONFIG_DEFAULTS
        });
        press(&mut app, KeyCode::F(5));
        press(&mut app, KeyCode::F(6));
        assert!(app.camera_enabled);
        assert!(app.screen_share_enabled);
    }

    #[test]
    fn test_cursor_editing_multibyte() {
        let mut app = connected();
        for c in "héllo".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Home);
        press(&mut app, KeyCode::Delete);
        assert_eq!(app.message_input, "élo");
    }

    #[test]
    fn test_scroll_up_stops_at_top() {
        let mut app = connected();
        app.transcript_scroll_limit.set(2);

        for _ in 0..5 {
            press(&mut app, KeyCode::Up);
        }
        assert_eq!(app.chat_scroll_offset, 2);

        press(&mut app, KeyCode::Down);
        assert_eq!(app.chat_scroll_offset, 1);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut app = app();
        app.handle_event(AppEvent::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(app.should_quit);
    }

    #[test]
    fn test_char_to_byte_index() {
        assert_eq!(char_to_byte_index("héllo", 2), 3);
        assert_eq!(char_to_byte_index("abc", 10), 3);
    }
}
