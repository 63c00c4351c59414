// Active Recall Coach - terminal front end for the Teach-the-Tutor coach
mod app;
mod event;
mod ui;

use app::{App, MenuState, Screen};
use crossterm::{
    event::{
        DisableBracketedPaste, EnableBracketedPaste, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use event::EventHandler;
use ratatui::{backend::CrosstermBackend, Terminal};
use recall_coach::config::{APP_CONFIG_DEFAULTS, APP_NAME, APP_VERSION};
use recall_coach::{logger, storage};
use std::io;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let app_dir = storage::init_storage()?;

    // Initialize logger (no console output)
    let log_file = logger::init_logger(&app_dir)?;
    tracing::info!("{} {} starting, logging to {}", APP_NAME, APP_VERSION, log_file.display());

    let config = &APP_CONFIG_DEFAULTS;
    tracing::info!(
        chat = config.supports_chat_input,
        video = config.supports_video_input,
        screen_share = config.supports_screen_share,
        pre_connect_buffer = config.is_pre_connect_buffer_enabled,
        sandbox = config.sandbox_configured(),
        "Feature flags"
    );

    let library = match storage::load_tutor_content() {
        Ok(library) => library,
        Err(e) => {
            eprintln!("Failed to load tutor content: {}", e);
            std::process::exit(1);
        }
    };

    let mut app = App::new(config, library);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();

    execute!(
        stdout,
        EnterAlternateScreen,
        EnableBracketedPaste,
        SetTitle(config.page_title)
    )?;

    // Try keyboard enhancements (modern terminals only)
    let keyboard_enhancements_supported = execute!(
        stdout,
        PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
    )
    .is_ok();

    if !keyboard_enhancements_supported {
        tracing::info!("Keyboard enhancements not supported, using fallback keys (Ctrl+J for newline)");
    }

    app.keyboard_enhancements_supported = keyboard_enhancements_supported;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut event_handler = EventHandler::new();
    event_handler.spawn_keyboard_listener();
    event_handler.spawn_tick_timer(Duration::from_millis(250));

    // Main event loop
    let result = run_app(&mut terminal, &mut app, &mut event_handler).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste,
        PopKeyboardEnhancementFlags
    )?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        tracing::error!("Error: {:?}", err);
    }

    tracing::info!("Exiting");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    event_handler: &mut EventHandler,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| render_ui(f, app))?;

        if let Some(event) = event_handler.next().await {
            app.handle_event(event);
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn render_ui(f: &mut ratatui::Frame, app: &App) {
    use ratatui::layout::{Constraint, Direction, Layout};

    let terminal_width = f.area().width as usize;
    let input_height = if app.show_slash_menu {
        (app.get_filtered_slash_commands().len() + 2) as u16
    } else {
        let content_width = terminal_width.saturating_sub(2).max(1);
        let text_lines: u16 = app
            .message_input
            .split('\n')
            .map(|seg| seg.chars().count().div_ceil(content_width).max(1) as u16)
            .sum();
        let max_input = f.area().height / 3;
        (text_lines + 2).min(max_input)
    };
    let control_height = if app.screen == Screen::Session { 1 } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),             // Header + spacer
            Constraint::Min(0),                // Main content
            Constraint::Length(control_height), // Mode/media bar
            Constraint::Length(input_height),  // Input area
            Constraint::Length(2),             // Hints
        ])
        .split(f.area());

    ui::render_header(f, app, chunks[0]);

    match (app.menu_state, app.screen) {
        (MenuState::About, _) => {
            ui::render_about_view(f, app, chunks[1]);
            ui::render_view_hints(f, app, "Esc to return", chunks[3]);
        }
        (MenuState::Closed, Screen::Welcome | Screen::Connecting) => {
            ui::render_welcome(f, app, chunks[1]);
            if app.screen == Screen::Connecting || app.show_slash_menu {
                ui::render_input_area(f, app, chunks[3]);
            }
        }
        (MenuState::Closed, Screen::Session) => {
            ui::render_transcript(f, app, chunks[1]);
            ui::render_control_bar(f, app, chunks[2]);
            ui::render_input_area(f, app, chunks[3]);
        }
    }

    ui::render_hints(f, app, chunks[4]);
}
