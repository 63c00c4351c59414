use super::theme::Palette;
use crate::app::{on_off, App, InputMode, MenuState, Screen, Speaker};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

fn palette(app: &App) -> Palette {
    Palette::for_theme(app.config, app.theme)
}

/// Render the brand header (company name, title, description)
pub fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let colors = palette(app);

    let lines = vec![
        Line::from(vec![
            Span::styled(
                app.config.company_name,
                Style::default().fg(colors.accent).add_modifier(Modifier::BOLD),
            ),
            Span::styled("  │  ", Style::default().fg(colors.muted)),
            Span::styled(app.config.page_title, Style::default().fg(colors.text)),
            Span::styled(
                format!("  ({} theme)", app.theme.label()),
                Style::default().fg(colors.muted),
            ),
        ]),
        Line::from(Span::styled(
            app.config.page_description,
            Style::default().fg(colors.muted),
        )),
    ];

    f.render_widget(Paragraph::new(lines), area);
}

/// Render the welcome screen with the start button
pub fn render_welcome(f: &mut Frame, app: &App, area: Rect) {
    let colors = palette(app);

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            app.config.page_title,
            Style::default().fg(colors.text).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(app.config.page_description, Style::default().fg(colors.muted))),
        Line::from(""),
        Line::from(Span::styled(
            format!("logo: {}", app.config.logo_for(app.theme)),
            Style::default().fg(colors.muted),
        )),
        Line::from(""),
    ];

    if app.screen == Screen::Connecting {
        lines.push(Line::from(Span::styled(
            "Connecting to your coach...",
            Style::default().fg(colors.accent),
        )));
        if !app.pre_connect_buffer.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("{} message(s) waiting", app.pre_connect_buffer.len()),
                Style::default().fg(colors.muted),
            )));
        }
    } else {
        lines.push(Line::from(Span::styled(
            format!("  {}  ", app.config.start_button_text),
            Style::default()
                .fg(Color::White)
                .bg(colors.accent)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Press Enter to start",
            Style::default().fg(colors.muted),
        )));
    }

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}

/// Render the conversation (latest at the bottom)
pub fn render_transcript(f: &mut Frame, app: &App, area: Rect) {
    let colors = palette(app);

    if app.transcript.is_empty() {
        let empty = Line::from(Span::styled(
            "Waiting for your coach...",
            Style::default().fg(colors.muted),
        ));
        f.render_widget(Paragraph::new(empty), area);
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    for utterance in &app.transcript {
        let (name, color) = match utterance.speaker {
            Speaker::Coach(persona) => (persona.name(), colors.accent),
            Speaker::Learner => ("You", colors.learner),
        };

        lines.push(Line::from(vec![
            Span::styled(
                format!("[{}] ", utterance.timestamp.format("%H:%M:%S")),
                Style::default().fg(colors.muted),
            ),
            Span::styled(name, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        ]));
        for text_line in utterance.text.lines() {
            lines.push(Line::from(Span::styled(
                format!("  {}", text_line),
                Style::default().fg(colors.text),
            )));
        }
        lines.push(Line::from(""));
    }

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });

    // Count rows after wrapping so the newest reply stays on screen
    let rows = paragraph.line_count(area.width);
    let bottom = rows.saturating_sub(area.height as usize);
    app.transcript_scroll_limit.set(bottom);
    let scroll_offset = bottom.saturating_sub(app.chat_scroll_offset.min(bottom));

    let paragraph = paragraph.scroll((scroll_offset.min(u16::MAX as usize) as u16, 0));
    f.render_widget(paragraph, area);
}

/// Render mode, persona and the media toggles the config allows
pub fn render_control_bar(f: &mut Frame, app: &App, area: Rect) {
    let colors = palette(app);
    let muted = Style::default().fg(colors.muted);

    let mode = app
        .tutor
        .current_mode()
        .map(|m| m.label())
        .unwrap_or("Choosing");

    let mut spans = vec![
        Span::styled("Mode: ", muted),
        Span::styled(mode, Style::default().fg(colors.accent)),
        Span::styled(format!(" ({})", app.tutor.speaker().name()), muted),
    ];

    if let Some(concept) = app.tutor.current_concept() {
        spans.push(Span::styled("  │  Concept: ", muted));
        spans.push(Span::styled(concept.title.as_str(), Style::default().fg(colors.text)));
    }
    if app.config.supports_video_input {
        spans.push(Span::styled(format!("  │  camera {}", on_off(app.camera_enabled)), muted));
    }
    if app.config.supports_screen_share {
        spans.push(Span::styled(
            format!("  │  screen {}", on_off(app.screen_share_enabled)),
            muted,
        ));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the input area (or a note when chat input is turned off)
pub fn render_input_area(f: &mut Frame, app: &App, area: Rect) {
    if app.show_slash_menu {
        render_slash_menu(f, app, area);
        return;
    }

    if !app.config.supports_chat_input {
        render_view_hints(f, app, "Text chat is disabled  ·  1 Learn  2 Quiz  3 Teach Back  c Concept", area);
        return;
    }

    let colors = palette(app);

    // Thin separator line
    let separator = "─".repeat(area.width as usize);
    let separator_area = Rect { height: 1, ..area };
    f.render_widget(
        Paragraph::new(separator).style(Style::default().fg(colors.muted)),
        separator_area,
    );

    let input_area = Rect {
        y: area.y + 1,
        height: area.height.saturating_sub(1),
        ..area
    };

    let (prompt_text, prompt_style) = if app.input_mode == InputMode::Editing {
        (format!("> {}_", app.message_input), Style::default().fg(colors.text))
    } else {
        ("> ".to_string(), Style::default().fg(colors.muted))
    };

    let paragraph = Paragraph::new(prompt_text)
        .style(prompt_style)
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, input_area);
}

/// Render slash command menu
fn render_slash_menu(f: &mut Frame, app: &App, area: Rect) {
    let colors = palette(app);
    let commands = app.get_filtered_slash_commands();

    let mut lines = vec![];

    for (idx, (cmd, desc)) in commands.iter().enumerate() {
        let (prefix, style) = if idx == app.slash_menu_index {
            ("→ ", Style::default().fg(colors.accent))
        } else {
            ("  ", Style::default().fg(colors.text))
        };

        lines.push(Line::from(vec![
            Span::styled(prefix, style),
            Span::styled(*cmd, style.add_modifier(Modifier::BOLD)),
            Span::styled(format!("  {}", desc), Style::default().fg(colors.muted)),
        ]));
    }

    let separator = "─".repeat(area.width as usize);
    lines.push(Line::from(Span::styled(separator, Style::default().fg(colors.muted))));

    lines.push(Line::from(vec![
        Span::styled("> ", Style::default().fg(colors.muted)),
        Span::styled(format!("{}_", app.message_input), Style::default().fg(colors.text)),
    ]));

    f.render_widget(Paragraph::new(lines), area);
}

/// Render hints bar (no borders, minimal)
pub fn render_hints(f: &mut Frame, app: &App, area: Rect) {
    let colors = palette(app);
    let key = |text: &'static str| Span::styled(text, Style::default().fg(colors.muted));

    let mut keys = match (app.menu_state, app.screen) {
        (MenuState::About, _) => vec![key("Esc"), key(" back")],
        _ if app.show_slash_menu => vec![
            key("↑↓"),
            key(" navigate  "),
            key("Enter"),
            key(" select  "),
            key("type to filter  "),
            key("Esc"),
            key(" cancel"),
        ],
        _ if app.input_mode == InputMode::Editing => {
            let newline = if app.keyboard_enhancements_supported {
                " Shift+Enter"
            } else {
                " Ctrl+J"
            };
            vec![
                key("Enter"),
                key(" send  "),
                key(newline),
                key(" newline  "),
                key("Esc"),
                key(" cancel"),
            ]
        }
        (_, Screen::Welcome) => vec![key("Enter"), key(" start  "), key("/"), key(" commands")],
        _ if !app.config.supports_chat_input => vec![
            key("c"),
            key(" concept  "),
            key("t"),
            key(" theme  "),
            key("a"),
            key(" about  "),
            key("q"),
            key(" quit"),
        ],
        _ => vec![
            key("/"),
            key(" commands  "),
            key("↑↓"),
            key(" scroll  "),
            key("Ctrl+C"),
            key(" quit"),
        ],
    };

    if app.config.supports_video_input {
        keys.push(key("  F5"));
        keys.push(key(" camera"));
    }
    if app.config.supports_screen_share {
        keys.push(key("  F6"));
        keys.push(key(" screen share"));
    }

    let hints = vec![
        Line::from(keys),
        Line::from(Span::styled(
            app.status_message.as_str(),
            Style::default().fg(colors.text),
        )),
    ];

    f.render_widget(Paragraph::new(hints), area);
}

/// Render full-screen configuration overview
pub fn render_about_view(f: &mut Frame, app: &App, area: Rect) {
    let colors = palette(app);
    let cfg = app.config;

    let label = |text: &'static str| Span::styled(text, Style::default().fg(colors.muted));
    let value = |text: String| Span::styled(text, Style::default().fg(colors.text));
    let optional = |v: Option<&str>| v.unwrap_or("not set").to_string();
    let flag = |b: bool| (if b { "yes" } else { "no" }).to_string();

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("About {}", recall_coach::config::APP_NAME),
            Style::default().fg(colors.text).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![label("Company:            "), value(cfg.company_name.to_string())]),
        Line::from(vec![label("Title:              "), value(cfg.page_title.to_string())]),
        Line::from(vec![label("Description:        "), value(cfg.page_description.to_string())]),
        Line::from(vec![label("Version:            "), value(recall_coach::config::APP_VERSION.to_string())]),
        Line::from(""),
        Line::from(vec![label("Chat input:         "), value(flag(cfg.supports_chat_input))]),
        Line::from(vec![label("Video input:        "), value(flag(cfg.supports_video_input))]),
        Line::from(vec![label("Screen share:       "), value(flag(cfg.supports_screen_share))]),
        Line::from(vec![label("Pre-connect buffer: "), value(flag(cfg.is_pre_connect_buffer_enabled))]),
        Line::from(""),
        Line::from(vec![label("Logo:               "), value(cfg.logo.to_string())]),
        Line::from(vec![label("Logo (dark):        "), value(optional(cfg.logo_dark))]),
        Line::from(vec![label("Accent:             "), value(optional(cfg.accent))]),
        Line::from(vec![label("Accent (dark):      "), value(optional(cfg.accent_dark))]),
        Line::from(vec![label("Start button:       "), value(cfg.start_button_text.to_string())]),
        Line::from(""),
        Line::from(vec![label("Sandbox:            "), value(optional(cfg.sandbox_id))]),
        Line::from(vec![label("Agent:              "), value(optional(cfg.agent_name))]),
    ];

    let paragraph = Paragraph::new(lines);
    f.render_widget(paragraph, area);
}

/// Render simple view hints
pub fn render_view_hints(f: &mut Frame, app: &App, hint: &str, area: Rect) {
    let colors = palette(app);

    let separator = "─".repeat(area.width as usize);
    let separator_area = Rect { height: 1, ..area };
    f.render_widget(
        Paragraph::new(separator).style(Style::default().fg(colors.muted)),
        separator_area,
    );

    let hint_area = Rect {
        y: area.y + 1,
        height: area.height.saturating_sub(1),
        ..area
    };

    let paragraph = Paragraph::new(Span::styled(hint.to_string(), Style::default().fg(colors.muted)));
    f.render_widget(paragraph, hint_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Utterance;
    use crate::event::AppEvent;
    use chrono::Local;
    use ratatui::{backend::TestBackend, Terminal};
    use recall_coach::config::APP_CONFIG_DEFAULTS;
    use recall_coach::tutor::ContentLibrary;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_welcome_shows_branding_and_button() {
        let app = App::new(&APP_CONFIG_DEFAULTS, ContentLibrary::bundled().unwrap());
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();

        terminal
            .draw(|f| {
                let area = f.area();
                render_header(f, &app, Rect { height: 2, ..area });
                render_welcome(f, &app, Rect { y: 2, height: 18, ..area });
            })
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Teach-the-Tutor"));
        assert!(text.contains("Start Learning Session"));
        assert!(text.contains("/lk-logo.svg"));
    }

    #[test]
    fn test_about_lists_unset_optionals() {
        let app = App::new(&APP_CONFIG_DEFAULTS, ContentLibrary::bundled().unwrap());
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();

        terminal.draw(|f| render_about_view(f, &app, f.area())).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Sandbox:            not set"));
        assert!(text.contains("Pre-connect buffer: yes"));
    }

    #[test]
    fn test_transcript_keeps_newest_reply_visible_when_wrapped() {
        let mut app = App::new(&APP_CONFIG_DEFAULTS, ContentLibrary::bundled().unwrap());
        app.start_session();
        app.handle_event(AppEvent::Tick);
        let learn_reply = app.tutor.switch_mode("learn").unwrap();
        app.transcript.push(Utterance {
            speaker: Speaker::Coach(app.tutor.speaker()),
            text: learn_reply,
            timestamp: Local::now(),
        });
        let concept_reply = app.tutor.get_concept("loops").unwrap();
        app.transcript.push(Utterance {
            speaker: Speaker::Coach(app.tutor.speaker()),
            text: concept_reply,
            timestamp: Local::now(),
        });

        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        terminal.draw(|f| render_transcript(f, &app, f.area())).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Sample Question"));
        assert!(app.transcript_scroll_limit.get() > 0);
    }

    #[test]
    fn test_transcript_shows_persona() {
        let mut app = App::new(&APP_CONFIG_DEFAULTS, ContentLibrary::bundled().unwrap());
        app.start_session();
        app.handle_event(AppEvent::Tick);

        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|f| render_transcript(f, &app, f.area())).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Matthew"));
        assert!(text.contains("Active Recall Coach"));
    }
}
