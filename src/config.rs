/// Centralized configuration constants
/// Single source of truth for branding, feature flags and theme defaults

/// App name
pub const APP_NAME: &str = "Active Recall Coach";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// UI and feature-flag options read by the front end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppConfig {
    /// Terminal/tab title
    pub page_title: &'static str,
    /// Short description shown under the title
    pub page_description: &'static str,
    /// Brand name shown in the header
    pub company_name: &'static str,

    pub supports_chat_input: bool,
    pub supports_video_input: bool,
    pub supports_screen_share: bool,
    /// Capture learner input while the session is still connecting
    pub is_pre_connect_buffer_enabled: bool,

    /// Light-theme logo asset
    pub logo: &'static str,
    /// Label of the call-to-action on the welcome screen
    pub start_button_text: &'static str,
    /// Light-theme accent color (`#rrggbb`)
    pub accent: Option<&'static str>,
    /// Dark-theme logo asset
    pub logo_dark: Option<&'static str>,
    /// Dark-theme accent color (`#rrggbb`)
    pub accent_dark: Option<&'static str>,

    // Hosted sandbox integration
    pub sandbox_id: Option<&'static str>,
    pub agent_name: Option<&'static str>,
}

pub const APP_CONFIG_DEFAULTS: AppConfig = AppConfig {
    company_name: "Teach-the-Tutor",
    page_title: "Active Recall Coach",
    page_description: "Learn, Quiz, and Teach Back with your AI Tutor",

    supports_chat_input: true,
    supports_video_input: false,
    supports_screen_share: false,
    is_pre_connect_buffer_enabled: true,

    logo: "/lk-logo.svg",
    accent: Some("#6366f1"), // Indigo-500
    logo_dark: Some("/lk-logo-dark.svg"),
    accent_dark: Some("#818cf8"), // Indigo-400
    start_button_text: "Start Learning Session",

    sandbox_id: None,
    agent_name: None,
};

// Required text must be present at build time
const _: () = {
    assert!(!APP_CONFIG_DEFAULTS.page_title.is_empty());
    assert!(!APP_CONFIG_DEFAULTS.page_description.is_empty());
    assert!(!APP_CONFIG_DEFAULTS.company_name.is_empty());
    assert!(!APP_CONFIG_DEFAULTS.logo.is_empty());
    assert!(!APP_CONFIG_DEFAULTS.start_button_text.is_empty());
};

/// Color scheme the UI is rendered in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl AppConfig {
    /// Logo for a theme; dark falls back to the light logo when unset
    pub fn logo_for(&self, theme: Theme) -> &'static str {
        match theme {
            Theme::Light => self.logo,
            Theme::Dark => self.logo_dark.unwrap_or(self.logo),
        }
    }

    /// Accent color for a theme; dark falls back to the light accent when unset
    pub fn accent_for(&self, theme: Theme) -> Option<&'static str> {
        match theme {
            Theme::Light => self.accent,
            Theme::Dark => self.accent_dark.or(self.accent),
        }
    }

    /// Whether a hosted sandbox is wired up
    pub fn sandbox_configured(&self) -> bool {
        self.sandbox_id.is_some()
    }
}
