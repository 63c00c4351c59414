// UI module exports
pub mod simple;
pub mod theme;

pub use simple::{
    render_about_view,
    render_control_bar,
    render_header,
    render_hints,
    render_input_area,
    render_transcript,
    render_view_hints,
    render_welcome,
};
