mod dialogs;
mod general;
mod header;
mod hosts;
mod message_panel;
mod sidebar;
mod status_bar;

pub use dialogs::{draw_confirm_cancel, draw_help, draw_login_prompt};
pub use general::draw_general_tab;
pub use header::draw_header;
pub use hosts::draw_hosts_tab;
pub use message_panel::draw_message_panel;
pub use sidebar::draw_sidebar;
pub use status_bar::draw_status_bar;

use crate::ui::Theme;
use crate::vim::InputBuffer;
use ratatui::prelude::*;

/// Render a single-line input with the vim-style cursor: a thin bar in
/// insert mode, a block over the character in normal mode.
pub(crate) fn render_input_field<'a>(
    buffer: &'a InputBuffer,
    focused: bool,
    insert_mode: bool,
    theme: &Theme,
) -> Line<'a> {
    let prefix = if focused { "> " } else { "  " };
    let content = buffer.content();
    let cursor = buffer.cursor();

    if !focused {
        return Line::from(vec![
            Span::styled(prefix, theme.muted_style()),
            Span::styled(content.to_string(), theme.style()),
        ]);
    }

    let mut spans = vec![Span::styled(prefix, theme.primary_style())];

    if insert_mode {
        let before: String = content.chars().take(cursor).collect();
        let after: String = content.chars().skip(cursor).collect();
        spans.push(Span::raw(before));
        spans.push(Span::styled("│", theme.primary_style()));
        spans.push(Span::raw(after));
    } else if content.is_empty() {
        spans.push(Span::styled(
            " ",
            Style::default().bg(theme.primary).fg(theme.background),
        ));
    } else {
        let chars: Vec<char> = content.chars().collect();
        let cursor_pos = cursor.min(chars.len().saturating_sub(1));

        let before: String = chars[..cursor_pos].iter().collect();
        let cursor_char = chars.get(cursor_pos).copied().unwrap_or(' ');
        let after: String = chars[cursor_pos + 1..].iter().collect();

        spans.push(Span::raw(before));
        spans.push(Span::styled(
            cursor_char.to_string(),
            Style::default().bg(theme.primary).fg(theme.background),
        ));
        spans.push(Span::raw(after));
    }

    Line::from(spans)
}
