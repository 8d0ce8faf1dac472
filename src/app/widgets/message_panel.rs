use crate::app::App;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

pub fn draw_message_panel(frame: &mut Frame, area: Rect, app: &App) {
    // Creation failures outrank transient messages; lookup failures are
    // drawn inside the hosts pane instead
    let (text, is_error) = if let Some(error) = app.wizard.add_queue_error() {
        (error.to_string(), true)
    } else if app.wizard.is_checking_host() {
        (format!("{} Checking host...", app.spinner_char()), false)
    } else if app.wizard.is_submitting() {
        (format!("{} Adding queue...", app.spinner_char()), false)
    } else {
        match &app.message {
            Some(m) => (m.text.clone(), m.is_error),
            None => return,
        }
    };

    let (title, border_style, text_style) = if is_error {
        (" Error ", app.theme.error_style(), app.theme.error_style())
    } else {
        (" Info ", app.theme.secondary_style(), app.theme.style())
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title)
        .title_style(border_style.add_modifier(Modifier::BOLD));

    let mut spans = vec![Span::styled(text, text_style)];
    if is_error {
        spans.push(Span::styled(
            " (Esc to dismiss)",
            app.theme.muted_style(),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .block(block)
        .wrap(ratatui::widgets::Wrap { trim: true });

    frame.render_widget(paragraph, area);
}
