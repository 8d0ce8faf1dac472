use crate::app::App;
use chrono::Local;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

pub fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let time = Local::now().format("%H:%M").to_string();
    let date = Local::now().format("%A, %B %d").to_string();

    // Left side: page title and the signed-in user
    let left = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        Span::styled(
            &app.config.general.title,
            app.theme.primary_style().add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  signed in as {}", app.current_user.uniqname),
            app.theme.muted_style(),
        ),
    ]));
    frame.render_widget(left, area);

    // Right side: date and time
    let right = Paragraph::new(Line::from(vec![
        Span::styled(&date, app.theme.muted_style()),
        Span::raw("  "),
        Span::styled(&time, app.theme.primary_style().add_modifier(Modifier::BOLD)),
        Span::raw(" "),
    ]))
    .alignment(Alignment::Right);
    frame.render_widget(right, area);
}
