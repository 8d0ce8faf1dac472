use crate::app::App;
use crate::ui::Layout;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

pub fn draw_confirm_cancel(frame: &mut Frame, area: Rect, app: &App) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Discard this queue and exit?",
            app.theme.style(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                "  y",
                app.theme.success_style().add_modifier(Modifier::BOLD),
            ),
            Span::raw(" - Yes    "),
            Span::styled("n", app.theme.error_style().add_modifier(Modifier::BOLD)),
            Span::raw(" - No"),
        ]),
    ];

    let dialog_area = Layout::centered_box(area, 40, 6);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.primary_style())
        .title(" Cancel ")
        .title_style(app.theme.primary_style().add_modifier(Modifier::BOLD));

    frame.render_widget(Clear, dialog_area);
    frame.render_widget(
        Paragraph::new(text).block(block).alignment(Alignment::Center),
        dialog_area,
    );
}

pub fn draw_login_prompt(frame: &mut Frame, area: Rect, app: &App) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Your session has expired or you lack permission.",
            app.theme.style(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Log in again at ", app.theme.muted_style()),
            Span::styled(
                app.config.server.login_url.as_str(),
                app.theme.secondary_style(),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Esc to dismiss, then retry the action",
            app.theme.muted_style(),
        )),
    ];

    let width = (app.config.server.login_url.len() as u16 + 20).clamp(44, area.width);
    let dialog_area = Layout::centered_box(area, width, 8);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.error_style())
        .title(" Login Required ")
        .title_style(app.theme.error_style().add_modifier(Modifier::BOLD));

    frame.render_widget(Clear, dialog_area);
    frame.render_widget(
        Paragraph::new(text).block(block).alignment(Alignment::Center),
        dialog_area,
    );
}

pub fn draw_help(frame: &mut Frame, area: Rect, app: &App) {
    let rows: [(&str, &str); 10] = [
        ("j/k", "move between fields"),
        ("i", "edit the focused field"),
        ("space", "toggle the focused category"),
        ("x", "remove the focused host"),
        ("1/2", "jump to a tab (Hosts runs the same checks as Next)"),
        (":next", "validate General and continue"),
        (":back", "return to General"),
        (":host <uniqname>", "look up and add a host"),
        (":finish", "create the queue"),
        (":cancel", "discard and exit"),
    ];

    let mut text = vec![Line::from("")];
    for (keys, explanation) in rows {
        text.push(Line::from(vec![
            Span::styled(format!("  {keys:<18}"), app.theme.secondary_style()),
            Span::styled(explanation, app.theme.style()),
        ]));
    }
    text.push(Line::from(""));
    text.push(Line::from(Span::styled(
        "Esc or q to close",
        app.theme.muted_style(),
    )));

    let dialog_area = Layout::centered_box(area, 64, text.len() as u16 + 2);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.border_style())
        .title(" Help ")
        .title_style(app.theme.primary_style());

    frame.render_widget(Clear, dialog_area);
    frame.render_widget(Paragraph::new(text).block(block), dialog_area);
}
