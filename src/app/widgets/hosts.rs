use super::render_input_field;
use crate::app::{App, HostsField, PanelFocus};
use crate::vim::VimMode;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

pub fn draw_hosts_tab(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.panel_focus == PanelFocus::Content;
    let border_style = if focused {
        app.theme.primary_style()
    } else {
        app.theme.border_style()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(" Manage Hosts ")
        .title_style(app.theme.primary_style());

    let inner = block.inner(area).inner(Margin::new(1, 0));
    frame.render_widget(block, area);

    let roster_rows = app.wizard.hosts().len().max(1) as u16;
    let chunks = ratatui::layout::Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),           // Add-host label
            Constraint::Length(1),           // Uniqname input
            Constraint::Length(1),           // Scoped lookup error
            Constraint::Length(1),           // Spacer
            Constraint::Length(1),           // Roster label
            Constraint::Length(roster_rows), // Roster
            Constraint::Length(1),           // Spacer
            Constraint::Length(1),           // Finish hint
            Constraint::Fill(1),
        ])
        .split(inner);

    let insert = app.vim_mode == VimMode::Insert;
    let input_focused = focused && app.hosts_focus == HostsField::Uniqname;

    let label_style = if input_focused {
        app.theme.primary_style()
    } else {
        app.theme.muted_style()
    };
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Add host by uniqname", label_style),
            Span::styled(" (Enter to check)", app.theme.muted_style()),
        ])),
        chunks[0],
    );
    frame.render_widget(
        Paragraph::new(render_input_field(
            &app.uniqname_input,
            input_focused,
            insert,
            &app.theme,
        )),
        chunks[1],
    );

    // Lookup failures stay scoped to this pane
    if let Some(error) = app.wizard.check_host_error() {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                error.to_string(),
                app.theme.error_style(),
            ))),
            chunks[2],
        );
    }

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "Current hosts",
            app.theme.muted_style(),
        ))),
        chunks[4],
    );

    let roster_focused = focused && app.hosts_focus == HostsField::Roster;
    let mut lines = Vec::new();
    for (idx, host) in app.wizard.hosts().iter().enumerate() {
        let cursor_here = roster_focused && app.roster_cursor == idx;
        let style = if cursor_here {
            app.theme.primary_style().add_modifier(Modifier::BOLD)
        } else {
            app.theme.style()
        };

        let mut spans = vec![
            Span::raw(if cursor_here { "> " } else { "  " }),
            Span::styled(format!("{} ", host.uniqname), style),
            Span::styled(format!("({})", host.display_name), app.theme.muted_style()),
        ];
        if host.id == app.current_user.id {
            spans.push(Span::styled(" you", app.theme.secondary_style()));
        }
        if cursor_here {
            spans.push(Span::styled("  x to remove", app.theme.muted_style()));
        }
        lines.push(Line::from(spans));
    }
    frame.render_widget(Paragraph::new(lines), chunks[5]);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            ":finish to add the queue, :back to revisit General",
            app.theme.muted_style(),
        ))),
        chunks[7],
    );
}
