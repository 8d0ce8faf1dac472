use super::render_input_field;
use crate::app::{App, GeneralField, PanelFocus};
use crate::validation::ValidationResult;
use crate::vim::VimMode;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

pub fn draw_general_tab(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.panel_focus == PanelFocus::Content;
    let border_style = if focused {
        app.theme.primary_style()
    } else {
        app.theme.border_style()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(" General ")
        .title_style(app.theme.primary_style());

    let inner = block.inner(area).inner(Margin::new(1, 0));
    frame.render_widget(block, area);

    let category_rows = app.available_categories().len().max(1) as u16;
    let chunks = ratatui::layout::Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),             // Name label
            Constraint::Length(1),             // Name input
            Constraint::Length(1),             // Name hint
            Constraint::Length(1),             // Description label
            Constraint::Length(1),             // Description input
            Constraint::Length(1),             // Description hint
            Constraint::Length(1),             // Categories label
            Constraint::Length(category_rows), // Category checklist
            Constraint::Length(1),             // Categories hint
            Constraint::Length(1),             // Spacer
            Constraint::Length(2),             // Correction message
            Constraint::Fill(1),
        ])
        .split(inner);

    let insert = app.vim_mode == VimMode::Insert;

    // Name
    let name_focused = focused && app.general_focus == GeneralField::Name;
    frame.render_widget(
        Paragraph::new(field_label("Name", name_focused, true, app)),
        chunks[0],
    );
    frame.render_widget(
        Paragraph::new(render_input_field(
            &app.name_input,
            name_focused,
            insert,
            &app.theme,
        )),
        chunks[1],
    );
    frame.render_widget(
        Paragraph::new(hint_line(app.wizard.name_result(), app)),
        chunks[2],
    );

    // Description
    let descript_focused = focused && app.general_focus == GeneralField::Description;
    frame.render_widget(
        Paragraph::new(field_label("Description", descript_focused, true, app)),
        chunks[3],
    );
    frame.render_widget(
        Paragraph::new(render_input_field(
            &app.description_input,
            descript_focused,
            insert,
            &app.theme,
        )),
        chunks[4],
    );
    frame.render_widget(
        Paragraph::new(hint_line(app.wizard.descript_result(), app)),
        chunks[5],
    );

    // Categories
    let categories_focused = focused && app.general_focus == GeneralField::Categories;
    frame.render_widget(
        Paragraph::new(field_label(
            "Allowed categories",
            categories_focused,
            false,
            app,
        )),
        chunks[6],
    );

    let mut category_lines = Vec::new();
    for (idx, category) in app.available_categories().iter().enumerate() {
        let selected = app.wizard.draft().categories.contains(category);
        let cursor_here = categories_focused && app.category_cursor == idx;

        let check = if selected { "[x] " } else { "[ ] " };
        let style = if cursor_here {
            app.theme.primary_style().add_modifier(Modifier::BOLD)
        } else if selected {
            app.theme.secondary_style()
        } else {
            app.theme.style()
        };

        category_lines.push(Line::from(vec![
            Span::raw(if cursor_here { "> " } else { "  " }),
            Span::styled(check, style),
            Span::styled(category.as_str(), style),
        ]));
    }
    frame.render_widget(Paragraph::new(category_lines), chunks[7]);
    frame.render_widget(
        Paragraph::new(hint_line(app.wizard.allowed_result(), app)),
        chunks[8],
    );

    // Correction message shown when the step gate failed
    if app.wizard.show_correct_general() {
        let correction = Line::from(Span::styled(
            "Correct the highlighted fields before continuing to Manage Hosts.",
            app.theme.error_style(),
        ));
        frame.render_widget(
            Paragraph::new(correction).wrap(ratatui::widgets::Wrap { trim: true }),
            chunks[10],
        );
    }
}

fn field_label<'a>(label: &'a str, focused: bool, editable: bool, app: &App) -> Line<'a> {
    let style = if focused {
        app.theme.primary_style()
    } else {
        app.theme.muted_style()
    };
    let mut spans = vec![Span::styled(label, style)];
    if focused {
        let hint = if editable {
            " (i to edit)"
        } else {
            " (space to toggle)"
        };
        spans.push(Span::styled(hint, app.theme.muted_style()));
    }
    Line::from(spans)
}

fn hint_line<'a>(result: Option<&'a ValidationResult>, app: &App) -> Line<'a> {
    match result {
        Some(result) if result.is_invalid => Line::from(Span::styled(
            result.message.as_deref().unwrap_or("Invalid value"),
            app.theme.error_style(),
        )),
        _ => Line::from(""),
    }
}
