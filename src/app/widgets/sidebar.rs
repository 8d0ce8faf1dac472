use crate::app::{App, PanelFocus};
use crate::wizard::WizardStep;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

const TABS: [WizardStep; 2] = [WizardStep::General, WizardStep::Hosts];

pub fn draw_sidebar(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.panel_focus == PanelFocus::Sidebar;
    let border_style = if focused {
        app.theme.primary_style()
    } else {
        app.theme.border_style()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(" Steps ");

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = Vec::new();
    for (idx, step) in TABS.iter().enumerate() {
        let active = app.wizard.step() == *step;
        let selected = focused && app.sidebar_cursor == idx;

        let marker = if active { "● " } else { "○ " };
        let style = if selected {
            app.theme.primary_style().add_modifier(Modifier::BOLD)
        } else if active {
            app.theme.secondary_style()
        } else {
            app.theme.muted_style()
        };

        lines.push(Line::from(vec![
            Span::raw(if selected { "> " } else { "  " }),
            Span::styled(marker, style),
            Span::styled(format!("{}. {}", idx + 1, step.title()), style),
        ]));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}
