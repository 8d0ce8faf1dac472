use super::{App, widgets};
use crate::ui::Layout;
use crate::wizard::WizardStep;
use ratatui::Frame;

pub fn draw(frame: &mut Frame, app: &App) {
    let layout = Layout::new(frame.area());

    widgets::draw_header(frame, layout.header, app);
    widgets::draw_sidebar(frame, layout.sidebar, app);

    match app.wizard.step() {
        WizardStep::General => widgets::draw_general_tab(frame, layout.content, app),
        WizardStep::Hosts => widgets::draw_hosts_tab(frame, layout.content, app),
    }

    // Always draw message panel area (shows content only when needed)
    widgets::draw_message_panel(frame, layout.message, app);

    widgets::draw_status_bar(frame, layout.status, app);

    // Popups render on top of everything
    if app.show_help {
        widgets::draw_help(frame, layout.content, app);
    }

    if app.confirm_cancel {
        widgets::draw_confirm_cancel(frame, layout.content, app);
    }

    if app.wizard.login_required() {
        widgets::draw_login_prompt(frame, layout.content, app);
    }
}
