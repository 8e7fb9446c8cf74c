use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, FormFocus};
use crate::ui::styles;

/// Width reserved for the bracketed text fields
const FIELD_WIDTH: usize = 24;

/// Render the check-in form page as a centered dialog.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let height = if app.form_error.is_some() { 11 } else { 9 };
    let dialog = centered_rect_fixed(50, height, area);

    let mut lines = vec![];

    lines.push(Line::from(Span::styled(
        "              Student Check-In",
        styles::title_style(),
    )));
    lines.push(Line::from(""));

    lines.push(name_field_line(
        "First Name: ",
        &app.first_name,
        app.form_focus == FormFocus::FirstName,
    ));
    lines.push(name_field_line(
        "Last Name:  ",
        &app.last_name,
        app.form_focus == FormFocus::LastName,
    ));

    lines.push(Line::from(""));

    // Button row
    lines.push(Line::from(vec![
        Span::raw("   "),
        button_span("Add Student", app.form_focus == FormFocus::AddButton),
        Span::raw("   "),
        button_span("Show Students", app.form_focus == FormFocus::ShowButton),
    ]));

    if let Some(ref error) = app.form_error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(" {}", error),
            styles::error_style(),
        )));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    frame.render_widget(Paragraph::new(lines).block(block), dialog);
}

fn name_field_line<'a>(label: &'a str, value: &str, focused: bool) -> Line<'a> {
    let field_style = if focused {
        styles::selected_style()
    } else {
        styles::list_item_style()
    };

    // Show the tail when the value outgrows the field
    let char_count = value.chars().count();
    let shown: String = if char_count > FIELD_WIDTH {
        value.chars().skip(char_count - FIELD_WIDTH).collect()
    } else {
        format!("{:<width$}", value, width = FIELD_WIDTH)
    };
    let cursor = if focused { "▌" } else { "" };

    Line::from(vec![
        Span::raw("   "),
        Span::styled(label, styles::muted_style()),
        Span::styled("[", styles::muted_style()),
        Span::styled(format!("{}{}", shown, cursor), field_style),
        Span::styled("]", styles::muted_style()),
    ])
}

fn button_span(label: &str, focused: bool) -> Span<'static> {
    if focused {
        Span::styled(format!("[ ▶ {} ◀ ]", label), styles::selected_style())
    } else {
        Span::styled(format!("[   {}   ]", label), styles::list_item_style())
    }
}

/// Create a centered rectangle with fixed dimensions
fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}
