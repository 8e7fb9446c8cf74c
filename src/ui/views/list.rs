use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::app::App;
use crate::ui::styles;

/// Render the student list page.
///
/// Entries appear most recently added first, labeled with their 1-based
/// position in the current roster. Labels are positional, so they shift
/// whenever the roster changes.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let students = app.students();
    let title = format!(" Student Information ({}) ", students.len());

    let block = Block::default()
        .title(title)
        .title_style(styles::muted_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    if students.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            " No students yet - press [a] to add one",
            styles::muted_style(),
        )))
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let header = Row::new([Cell::from("#"), Cell::from("Name")])
        .style(styles::title_style())
        .height(1);

    let rows: Vec<Row> = students
        .iter()
        .enumerate()
        .map(|(i, student)| {
            Row::new(vec![
                Cell::from(format!("{:>3}", i + 1)),
                Cell::from(student.full_name()),
            ])
            .style(styles::list_item_style())
        })
        .collect();

    let widths = [Constraint::Length(5), Constraint::Fill(1)];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(styles::selected_style());

    let mut state = TableState::default();
    state.select(Some(app.list_selection));

    frame.render_stateful_widget(table, area, &mut state);
}
