use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs},
    Frame,
};

use crate::models::Filter;

use super::app::{App, Focus, Mode};

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(f.area());

    draw_input(f, app, chunks[0]);
    draw_filter_bar(f, app, chunks[1]);
    draw_task_list(f, app, chunks[2]);
    draw_status(f, app, chunks[3]);

    if app.mode == Mode::Confirming {
        draw_confirm(f, f.area());
    }
}

fn draw_input(f: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::Input && app.mode == Mode::Normal;
    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let input = Paragraph::new(app.input.as_str()).block(
        Block::default()
            .borders(Borders::ALL)
            .title("New task")
            .border_style(border_style),
    );
    f.render_widget(input, area);

    if focused {
        let cursor_x = area.x + app.input.chars().count() as u16 + 1;
        f.set_cursor_position((cursor_x.min(area.right().saturating_sub(2)), area.y + 1));
    }
}

fn draw_filter_bar(f: &mut Frame, app: &App, area: Rect) {
    let selected = match app.filter {
        Filter::All => 0,
        Filter::Incomplete => 1,
        Filter::Completed => 2,
    };
    let tabs = Tabs::new(vec!["[1] All", "[2] Todo", "[3] Done"])
        .select(selected)
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .divider(" ");
    f.render_widget(tabs, area);
}

fn draw_task_list(f: &mut Frame, app: &App, area: Rect) {
    let visible = app.visible_tasks();
    let items: Vec<ListItem> = visible
        .iter()
        .map(|task| {
            let marker = if task.completed { "[x] " } else { "[ ] " };
            // Completed tasks are struck through only under the All filter;
            // the other views show them undecorated.
            let text_style = if task.completed && app.filter == Filter::All {
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::CROSSED_OUT)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(vec![
                Span::raw(marker),
                Span::styled(task.text.clone(), text_style),
            ]))
        })
        .collect();

    let focused = app.focus == Focus::List && app.mode == Mode::Normal;
    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Tasks ({})", visible.len()))
                .border_style(border_style),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(app.selected);
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_status(f: &mut Frame, app: &App, area: Rect) {
    let line = if let Some(status) = &app.status {
        Line::from(Span::styled(
            status.clone(),
            Style::default().fg(Color::Red),
        ))
    } else {
        let help = match (app.mode, app.focus) {
            (Mode::Confirming, _) => "y: confirm  n: cancel",
            (_, Focus::Input) => "Enter: add  Esc/Tab: back to list",
            (_, Focus::List) => {
                "Space: toggle  d: delete  x: clear done  1/2/3/f: filter  i: new  q: quit"
            }
        };
        Line::from(Span::styled(help, Style::default().fg(Color::DarkGray)))
    };
    f.render_widget(Paragraph::new(line), area);
}

fn draw_confirm(f: &mut Frame, area: Rect) {
    let area = centered_rect(50, 20, area);
    f.render_widget(Clear, area);

    let text = vec![
        Line::from("Delete all completed tasks?"),
        Line::from(""),
        Line::from("Press 'y' to confirm, 'n' to cancel"),
    ];
    let dialog = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Confirm"));
    f.render_widget(dialog, area);
}

/// Centered sub-rectangle taking the given percentage of the area.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
