//! Main UI renderer

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap};

use crate::core::goal::{Goal, STEP_COUNT, STEP_LABELS};
use crate::core::storage::GoalStorage;
use crate::tui::app::{App, Focus};
use crate::tui::theme::Theme;

/// Render the UI
pub fn render<S: GoalStorage>(frame: &mut Frame, app: &App<S>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // New goal input
            Constraint::Min(0),    // Progress grid
            Constraint::Length(1), // Key hints
            Constraint::Length(2), // Status bar
        ])
        .split(frame.area());

    render_header(frame, chunks[0], app);
    render_input(frame, chunks[1], app);
    render_goals(frame, chunks[2], app);
    render_key_hints(frame, chunks[3], app);
    render_status_bar(frame, chunks[4], app);

    if let Some(confirm) = app.confirm {
        render_confirm_popup(frame, &confirm.prompt(app.tracker.store().len()));
    }

    if let Some(popup) = &app.error_popup {
        render_error_popup(frame, &popup.title, &popup.message);
    }

    // Render help overlay on top if active
    if app.show_help {
        render_help_overlay(frame);
    }
}

/// Render the header
fn render_header<S: GoalStorage>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let store = app.tracker.store();
    let completed = store.iter().filter(|g| g.is_complete()).count();

    let mut spans = vec![Span::raw(format!(
        " growth-tracker │ {} goals │ {} complete ",
        store.len(),
        completed
    ))];

    if app.tracker.is_dirty() {
        spans.push(Span::styled("│ ● unsaved ", Theme::unsaved()));
    } else if let Some(saved) = app.tracker.last_saved() {
        spans.push(Span::styled(
            format!("│ saved {} ", saved.format("%H:%M:%S")),
            Theme::muted(),
        ));
    }

    let header = Paragraph::new(Line::from(spans))
        .style(Theme::header())
        .block(Block::default().borders(Borders::BOTTOM));

    frame.render_widget(header, area);
}

/// Render the new-goal input line
fn render_input<S: GoalStorage>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let focused = app.focus == Focus::Input;
    let border_style = if focused {
        Theme::focused_border()
    } else {
        Theme::normal()
    };

    let line = if app.input.is_empty() && !focused {
        Line::from(Span::styled("Enter a new goal (press a)", Theme::muted()))
    } else {
        // Blink the cursor on every other tick
        let cursor = if focused && app.tick_counter % 2 == 0 {
            "█"
        } else {
            " "
        };
        Line::from(vec![
            Span::raw(app.input.as_str()),
            Span::styled(cursor, Style::default().fg(Theme::SECONDARY)),
        ])
    };

    let input = Paragraph::new(line).block(
        Block::default()
            .title(" Add Goal ")
            .borders(Borders::ALL)
            .border_style(border_style),
    );

    frame.render_widget(input, area);
}

/// Render the progress grid
fn render_goals<S: GoalStorage>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let store = app.tracker.store();
    let focused = app.focus == Focus::Goals;

    let block = Block::default()
        .title(" Progress ")
        .borders(Borders::ALL)
        .border_style(if focused {
            Theme::focused_border()
        } else {
            Theme::normal()
        });

    if store.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("  No goals yet.", Theme::muted())),
            Line::from(Span::styled(
                "  Type a goal above and press Enter to add it.",
                Theme::muted(),
            )),
        ])
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let header_cells = std::iter::once(Cell::from("Goal"))
        .chain(STEP_LABELS.iter().map(|label| Cell::from(*label)))
        .chain(std::iter::once(Cell::from("Done")));
    let header = Row::new(header_cells)
        .style(Style::default().fg(Theme::PRIMARY).add_modifier(Modifier::BOLD))
        .bottom_margin(1);

    let rows: Vec<Row> = store
        .iter()
        .enumerate()
        .map(|(i, goal)| {
            let selected = focused && i == app.goal_selection.selected;
            goal_row(goal, selected, app.step_cursor)
        })
        .collect();

    let mut widths = vec![Constraint::Min(20)];
    widths.extend(std::iter::repeat(Constraint::Length(6)).take(STEP_COUNT));
    widths.push(Constraint::Length(6));

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .column_spacing(1);

    frame.render_widget(table, area);
}

/// Build one grid row; the selected row highlights the step under the cursor
fn goal_row(goal: &Goal, selected: bool, step_cursor: usize) -> Row<'static> {
    let text_style = if selected {
        Theme::selected()
    } else if goal.is_complete() {
        Theme::goal_complete()
    } else {
        Theme::normal()
    };

    let mut cells = vec![Cell::from(Span::styled(goal.text.clone(), text_style))];

    for (step, done) in goal.progress.iter().enumerate() {
        let mark = if *done { "[x]" } else { "[ ]" };
        let style = if selected && step == step_cursor {
            Theme::cursor_cell()
        } else if *done {
            Theme::step_done()
        } else {
            Theme::step_pending()
        };
        cells.push(Cell::from(Span::styled(format!(" {}", mark), style)));
    }

    cells.push(Cell::from(Span::styled(
        format!("{:>4}%", goal.percent()),
        Theme::muted(),
    )));

    Row::new(cells)
}

/// Render the key hint line for the focused panel
fn render_key_hints<S: GoalStorage>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let hints = match app.focus {
        Focus::Input => " Enter add │ Esc/Tab progress grid │ Ctrl+C quit",
        Focus::Goals => {
            " Space/1-5 toggle │ a add │ d delete │ C clear all │ s save │ ? help │ q quit"
        }
    };

    frame.render_widget(Paragraph::new(hints).style(Theme::muted()), area);
}

fn render_status_bar<S: GoalStorage>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let status_text = match &app.status_message {
        Some(msg) => format!(" {}", msg),
        None => " ? for help ".to_string(),
    };

    let status = Paragraph::new(status_text)
        .style(Theme::status_bar())
        .block(Block::default().borders(Borders::TOP));

    frame.render_widget(status, area);
}

/// Centered popup area with a fixed maximum size
fn popup_area(area: Rect, max_width: u16, max_height: u16) -> Rect {
    let width = ((u32::from(area.width) * 60 / 100) as u16)
        .max(30)
        .min(max_width)
        .min(area.width);
    let height = max_height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

fn render_confirm_popup(frame: &mut Frame, prompt: &str) {
    let area = popup_area(frame.area(), 60, 5);
    frame.render_widget(Clear, area);

    let popup = Paragraph::new(vec![Line::from(""), Line::from(prompt.to_string())])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .title(" Confirm ")
                .borders(Borders::ALL)
                .border_style(Theme::focused_border()),
        )
        .style(Style::default().bg(Color::Black));

    frame.render_widget(popup, area);
}

fn render_error_popup(frame: &mut Frame, title: &str, message: &str) {
    let area = popup_area(frame.area(), 70, 9);
    frame.render_widget(Clear, area);

    let mut lines: Vec<Line> = message.lines().map(|l| Line::from(l.to_string())).collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Press Enter to dismiss", Theme::muted())));

    let popup = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(format!(" {} ", title))
                .borders(Borders::ALL)
                .border_style(Theme::error()),
        )
        .style(Style::default().bg(Color::Black));

    frame.render_widget(popup, area);
}

/// Render the help overlay
fn render_help_overlay(frame: &mut Frame) {
    let help_lines = help_content();
    let area = popup_area(frame.area(), 60, help_lines.len() as u16 + 2);

    // Clear the area behind the popup
    frame.render_widget(Clear, area);

    let text: Vec<Line> = help_lines
        .into_iter()
        .map(|(key, desc)| {
            Line::from(vec![
                Span::styled(format!("  {:12}", key), Style::default().fg(Theme::PRIMARY)),
                Span::raw(desc),
            ])
        })
        .collect();

    let help = Paragraph::new(text)
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        )
        .style(Style::default().bg(Color::Black));

    frame.render_widget(help, area);
}

fn help_content() -> Vec<(&'static str, &'static str)> {
    vec![
        ("a / i", "Type a new goal"),
        ("Enter", "Add goal (in input) / toggle step"),
        ("Esc / Tab", "Switch between input and grid"),
        ("j / ↓", "Next goal"),
        ("k / ↑", "Previous goal"),
        ("h / l", "Move between steps"),
        ("Space", "Toggle step under cursor"),
        ("1 - 5", "Toggle 20% … 100%"),
        ("d", "Delete goal (saves)"),
        ("C", "Clear all goals (saves)"),
        ("s", "Save all progress"),
        ("q", "Quit"),
    ]
}
