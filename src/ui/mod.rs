//! Terminal views
//!
//! One draw function per phase. Views only read the [`App`]; all changes go
//! through the controller.

pub mod input;
pub mod terminal;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table};

use crate::app::App;
use crate::platform::Clock;
use crate::report::{Report, RowStatus};
use crate::sim::GamePhase;

pub use input::{Action, map_key};

const TITLE: &str = "MathRush";
const ACCENT: Color = Color::Magenta;
const MUTED: Color = Color::DarkGray;

/// Keypad legend rows, as laid out on screen
const KEYPAD: [[&str; 3]; 4] = [
    ["1", "2", "3"],
    ["4", "5", "6"],
    ["7", "8", "9"],
    ["⌫", "0", ""],
];

pub fn draw<C: Clock>(f: &mut Frame, app: &App<C>) {
    match app.state.phase {
        GamePhase::NotStarted => draw_title(f, f.area()),
        GamePhase::InProgress => draw_question(f, f.area(), app),
        GamePhase::Finished => match &app.report {
            Some(report) => draw_report(f, f.area(), report, app.report_scroll),
            None => draw_title(f, f.area()),
        },
    }
}

fn draw_title(f: &mut Frame, area: Rect) {
    let [_, logo, hint, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(2),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(area);

    f.render_widget(
        Paragraph::new(TITLE.bold().fg(ACCENT)).alignment(Alignment::Center),
        logo,
    );
    f.render_widget(
        Paragraph::new("Press Enter to start  ·  q to quit")
            .style(Style::default().fg(MUTED))
            .alignment(Alignment::Center),
        hint,
    );
}

fn draw_question<C: Clock>(f: &mut Frame, area: Rect, app: &App<C>) {
    let state = &app.state;
    let keypad_height = if app.settings.show_keypad {
        KEYPAD.len() as u16 + 2
    } else {
        0
    };
    let [logo, header, question, answer, keypad, _] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(keypad_height),
        Constraint::Fill(1),
    ])
    .areas(area);

    f.render_widget(
        Paragraph::new(TITLE.bold().fg(ACCENT)).alignment(Alignment::Center),
        logo,
    );

    let [left, right] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(header);
    f.render_widget(
        Paragraph::new(format!(
            "Question {} / {}",
            state.question_number(),
            state.question_count()
        ))
        .style(Style::default().fg(Color::Cyan)),
        left,
    );
    let time_style = if state.countdown <= 3 {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan)
    };
    f.render_widget(
        Paragraph::new(format!("Time Left: {} s", state.countdown))
            .style(time_style)
            .alignment(Alignment::Right),
        right,
    );

    let text = state
        .current_question()
        .map(|q| q.text())
        .unwrap_or_default();
    f.render_widget(
        Paragraph::new(Line::from(text.bold()))
            .alignment(Alignment::Center)
            .block(Block::default()),
        question,
    );

    let answer_box = centered(answer, 10);
    f.render_widget(
        Paragraph::new(state.buffer.as_str())
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL)),
        answer_box,
    );

    if app.settings.show_keypad {
        let lines: Vec<Line> = KEYPAD
            .iter()
            .map(|row| {
                Line::from(
                    row.iter()
                        .map(|k| Span::raw(format!(" {:^3} ", k)))
                        .collect::<Vec<_>>(),
                )
            })
            .collect();
        f.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .style(Style::default().fg(MUTED))
                .block(Block::default().borders(Borders::ALL).title(" keypad ")),
            centered(keypad, 23),
        );
    }
}

fn draw_report(f: &mut Frame, area: Rect, report: &Report, scroll: usize) {
    let [title, summary, table, footer] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(2),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(area);

    f.render_widget(
        Paragraph::new(format!("{TITLE} Report").bold().fg(Color::Red))
            .alignment(Alignment::Center),
        title,
    );
    f.render_widget(
        Paragraph::new(vec![
            Line::from(format!("Total Time: {}", report.total_time_label())),
            Line::from(format!("Accuracy: {}", report.accuracy_label())),
        ])
        .style(Style::default().fg(ACCENT))
        .alignment(Alignment::Center),
        summary,
    );

    let rows: Vec<Row> = report
        .rows
        .iter()
        .skip(scroll)
        .map(|r| {
            let status_style = match r.status {
                RowStatus::Right => Style::default().fg(Color::Green),
                RowStatus::Wrong => Style::default().fg(Color::Red),
                RowStatus::TimedOut => Style::default().fg(Color::Yellow),
            };
            Row::new(vec![
                Span::raw(r.question.clone()),
                Span::raw(r.answer.to_string()),
                Span::raw(r.user.clone()),
                Span::raw(r.time_taken.to_string()),
                Span::styled(r.status.as_str(), status_style),
            ])
        })
        .collect();
    let header = Row::new(vec!["Question", "Answer", "User", "Time (s)", "Status"])
        .style(Style::default().bold().fg(MUTED));
    let table_widget = Table::new(
        rows,
        [
            Constraint::Length(10),
            Constraint::Length(8),
            Constraint::Length(6),
            Constraint::Length(10),
            Constraint::Length(8),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(table_widget, table);

    f.render_widget(
        Paragraph::new("r: restart  ↑↓: scroll  q: quit")
            .style(Style::default().fg(MUTED))
            .alignment(Alignment::Center),
        footer,
    );
}

/// A horizontally centered strip of `width` columns
fn centered(area: Rect, width: u16) -> Rect {
    let [_, mid, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(width),
        Constraint::Fill(1),
    ])
    .areas(area);
    mid
}
