//! Widget layout and rendering for the search UI.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap};
use ratatui::Frame;

use documind_core::{Embedder, SearchHit};

use crate::app::App;

pub fn draw<E: Embedder>(frame: &mut Frame, app: &App<E>) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(1),
            ]
            .as_ref(),
        )
        .split(frame.size());

    render_query_line(frame, layout[0], app);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)].as_ref())
        .split(layout[1]);

    render_results(frame, body[0], app);
    render_detail(frame, body[1], app);
    render_status(frame, layout[2], app);

    if let Some(error) = &app.error {
        render_error_popup(frame, frame.size(), error);
    } else if app.show_help {
        render_help_overlay(frame, frame.size());
    }
}

fn render_query_line<E: Embedder>(frame: &mut Frame, area: Rect, app: &App<E>) {
    let text = if app.query.is_empty() {
        Line::from(Span::styled(
            "e.g. question answering benchmark",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(vec![
            Span::raw(app.query.clone()),
            Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
        ])
    };
    let block = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Query"));
    frame.render_widget(block, area);
}

fn render_results<E: Embedder>(frame: &mut Frame, area: Rect, app: &App<E>) {
    let title = match &app.results {
        Some(results) => format!(
            "Results ({} hits, {}ms)",
            results.total, results.latency_ms
        ),
        None => "Results".to_string(),
    };

    let items: Vec<ListItem> = match &app.results {
        Some(results) if !results.hits.is_empty() => results
            .hits
            .iter()
            .enumerate()
            .map(|(i, hit)| result_item(hit, i == app.selected))
            .collect(),
        Some(_) => vec![ListItem::new("(no matches)")],
        None => vec![ListItem::new("Type a query and press Enter")],
    };

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(list, area);
}

fn result_item(hit: &SearchHit, selected: bool) -> ListItem<'static> {
    let marker = if selected { "> " } else { "  " };
    let base = if selected {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let line = Line::from(vec![
        Span::styled(format!("{}#{:<2} ", marker, hit.rank), base),
        Span::styled(
            format!("{:.3} ", hit.score),
            base.fg(score_color(hit.score)),
        ),
        Span::styled(hit.document.display_topic().to_string(), base),
    ]);
    ListItem::new(line)
}

fn render_detail<E: Embedder>(frame: &mut Frame, area: Rect, app: &App<E>) {
    let block = Block::default().borders(Borders::ALL).title("Document");

    let Some(hit) = app.selected_hit() else {
        let placeholder = Paragraph::new("").block(block);
        frame.render_widget(placeholder, area);
        return;
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Similarity: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                format!("{:.3}", hit.score),
                Style::default().fg(score_color(hit.score)),
            ),
            Span::raw("  |  "),
            Span::styled("Distance: ", Style::default().fg(Color::Yellow)),
            Span::raw(format!("{:.3}", hit.distance)),
        ]),
        Line::from(""),
    ];
    lines.extend(hit.document.text.lines().map(|l| Line::from(l.to_string())));
    lines.push(Line::from(""));
    lines.push(metadata_line(hit));

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn metadata_line(hit: &SearchHit) -> Line<'static> {
    let meta = &hit.document.metadata;
    let mut parts: Vec<String> = Vec::new();
    if let Some(topic) = &meta.topic {
        parts.push(format!("Topic: {}", topic));
    }
    if let Some(section) = &meta.section {
        parts.push(format!("Section: {}", section));
    }
    if let Some(url) = &meta.source_url {
        parts.push(format!("Source: {}", url));
    }
    if let Some(words) = meta.word_count {
        parts.push(format!("Words: {}", words));
    }
    Line::from(Span::styled(
        parts.join("  |  "),
        Style::default().fg(Color::Gray),
    ))
}

fn render_status<E: Embedder>(frame: &mut Frame, area: Rect, app: &App<E>) {
    let status = format!(
        "{} documents | dim {} | results: {} || Enter search | Up/Down select | PgUp/PgDn results | F1 help | Esc quit",
        app.stats.documents, app.stats.dimension, app.top_k
    );
    let footer = Paragraph::new(status).style(Style::default().fg(Color::Gray));
    frame.render_widget(footer, area);
}

fn render_error_popup(frame: &mut Frame, area: Rect, error: &str) {
    let lines = vec![
        Line::from(error.to_string()),
        Line::from(""),
        Line::from("press any key to continue"),
    ];
    let block = Block::default()
        .title("Error")
        .borders(Borders::ALL)
        .style(Style::default().bg(Color::Black).fg(Color::Red));
    let popup_area = centered_rect(60, 30, area);
    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(Clear, popup_area);
    frame.render_widget(paragraph, popup_area);
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let help_lines = vec![
        Line::from("Shortcuts"),
        Line::from(""),
        Line::from("type       edit the query"),
        Line::from("Enter      run the search"),
        Line::from("Up/Down    select a result"),
        Line::from("PgUp/PgDn  more / fewer results"),
        Line::from("F1         toggle this help"),
        Line::from("Esc        quit"),
    ];

    let block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .style(Style::default().bg(Color::Black).fg(Color::White));

    let popup_area = centered_rect(50, 50, area);
    let paragraph = Paragraph::new(help_lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(Clear, popup_area);
    frame.render_widget(paragraph, popup_area);
}

fn score_color(score: f32) -> Color {
    if score >= 0.8 {
        Color::Green
    } else if score >= 0.6 {
        Color::Yellow
    } else {
        Color::Red
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Percentage((100 - percent_y) / 2),
                Constraint::Percentage(percent_y),
                Constraint::Percentage((100 - percent_y) / 2),
            ]
            .as_ref(),
        )
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ]
            .as_ref(),
        )
        .split(popup_layout[1])[1]
}
