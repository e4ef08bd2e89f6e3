//! UI rendering

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap},
    Frame,
};

use newsroom_core::markdown::render;
use newsroom_core::query::{headline, latest_newsletters};
use newsroom_core::{Article, RenderPolicy};

use super::app::{App, FormKind, InputMode, View, HOME_NEWSLETTERS};
use crate::output::{hashtags, truncate_line};
use crate::text::{html_to_lines, LineKind};

/// Main UI rendering function
pub fn draw(frame: &mut Frame, app: &App, policy: RenderPolicy) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

    draw_tabs(frame, app, chunks[0]);

    match app.view {
        View::Home => draw_home(frame, app, chunks[1]),
        View::Articles => draw_articles(frame, app, chunks[1]),
        View::Newsletters => draw_newsletters(frame, app, chunks[1]),
        View::Editor => draw_editor(frame, app, chunks[1]),
    }

    match app.input_mode {
        InputMode::Normal => draw_status_bar(frame, app, chunks[2]),
        InputMode::Search => draw_input(frame, app, chunks[2], "/", Color::Cyan),
        InputMode::Field => {
            let prefix = format!("{}: ", app.current_field().label());
            draw_input(frame, app, chunks[2], &prefix, Color::Yellow)
        }
        InputMode::ImportPath => draw_input(frame, app, chunks[2], "Import from: ", Color::Yellow),
        InputMode::ConfirmDelete => draw_confirm(frame, app, chunks[2]),
    }

    if app.view == View::Articles && app.detail_open {
        if let Some(article) = app.current_article() {
            draw_article_detail(frame, app, article, policy);
        }
    }

    if app.show_help {
        draw_help_overlay(frame);
    }

    if let Some(error) = &app.error_message {
        draw_error(frame, error);
    }
}

fn draw_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = View::ALL
        .iter()
        .enumerate()
        .map(|(i, v)| Line::from(format!("{} {}", i + 1, v.title())))
        .collect();
    let selected = View::ALL.iter().position(|v| *v == app.view).unwrap_or(0);

    let tabs = Tabs::new(titles)
        .block(Block::default().title(" Newsroom ").borders(Borders::ALL))
        .select(selected)
        .highlight_style(Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED));
    frame.render_widget(tabs, area);
}

fn draw_home(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let mut lines = Vec::new();
    match headline(&app.all_articles) {
        Some(article) => {
            lines.push(Line::from(Span::styled(
                article.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(Span::styled(
                article.byline(),
                Style::default().fg(Color::DarkGray),
            )));
            if !article.tags.is_empty() {
                lines.push(Line::from(Span::styled(
                    hashtags(&article.tags),
                    Style::default().fg(Color::Cyan),
                )));
            }
            lines.push(Line::from(""));
            if !article.summary.is_empty() {
                lines.push(Line::from(article.summary.clone()));
            }
            if article.has_cover() {
                lines.push(Line::from(Span::styled(
                    "[cover image]",
                    Style::default().add_modifier(Modifier::DIM),
                )));
            }
        }
        None => lines.push(Line::from("No articles yet. Press 4 to write one.")),
    }

    let headline_block = Paragraph::new(lines)
        .block(Block::default().title(" Headline ").borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    frame.render_widget(headline_block, chunks[0]);

    let issues = latest_newsletters(&app.newsletters, HOME_NEWSLETTERS);
    let items: Vec<ListItem> = if issues.is_empty() {
        vec![ListItem::new("No newsletter issues yet.")]
    } else {
        issues
            .iter()
            .map(|n| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{}  ", n.display_date()),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::raw(n.title.clone()),
                ]))
            })
            .collect()
    };
    let list = List::new(items).block(
        Block::default()
            .title(" Latest newsletters ")
            .borders(Borders::ALL),
    );
    frame.render_widget(list, chunks[1]);
}

fn draw_articles(frame: &mut Frame, app: &App, area: Rect) {
    let width = area.width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = app
        .results
        .iter()
        .map(|a| {
            let mut spans = vec![
                Span::styled(
                    format!("{}  ", a.display_date()),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    format!("[{}] ", a.category),
                    Style::default().fg(Color::Yellow),
                ),
                Span::raw(a.title.clone()),
            ];
            if !a.tags.is_empty() {
                spans.push(Span::styled(
                    format!("  {}", hashtags(&a.tags)),
                    Style::default().fg(Color::Cyan),
                ));
            }
            let mut lines = vec![Line::from(spans)];
            if !a.summary.is_empty() {
                lines.push(Line::from(Span::styled(
                    format!("  {}", truncate_line(&a.summary, width.saturating_sub(2))),
                    Style::default().add_modifier(Modifier::DIM),
                )));
            }
            ListItem::new(lines)
        })
        .collect();

    let mut title = format!(" Articles ({}) ", app.results.len());
    if !app.query.tag.is_empty() {
        title = format!(" Articles ({}) #{} ", app.results.len(), app.query.tag);
    }

    let list = List::new(items)
        .block(Block::default().title(title).borders(Borders::ALL))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    if !app.results.is_empty() {
        state.select(Some(app.article_index));
    }
    frame.render_stateful_widget(list, area, &mut state);

    if app.results.is_empty() {
        let inner = Rect::new(area.x + 2, area.y + 1, area.width.saturating_sub(4), 1);
        let empty = Paragraph::new("No articles match.")
            .style(Style::default().add_modifier(Modifier::DIM));
        frame.render_widget(empty, inner);
    }
}

fn draw_article_detail(frame: &mut Frame, app: &App, article: &Article, policy: RenderPolicy) {
    let area = centered(frame.area(), 80, 85);
    frame.render_widget(Clear, area);

    let mut lines = vec![
        Line::from(Span::styled(
            article.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            article.byline(),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    if !article.tags.is_empty() {
        lines.push(Line::from(Span::styled(
            hashtags(&article.tags),
            Style::default().fg(Color::Cyan),
        )));
    }
    if article.has_cover() {
        lines.push(Line::from(Span::styled(
            "[cover image]",
            Style::default().add_modifier(Modifier::DIM),
        )));
    }
    if !article.summary.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            article.summary.clone(),
            Style::default().add_modifier(Modifier::ITALIC),
        )));
    }
    lines.push(Line::from(""));

    for line in html_to_lines(&render(&article.content, policy)) {
        let styled = match line.kind {
            LineKind::Heading(level) => {
                let style = if level == 1 {
                    Style::default()
                        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
                } else {
                    Style::default().add_modifier(Modifier::BOLD)
                };
                Line::from(Span::styled(line.text, style))
            }
            LineKind::Bullet => Line::from(vec![
                Span::styled("  • ", Style::default().fg(Color::Yellow)),
                Span::raw(line.text),
            ]),
            LineKind::Text => Line::from(line.text),
        };
        lines.push(styled);
    }

    let block = Block::default()
        .title(" Article (Esc to close) ")
        .borders(Borders::ALL)
        .border_style(Style::default().add_modifier(Modifier::BOLD));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.detail_scroll, 0));
    frame.render_widget(paragraph, area);
}

fn draw_newsletters(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .newsletters
        .iter()
        .map(|n| {
            let marker = if app.is_expanded(n) { "▼" } else { "▶" };
            let mut lines = vec![Line::from(vec![
                Span::raw(format!("{} ", marker)),
                Span::styled(
                    format!("{}  ", n.display_date()),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(n.title.clone(), Style::default().add_modifier(Modifier::BOLD)),
            ])];
            if !n.highlight.is_empty() {
                lines.push(Line::from(Span::styled(
                    format!("  {}", n.highlight),
                    Style::default().fg(Color::Yellow),
                )));
            }
            if app.is_expanded(n) {
                for text in n.content.lines() {
                    lines.push(Line::from(format!("    {}", text)));
                }
                lines.push(Line::from(""));
            }
            ListItem::new(lines)
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(format!(" Newsletters ({}) ", app.newsletters.len()))
                .borders(Borders::ALL),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut state = ListState::default();
    if !app.newsletters.is_empty() {
        state.select(Some(app.newsletter_index));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_editor(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(8)])
        .split(area);

    let fields = app.form.fields();
    let items: Vec<ListItem> = fields
        .iter()
        .map(|field| {
            let value = if field.is_multiline() {
                let content = app.content();
                match content.lines().count() {
                    0 => "(empty, Enter opens $EDITOR)".to_string(),
                    n => format!("{} line(s)", n),
                }
            } else {
                app.field_value(*field)
            };
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<12}", field.label()),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(truncate_line(&value, 60)),
            ]))
        })
        .collect();

    let title = match app.form {
        FormKind::Article => " New article (Tab: newsletter) ",
        FormKind::Newsletter => " New newsletter issue (Tab: article) ",
    };
    let list = List::new(items)
        .block(Block::default().title(title).borders(Borders::ALL))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(app.field_index.min(fields.len() - 1)));
    frame.render_stateful_widget(list, chunks[0], &mut state);

    let preview = Paragraph::new(app.content().to_string())
        .block(Block::default().title(" Content ").borders(Borders::ALL))
        .style(Style::default().add_modifier(Modifier::DIM))
        .wrap(Wrap { trim: false });
    frame.render_widget(preview, chunks[1]);
}

/// Draw the status bar at the bottom
fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let content = if let Some(msg) = &app.status_message {
        msg.clone()
    } else {
        match app.view {
            View::Home => "1-4:views  a:articles  n:newsletters  ?:help  q:quit",
            View::Articles => "/:search  t:tag  Enter:read  d:del  Esc:clear  ?:help  q:quit",
            View::Newsletters => "Enter:expand  s:subscribe  ?:help  q:quit",
            View::Editor => "Enter:edit  Tab:form  s:submit  r:reset  x:export  i:import  ?:help",
        }
        .to_string()
    };

    let paragraph = Paragraph::new(content).style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(paragraph, area);
}

/// Draw a one-line text input with cursor
fn draw_input(frame: &mut Frame, app: &App, area: Rect, prefix: &str, color: Color) {
    let mut spans = vec![
        Span::styled(prefix.to_string(), Style::default().fg(color)),
        Span::raw(app.input.as_str()),
    ];
    if app.input_mode == InputMode::Search {
        spans.push(Span::styled(
            format!("  ({} matches)", app.results.len()),
            Style::default().add_modifier(Modifier::DIM),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);

    let cursor_x = input_cursor_x(area, prefix.chars().count(), app.input_cursor);
    frame.set_cursor_position((cursor_x, area.y));
}

/// Column of the input cursor, kept inside `area`
fn input_cursor_x(area: Rect, prefix_len: usize, cursor: usize) -> u16 {
    let offset = u16::try_from(prefix_len.saturating_add(cursor)).unwrap_or(u16::MAX);
    area.x
        .saturating_add(offset)
        .min(area.right().saturating_sub(1))
}

fn draw_confirm(frame: &mut Frame, app: &App, area: Rect) {
    let title = app
        .current_article()
        .map(|a| a.title.as_str())
        .unwrap_or("article");
    let line = Line::from(vec![
        Span::styled("Delete ", Style::default().fg(Color::Red)),
        Span::raw(format!("'{}'? ", title)),
        Span::styled("(y/n)", Style::default().add_modifier(Modifier::BOLD)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_error(frame: &mut Frame, message: &str) {
    let area = centered(frame.area(), 60, 30);
    frame.render_widget(Clear, area);

    let text = vec![
        Line::from(message.to_string()),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];
    let block = Block::default()
        .title(" Error ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));
    let paragraph = Paragraph::new(text)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

/// Draw help overlay
fn draw_help_overlay(frame: &mut Frame) {
    let area = frame.area();

    // Calculate centered popup area
    let popup_width = 54.min(area.width.saturating_sub(4));
    let popup_height = 26.min(area.height.saturating_sub(4));
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    frame.render_widget(Clear, popup_area);

    let help_text = vec![
        Line::from(vec![Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        Line::from("Views:"),
        Line::from("  1 2 3 4     Home, Articles, Newsletters, Editor"),
        Line::from("  j/k, ↑/↓    Move up/down"),
        Line::from(""),
        Line::from("Articles:"),
        Line::from("  /           Search"),
        Line::from("  t           Cycle tag filter"),
        Line::from("  Enter       Read article"),
        Line::from("  d           Delete article"),
        Line::from(""),
        Line::from("Newsletters:"),
        Line::from("  Enter       Expand issue"),
        Line::from("  s           Subscribe by email"),
        Line::from(""),
        Line::from("Editor:"),
        Line::from("  Enter       Edit field"),
        Line::from("  Tab         Switch article/newsletter"),
        Line::from("  s / r       Submit / reset form"),
        Line::from("  x / i       Export / import JSON"),
        Line::from(""),
        Line::from("  q           Quit"),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().add_modifier(Modifier::BOLD));

    let paragraph = Paragraph::new(help_text).block(block);
    frame.render_widget(paragraph, popup_area);
}

/// A rectangle centered in `area`, sized in percent
fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let width = area.width * percent_x / 100;
    let height = area.height * percent_y / 100;
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
