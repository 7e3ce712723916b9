use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, List, ListItem, Paragraph, Wrap},
    Frame,
};

use super::app::{BrowseApp, Pane};

pub fn render(frame: &mut Frame, app: &mut BrowseApp) {
    let [header, body, footer] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    render_search_bar(frame, app, header);

    let [left, right] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(body);

    render_results(frame, app, left);

    if app.detail.is_open() {
        render_detail(frame, app, right);
    } else {
        let [summary_area, list_area] =
            Layout::vertical([Constraint::Length(4), Constraint::Min(0)]).areas(right);
        render_watched_summary(frame, app, summary_area);
        render_watched_list(frame, app, list_area);
    }

    render_footer(frame, app, footer);
}

fn render_search_bar(frame: &mut Frame, app: &BrowseApp, area: Rect) {
    let query = app.search.query();
    let content = if query.is_empty() {
        Line::from("Search movies...".dim())
    } else {
        Line::from(query.to_string())
    };

    let block = Block::bordered()
        .title(" Search ")
        .border_style(pane_style(app.pane == Pane::Results && !app.detail.is_open()));
    frame.render_widget(Paragraph::new(content).block(block), area);
}

fn render_results(frame: &mut Frame, app: &mut BrowseApp, area: Rect) {
    let title = format!(" Results ({}) ", app.search.results().len());
    let block = Block::bordered()
        .title(title)
        .border_style(pane_style(app.pane == Pane::Results && !app.detail.is_open()));

    if app.search.is_loading() {
        frame.render_widget(Paragraph::new("Loading...".dim()).block(block), area);
        return;
    }

    if let Some(error) = app.search.error() {
        let message = Line::from(vec!["⛔ ".into(), Span::raw(error.to_string())]);
        frame.render_widget(
            Paragraph::new(message)
                .style(Style::new().fg(Color::Red))
                .block(block),
            area,
        );
        return;
    }

    let items: Vec<ListItem> = app
        .search
        .results()
        .iter()
        .map(|movie| {
            ListItem::new(Line::from(vec![
                Span::raw(movie.title.clone()),
                Span::raw(" "),
                Span::styled(format!("({})", movie.year), Style::new().dim()),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::new().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, area, &mut app.results_state);
}

fn render_detail(frame: &mut Frame, app: &BrowseApp, area: Rect) {
    let block = Block::bordered().title(" Details (Esc to close) ");

    if app.detail.is_loading() {
        frame.render_widget(Paragraph::new("Loading...".dim()).block(block), area);
        return;
    }

    if let Some(error) = app.detail.error() {
        let message = Line::from(vec!["⛔ ".into(), Span::raw(error.to_string())]);
        frame.render_widget(
            Paragraph::new(message)
                .style(Style::new().fg(Color::Red))
                .block(block),
            area,
        );
        return;
    }

    let Some(detail) = app.detail.detail() else {
        frame.render_widget(Paragraph::new("").block(block), area);
        return;
    };

    let mut lines = vec![
        Line::from(detail.title.clone().bold()),
        Line::from(format!("{} · {}", detail.released, detail.runtime)),
        Line::from(detail.genre.clone()),
        Line::from(vec![
            Span::styled("★ ", Style::new().fg(Color::Yellow)),
            Span::raw(format!("{} IMDb rating", detail.imdb_rating)),
        ]),
        Line::default(),
    ];

    let already_watched = app
        .detail
        .selected_id()
        .and_then(|id| app.watchlist.get(id));
    match already_watched {
        Some(watched) => {
            lines.push(Line::from(format!(
                "You rated this movie {}/10",
                watched.user_rating
            )));
        }
        None => {
            let pending = app.detail.pending_rating();
            let stars = format!(
                "{}{}",
                "★".repeat(pending as usize),
                "☆".repeat(10 - pending as usize)
            );
            lines.push(Line::from(vec![
                Span::styled(stars, Style::new().fg(Color::Yellow)),
                Span::raw(if pending > 0 {
                    format!("  {}/10", pending)
                } else {
                    String::new()
                }),
            ]));
            lines.push(Line::from(
                if pending > 0 {
                    "Press Enter to add to your watched list"
                } else {
                    "Rate it: 1-9, 0 for 10"
                }
                .dim(),
            ));
        }
    }

    lines.push(Line::default());
    lines.push(Line::from(detail.plot.clone().italic()));
    lines.push(Line::default());
    lines.push(Line::from(format!("Starring {}", detail.actors)));
    lines.push(Line::from(format!("Directed by {}", detail.director)));

    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn render_watched_summary(frame: &mut Frame, app: &BrowseApp, area: Rect) {
    let summary = app.watchlist.summary();
    let lines = vec![
        Line::from(format!("{} movies", summary.count)),
        Line::from(format!(
            "IMDb {:.2} · you {:.2} · {:.0} min",
            summary.avg_imdb_rating, summary.avg_user_rating, summary.avg_runtime
        )),
    ];
    let block = Block::bordered().title(" Movies you watched ");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_watched_list(frame: &mut Frame, app: &mut BrowseApp, area: Rect) {
    let block = Block::bordered()
        .title(" Watched (d to remove) ")
        .border_style(pane_style(app.pane == Pane::Watched));

    let items: Vec<ListItem> = app
        .watchlist
        .items()
        .iter()
        .map(|movie| {
            let imdb = if movie.imdb_rating > 0.0 {
                format!("{:.1}", movie.imdb_rating)
            } else {
                "N/A".to_string()
            };
            let runtime = if movie.runtime > 0 {
                format!("{} min", movie.runtime)
            } else {
                "N/A".to_string()
            };
            ListItem::new(Line::from(vec![
                Span::raw(movie.title.clone()),
                Span::raw("  "),
                Span::styled(format!("★ {}", imdb), Style::new().fg(Color::Yellow)),
                Span::styled(
                    format!("  you {}  {}", movie.user_rating, runtime),
                    Style::new().dim(),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::new().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, area, &mut app.watched_state);
}

fn render_footer(frame: &mut Frame, app: &BrowseApp, area: Rect) {
    let hints = if let Some(status) = &app.status {
        status.clone()
    } else if app.detail.is_open() {
        "Esc close · 1-9/0 rate · Enter add".to_string()
    } else if app.pane == Pane::Watched {
        "↑↓ select · Enter details · d remove · Tab results · q quit".to_string()
    } else {
        "type to search · ↑↓ select · Enter details · Tab watched · Ctrl-C quit".to_string()
    };

    frame.render_widget(Paragraph::new(Line::from(hints.dim())), area);
}

fn pane_style(focused: bool) -> Style {
    if focused {
        Style::new().fg(Color::Cyan)
    } else {
        Style::new()
    }
}
