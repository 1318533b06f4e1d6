use ratatui::prelude::*;
use ratatui::widgets::{Block, Cell, Clear, Paragraph, Row, Table, TableState, Wrap};

use crate::api::{Article, Repository};
use crate::output::{format_number, format_published_date, truncate_label};
use crate::tui::app::{App, InputMode, Screen, LANDING_ENTRIES};
use crate::tui::theme::ThemeColors;
use crate::view::{ListController, TrendingItem, ViewState};

const SPINNER_CHARS: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const SKELETON_ROWS: usize = 6;

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Handle very small terminal sizes gracefully
    if area.height < 8 || area.width < 40 {
        let msg = Paragraph::new("Terminal too small").alignment(Alignment::Center);
        frame.render_widget(msg, area);
        return;
    }

    match app.screen {
        Screen::Landing => render_landing(frame, area, app),
        Screen::Repos | Screen::Articles => render_list_page(frame, area, app),
    }

    if app.input_mode == InputMode::Help {
        render_help_popup(frame, &app.theme);
    }
}

fn render_landing(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let chunks = Layout::vertical([
        Constraint::Length(1), // Spacer
        Constraint::Length(1), // Title
        Constraint::Length(2), // Tagline
        Constraint::Length(1), // Spacer
        Constraint::Length(6), // Cards
        Constraint::Fill(1),
        Constraint::Length(1), // Footer
        Constraint::Length(1), // Status bar
    ])
    .split(area);

    frame.render_widget(
        Paragraph::new(Span::styled(
            "Trending in JavaScript",
            Style::default().fg(theme.title_color).bold(),
        ))
        .alignment(Alignment::Center),
        chunks[1],
    );
    frame.render_widget(
        Paragraph::new(
            "Discover the latest trends in JavaScript development. \
             Explore trending repositories and articles from the developer community.",
        )
        .style(Style::default().fg(theme.subtitle_color))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true }),
        chunks[2],
    );

    let cards = Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)])
        .spacing(2)
        .split(chunks[4]);
    for (idx, screen) in LANDING_ENTRIES.iter().enumerate() {
        let (title, description, action) = landing_card(*screen);
        let selected = idx == app.landing_selected;
        let border = if selected {
            theme.card_border_selected
        } else {
            theme.card_border
        };
        let block = Block::bordered()
            .title(format!(" {} {} ", idx + 1, title))
            .border_style(Style::default().fg(border));
        let action_style = if selected {
            theme.row_selected
        } else {
            Style::default().fg(theme.link_color)
        };
        let body = Paragraph::new(vec![
            Line::from(description),
            Line::from(""),
            Line::from(Span::styled(action, action_style)),
        ])
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
        frame.render_widget(body, cards[idx]);
    }

    frame.render_widget(
        Paragraph::new("Real-time data from GitHub and Dev.to APIs")
            .style(Style::default().fg(theme.muted))
            .alignment(Alignment::Center),
        chunks[6],
    );

    render_status_bar(frame, chunks[7], app);
}

fn landing_card(screen: Screen) -> (&'static str, &'static str, &'static str) {
    match screen {
        Screen::Articles => (
            "Trending JS Articles",
            "Read the latest developer articles from Dev.to",
            "View Trending Articles",
        ),
        _ => (
            "Trending JS Repos",
            "Explore the most popular JavaScript repositories on GitHub",
            "View Trending Repositories",
        ),
    }
}

fn render_list_page(frame: &mut Frame, area: Rect, app: &mut App) {
    // Layout: Title(1) + Subtitle(1) + Filters(1) + Body(fill) + Status(1)
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .split(area);

    let (title, subtitle) = match app.screen {
        Screen::Articles => (
            "Trending JavaScript Articles",
            "Read the latest developer articles from Dev.to",
        ),
        _ => (
            "Trending JavaScript Repositories",
            "Discover the most popular JavaScript projects on GitHub",
        ),
    };
    frame.render_widget(
        Paragraph::new(Span::styled(
            title,
            Style::default().fg(app.theme.title_color).bold(),
        )),
        chunks[0],
    );
    frame.render_widget(
        Paragraph::new(Span::styled(
            subtitle,
            Style::default().fg(app.theme.subtitle_color),
        )),
        chunks[1],
    );
    render_filter_bar(frame, chunks[2], app);

    let search = app.search();
    let body = ListBody {
        search: &search,
        theme: &app.theme,
        spinner_frame: app.spinner_frame,
    };
    match app.screen {
        Screen::Articles => body.render(frame, chunks[3], &app.articles.controller, &mut app.table_state),
        _ => body.render(frame, chunks[3], &app.repos.controller, &mut app.table_state),
    }

    render_status_bar(frame, chunks[4], app);
}

fn render_filter_bar(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let editing = app.input_mode == InputMode::Search;
    let search = app.search();

    let mut spans = vec![
        Span::styled("Search: ", Style::default().fg(theme.muted)),
        if search.is_empty() && !editing {
            Span::styled("(press / to search)", Style::default().fg(theme.muted))
        } else {
            Span::raw(search)
        },
    ];
    if editing {
        spans.push(Span::styled("|", Style::default().fg(theme.status_key_color)));
    }

    match app.screen {
        Screen::Repos => {
            spans.push(Span::raw("   "));
            spans.push(Span::styled("Sort: ", Style::default().fg(theme.muted)));
            spans.push(Span::raw(app.filters.sort_by().to_string()));
            spans.push(Span::raw(" "));
            spans.push(Span::styled(
                format!("({})", app.filters.sort_direction().label()),
                Style::default().fg(theme.muted),
            ));
        }
        Screen::Articles => {
            let tag = app.articles.submitted_tag();
            spans.push(Span::raw("   "));
            spans.push(Span::styled("Tag: ", Style::default().fg(theme.muted)));
            let tag = if tag.is_empty() { "all" } else { tag };
            spans.push(Span::raw(tag.to_string()));
        }
        Screen::Landing => {}
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Per-type table columns
trait RowView: TrendingItem {
    const HEADERS: [&'static str; 4];
    const WIDTHS: [Constraint; 4];

    fn metric<'a>(&self, theme: &ThemeColors) -> Cell<'a>;

    fn detail(&self) -> String;
}

impl RowView for Repository {
    const HEADERS: [&'static str; 4] = ["#", "Repository", "Stars", "Link"];
    const WIDTHS: [Constraint; 4] = [
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(10),
        Constraint::Fill(1),
    ];

    fn metric<'a>(&self, theme: &ThemeColors) -> Cell<'a> {
        Cell::from(format!("★ {}", format_number(self.stargazers_count)))
            .style(Style::default().fg(theme.star_color))
    }

    fn detail(&self) -> String {
        self.html_url.clone()
    }
}

impl RowView for Article {
    const HEADERS: [&'static str; 4] = ["#", "Title", "Reactions", "Published"];
    const WIDTHS: [Constraint; 4] = [
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(10),
        Constraint::Length(14),
    ];

    fn metric<'a>(&self, theme: &ThemeColors) -> Cell<'a> {
        Cell::from(format!("♥ {}", format_number(self.positive_reactions_count)))
            .style(Style::default().fg(theme.reaction_color))
    }

    fn detail(&self) -> String {
        format_published_date(&self.published_at)
    }
}

struct ListBody<'a> {
    search: &'a str,
    theme: &'a ThemeColors,
    spinner_frame: usize,
}

impl ListBody<'_> {
    fn render<T: RowView>(
        &self,
        frame: &mut Frame,
        area: Rect,
        controller: &ListController<T>,
        table_state: &mut TableState,
    ) {
        match controller.state() {
            ViewState::Loading => self.render_loading::<T>(frame, area),
            ViewState::Error(msg) => self.render_error(frame, area, msg),
            ViewState::Ready(_) => self.render_ready(frame, area, controller, table_state),
        }
    }

    fn render_loading<T: TrendingItem>(&self, frame: &mut Frame, area: Rect) {
        let spinner = SPINNER_CHARS[self.spinner_frame % SPINNER_CHARS.len()];
        let mut lines = vec![
            Line::from(Span::styled(
                format!("{} Loading {}...", spinner, T::PLURAL),
                Style::default().fg(self.theme.spinner_color),
            )),
            Line::from(""),
        ];
        let width = area.width.saturating_sub(2) as usize;
        for i in 0..SKELETON_ROWS {
            // Stagger widths so the placeholders read as rows of text
            let bar = width.saturating_sub((i % 3) * width / 6);
            lines.push(Line::from(Span::styled(
                "░".repeat(bar),
                Style::default().fg(self.theme.skeleton_color),
            )));
        }
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn render_error(&self, frame: &mut Frame, area: Rect, msg: &str) {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                msg.to_string(),
                Style::default().fg(self.theme.error_color),
            )),
            Line::from(""),
            Line::from(vec![
                Span::raw("Press "),
                Span::styled("r", Style::default().fg(self.theme.status_key_color).bold()),
                Span::raw(" to retry"),
            ]),
        ];
        frame.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            area,
        );
    }

    fn render_ready<T: RowView>(
        &self,
        frame: &mut Frame,
        area: Rect,
        controller: &ListController<T>,
        table_state: &mut TableState,
    ) {
        let chunks = Layout::vertical([Constraint::Length(2), Constraint::Fill(1)]).split(area);
        frame.render_widget(
            Paragraph::new(Span::styled(
                controller.summary(self.search),
                Style::default().fg(self.theme.muted),
            )),
            chunks[0],
        );

        let items = controller.visible(self.search);
        if items.is_empty() {
            let empty_msg = Paragraph::new(ListController::<T>::empty_message())
                .alignment(Alignment::Center)
                .block(Block::default());
            frame.render_widget(empty_msg, chunks[1]);
            return;
        }

        let label_width = (chunks[1].width as usize / 2).max(12);
        let rows: Vec<Row> = items
            .iter()
            .enumerate()
            .map(|(idx, item)| {
                // Alternating row background (odd rows get subtle background)
                let row_style = if idx % 2 == 1 {
                    Style::default().bg(self.theme.row_alt_bg)
                } else {
                    Style::default()
                };

                Row::new(vec![
                    Cell::from(format!("{}.", idx + 1)).style(Style::default().fg(self.theme.index_color)),
                    Cell::from(truncate_label(item.label(), label_width)),
                    item.metric(self.theme),
                    Cell::from(item.detail()).style(Style::default().fg(self.theme.link_color)),
                ])
                .style(row_style)
            })
            .collect();

        let table = Table::new(rows, T::WIDTHS)
            .header(
                Row::new(T::HEADERS.to_vec())
                    .style(self.theme.header_style)
                    .bottom_margin(1),
            )
            .row_highlight_style(self.theme.row_selected);

        frame.render_stateful_widget(table, chunks[1], table_state);
    }
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let text = if let Some((ref msg, _)) = app.flash_message {
        Line::from(Span::styled(
            msg.clone(),
            Style::default().fg(theme.flash_color(msg)),
        ))
    } else {
        let hints: &[(&str, &str)] = match (app.screen, &app.input_mode) {
            (_, InputMode::Search) if app.screen == Screen::Articles => {
                &[("Enter", ":search tag "), ("Esc", ":done")]
            }
            (_, InputMode::Search) => &[("Enter", ":done "), ("Esc", ":done")],
            (Screen::Landing, _) => &[
                ("j/k", ":select "),
                ("Enter", ":open "),
                ("1/2", ":jump "),
                ("q", ":quit"),
            ],
            (Screen::Repos, _) => &[
                ("j/k", ":nav "),
                ("Enter", ":open "),
                ("/", ":search "),
                ("s", ":sort "),
                ("d", ":direction "),
                ("r", ":refresh "),
                ("b", ":back "),
                ("?", ":help"),
            ],
            (Screen::Articles, _) => &[
                ("j/k", ":nav "),
                ("Enter", ":open "),
                ("/", ":tag "),
                ("r", ":refresh "),
                ("c", ":reset "),
                ("b", ":back "),
                ("?", ":help"),
            ],
        };

        let mut spans = Vec::new();
        for (i, (key, label)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(*key, Style::default().fg(theme.status_key_color)));
            spans.push(Span::raw(*label));
        }
        Line::from(spans)
    };

    frame.render_widget(
        Paragraph::new(text).style(Style::default().bg(theme.status_bar_bg)),
        area,
    );
}

/// Create a centered rectangle with fixed width and height
fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect {
        x,
        y,
        width,
        height,
    }
}

const HELP_ENTRIES: [(&str, &str); 12] = [
    ("j / Down", "Move down"),
    ("k / Up", "Move up"),
    ("Enter / o", "Open in browser"),
    ("/", "Search (Enter submits tag on articles)"),
    ("s", "Cycle sort field (repositories)"),
    ("d", "Toggle sort direction (repositories)"),
    ("r", "Retry / refresh"),
    ("c", "Reset filters"),
    ("Esc / b", "Back to home"),
    ("1 / 2", "Jump to repositories / articles"),
    ("?", "Show/hide this help"),
    ("q / Ctrl-c", "Quit"),
];

fn render_help_popup(frame: &mut Frame, theme: &ThemeColors) {
    let popup_area = centered_rect_fixed(56, HELP_ENTRIES.len() as u16 + 4, frame.area());

    frame.render_widget(Clear, popup_area);

    let block = Block::bordered()
        .title(" Keyboard Shortcuts ")
        .border_style(Style::default().fg(theme.popup_border));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let mut help_lines: Vec<Line> = HELP_ENTRIES
        .iter()
        .map(|(keys, action)| {
            Line::from(vec![
                Span::styled(format!("{:<14}", keys), theme.popup_key),
                Span::raw(*action),
            ])
        })
        .collect();
    help_lines.push(Line::from(""));
    help_lines.push(Line::from(Span::styled(
        "Press any key to close",
        Style::default().fg(theme.muted),
    )));

    frame.render_widget(Paragraph::new(help_lines), inner);
}
