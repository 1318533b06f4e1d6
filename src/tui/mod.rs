pub mod app;
pub mod event;
pub mod theme;
pub mod ui;

pub use app::{App, InputMode, Screen};
pub use theme::ThemeColors;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use event::{Event, EventHandler};

use crate::api::ApiClient;
use crate::fetch::Fetcher;

pub async fn run_tui(mut app: App, client: ApiClient) -> anyhow::Result<()> {
    // Buffer log output while the TUI is active so it cannot corrupt the display
    crate::logging::activate();

    // Init terminal (sets up panic hooks automatically)
    let mut terminal = ratatui::init();

    let mut events = EventHandler::new(250);
    let fetch_tx = events.sender();
    let mut fetcher = Fetcher::new(client, move |outcome| {
        let _ = fetch_tx.send(Event::Fetched(outcome));
    });

    let result = event_loop(&mut terminal, &mut app, &mut events, &mut fetcher).await;

    // Stop in-flight requests before tearing down the terminal
    drop(fetcher);
    ratatui::restore();

    // Flush buffered messages now that the terminal is restored
    for msg in crate::logging::drain() {
        eprintln!("{}", msg);
    }

    result
}

async fn event_loop(
    terminal: &mut ratatui::DefaultTerminal,
    app: &mut App,
    events: &mut EventHandler,
    fetcher: &mut Fetcher,
) -> anyhow::Result<()> {
    loop {
        for job in app.take_jobs() {
            fetcher.dispatch(job);
        }

        terminal.draw(|frame| ui::draw(frame, app))?;

        match events.next().await {
            Event::Key(key) => handle_key_event(app, key),
            Event::Tick => {
                app.update_flash();
                app.advance_spinner();
            }
            Event::Fetched(outcome) => app.apply_outcome(outcome),
        }

        // Sort changes made by this event turn into a new request here
        app.sync_filters();
        app.clamp_selection();

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key_event(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match app.input_mode {
        InputMode::Help => {
            // Any key exits help
            app.dismiss_help();
        }
        InputMode::Search => match key.code {
            KeyCode::Enter => app.submit_search(),
            KeyCode::Esc => app.cancel_search(),
            KeyCode::Backspace => app.pop_search_char(),
            KeyCode::Char(c) => app.push_search_char(c),
            // Ignore all other keys (don't propagate to Normal mode)
            _ => {}
        },
        InputMode::Normal => match app.screen {
            Screen::Landing => match key.code {
                KeyCode::Char('q') => app.should_quit = true,
                KeyCode::Char('j') | KeyCode::Down => app.landing_next(),
                KeyCode::Char('k') | KeyCode::Up => app.landing_previous(),
                KeyCode::Enter => app.landing_enter(),
                KeyCode::Char('1') => app.open_screen(Screen::Repos),
                KeyCode::Char('2') => app.open_screen(Screen::Articles),
                KeyCode::Char('?') => app.show_help(),
                _ => {}
            },
            Screen::Repos | Screen::Articles => match key.code {
                KeyCode::Char('q') => app.should_quit = true,

                // Navigation
                KeyCode::Char('j') | KeyCode::Down => app.next_row(),
                KeyCode::Char('k') | KeyCode::Up => app.previous_row(),
                KeyCode::Esc | KeyCode::Char('b') => app.go_home(),

                KeyCode::Enter | KeyCode::Char('o') => app.open_selected(),

                // Filters
                KeyCode::Char('/') => app.start_search(),
                KeyCode::Char('d') => app.toggle_sort_direction(),
                KeyCode::Char('s') => app.cycle_sort_by(),
                KeyCode::Char('c') => app.reset_filters(),

                KeyCode::Char('r') => app.retry_or_refresh(),
                KeyCode::Char('?') => app.show_help(),
                _ => {}
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::FetchJob;
    use crate::filter::{FilterStore, SortDirection};

    fn press(app: &mut App, code: KeyCode) {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE));
        app.sync_filters();
    }

    fn app() -> App {
        App::new(FilterStore::new(), "http://localhost:8080", "hotness")
    }

    #[test]
    fn test_number_keys_open_pages() {
        let mut app = app();
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.screen, Screen::Articles);
        assert!(matches!(app.take_jobs().as_slice(), [FetchJob::Articles(_)]));

        press(&mut app, KeyCode::Char('b'));
        assert_eq!(app.screen, Screen::Landing);
        press(&mut app, KeyCode::Char('1'));
        assert_eq!(app.screen, Screen::Repos);
    }

    #[test]
    fn test_direction_key_issues_request() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        app.take_jobs();

        press(&mut app, KeyCode::Char('d'));
        match app.take_jobs().as_slice() {
            [FetchJob::Repos(ticket)] => {
                assert_eq!(ticket.query.sort_direction, SortDirection::Asc)
            }
            other => panic!("unexpected jobs {:?}", other),
        }
    }

    #[test]
    fn test_search_mode_captures_letters() {
        let mut app = app();
        press(&mut app, KeyCode::Char('1'));
        app.take_jobs();

        press(&mut app, KeyCode::Char('/'));
        press(&mut app, KeyCode::Char('q'));
        press(&mut app, KeyCode::Char('d'));
        assert!(!app.should_quit);
        assert_eq!(app.search(), "qd");
        assert_eq!(app.filters.sort_direction(), SortDirection::Desc);

        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.search(), "q");
        assert!(app.take_jobs().is_empty());
    }

    #[test]
    fn test_ctrl_c_quits_from_any_mode() {
        let mut app = app();
        app.open_screen(Screen::Repos);
        app.start_search();
        handle_key_event(&mut app, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[test]
    fn test_help_closes_on_any_key() {
        let mut app = app();
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.input_mode, InputMode::Help);
        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.screen, Screen::Landing);
    }
}
