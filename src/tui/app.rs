use ratatui::widgets::TableState;
use std::time::Instant;

use crate::fetch::{FetchJob, FetchOutcome};
use crate::filter::FilterStore;
use crate::tui::theme::ThemeColors;
use crate::view::{ArticlesPage, ReposPage, TrendingItem};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Landing,
    Repos,
    Articles,
}

/// Entries offered on the landing screen, in display order
pub const LANDING_ENTRIES: [Screen; 2] = [Screen::Repos, Screen::Articles];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
    Help,
}

pub struct App {
    pub screen: Screen,
    pub input_mode: InputMode,
    pub filters: FilterStore,
    pub repos: ReposPage,
    pub articles: ArticlesPage,
    pub landing_selected: usize,
    pub table_state: TableState,
    /// Id of the highlighted item, kept while the page is loading
    pinned_id: Option<u64>,
    pub flash_message: Option<(String, Instant)>,
    pub should_quit: bool,
    pub spinner_frame: usize,
    pub theme: ThemeColors,
    pub backend_address: String,
    jobs: Vec<FetchJob>,
}

impl App {
    pub fn new(filters: FilterStore, backend_address: &str, articles_order: &str) -> Self {
        let repos = ReposPage::new(&filters, backend_address);
        let articles = ArticlesPage::new(backend_address, articles_order);
        Self {
            screen: Screen::Landing,
            input_mode: InputMode::Normal,
            filters,
            repos,
            articles,
            landing_selected: 0,
            table_state: TableState::default(),
            pinned_id: None,
            flash_message: None,
            should_quit: false,
            spinner_frame: 0,
            theme: ThemeColors::default(),
            backend_address: backend_address.to_string(),
            jobs: Vec::new(),
        }
    }

    /// Requests issued since the last call, to be handed to the fetcher
    pub fn take_jobs(&mut self) -> Vec<FetchJob> {
        std::mem::take(&mut self.jobs)
    }

    /// Switch screens. Entering a list page mounts it, which always fetches.
    pub fn open_screen(&mut self, screen: Screen) {
        self.screen = screen;
        self.input_mode = InputMode::Normal;
        self.table_state = TableState::default();
        self.pinned_id = None;
        match screen {
            Screen::Landing => {}
            Screen::Repos => {
                let ticket = self.repos.mount();
                self.jobs.push(FetchJob::Repos(ticket));
            }
            Screen::Articles => {
                let ticket = self.articles.mount();
                self.jobs.push(FetchJob::Articles(ticket));
            }
        }
    }

    pub fn go_home(&mut self) {
        self.open_screen(Screen::Landing);
    }

    pub fn landing_next(&mut self) {
        self.landing_selected = (self.landing_selected + 1) % LANDING_ENTRIES.len();
    }

    pub fn landing_previous(&mut self) {
        self.landing_selected =
            (self.landing_selected + LANDING_ENTRIES.len() - 1) % LANDING_ENTRIES.len();
    }

    pub fn landing_enter(&mut self) {
        let screen = LANDING_ENTRIES[self.landing_selected % LANDING_ENTRIES.len()];
        self.open_screen(screen);
    }

    /// React to filter changes made since the last call (repositories page only)
    pub fn sync_filters(&mut self) {
        if self.screen == Screen::Repos {
            if let Some(ticket) = self.repos.sync() {
                self.jobs.push(FetchJob::Repos(ticket));
            }
        }
    }

    pub fn apply_outcome(&mut self, outcome: FetchOutcome) {
        match outcome {
            FetchOutcome::Repos { seq, result } => {
                self.repos.controller.complete(seq, result);
            }
            FetchOutcome::Articles { seq, result } => {
                self.articles.controller.complete(seq, result);
            }
        }
        // Keep the highlight on the same item when it survives a refetch
        if let Some(index) = self.pinned_id.and_then(|id| self.position_of(id)) {
            self.table_state.select(Some(index));
        }
        self.clamp_selection();
    }

    pub fn search(&self) -> String {
        self.filters.search()
    }

    /// Number of rows currently shown on the active list page
    pub fn visible_len(&self) -> usize {
        let search = self.search();
        match self.screen {
            Screen::Landing => 0,
            Screen::Repos => self.repos.controller.visible(&search).len(),
            Screen::Articles => self.articles.controller.visible(&search).len(),
        }
    }

    /// Keep the table selection inside the filtered list
    pub fn clamp_selection(&mut self) {
        let len = self.visible_len();
        match self.table_state.selected() {
            _ if len == 0 => {
                self.table_state.select(None);
                return;
            }
            None => self.table_state.select(Some(0)),
            Some(i) if i >= len => self.table_state.select(Some(len - 1)),
            Some(_) => {}
        }
        self.pin_selection();
    }

    fn pin_selection(&mut self) {
        self.pinned_id = self.selected_id();
    }

    /// Id of the highlighted row
    pub fn selected_id(&self) -> Option<u64> {
        let index = self.table_state.selected()?;
        let search = self.search();
        match self.screen {
            Screen::Landing => None,
            Screen::Repos => self.repos.controller.visible(&search).get(index).map(|r| r.id()),
            Screen::Articles => self.articles.controller.visible(&search).get(index).map(|a| a.id()),
        }
    }

    fn position_of(&self, id: u64) -> Option<usize> {
        let search = self.search();
        match self.screen {
            Screen::Landing => None,
            Screen::Repos => position_in(&self.repos.controller.visible(&search), id),
            Screen::Articles => position_in(&self.articles.controller.visible(&search), id),
        }
    }

    pub fn next_row(&mut self) {
        let len = self.visible_len();
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.table_state.select(Some(i));
        self.pin_selection();
    }

    pub fn previous_row(&mut self) {
        let len = self.visible_len();
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.table_state.select(Some(i));
        self.pin_selection();
    }

    /// Label and URL of the highlighted row
    pub fn selected_link(&self) -> Option<(String, String)> {
        let index = self.table_state.selected()?;
        let search = self.search();
        match self.screen {
            Screen::Landing => None,
            Screen::Repos => link_at(&self.repos.controller.visible(&search), index),
            Screen::Articles => link_at(&self.articles.controller.visible(&search), index),
        }
    }

    /// Open the highlighted item in the browser
    pub fn open_selected(&mut self) {
        let Some((label, url)) = self.selected_link() else {
            return;
        };
        match crate::browser::open_url(&url) {
            Ok(()) => self.show_flash(format!("Opened: {}", label)),
            Err(e) => self.show_flash(format!("Failed to open browser: {:#}", e)),
        }
    }

    /// Retry after an error, otherwise refetch the current query
    pub fn retry_or_refresh(&mut self) {
        match self.screen {
            Screen::Landing => {}
            Screen::Repos => {
                let ticket = self.repos.controller.retry().or_else(|| self.repos.controller.refresh());
                if let Some(ticket) = ticket {
                    self.jobs.push(FetchJob::Repos(ticket));
                }
            }
            Screen::Articles => {
                let ticket = self
                    .articles
                    .controller
                    .retry()
                    .or_else(|| self.articles.controller.refresh());
                if let Some(ticket) = ticket {
                    self.jobs.push(FetchJob::Articles(ticket));
                }
            }
        }
    }

    pub fn toggle_sort_direction(&mut self) {
        if self.screen != Screen::Repos {
            return;
        }
        self.filters.toggle_sort_direction();
        let direction = self.filters.sort_direction();
        self.show_flash(format!("Sort direction: {}", direction.label()));
    }

    pub fn cycle_sort_by(&mut self) {
        if self.screen != Screen::Repos {
            return;
        }
        self.filters.cycle_sort_by();
        let sort_by = self.filters.sort_by();
        self.show_flash(format!("Sorting by {}", sort_by));
    }

    pub fn reset_filters(&mut self) {
        self.filters.reset_filters();
        self.show_flash("Filters reset".to_string());
    }

    pub fn start_search(&mut self) {
        if self.screen != Screen::Landing {
            self.input_mode = InputMode::Search;
        }
    }

    pub fn push_search_char(&mut self, c: char) {
        self.filters.push_search_char(c);
        self.clamp_selection();
    }

    pub fn pop_search_char(&mut self) {
        self.filters.pop_search_char();
        self.clamp_selection();
    }

    /// Leave search mode. On the articles page the text is submitted as a tag.
    pub fn submit_search(&mut self) {
        self.input_mode = InputMode::Normal;
        if self.screen != Screen::Articles {
            return;
        }
        let search = self.search();
        let tag = search.trim();
        let tags = if tag.is_empty() {
            Vec::new()
        } else {
            vec![tag.to_string()]
        };
        self.filters.set_selected_tags(tags);
        if let Some(ticket) = self.articles.submit_tag(tag) {
            self.jobs.push(FetchJob::Articles(ticket));
        }
    }

    pub fn cancel_search(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn show_help(&mut self) {
        self.input_mode = InputMode::Help;
    }

    pub fn dismiss_help(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn update_flash(&mut self) {
        if let Some((_, timestamp)) = self.flash_message {
            if timestamp.elapsed().as_secs() >= 3 {
                self.flash_message = None;
            }
        }
    }

    pub fn show_flash(&mut self, msg: String) {
        self.flash_message = Some((msg, Instant::now()));
    }

    pub fn advance_spinner(&mut self) {
        self.spinner_frame = self.spinner_frame.wrapping_add(1);
    }
}

fn position_in<T: TrendingItem>(items: &[&T], id: u64) -> Option<usize> {
    items.iter().position(|item| item.id() == id)
}

fn link_at<T: TrendingItem>(items: &[&T], index: usize) -> Option<(String, String)> {
    items
        .get(index)
        .map(|item| (item.label().to_string(), item.url().to_string()))
}
