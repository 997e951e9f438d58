use std::collections::{HashMap, HashSet};
use std::time::Instant;

use chrono::Local;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::catalogue::{Catalogue, Word};
use crate::config::Config;
use crate::engine::learning;
use crate::session::engine::{SessionError, TrainingSession};
use crate::session::modes::ModeKind;
use crate::store::json_store::JsonStore;
use crate::store::schema::{LearningStat, ProfileData, WordStatsData};
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Catalogue,
    ModeSetup,
    Training,
    Summary,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    Studying,
    Learned,
    Favorites,
}

impl StatusFilter {
    pub const ALL: [StatusFilter; 4] = [
        StatusFilter::All,
        StatusFilter::Studying,
        StatusFilter::Learned,
        StatusFilter::Favorites,
    ];

    pub fn label(self) -> &'static str {
        match self {
            StatusFilter::All => "All",
            StatusFilter::Studying => "Studying",
            StatusFilter::Learned => "Learned",
            StatusFilter::Favorites => "Favorites",
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

pub struct App {
    pub screen: AppScreen,
    pub config: Config,
    pub theme: &'static Theme,
    pub catalogue: Catalogue,
    pub word_stats: HashMap<String, LearningStat>,
    pub profile: ProfileData,
    pub store: Option<JsonStore>,
    pub filter: StatusFilter,
    pub cursor: usize,
    pub selected: HashSet<String>,
    pub setup_cursor: usize,
    pub session: Option<TrainingSession>,
    /// Highlight position inside the active mini-game; presentation state
    /// only, reset on every mode transition.
    pub training_cursor: usize,
    pub notice: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub fn with_store(mut config: Config, store: Option<JsonStore>) -> Self {
        config.normalize();
        let loaded_theme = Theme::load(&config.theme).unwrap_or_default();
        let theme: &'static Theme = Box::leak(Box::new(loaded_theme));

        let (word_stats, profile, catalogue) = if let Some(ref s) = store {
            (
                s.load_word_stats().stats,
                s.load_profile(),
                Catalogue::load(&s.load_catalogue()),
            )
        } else {
            (
                WordStatsData::default().stats,
                ProfileData::default(),
                Catalogue::load(&Default::default()),
            )
        };

        Self {
            screen: AppScreen::Catalogue,
            config,
            theme,
            catalogue,
            word_stats,
            profile,
            store,
            filter: StatusFilter::Studying,
            cursor: 0,
            selected: HashSet::new(),
            setup_cursor: 0,
            session: None,
            training_cursor: 0,
            notice: None,
            should_quit: false,
        }
    }

    pub fn set_theme(&mut self, name: &str) {
        if let Some(theme) = Theme::load(name) {
            self.theme = Box::leak(Box::new(theme));
            self.config.theme = name.to_string();
        }
    }

    pub fn is_learned(&self, text: &str) -> bool {
        self.word_stats
            .get(text)
            .is_some_and(LearningStat::is_learned)
    }

    pub fn learned_count(&self) -> usize {
        self.catalogue
            .words()
            .iter()
            .filter(|w| self.is_learned(&w.text))
            .count()
    }

    pub fn studying_count(&self) -> usize {
        self.catalogue.words().len() - self.learned_count()
    }

    pub fn visible_words(&self) -> Vec<&Word> {
        self.catalogue
            .words()
            .iter()
            .filter(|w| match self.filter {
                StatusFilter::All => true,
                StatusFilter::Studying => !self.is_learned(&w.text),
                StatusFilter::Learned => self.is_learned(&w.text),
                StatusFilter::Favorites => w.favorite,
            })
            .collect()
    }

    fn clamp_cursor(&mut self) {
        let len = self.visible_words().len();
        if len == 0 {
            self.cursor = 0;
        } else if self.cursor >= len {
            self.cursor = len - 1;
        }
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_down(&mut self) {
        let len = self.visible_words().len();
        if len > 0 && self.cursor + 1 < len {
            self.cursor += 1;
        }
    }

    pub fn cycle_filter(&mut self) {
        self.filter = self.filter.next();
        self.cursor = 0;
    }

    fn word_under_cursor(&self) -> Option<String> {
        self.visible_words()
            .get(self.cursor)
            .map(|w| w.text.clone())
    }

    pub fn toggle_select(&mut self) {
        if let Some(text) = self.word_under_cursor() {
            if !self.selected.remove(&text) {
                self.selected.insert(text);
            }
        }
    }

    pub fn select_all_visible(&mut self) {
        let visible: Vec<String> = self
            .visible_words()
            .iter()
            .map(|w| w.text.clone())
            .collect();
        // All already selected toggles back to none, like a header checkbox.
        if visible.iter().all(|t| self.selected.contains(t)) {
            for text in visible {
                self.selected.remove(&text);
            }
        } else {
            self.selected.extend(visible);
        }
    }

    pub fn toggle_favorite(&mut self) {
        if let Some(text) = self.word_under_cursor() {
            self.catalogue.toggle_favorite(&text);
            self.save_catalogue();
            self.clamp_cursor();
        }
    }

    pub fn delete_word(&mut self) {
        if let Some(text) = self.word_under_cursor() {
            self.catalogue.delete(&text);
            self.selected.remove(&text);
            self.save_catalogue();
            self.clamp_cursor();
        }
    }

    /// Move to mode setup; refuses with a visible notice when nothing is
    /// selected.
    pub fn open_mode_setup(&mut self) {
        if self.selected.is_empty() {
            self.notice =
                Some("No words selected. Pick some words before training.".to_string());
            return;
        }
        self.setup_cursor = 0;
        self.screen = AppScreen::ModeSetup;
    }

    pub fn setup_cursor_up(&mut self) {
        self.setup_cursor = self.setup_cursor.saturating_sub(1);
    }

    pub fn setup_cursor_down(&mut self) {
        if self.setup_cursor + 1 < ModeKind::CANONICAL_ORDER.len() {
            self.setup_cursor += 1;
        }
    }

    pub fn toggle_mode(&mut self) {
        let kind = ModeKind::CANONICAL_ORDER[self.setup_cursor];
        self.config.modes.toggle(kind);
    }

    /// Snapshot the selection (catalogue order, capped at the configured
    /// word limit) and start the session.
    pub fn start_training(&mut self) {
        let words: Vec<Word> = self
            .catalogue
            .words()
            .iter()
            .filter(|w| self.selected.contains(&w.text))
            .take(self.config.word_limit)
            .cloned()
            .collect();

        let rng = SmallRng::from_entropy();
        match TrainingSession::start(words, &self.config.modes, rng) {
            Ok(session) => {
                self.session = Some(session);
                self.training_cursor = 0;
                self.screen = AppScreen::Training;
            }
            Err(SessionError::EmptySelection) => {
                self.notice =
                    Some("No words selected. Pick some words before training.".to_string());
                self.screen = AppScreen::Catalogue;
            }
        }
    }

    pub fn on_tick(&mut self, now: Instant) {
        if let Some(session) = self.session.as_mut() {
            session.poll_timers(now);
        }
    }

    /// Forward exit from the active mode: completion or explicit close.
    pub fn advance_mode(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.advance();
            self.training_cursor = 0;
            if session.is_completed() {
                self.finish_session();
            }
        }
    }

    pub fn retreat_mode(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.retreat();
            self.training_cursor = 0;
        }
    }

    /// The one-shot transition out of a completed session: apply the
    /// threshold rule to the learning stats, update the streak, persist.
    fn finish_session(&mut self) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let Some(result) = session.result().copied() else {
            return;
        };

        self.profile.total_sessions += 1;

        if result.passed {
            let today = Local::now().date_naive();
            learning::record_pass(&mut self.word_stats, session.words(), today);
            learning::update_streak(&mut self.profile, today);
        }

        self.save_progress();
        self.screen = AppScreen::Summary;
    }

    /// Dismiss the summary; the session and its selection are done.
    pub fn close_summary(&mut self) {
        self.session = None;
        self.selected.clear();
        self.cursor = 0;
        self.screen = AppScreen::Catalogue;
    }

    /// Abandon the whole session from inside training. Pending timers die
    /// with the session value.
    pub fn abort_training(&mut self) {
        self.session = None;
        self.screen = AppScreen::Catalogue;
    }

    fn save_progress(&self) {
        if let Some(ref store) = self.store {
            let _ = store.save_word_stats(&WordStatsData {
                stats: self.word_stats.clone(),
                ..WordStatsData::default()
            });
            let _ = store.save_profile(&self.profile);
        }
    }

    fn save_catalogue(&self) {
        if let Some(ref store) = self.store {
            let _ = store.save_catalogue(&self.catalogue.overrides());
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn app_with_tempdir() -> (TempDir, App) {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        let app = App::with_store(Config::default(), Some(store));
        (dir, app)
    }

    #[test]
    fn starting_with_nothing_selected_raises_notice() {
        let (_dir, mut app) = app_with_tempdir();
        app.open_mode_setup();
        assert!(app.notice.is_some());
        assert_eq!(app.screen, AppScreen::Catalogue);
    }

    #[test]
    fn selection_and_filter_interact() {
        let (_dir, mut app) = app_with_tempdir();
        app.filter = StatusFilter::All;
        app.toggle_select();
        assert_eq!(app.selected.len(), 1);
        app.toggle_select();
        assert!(app.selected.is_empty());

        app.select_all_visible();
        assert_eq!(app.selected.len(), app.catalogue.words().len());
        app.select_all_visible();
        assert!(app.selected.is_empty());
    }

    #[test]
    fn training_starts_with_selection() {
        let (_dir, mut app) = app_with_tempdir();
        app.filter = StatusFilter::All;
        app.toggle_select();
        app.cursor_down();
        app.toggle_select();
        app.start_training();
        assert_eq!(app.screen, AppScreen::Training);
        let session = app.session.as_ref().unwrap();
        assert_eq!(session.words().len(), 2);
    }

    #[test]
    fn word_limit_caps_the_session() {
        let (_dir, mut app) = app_with_tempdir();
        app.config.word_limit = 3;
        app.filter = StatusFilter::All;
        app.select_all_visible();
        app.start_training();
        assert_eq!(app.session.as_ref().unwrap().words().len(), 3);
    }

    #[test]
    fn deleting_a_word_drops_it_from_selection() {
        let (_dir, mut app) = app_with_tempdir();
        app.filter = StatusFilter::All;
        app.toggle_select();
        let text = app.visible_words()[0].text.clone();
        assert!(app.selected.contains(&text));
        app.delete_word();
        assert!(!app.selected.contains(&text));
        assert!(app.catalogue.get(&text).is_none());
    }

    #[test]
    fn learned_filter_tracks_word_stats() {
        let (_dir, mut app) = app_with_tempdir();
        assert_eq!(app.learned_count(), 0);

        let first = app.catalogue.words()[0].text.clone();
        app.word_stats.insert(
            first.clone(),
            LearningStat {
                successful_attempts: 1,
                last_attempt_date: None,
                learned_date: None,
            },
        );
        assert_eq!(app.learned_count(), 1);

        app.filter = StatusFilter::Learned;
        let visible = app.visible_words();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].text, first);
    }
}
