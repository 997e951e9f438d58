mod app;
mod catalogue;
mod config;
mod engine;
mod event;
mod session;
mod store;
mod ui;

use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Wrap};

use app::{App, AppScreen, StatusFilter};
use event::{AppEvent, EventHandler};
use session::engine::TrainingSession;
use session::modes::matching::Column;
use session::modes::memory::CardFace;
use session::modes::{ActiveMode, ModeKind, ModeRunner};
use store::json_store::JsonStore;
use ui::components::progress_bar::ProgressBar;
use ui::components::summary::SummaryCard;
use ui::layout::{ScreenLayout, centered_rect};

#[derive(Parser)]
#[command(name = "vocadrill", version, about = "Terminal vocabulary trainer with quiz mini-games")]
struct Cli {
    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(short, long, help = "Maximum words per training session")]
    words: Option<usize>,

    #[arg(long, help = "Override the data directory (stats, profile)")]
    data_dir: Option<std::path::PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = config::Config::load().unwrap_or_default();
    let store = match cli.data_dir {
        Some(dir) => JsonStore::with_base_dir(dir).ok(),
        None => JsonStore::new().ok(),
    };
    let mut app = App::with_store(config, store);

    if let Some(words) = cli.words {
        app.config.word_limit = words.clamp(1, 100);
    }
    if let Some(theme_name) = cli.theme {
        app.set_theme(&theme_name);
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(100));

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Tick => app.on_tick(Instant::now()),
            AppEvent::Resize(_, _) => {}
        }

        if app.should_quit {
            let _ = app.config.save();
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    // A blocking notice swallows the next key.
    if app.notice.is_some() {
        app.notice = None;
        return;
    }

    match app.screen {
        AppScreen::Catalogue => handle_catalogue_key(app, key),
        AppScreen::ModeSetup => handle_mode_setup_key(app, key),
        AppScreen::Training => handle_training_key(app, key),
        AppScreen::Summary => handle_summary_key(app, key),
    }
}

fn handle_catalogue_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Down | KeyCode::Char('j') => app.cursor_down(),
        KeyCode::Up | KeyCode::Char('k') => app.cursor_up(),
        KeyCode::Char(' ') => app.toggle_select(),
        KeyCode::Char('a') => app.select_all_visible(),
        KeyCode::Tab => app.cycle_filter(),
        KeyCode::Char('f') => app.toggle_favorite(),
        KeyCode::Char('x') | KeyCode::Delete => app.delete_word(),
        KeyCode::Enter | KeyCode::Char('t') => app.open_mode_setup(),
        _ => {}
    }
}

fn handle_mode_setup_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.screen = AppScreen::Catalogue,
        KeyCode::Down | KeyCode::Char('j') => app.setup_cursor_down(),
        KeyCode::Up | KeyCode::Char('k') => app.setup_cursor_up(),
        KeyCode::Char(' ') => app.toggle_mode(),
        KeyCode::Enter | KeyCode::Char('s') => app.start_training(),
        _ => {}
    }
}

fn handle_summary_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q') => app.close_summary(),
        _ => {}
    }
}

fn handle_training_key(app: &mut App, key: KeyEvent) {
    // Esc is the explicit close: leave the mode forward with whatever
    // score accrued. Shift+Esc would be nicer for "abort session" but is
    // not portable; use Ctrl+q instead.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('q') {
        app.abort_training();
        return;
    }
    if key.code == KeyCode::Esc {
        app.advance_mode();
        return;
    }

    let Some(kind) = app
        .session
        .as_ref()
        .and_then(|s| s.active().map(ModeRunner::kind))
    else {
        return;
    };

    match kind {
        ModeKind::Flashcards => handle_flashcards_key(app, key),
        ModeKind::Memory => handle_memory_key(app, key),
        ModeKind::Translation => handle_translation_key(app, key),
        ModeKind::FillBlanks => handle_fillblanks_key(app, key),
        ModeKind::Matching => handle_matching_key(app, key),
        ModeKind::Spelling => handle_spelling_key(app, key),
    }
}

fn handle_flashcards_key(app: &mut App, key: KeyEvent) {
    let mut advance = false;
    let mut retreat = false;

    if let Some(session) = app.session.as_mut() {
        let can_retreat = session.can_retreat();
        if let Some(ActiveMode::Flashcards(runner)) = session.active_mut() {
            match key.code {
                KeyCode::Char(' ') | KeyCode::Enter => runner.flip(),
                KeyCode::Right | KeyCode::Char('n') => {
                    runner.next();
                    advance = runner.is_complete();
                }
                KeyCode::Left | KeyCode::Char('p') => {
                    if runner.current == 0 {
                        retreat = can_retreat;
                    } else {
                        runner.prev();
                    }
                }
                _ => {}
            }
        }
    }

    if advance {
        app.advance_mode();
    }
    if retreat {
        app.retreat_mode();
    }
}

fn handle_memory_key(app: &mut App, key: KeyEvent) {
    const GRID_COLS: usize = 4;
    let mut advance = false;
    let mut retreat = false;
    let mut cursor = app.training_cursor;

    if let Some(session) = app.session.as_mut() {
        let can_retreat = session.can_retreat();
        if let Some(ActiveMode::Memory(runner)) = session.active_mut() {
            let card_count = runner.cards.len();
            match key.code {
                KeyCode::Left | KeyCode::Char('h') => cursor = cursor.saturating_sub(1),
                KeyCode::Right | KeyCode::Char('l') => {
                    cursor = (cursor + 1).min(card_count.saturating_sub(1));
                }
                KeyCode::Up | KeyCode::Char('k') => cursor = cursor.saturating_sub(GRID_COLS),
                KeyCode::Down | KeyCode::Char('j') => {
                    cursor = (cursor + GRID_COLS).min(card_count.saturating_sub(1));
                }
                KeyCode::Char(' ') => runner.flip(cursor, Instant::now()),
                KeyCode::Enter => {
                    if runner.is_complete() {
                        advance = true;
                    } else {
                        runner.flip(cursor, Instant::now());
                    }
                }
                KeyCode::Char('b') => retreat = can_retreat,
                _ => {}
            }
        }
    }

    app.training_cursor = cursor;
    if advance {
        app.advance_mode();
    }
    if retreat {
        app.retreat_mode();
    }
}

fn handle_translation_key(app: &mut App, key: KeyEvent) {
    let mut advance = false;
    let mut retreat = false;
    let mut cursor = app.training_cursor;
    let mut item_changed = false;

    if let Some(session) = app.session.as_mut() {
        let can_retreat = session.can_retreat();
        if let Some(ActiveMode::Translation(runner)) = session.active_mut() {
            let option_count = runner.current_item().options.len();
            match key.code {
                KeyCode::Up | KeyCode::Char('k') => cursor = cursor.saturating_sub(1),
                KeyCode::Down | KeyCode::Char('j') => {
                    cursor = (cursor + 1).min(option_count.saturating_sub(1));
                }
                KeyCode::Char(c @ '1'..='9') => {
                    let idx = c as usize - '1' as usize;
                    if idx < option_count {
                        runner.choose(idx);
                    }
                }
                KeyCode::Char(' ') => runner.choose(cursor),
                KeyCode::Enter | KeyCode::Char('n') => {
                    if !runner.current_item().is_answered() {
                        if key.code == KeyCode::Enter {
                            runner.choose(cursor);
                        }
                    } else if runner.at_exit() {
                        advance = true;
                    } else {
                        item_changed = runner.next();
                    }
                }
                KeyCode::Char('b') => retreat = can_retreat,
                _ => {}
            }
        }
    }

    app.training_cursor = if advance || item_changed { 0 } else { cursor };
    if advance {
        app.advance_mode();
    }
    if retreat {
        app.retreat_mode();
    }
}

fn handle_fillblanks_key(app: &mut App, key: KeyEvent) {
    let mut advance = false;
    let mut retreat = false;

    if let Some(session) = app.session.as_mut() {
        let can_retreat = session.can_retreat();
        if let Some(ActiveMode::FillBlanks(runner)) = session.active_mut() {
            match key.code {
                KeyCode::Char(c) => runner.push_char(c),
                KeyCode::Backspace => runner.backspace(),
                KeyCode::Enter => {
                    if runner.current_item().is_answered() {
                        if runner.at_exit() {
                            advance = true;
                        } else {
                            runner.next();
                        }
                    } else {
                        runner.submit();
                    }
                }
                KeyCode::Right => {
                    // Skipping an unanswered item is allowed.
                    if runner.at_exit() {
                        advance = true;
                    } else {
                        runner.next();
                    }
                }
                KeyCode::Left => retreat = can_retreat,
                _ => {}
            }
        }
    }

    if advance {
        app.advance_mode();
    }
    if retreat {
        app.retreat_mode();
    }
}

fn handle_matching_key(app: &mut App, key: KeyEvent) {
    let mut retreat = false;
    let mut advance = false;
    let mut cursor = app.training_cursor;

    if let Some(session) = app.session.as_mut() {
        let can_retreat = session.can_retreat();
        if let Some(ActiveMode::Matching(runner)) = session.active_mut() {
            let n = runner.item_count();
            match key.code {
                KeyCode::Up | KeyCode::Char('k') => {
                    if cursor % n > 0 {
                        cursor -= 1;
                    }
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    if cursor % n + 1 < n {
                        cursor += 1;
                    }
                }
                KeyCode::Left | KeyCode::Char('h') => {
                    if cursor >= n {
                        cursor -= n;
                    }
                }
                KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => {
                    if cursor < n {
                        cursor += n;
                    }
                }
                KeyCode::Char(' ') => {
                    let (column, pos) = if cursor < n {
                        (Column::Words, cursor)
                    } else {
                        (Column::Translations, cursor - n)
                    };
                    runner.select(column, pos, Instant::now());
                }
                KeyCode::Enter => {
                    if runner.is_complete() {
                        advance = true;
                    }
                }
                KeyCode::Char('b') => retreat = can_retreat,
                _ => {}
            }
        }
    }

    app.training_cursor = cursor;
    if advance {
        app.advance_mode();
    }
    if retreat {
        app.retreat_mode();
    }
}

fn handle_spelling_key(app: &mut App, key: KeyEvent) {
    let mut advance = false;
    let mut retreat = false;
    let mut cursor = app.training_cursor;
    let mut item_changed = false;

    if let Some(session) = app.session.as_mut() {
        let can_retreat = session.can_retreat();
        if let Some(ActiveMode::Spelling(runner)) = session.active_mut() {
            let pool_len = runner.current_item().pool.len();
            match key.code {
                KeyCode::Left | KeyCode::Char('h') => cursor = cursor.saturating_sub(1),
                KeyCode::Right | KeyCode::Char('l') => {
                    cursor = (cursor + 1).min(pool_len.saturating_sub(1));
                }
                KeyCode::Char(' ') => runner.toggle(cursor),
                KeyCode::Char('r') => runner.reset_slots(),
                KeyCode::Enter => {
                    if runner.can_check() {
                        runner.check(Instant::now());
                    } else if runner.current_item().is_answered() {
                        if runner.at_exit() {
                            advance = true;
                        } else {
                            item_changed = runner.next();
                        }
                    }
                }
                KeyCode::Char('n') => {
                    if runner.at_exit() {
                        advance = true;
                    } else {
                        item_changed = runner.next();
                    }
                }
                KeyCode::Char('b') => retreat = can_retreat,
                _ => {}
            }
        }
    }

    app.training_cursor = if advance || item_changed { 0 } else { cursor };
    if advance {
        app.advance_mode();
    }
    if retreat {
        app.retreat_mode();
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    match app.screen {
        AppScreen::Catalogue => render_catalogue(frame, app),
        AppScreen::ModeSetup => render_mode_setup(frame, app),
        AppScreen::Training => render_training(frame, app),
        AppScreen::Summary => render_summary(frame, app),
    }

    if let Some(ref notice) = app.notice {
        render_notice(frame, app, notice);
    }
}

fn header_line<'a>(app: &'a App, info: String) -> Paragraph<'a> {
    let colors = &app.theme.colors;
    Paragraph::new(Line::from(vec![
        Span::styled(
            " vocadrill ",
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            info,
            Style::default().fg(colors.dim()).bg(colors.header_bg()),
        ),
    ]))
    .style(Style::default().bg(colors.header_bg()))
}

fn footer_line<'a>(app: &App, hints: &'a str) -> Paragraph<'a> {
    Paragraph::new(Line::from(Span::styled(
        hints,
        Style::default().fg(app.theme.colors.dim()),
    )))
}

fn render_catalogue(frame: &mut ratatui::Frame, app: &App) {
    let colors = &app.theme.colors;
    let layout = ScreenLayout::new(frame.area());

    let streak_text = if app.profile.streak_days > 0 {
        format!(" | {} day streak", app.profile.streak_days)
    } else {
        String::new()
    };
    let info = format!(
        " {} words | {} learned | {} studying | {} selected{}",
        app.catalogue.words().len(),
        app.learned_count(),
        app.studying_count(),
        app.selected.len(),
        streak_text,
    );
    frame.render_widget(header_line(app, info), layout.header);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(layout.main);

    // Filter tabs.
    let mut tab_spans: Vec<Span> = vec![Span::raw(" ")];
    for filter in StatusFilter::ALL {
        let style = if filter == app.filter {
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(colors.dim())
        };
        tab_spans.push(Span::styled(format!("[{}] ", filter.label()), style));
    }
    frame.render_widget(Paragraph::new(Line::from(tab_spans)), rows[0]);

    // Word list with a simple scroll window around the cursor.
    let visible = app.visible_words();
    let height = rows[1].height as usize;
    let start = (app.cursor + 1).saturating_sub(height);
    let mut lines: Vec<Line> = Vec::new();
    for (row, word) in visible.iter().enumerate().skip(start).take(height) {
        let selected = app.selected.contains(&word.text);
        let learned = app.is_learned(&word.text);
        let checkbox = if selected { "[x]" } else { "[ ]" };
        let star = if word.favorite { "★" } else { " " };
        let status = if learned { "✓" } else { " " };

        let text = format!(
            " {checkbox} {star} {:<14} {:<14} {:<18} {:<10} {:<3} {status}",
            truncate(&word.text, 14),
            truncate(&word.phonetics, 14),
            truncate(&word.translation, 18),
            truncate(&word.word_type, 10),
            word.level,
        );

        let style = if row == app.cursor {
            Style::default().fg(colors.bg()).bg(colors.selection())
        } else if learned {
            Style::default().fg(colors.correct())
        } else {
            Style::default().fg(colors.fg())
        };
        lines.push(Line::from(Span::styled(text, style)));
    }
    if visible.is_empty() {
        lines.push(Line::from(Span::styled(
            "  nothing here — switch tabs or clear filters",
            Style::default().fg(colors.dim()),
        )));
    }
    frame.render_widget(Paragraph::new(lines), rows[1]);

    frame.render_widget(
        footer_line(
            app,
            " [Space] Select  [a] All  [Tab] Filter  [f] Favorite  [x] Delete  [Enter] Train  [q] Quit ",
        ),
        layout.footer,
    );
}

fn render_mode_setup(frame: &mut ratatui::Frame, app: &App) {
    let colors = &app.theme.colors;
    let layout = ScreenLayout::new(frame.area());

    let info = format!(" training setup | {} words selected", app.selected.len());
    frame.render_widget(header_line(app, info), layout.header);

    let centered = centered_rect(50, 70, layout.main);
    let block = Block::bordered()
        .title(" Choose training modes ")
        .border_style(Style::default().fg(colors.border()));
    let inner = block.inner(centered);
    frame.render_widget(block, centered);

    let mut lines: Vec<Line> = vec![Line::from("")];
    for (i, kind) in ModeKind::CANONICAL_ORDER.into_iter().enumerate() {
        let enabled = app.config.modes.enabled(kind);
        let marker = if enabled { "[x]" } else { "[ ]" };
        let indicator = if i == app.setup_cursor { " > " } else { "   " };
        let style = if i == app.setup_cursor {
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD)
        } else if enabled {
            Style::default().fg(colors.fg())
        } else {
            Style::default().fg(colors.dim())
        };
        lines.push(Line::from(Span::styled(
            format!("{indicator}{marker} {}", kind.title()),
            style,
        )));
    }
    lines.push(Line::from(""));
    let enabled_count = app.config.modes.enabled_count();
    let note = if enabled_count == 0 {
        "  nothing picked — flashcards will run alone".to_string()
    } else {
        format!("  {enabled_count} mode(s) picked")
    };
    lines.push(Line::from(Span::styled(
        note,
        Style::default().fg(colors.dim()),
    )));
    frame.render_widget(Paragraph::new(lines), inner);

    frame.render_widget(
        footer_line(app, " [Space] Toggle  [Enter/s] Start  [Esc] Back "),
        layout.footer,
    );
}

fn render_training(frame: &mut ratatui::Frame, app: &App) {
    let Some(session) = app.session.as_ref() else {
        return;
    };
    let Some(active) = session.active() else {
        return;
    };

    let layout = ScreenLayout::new(frame.area());
    let (mode_idx, mode_total) = session.mode_position();
    let info = format!(
        " {} | mode {} of {} ",
        active.kind().title(),
        mode_idx + 1,
        mode_total,
    );
    frame.render_widget(header_line(app, info), layout.header);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(layout.main);

    let (progress, ratio_label) = mode_progress(session, active);
    frame.render_widget(
        ProgressBar::new(&ratio_label, progress, app.theme),
        rows[0],
    );

    match active {
        ActiveMode::Flashcards(_) => render_flashcards(frame, app, session, rows[1]),
        ActiveMode::Memory(_) => render_memory(frame, app, session, rows[1]),
        ActiveMode::Translation(_) => render_translation(frame, app, session, rows[1]),
        ActiveMode::FillBlanks(_) => render_fillblanks(frame, app, session, rows[1]),
        ActiveMode::Matching(_) => render_matching(frame, app, session, rows[1]),
        ActiveMode::Spelling(_) => render_spelling(frame, app, session, rows[1]),
    }

    let hints = match active {
        ActiveMode::Flashcards(_) => {
            " [Space] Flip  [←/→] Prev/Next  [Esc] Skip mode  [Ctrl+q] Abort "
        }
        ActiveMode::Memory(_) => {
            " [Arrows] Move  [Space] Flip  [Enter] Continue  [b] Back  [Esc] Skip mode "
        }
        ActiveMode::Translation(_) => {
            " [1-3/Space] Answer  [Enter] Next  [b] Back  [Esc] Skip mode "
        }
        ActiveMode::FillBlanks(_) => {
            " type the word  [Enter] Check/Next  [→] Skip  [←] Back  [Esc] Skip mode "
        }
        ActiveMode::Matching(_) => {
            " [Arrows] Move  [Space] Pick  [Enter] Continue  [b] Back  [Esc] Skip mode "
        }
        ActiveMode::Spelling(_) => {
            " [←/→] Letter  [Space] Place  [Enter] Check/Next  [r] Reset  [n] Skip  [b] Back "
        }
    };
    frame.render_widget(footer_line(app, hints), layout.footer);
}

fn mode_progress(session: &TrainingSession, active: &ActiveMode) -> (f64, String) {
    let total = session.words().len().max(1) as f64;
    match active {
        ActiveMode::Flashcards(r) => (
            (r.current + 1) as f64 / total,
            format!("Card {}/{}", r.current + 1, session.words().len()),
        ),
        ActiveMode::Memory(r) => (
            r.found() as f64 / total,
            format!("Pairs {}/{}", r.found(), session.words().len()),
        ),
        ActiveMode::Matching(r) => (
            r.found() as f64 / total,
            format!("Pairs {}/{}", r.found(), session.words().len()),
        ),
        ActiveMode::Translation(r) => {
            let answered = r.items().iter().filter(|i| i.is_answered()).count();
            (
                answered as f64 / total,
                format!("Question {}/{}", r.current + 1, session.words().len()),
            )
        }
        ActiveMode::FillBlanks(r) => {
            let answered = r.items().iter().filter(|i| i.is_answered()).count();
            (
                answered as f64 / total,
                format!("Sentence {}/{}", r.current + 1, session.words().len()),
            )
        }
        ActiveMode::Spelling(r) => {
            let answered = r.items().iter().filter(|i| i.is_answered()).count();
            (
                answered as f64 / total,
                format!("Word {}/{}", r.current + 1, session.words().len()),
            )
        }
    }
}

fn render_flashcards(frame: &mut ratatui::Frame, app: &App, session: &TrainingSession, area: Rect) {
    let Some(ActiveMode::Flashcards(runner)) = session.active() else {
        return;
    };
    let colors = &app.theme.colors;
    let word = session.word(runner.current);

    let card = centered_rect(60, 60, area);
    let title = if runner.revealed { " translation " } else { " word " };
    let block = Block::bordered()
        .title(title)
        .border_style(Style::default().fg(colors.border()))
        .style(Style::default().bg(colors.card_bg()));
    let inner = block.inner(card);
    frame.render_widget(block, card);

    let lines = if runner.revealed {
        vec![
            Line::from(""),
            Line::from(Span::styled(
                word.translation.clone(),
                Style::default()
                    .fg(colors.card_fg())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                word.word_type.clone(),
                Style::default().fg(colors.dim()),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "press Space to flip back",
                Style::default().fg(colors.dim()),
            )),
        ]
    } else {
        vec![
            Line::from(""),
            Line::from(Span::styled(
                word.text.clone(),
                Style::default()
                    .fg(colors.card_fg())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                word.phonetics.clone(),
                Style::default().fg(colors.dim()),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "press Space to flip",
                Style::default().fg(colors.dim()),
            )),
        ]
    };

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

fn render_memory(frame: &mut ratatui::Frame, app: &App, session: &TrainingSession, area: Rect) {
    let Some(ActiveMode::Memory(runner)) = session.active() else {
        return;
    };
    let colors = &app.theme.colors;
    const GRID_COLS: usize = 4;
    const CELL_WIDTH: usize = 16;

    let mut lines: Vec<Line> = vec![Line::from("")];
    for (row_idx, chunk) in runner.cards.chunks(GRID_COLS).enumerate() {
        let mut spans: Vec<Span> = vec![Span::raw("  ")];
        for (col_idx, card) in chunk.iter().enumerate() {
            let card_idx = row_idx * GRID_COLS + col_idx;
            let word = session.word(card.word_idx);
            let content = if card.matched || card.flipped {
                match card.face {
                    CardFace::Word => truncate(&word.text, CELL_WIDTH - 4),
                    CardFace::Translation => truncate(&word.translation, CELL_WIDTH - 4),
                }
            } else {
                "·····".to_string()
            };

            let mut style = if card.matched {
                Style::default().fg(colors.correct()).bg(colors.correct_bg())
            } else if card.flipped {
                Style::default().fg(colors.accent()).bg(colors.card_bg())
            } else {
                Style::default().fg(colors.dim()).bg(colors.card_bg())
            };
            if card_idx == app.training_cursor {
                style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
            }

            spans.push(Span::styled(
                format!("{content:^width$}", width = CELL_WIDTH),
                style,
            ));
            spans.push(Span::raw("  "));
        }
        lines.push(Line::from(spans));
        lines.push(Line::from(""));
    }

    if runner.is_complete() {
        lines.push(Line::from(Span::styled(
            "  all pairs found — press Enter to continue",
            Style::default()
                .fg(colors.success())
                .add_modifier(Modifier::BOLD),
        )));
    } else if runner.is_locked() {
        lines.push(Line::from(Span::styled(
            "  no match...",
            Style::default().fg(colors.incorrect()),
        )));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_translation(frame: &mut ratatui::Frame, app: &App, session: &TrainingSession, area: Rect) {
    let Some(ActiveMode::Translation(runner)) = session.active() else {
        return;
    };
    let colors = &app.theme.colors;
    let item = runner.current_item();

    let mut lines: Vec<Line> = vec![
        Line::from(""),
        Line::from(Span::styled(
            item.prompt.clone(),
            Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            item.phonetics.clone(),
            Style::default().fg(colors.dim()),
        )),
        Line::from(""),
    ];

    for (i, option) in item.options.iter().enumerate() {
        let style = if item.is_answered() {
            if i == item.correct {
                Style::default()
                    .fg(colors.correct())
                    .add_modifier(Modifier::BOLD)
            } else if Some(i) == item.chosen {
                Style::default().fg(colors.incorrect())
            } else {
                Style::default().fg(colors.dim())
            }
        } else if i == app.training_cursor {
            Style::default().fg(colors.bg()).bg(colors.selection())
        } else {
            Style::default().fg(colors.fg())
        };
        lines.push(Line::from(Span::styled(
            format!("  {}) {}", i + 1, option),
            style,
        )));
        lines.push(Line::from(""));
    }

    if item.is_answered() {
        let verdict = if item.is_correct() {
            Span::styled("  correct!", Style::default().fg(colors.success()))
        } else {
            Span::styled("  wrong", Style::default().fg(colors.error()))
        };
        lines.push(Line::from(verdict));
    }

    let centered = centered_rect(60, 90, area);
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), centered);
}

fn render_fillblanks(frame: &mut ratatui::Frame, app: &App, session: &TrainingSession, area: Rect) {
    let Some(ActiveMode::FillBlanks(runner)) = session.active() else {
        return;
    };
    let colors = &app.theme.colors;
    let item = runner.current_item();

    let input_style = match item.answered {
        Some(true) => Style::default().fg(colors.correct()).bg(colors.correct_bg()),
        Some(false) => Style::default()
            .fg(colors.incorrect())
            .bg(colors.incorrect_bg()),
        None => Style::default().fg(colors.fg()).bg(colors.card_bg()),
    };

    let mut lines: Vec<Line> = vec![
        Line::from(""),
        Line::from(Span::styled(
            item.sentence.clone(),
            Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("translation: {}", item.translation),
            Style::default().fg(colors.dim()),
        )),
        Line::from(""),
        Line::from(Span::styled(format!(" {} _", item.typed), input_style)),
        Line::from(""),
    ];

    match item.answered {
        Some(true) => lines.push(Line::from(Span::styled(
            "correct!",
            Style::default().fg(colors.success()),
        ))),
        Some(false) => lines.push(Line::from(Span::styled(
            format!("wrong — the answer is \"{}\"", item.answer),
            Style::default().fg(colors.error()),
        ))),
        None => {}
    }

    let centered = centered_rect(70, 80, area);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        centered,
    );
}

fn render_matching(frame: &mut ratatui::Frame, app: &App, session: &TrainingSession, area: Rect) {
    let Some(ActiveMode::Matching(runner)) = session.active() else {
        return;
    };
    let colors = &app.theme.colors;
    let n = runner.item_count();

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    for (col_idx, (items, selected)) in [
        (&runner.words_column, runner.selected_word),
        (&runner.translations_column, runner.selected_translation),
    ]
    .into_iter()
    .enumerate()
    {
        let mut lines: Vec<Line> = vec![Line::from("")];
        for (pos, &word_idx) in items.iter().enumerate() {
            let word = session.word(word_idx);
            let text = if col_idx == 0 {
                &word.text
            } else {
                &word.translation
            };

            let cursor_pos = if col_idx == 0 {
                app.training_cursor
            } else {
                app.training_cursor.wrapping_sub(n)
            };

            let mut style = if runner.is_matched(word_idx) {
                Style::default().fg(colors.correct()).bg(colors.correct_bg())
            } else if selected == Some(pos) {
                if runner.is_locked() {
                    Style::default()
                        .fg(colors.incorrect())
                        .bg(colors.incorrect_bg())
                } else {
                    Style::default().fg(colors.bg()).bg(colors.accent())
                }
            } else {
                Style::default().fg(colors.fg()).bg(colors.card_bg())
            };
            if pos == cursor_pos {
                style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
            }

            lines.push(Line::from(Span::styled(
                format!("  {:^24}  ", truncate(text, 22)),
                style,
            )));
            lines.push(Line::from(""));
        }
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), columns[col_idx]);
    }
}

fn render_spelling(frame: &mut ratatui::Frame, app: &App, session: &TrainingSession, area: Rect) {
    let Some(ActiveMode::Spelling(runner)) = session.active() else {
        return;
    };
    let colors = &app.theme.colors;
    let item = runner.current_item();

    let slot_text = if item.revealed {
        item.answer.clone()
    } else {
        item.assembled()
    };
    let slot_display: String = if slot_text.is_empty() {
        "_".repeat(item.pool.len())
    } else {
        slot_text.chars().map(|c| format!("{c} ")).collect()
    };
    let slot_style = match item.answered {
        Some(true) => Style::default().fg(colors.correct()).bg(colors.correct_bg()),
        Some(false) if item.revealed => {
            Style::default().fg(colors.correct()).bg(colors.correct_bg())
        }
        Some(false) => Style::default()
            .fg(colors.incorrect())
            .bg(colors.incorrect_bg()),
        None => Style::default().fg(colors.fg()).bg(colors.card_bg()),
    };

    let mut pool_spans: Vec<Span> = Vec::new();
    for (i, &ch) in item.pool.iter().enumerate() {
        let mut style = if item.used[i] {
            Style::default().fg(colors.dim())
        } else {
            Style::default().fg(colors.fg()).bg(colors.card_bg())
        };
        if i == app.training_cursor && !item.is_answered() {
            style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
        }
        pool_spans.push(Span::styled(format!(" {ch} "), style));
        pool_spans.push(Span::raw(" "));
    }

    let mut lines: Vec<Line> = vec![
        Line::from(""),
        Line::from(Span::styled(
            "translation:",
            Style::default().fg(colors.dim()),
        )),
        Line::from(Span::styled(
            item.translation.clone(),
            Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(format!(" {slot_display} "), slot_style)),
        Line::from(""),
        Line::from(pool_spans),
        Line::from(""),
    ];

    match item.answered {
        Some(true) => lines.push(Line::from(Span::styled(
            "correct!",
            Style::default().fg(colors.success()),
        ))),
        Some(false) => lines.push(Line::from(Span::styled(
            if item.revealed {
                "wrong — that's the correct spelling above".to_string()
            } else {
                "wrong...".to_string()
            },
            Style::default().fg(colors.error()),
        ))),
        None if runner.can_check() => lines.push(Line::from(Span::styled(
            "press Enter to check",
            Style::default().fg(colors.accent()),
        ))),
        None => {}
    }

    let centered = centered_rect(70, 80, area);
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), centered);
}

fn render_summary(frame: &mut ratatui::Frame, app: &App) {
    let Some(result) = app.session.as_ref().and_then(TrainingSession::result) else {
        return;
    };
    let layout = ScreenLayout::new(frame.area());
    frame.render_widget(header_line(app, " session summary".to_string()), layout.header);

    let centered = centered_rect(50, 60, layout.main);
    frame.render_widget(
        SummaryCard::new(result, app.profile.streak_days, app.theme),
        centered,
    );

    frame.render_widget(footer_line(app, " [Enter] Back to catalogue "), layout.footer);
}

fn render_notice(frame: &mut ratatui::Frame, app: &App, notice: &str) {
    let colors = &app.theme.colors;
    let area = centered_rect(40, 20, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::bordered()
        .title(" Notice ")
        .border_style(Style::default().fg(colors.warning()))
        .style(Style::default().bg(colors.card_bg()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            notice.to_string(),
            Style::default().fg(colors.card_fg()),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "press any key",
            Style::default().fg(colors.dim()),
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        inner,
    );
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{truncated}…")
    }
}
