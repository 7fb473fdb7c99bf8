use std::io;

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, List, ListItem, Paragraph, Row, Table};

use psl_terminal::export;
use psl_terminal::model_config::{load_model_config, save_cached_config, ModelConfig};
use psl_terminal::persist;
use psl_terminal::predict::{predict, LINEUP_SIZE};
use psl_terminal::ratings_cache;
use psl_terminal::sample_data;
use psl_terminal::season_load;
use psl_terminal::state::{AppState, Screen, Side};

struct App {
    state: AppState,
    config: ModelConfig,
    should_quit: bool,
}

impl App {
    fn new(state: AppState, config: ModelConfig) -> Self {
        Self {
            state,
            config,
            should_quit: false,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        // While typing a search query every character belongs to the query,
        // including the global shortcut letters.
        if self.state.screen == Screen::Lineups && self.state.searching {
            self.on_search_key(key);
            return;
        }
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('r') => {
                self.state.screen = Screen::Ratings;
                return;
            }
            KeyCode::Char('h') => {
                self.load_history();
                self.state.screen = Screen::History;
                return;
            }
            _ => {}
        }

        match self.state.screen {
            Screen::Teams => self.on_teams_key(key),
            Screen::Lineups => self.on_lineups_key(key),
            Screen::Prediction => self.on_prediction_key(key),
            Screen::Ratings => self.on_ratings_key(key),
            Screen::History => self.on_history_key(key),
        }
    }

    fn on_teams_key(&mut self, key: KeyEvent) {
        let len = self.state.teams.len();
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                self.state.team_cursor = wrap(self.state.team_cursor, 1, len);
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.state.team_cursor = wrap(self.state.team_cursor, -1, len);
            }
            KeyCode::Tab => self.state.picking = self.state.picking.other(),
            KeyCode::Enter | KeyCode::Char(' ') => self.state.select_team(),
            KeyCode::Char('g') => self.state.start_lineups(),
            _ => {}
        }
    }

    fn on_lineups_key(&mut self, key: KeyEvent) {
        let len = self.state.filtered_squad(self.state.editing).len();
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                self.state.lineup_cursor = self.state.move_cursor(1, len);
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.state.lineup_cursor = self.state.move_cursor(-1, len);
            }
            KeyCode::Tab => {
                self.state.editing = self.state.editing.other();
                self.state.lineup_cursor = 0;
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.state.toggle_player(),
            KeyCode::Char('a') => self.state.auto_pick(),
            KeyCode::Char('p') => self.run_prediction(),
            KeyCode::Char('/') => self.state.searching = true,
            KeyCode::Esc | KeyCode::Char('b') => {
                // Esc clears an active filter before leaving the screen.
                if self.state.search.is_empty() {
                    self.state.screen = Screen::Teams;
                } else {
                    self.state.clear_search();
                }
            }
            _ => {}
        }
    }

    fn on_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.state.clear_search(),
            KeyCode::Enter => self.state.searching = false,
            KeyCode::Backspace => self.state.pop_search(),
            KeyCode::Char(c) => self.state.push_search(c),
            _ => {}
        }
    }

    fn on_prediction_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('b') => self.state.screen = Screen::Lineups,
            KeyCode::Char('t') => {
                self.state.screen = Screen::Teams;
                self.state.prediction = None;
            }
            _ => {}
        }
    }

    fn on_ratings_key(&mut self, key: KeyEvent) {
        let len = self.state.ratings.players.len();
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                self.state.ratings_scroll = (self.state.ratings_scroll + 1).min(len.saturating_sub(1));
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.state.ratings_scroll = self.state.ratings_scroll.saturating_sub(1);
            }
            KeyCode::Char('x') => self.export_ratings(),
            KeyCode::Esc | KeyCode::Char('b') => self.state.screen = Screen::Teams,
            _ => {}
        }
    }

    fn on_history_key(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('b')) {
            self.state.screen = Screen::Teams;
        }
    }

    fn run_prediction(&mut self) {
        if !self.state.lineups_complete() {
            self.state.status = format!(
                "Select exactly {LINEUP_SIZE} players for both teams ({}/{LINEUP_SIZE} vs {}/{LINEUP_SIZE})",
                self.state.xi_a.len(),
                self.state.xi_b.len()
            );
            return;
        }
        match predict(
            &self.state.xi_a,
            &self.state.xi_b,
            &self.state.ratings,
            &self.config,
        ) {
            Ok(prediction) => {
                self.state.prediction = Some(prediction);
                self.state.screen = Screen::Prediction;
                self.state.status.clear();
                self.store_prediction();
            }
            Err(err) => self.state.status = format!("prediction failed: {err}"),
        }
    }

    // History is best-effort: a missing cache dir never blocks a prediction.
    fn store_prediction(&mut self) {
        let Some(prediction) = self.state.prediction else {
            return;
        };
        let (Some(team_a), Some(team_b)) = (self.state.team_a.clone(), self.state.team_b.clone())
        else {
            return;
        };
        let Some(path) = persist::default_history_path() else {
            return;
        };
        let saved = persist::open_history(&path).and_then(|conn| {
            persist::record_prediction(
                &conn,
                &team_a,
                &team_b,
                &self.state.xi_a,
                &self.state.xi_b,
                &prediction,
            )
        });
        if let Err(err) = saved {
            self.state.status = format!("history not saved: {err}");
        }
    }

    fn load_history(&mut self) {
        let Some(path) = persist::default_history_path() else {
            return;
        };
        match persist::open_history(&path).and_then(|conn| persist::recent_predictions(&conn, 50)) {
            Ok(history) => self.state.history = history,
            Err(err) => self.state.status = format!("history unavailable: {err}"),
        }
    }

    fn export_ratings(&mut self) {
        let path = export::default_export_path();
        match export::export_ratings(&path, &self.state.ratings) {
            Ok(rows) => {
                self.state.status = format!("exported {rows} players to {}", path.display());
            }
            Err(err) => self.state.status = format!("export failed: {err}"),
        }
    }
}

fn wrap(cur: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    (cur as isize + delta).rem_euclid(len as isize) as usize
}

fn main() -> io::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let app = match build_app() {
        Ok(app) => app,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let mut app = app;
    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn build_app() -> anyhow::Result<App> {
    let data_dir = season_load::data_dir();
    let generated = sample_data::ensure_demo_data(&data_dir)?;

    let (season1, season2, squads) = season_load::load_all(&data_dir)?;
    let config = load_model_config();
    // Seed the cached copy on first run; an unwritable cache dir is not
    // worth refusing to start over.
    let _ = save_cached_config(&config);
    let ratings = ratings_cache::ratings_for(&season1, &season2, &config);

    let mut state = AppState::new(squads, ratings);
    if generated {
        state.status = format!("no data found; generated demo league in {}", data_dir.display());
    }
    Ok(App::new(state, config))
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                app.on_key(key);
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(&app.state))
        .style(Style::default().add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    match app.state.screen {
        Screen::Teams => render_teams(frame, chunks[1], &app.state),
        Screen::Lineups => render_lineups(frame, chunks[1], &app.state),
        Screen::Prediction => render_prediction(frame, chunks[1], &app.state),
        Screen::Ratings => render_ratings(frame, chunks[1], &app.state),
        Screen::History => render_history(frame, chunks[1], &app.state),
    }

    let footer = Paragraph::new(footer_text(&app.state));
    frame.render_widget(footer, chunks[2]);
}

fn header_text(state: &AppState) -> String {
    let screen = match state.screen {
        Screen::Teams => "TEAM SELECTION",
        Screen::Lineups => "PLAYING XI",
        Screen::Prediction => "PREDICTION",
        Screen::Ratings => "PLAYER RATINGS",
        Screen::History => "PREDICTION HISTORY",
    };
    format!("PSL MATCH PREDICTOR | {screen}")
}

fn footer_text(state: &AppState) -> String {
    if !state.status.is_empty() {
        return state.status.clone();
    }
    match state.screen {
        Screen::Teams => {
            "j/k Move | Enter Pick | Tab Side | g Go | r Ratings | h History | q Quit".to_string()
        }
        Screen::Lineups => {
            if state.searching {
                format!("Search: {}_ | Enter Done | Esc Clear", state.search)
            } else {
                "j/k Move | Space Toggle | / Search | Tab Side | a Auto XI | p Predict | b Back | q Quit"
                    .to_string()
            }
        }
        Screen::Prediction => "b Lineups | t New matchup | q Quit".to_string(),
        Screen::Ratings => "j/k Scroll | x Export xlsx | b Back | q Quit".to_string(),
        Screen::History => "b Back | q Quit".to_string(),
    }
}

fn render_teams(frame: &mut Frame, area: Rect, state: &AppState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let items: Vec<ListItem> = state
        .teams
        .iter()
        .enumerate()
        .map(|(i, team)| {
            let mut tags = String::new();
            if state.team_a.as_deref() == Some(team.as_str()) {
                tags.push_str(" [A]");
            }
            if state.team_b.as_deref() == Some(team.as_str()) {
                tags.push_str(" [B]");
            }
            let line = format!("{team}{tags}");
            let style = if i == state.team_cursor {
                Style::default().fg(Color::Black).bg(Color::Cyan)
            } else {
                Style::default()
            };
            ListItem::new(line).style(style)
        })
        .collect();

    let side = match state.picking {
        Side::A => "A",
        Side::B => "B",
    };
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" Teams (picking side {side}) ")),
    );
    frame.render_widget(list, columns[0]);

    let summary = format!(
        "Team A: {}\nTeam B: {}\n\nPlayers rated: {}",
        state.team_a.as_deref().unwrap_or("-"),
        state.team_b.as_deref().unwrap_or("-"),
        state.ratings.players.len()
    );
    let panel =
        Paragraph::new(summary).block(Block::default().borders(Borders::ALL).title(" Matchup "));
    frame.render_widget(panel, columns[1]);
}

fn render_lineups(frame: &mut Frame, area: Rect, state: &AppState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    for (idx, side) in [Side::A, Side::B].into_iter().enumerate() {
        let team = state.team_of(side).unwrap_or("-").to_string();
        let xi = state.xi_of(side);
        let editing = state.editing == side;

        // The side being edited shows the search-filtered view the cursor
        // addresses; the other side keeps its full squad visible.
        let players = if editing {
            state.filtered_squad(side)
        } else {
            state.squad_of(side).to_vec()
        };
        let items: Vec<ListItem> = players
            .iter()
            .enumerate()
            .map(|(i, player)| {
                let mark = if xi.contains(player) { "[x]" } else { "[ ]" };
                let rating = state.ratings.rating_of(player);
                let line = format!("{mark} {player:<28} {rating:+.2}");
                let style = if editing && i == state.lineup_cursor {
                    Style::default().fg(Color::Black).bg(Color::Cyan)
                } else {
                    Style::default()
                };
                ListItem::new(line).style(style)
            })
            .collect();

        let title = if editing && !state.search.is_empty() {
            format!(" {team} - XI {}/{LINEUP_SIZE} [/{}] ", xi.len(), state.search)
        } else {
            format!(" {team} - XI {}/{LINEUP_SIZE} ", xi.len())
        };
        let mut block = Block::default().borders(Borders::ALL).title(title);
        if editing {
            block = block.border_style(Style::default().fg(Color::Cyan));
        }
        frame.render_widget(List::new(items).block(block), columns[idx]);
    }
}

fn render_prediction(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(prediction) = state.prediction else {
        frame.render_widget(Paragraph::new("No prediction yet"), area);
        return;
    };
    let team_a = state.team_a.as_deref().unwrap_or("Team A");
    let team_b = state.team_b.as_deref().unwrap_or("Team B");

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let cards = [
        (team_a, prediction.pct_a, prediction.strength_a),
        (team_b, prediction.pct_b, prediction.strength_b),
    ];
    for (idx, (team, pct, strength)) in cards.into_iter().enumerate() {
        let tag = if pct >= 65 {
            "High chance"
        } else if pct >= 50 {
            "Slight edge"
        } else if pct >= 35 {
            "Underdog"
        } else {
            "Low chance"
        };
        let body = format!("\n   {pct}%\n\n   {tag}\n   XI strength: {strength:.2}");
        let color = if pct >= 50 { Color::Green } else { Color::Red };
        let card = Paragraph::new(body).style(Style::default().fg(color)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {team} ")),
        );
        frame.render_widget(card, columns[idx]);
    }
}

fn render_ratings(frame: &mut Frame, area: Rect, state: &AppState) {
    let header = Row::new(vec!["#", "Player", "Bat", "Bowl", "Field", "MVP", "Overall"])
        .style(Style::default().add_modifier(Modifier::BOLD));

    let ordered = state.ratings.sorted_by_rating();
    let rows: Vec<Row> = ordered
        .iter()
        .enumerate()
        .skip(state.ratings_scroll)
        .map(|(i, player)| {
            let comp = state
                .ratings
                .breakdown
                .get(*player)
                .copied()
                .unwrap_or_default();
            Row::new(vec![
                Cell::from(format!("{}", i + 1)),
                Cell::from(player.to_string()),
                Cell::from(format!("{:+.2}", comp.batting)),
                Cell::from(format!("{:+.2}", comp.bowling)),
                Cell::from(format!("{:+.2}", comp.fielding)),
                Cell::from(format!("{:+.2}", comp.mvp)),
                Cell::from(format!("{:+.2}", state.ratings.rating_of(player))),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(4),
            Constraint::Min(24),
            Constraint::Length(7),
            Constraint::Length(7),
            Constraint::Length(7),
            Constraint::Length(7),
            Constraint::Length(8),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title(" Ratings "));
    frame.render_widget(table, area);
}

fn render_history(frame: &mut Frame, area: Rect, state: &AppState) {
    let items: Vec<ListItem> = if state.history.is_empty() {
        vec![ListItem::new("No stored predictions yet")]
    } else {
        state
            .history
            .iter()
            .map(|rec| {
                ListItem::new(format!(
                    "{} | {} {}% vs {}% {}",
                    rec.recorded_at, rec.team_a, rec.pct_a, rec.pct_b, rec.team_b
                ))
            })
            .collect()
    };
    let list =
        List::new(items).block(Block::default().borders(Borders::ALL).title(" History "));
    frame.render_widget(list, area);
}
