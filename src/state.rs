use std::collections::BTreeMap;
use std::sync::Arc;

use crate::persist::PredictionRecord;
use crate::predict::{best_xi, Prediction, LINEUP_SIZE};
use crate::ratings::PlayerRatings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Teams,
    Lineups,
    Prediction,
    Ratings,
    History,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

/// All UI state. The rating table inside is read-only after construction;
/// every screen works against the same `Arc`.
pub struct AppState {
    pub screen: Screen,
    pub teams: Vec<String>,
    pub squads: BTreeMap<String, Vec<String>>,
    pub ratings: Arc<PlayerRatings>,

    pub team_cursor: usize,
    pub picking: Side,
    pub team_a: Option<String>,
    pub team_b: Option<String>,

    pub editing: Side,
    pub lineup_cursor: usize,
    pub search: String,
    pub searching: bool,
    pub xi_a: Vec<String>,
    pub xi_b: Vec<String>,

    pub prediction: Option<Prediction>,
    pub ratings_scroll: usize,
    pub history: Vec<PredictionRecord>,
    pub status: String,
}

impl AppState {
    pub fn new(squads: BTreeMap<String, Vec<String>>, ratings: Arc<PlayerRatings>) -> Self {
        let teams: Vec<String> = squads.keys().cloned().collect();
        Self {
            screen: Screen::Teams,
            teams,
            squads,
            ratings,
            team_cursor: 0,
            picking: Side::A,
            team_a: None,
            team_b: None,
            editing: Side::A,
            lineup_cursor: 0,
            search: String::new(),
            searching: false,
            xi_a: Vec::new(),
            xi_b: Vec::new(),
            prediction: None,
            ratings_scroll: 0,
            history: Vec::new(),
            status: String::new(),
        }
    }

    pub fn team_of(&self, side: Side) -> Option<&str> {
        match side {
            Side::A => self.team_a.as_deref(),
            Side::B => self.team_b.as_deref(),
        }
    }

    pub fn squad_of(&self, side: Side) -> &[String] {
        self.team_of(side)
            .and_then(|t| self.squads.get(t))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Squad members passing the current search filter, in squad order.
    /// An empty filter passes everyone.
    pub fn filtered_squad(&self, side: Side) -> Vec<String> {
        let needle = self.search.trim().to_lowercase();
        self.squad_of(side)
            .iter()
            .filter(|p| needle.is_empty() || p.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    pub fn push_search(&mut self, c: char) {
        self.search.push(c);
        self.lineup_cursor = 0;
    }

    pub fn pop_search(&mut self) {
        self.search.pop();
        self.lineup_cursor = 0;
    }

    pub fn clear_search(&mut self) {
        self.search.clear();
        self.searching = false;
        self.lineup_cursor = 0;
    }

    pub fn xi_of(&self, side: Side) -> &[String] {
        match side {
            Side::A => &self.xi_a,
            Side::B => &self.xi_b,
        }
    }

    /// Pick the highlighted team for the side currently being chosen.
    /// Choosing the same team for both sides is rejected.
    pub fn select_team(&mut self) {
        let Some(team) = self.teams.get(self.team_cursor).cloned() else {
            return;
        };
        match self.picking {
            Side::A => {
                if self.team_b.as_deref() == Some(team.as_str()) {
                    self.status = "Select two different teams".to_string();
                    return;
                }
                self.team_a = Some(team);
                self.picking = Side::B;
            }
            Side::B => {
                if self.team_a.as_deref() == Some(team.as_str()) {
                    self.status = "Select two different teams".to_string();
                    return;
                }
                self.team_b = Some(team);
            }
        }
        self.status.clear();
    }

    /// Both teams chosen: seed each side with its suggested best XI and
    /// move to the lineup editor.
    pub fn start_lineups(&mut self) {
        if self.team_a.is_none() || self.team_b.is_none() {
            self.status = "Pick both teams first".to_string();
            return;
        }
        self.xi_a = best_xi(self.squad_of(Side::A), &self.ratings);
        self.xi_b = best_xi(self.squad_of(Side::B), &self.ratings);
        self.editing = Side::A;
        self.lineup_cursor = 0;
        self.search.clear();
        self.searching = false;
        self.prediction = None;
        self.screen = Screen::Lineups;
        self.status.clear();
    }

    /// Toggle the highlighted squad player in or out of the editing side's
    /// XI. The cursor addresses the search-filtered view, and adding past
    /// eleven is refused rather than silently trimmed.
    pub fn toggle_player(&mut self) {
        let visible = self.filtered_squad(self.editing);
        let Some(player) = visible.get(self.lineup_cursor).cloned() else {
            return;
        };
        let xi = match self.editing {
            Side::A => &mut self.xi_a,
            Side::B => &mut self.xi_b,
        };
        if let Some(pos) = xi.iter().position(|p| *p == player) {
            xi.remove(pos);
            self.status.clear();
        } else if xi.len() >= LINEUP_SIZE {
            self.status = format!("XI already has {LINEUP_SIZE} players; remove one first");
        } else {
            xi.push(player);
            self.status.clear();
        }
    }

    pub fn auto_pick(&mut self) {
        let xi = best_xi(self.squad_of(self.editing), &self.ratings);
        match self.editing {
            Side::A => self.xi_a = xi,
            Side::B => self.xi_b = xi,
        }
        self.status.clear();
    }

    pub fn lineups_complete(&self) -> bool {
        self.xi_a.len() == LINEUP_SIZE && self.xi_b.len() == LINEUP_SIZE
    }

    pub fn move_cursor(&mut self, delta: isize, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        let cur = self.lineup_cursor as isize + delta;
        cur.rem_euclid(len as isize) as usize
    }
}
