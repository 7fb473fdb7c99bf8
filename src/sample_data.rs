use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rand::Rng;

use crate::season_load::{SEASON1_DIR, SEASON2_DIR, SQUADS_FILE};

const TEAMS: [&str; 8] = [
    "Bubak Blasters",
    "Fazilpur Falcons",
    "Kot Bahadur Shah Bulls",
    "Keamari Kings",
    "Mahmoodkot Mavericks",
    "Macchike Mustangs",
    "Port Qasim Panthers",
    "Shikarpur Stallions",
];

const FIRST_NAMES: [&str; 16] = [
    "Asad", "Bilal", "Danish", "Faisal", "Hamza", "Imran", "Junaid", "Kamran", "Nadeem", "Omar",
    "Qasim", "Rashid", "Saad", "Tariq", "Usman", "Zohaib",
];

const LAST_NAMES: [&str; 16] = [
    "Abbasi", "Afridi", "Akhtar", "Anwar", "Baig", "Chaudhry", "Farooq", "Hussain", "Iqbal",
    "Khan", "Malik", "Mirza", "Qureshi", "Raza", "Shah", "Yousaf",
];

const SQUAD_SIZE: usize = 14;

/// Generate a demo data dir (squads plus two seasons of leaderboards) so
/// the binary runs out of the box without real league exports. No-op when
/// the dir already exists; returns whether anything was written.
pub fn ensure_demo_data(dir: &Path) -> Result<bool> {
    if dir.exists() {
        return Ok(false);
    }
    let mut rng = rand::thread_rng();

    let squads: Vec<(String, Vec<String>)> = TEAMS
        .iter()
        .enumerate()
        .map(|(t, team)| (team.to_string(), demo_squad(t)))
        .collect();

    fs::create_dir_all(dir).with_context(|| format!("create data dir {}", dir.display()))?;
    write_squads(&dir.join(SQUADS_FILE), &squads)?;

    for (season_dir, tournament_id) in [(SEASON1_DIR, 1441602u32), (SEASON2_DIR, 1786448u32)] {
        let season_path = dir.join(season_dir);
        fs::create_dir_all(&season_path)
            .with_context(|| format!("create season dir {}", season_path.display()))?;
        write_season(&season_path, tournament_id, &squads, &mut rng)?;
    }
    Ok(true)
}

/// Deterministic name pool per team slot; plausible but synthetic.
fn demo_squad(team_idx: usize) -> Vec<String> {
    (0..SQUAD_SIZE)
        .map(|i| {
            let first = FIRST_NAMES[(team_idx * 5 + i * 3) % FIRST_NAMES.len()];
            let last = LAST_NAMES[(team_idx * 7 + i) % LAST_NAMES.len()];
            format!("{first} {last}")
        })
        .collect()
}

fn write_squads(path: &Path, squads: &[(String, Vec<String>)]) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("write {}", path.display()))?;
    writer.write_record(["Team", "Player"])?;
    for (team, players) in squads {
        for player in players {
            writer.write_record([team.as_str(), player.as_str()])?;
        }
    }
    writer.flush().context("flush squads csv")?;
    Ok(())
}

fn write_season(
    dir: &Path,
    tournament_id: u32,
    squads: &[(String, Vec<String>)],
    rng: &mut impl Rng,
) -> Result<()> {
    let players: Vec<&String> = squads.iter().flat_map(|(_, ps)| ps.iter()).collect();

    let bat_path = dir.join(format!("{tournament_id}_batting_leaderboard.csv"));
    let mut bat = csv::Writer::from_path(&bat_path)
        .with_context(|| format!("write {}", bat_path.display()))?;
    bat.write_record(["Player", "Mat", "Inns", "Runs", "SR", "Avg", "50s", "100s"])?;
    for p in &players {
        let inns = rng.gen_range(1..=10);
        let runs = rng.gen_range(0..=400);
        bat.write_record([
            p.as_str(),
            &inns.to_string(),
            &inns.to_string(),
            &runs.to_string(),
            &format!("{:.1}", rng.gen_range(60.0..190.0)),
            &format!("{:.1}", rng.gen_range(5.0..60.0)),
            &rng.gen_range(0..=3).to_string(),
            &rng.gen_range(0..=1).to_string(),
        ])?;
    }
    bat.flush().context("flush batting csv")?;

    let bowl_path = dir.join(format!("{tournament_id}_bowling_leaderboard.csv"));
    let mut bowl = csv::Writer::from_path(&bowl_path)
        .with_context(|| format!("write {}", bowl_path.display()))?;
    bowl.write_record(["Player", "Mat", "Wkts", "Econ", "Avg", "SR"])?;
    for p in &players {
        bowl.write_record([
            p.as_str(),
            &rng.gen_range(1..=10).to_string(),
            &rng.gen_range(0..=18).to_string(),
            &format!("{:.2}", rng.gen_range(5.0..11.0)),
            &format!("{:.1}", rng.gen_range(12.0..45.0)),
            &format!("{:.1}", rng.gen_range(10.0..30.0)),
        ])?;
    }
    bowl.flush().context("flush bowling csv")?;

    let field_path = dir.join(format!("{tournament_id}_fielding_leaderboard.csv"));
    let mut field = csv::Writer::from_path(&field_path)
        .with_context(|| format!("write {}", field_path.display()))?;
    field.write_record(["Player", "Catches", "Run Outs"])?;
    for p in &players {
        field.write_record([
            p.as_str(),
            &rng.gen_range(0..=8).to_string(),
            &rng.gen_range(0..=3).to_string(),
        ])?;
    }
    field.flush().context("flush fielding csv")?;

    let mvp_path = dir.join(format!("{tournament_id}_mvp_leaderboard.csv"));
    let mut mvp = csv::Writer::from_path(&mvp_path)
        .with_context(|| format!("write {}", mvp_path.display()))?;
    mvp.write_record(["Player", "Points"])?;
    for p in &players {
        mvp.write_record([p.as_str(), &format!("{:.1}", rng.gen_range(0.0..120.0))])?;
    }
    mvp.flush().context("flush mvp csv")?;

    Ok(())
}
