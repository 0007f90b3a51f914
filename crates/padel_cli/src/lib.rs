//! Padel CLI
//!
//! Scores matches kept as compressed files in a data directory.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use padel_core::api::CreateMatchRequest;
use padel_core::display::{get_game_score_display, match_summary, serving_display};
use padel_core::{
    FileMatchStore, FormatPreset, Match, MatchService, MatchStatus, MatchStore, ServiceConfig,
    SettingsOverrides, Team, TeamInfo, GLOBAL_HUB,
};
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "padel")]
#[command(about = "Score padel and tennis matches point by point", long_about = None)]
pub struct Cli {
    /// Directory holding match files (overrides config)
    #[arg(long, global = true, env = "PADEL_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a match and print its id
    New {
        #[arg(long, default_value = "")]
        team_a: String,
        /// First player of team A
        #[arg(long)]
        a1: String,
        /// Second player of team A
        #[arg(long)]
        a2: String,

        #[arg(long, default_value = "")]
        team_b: String,
        #[arg(long)]
        b1: String,
        #[arg(long)]
        b2: String,

        /// standard, golden_point, short_sets or single_set
        #[arg(long)]
        preset: Option<FormatPreset>,

        #[arg(long)]
        sets_to_win: Option<u32>,
        #[arg(long)]
        games_per_set: Option<u32>,
        #[arg(long)]
        tiebreak_points: Option<u32>,
        #[arg(long)]
        golden_point: Option<bool>,
        #[arg(long)]
        super_tiebreak: Option<bool>,

        /// Team serving first
        #[arg(long, default_value = "a", value_parser = parse_team)]
        serve: Team,
    },

    /// Award a point to team a or b
    Point {
        id: String,
        #[arg(value_parser = parse_team)]
        team: Team,
    },

    /// Take back the last point
    Undo { id: String },

    /// Print the scoreboard
    Show {
        id: String,
        /// Print the full match as JSON
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// List stored matches
    List,

    /// Print the JSON Schema of a match
    Schema,
}

fn parse_team(value: &str) -> std::result::Result<Team, String> {
    Team::parse(value).ok_or_else(|| format!("expected 'a' or 'b', got '{value}'"))
}

/// Execute one command against the resolved configuration.
pub fn run(cli: Cli, mut config: ServiceConfig, out: &mut dyn Write) -> Result<()> {
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    log::debug!("Using data directory {:?}", config.data_dir);

    let service = MatchService::new(FileMatchStore::new(&config.data_dir), GLOBAL_HUB.clone());

    match cli.command {
        Commands::New {
            team_a,
            a1,
            a2,
            team_b,
            b1,
            b2,
            preset,
            sets_to_win,
            games_per_set,
            tiebreak_points,
            golden_point,
            super_tiebreak,
            serve,
        } => {
            let request = CreateMatchRequest {
                schema_version: None,
                team_a: TeamInfo::new(team_a, a1, a2),
                team_b: TeamInfo::new(team_b, b1, b2),
                preset: Some(preset.unwrap_or(config.default_preset)),
                settings: Some(SettingsOverrides {
                    sets_to_win,
                    games_per_set,
                    tiebreak_points,
                    golden_point,
                    super_tiebreak,
                }),
                serving_team: Some(serve.to_string()),
            };
            if let Err(e) = request.validate() {
                bail!("{} ({})", e.message, e.code);
            }

            let (team_a, team_b) = request.teams();
            let created = service.create_match(team_a, team_b, &request.overrides(), serve)?;
            writeln!(out, "{}", created.id)?;
            write!(out, "{}", render_scoreboard(&created))?;
        }

        Commands::Point { id, team } => {
            let before = service.get_match(&id)?;
            if before.is_completed() {
                bail!("Match {} is already decided", id);
            }
            let next = service.score_point(&id, team)?;
            write!(out, "{}", render_scoreboard(&next))?;
        }

        Commands::Undo { id } => {
            let current = service.get_match(&id)?;
            if !current.can_undo() {
                bail!("Match {} has no points to undo", id);
            }
            let next = service.undo_last_point(&id)?;
            write!(out, "{}", render_scoreboard(&next))?;
        }

        Commands::Show { id, json } => {
            let m = service.get_match(&id)?;
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&m)?)?;
            } else {
                write!(out, "{}", render_scoreboard(&m))?;
            }
        }

        Commands::List => {
            for id in service.store().list_ids()? {
                let m = service
                    .get_match(&id)
                    .with_context(|| format!("Failed to load match {}", id))?;
                writeln!(out, "{}  {} vs {}  {}", id, m.team_a.name, m.team_b.name, status_line(&m))?;
            }
        }

        Commands::Schema => {
            let schema = padel_core::api::match_json_schema();
            writeln!(out, "{}", serde_json::to_string_pretty(&schema)?)?;
        }
    }

    Ok(())
}

fn status_line(m: &Match) -> String {
    let summary = match_summary(m);
    let summary = if summary.is_empty() { "-".to_string() } else { summary };
    match (m.status, m.score.winner) {
        (MatchStatus::Completed, Some(winner)) => format!("{}  won by {}", summary, m.team(winner).name),
        _ => format!("{}  in progress", summary),
    }
}

/// Multi-line scoreboard for the terminal.
pub fn render_scoreboard(m: &Match) -> String {
    let score = &m.score;
    let game = get_game_score_display(&score.current_game);
    let set = score.current_set();
    let serving = serving_display(score);

    let mut lines = vec![
        format!("{} ({} / {})  vs  {} ({} / {})", m.team_a.name, m.team_a.player_1, m.team_a.player_2,
            m.team_b.name, m.team_b.player_1, m.team_b.player_2),
        format!("Sets:    {}", status_line(m)),
    ];
    if !m.is_completed() {
        let label = if score.current_game.is_tiebreak { "Tiebreak:" } else { "Game:   " };
        lines.push(format!("Games:   {}-{}", set.games_a, set.games_b));
        lines.push(format!("{} {}-{}", label, game.a, game.b));
        let team = m.team(serving.team);
        lines.push(format!("Serving: {} ({})", team.player(serving.player), team.name));
    }

    let mut rendered = lines.join("\n");
    rendered.push('\n');
    rendered
}
