//! Hot-seat terminal front end
//!
//! Plays a local match on stdin/stdout:
//!
//! ```text
//! board                 print every segment
//! moves <tile>          list legal destinations
//! move <from> <to>      move the figure on <from>
//! promote <tile> <fig>  promote a pawn (queen, rook, bishop, knight)
//! surrender             give up for the player to move
//! quit
//! ```
//!
//! Tiles are given as `file,rank,segment` or as a plain tile id.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use ring_engine::api::{game_status, GameStatus};
use ring_engine::board::{file_of, rank_of, segment_of, tile_id};
use ring_engine::constants::{FILES, RANKS};
use ring_engine::{Field, Figure, TileId};
use ringchess::core::{load_settings, save_settings, settings_path, Settings};
use ringchess::session::{Session, SessionError};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "ringchess", about = "Chess around a ring of 2 to 8 players")]
struct Cli {
    /// Number of players, overrides the settings file
    #[arg(short, long)]
    players: Option<u32>,

    /// Player name, overrides the settings file
    #[arg(short, long)]
    name: Option<String>,

    /// Settings file to use instead of the per-user one
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Write the effective settings back before starting
    #[arg(long)]
    save_settings: bool,

    /// `tracing` filter, overrides RUST_LOG and the settings file
    #[arg(long)]
    log: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let path = cli.settings.clone().unwrap_or_else(settings_path);
    let mut settings = load_settings(&path);

    let filter = match (&cli.log, EnvFilter::try_from_default_env()) {
        (Some(directives), _) => EnvFilter::new(directives),
        (None, Ok(filter)) => filter,
        (None, Err(_)) => EnvFilter::new(&settings.log_filter),
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    apply_overrides(&mut settings, &cli);
    settings.validate().context("invalid settings")?;
    if cli.save_settings {
        save_settings(&settings, &path).context("failed to save settings")?;
    }

    let mut session = Session::local(settings.num_players)?;
    info!("{} starts a match with {} players", settings.player_name, settings.num_players);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    print_board(session.field().ok_or(SessionError::NoBoard)?);

    loop {
        let field = session.field().ok_or(SessionError::NoBoard)?;
        match game_status(field) {
            GameStatus::Won { winner } => {
                println!("player {} wins", winner);
                break;
            }
            GameStatus::Over => {
                println!("nobody can move any more");
                break;
            }
            GameStatus::Playing {
                current_player,
                in_check,
            } => {
                let check = if in_check { " (check)" } else { "" };
                print!("player {}{}> ", current_player, check);
                stdout.flush()?;
            }
        }

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        match run_command(&mut session, line.trim()) {
            Ok(true) => break,
            Ok(false) => {}
            Err(e) => {
                error!("{:#}", e);
                println!("error: {:#}", e);
            }
        }
    }

    Ok(())
}

fn apply_overrides(settings: &mut Settings, cli: &Cli) {
    if let Some(players) = cli.players {
        settings.num_players = players;
    }
    if let Some(name) = &cli.name {
        settings.player_name = name.clone();
    }
    if let Some(log) = &cli.log {
        settings.log_filter = log.clone();
    }
}

/// Run one command line; returns `true` on quit
fn run_command(session: &mut Session, line: &str) -> Result<bool> {
    let words: Vec<&str> = line.split_whitespace().collect();

    match words.as_slice() {
        [] => {}
        ["quit"] | ["exit"] => return Ok(true),
        ["board"] => print_board(session.field().ok_or(SessionError::NoBoard)?),
        ["moves", tile] => {
            let tile = parse_tile(tile)?;
            let targets = session.legal_moves(tile)?;
            if targets.is_empty() {
                println!("no legal moves");
            }
            for target in targets {
                println!("  {} {:?}", format_tile(target.tile), target.kind);
            }
        }
        ["move", from, to] => {
            let (from, to) = (parse_tile(from)?, parse_tile(to)?);
            session.play(from, to)?;
            if session.promotion_pending(to) {
                println!("pawn on {} promotes: promote {} <figure>", format_tile(to), format_tile(to));
            } else {
                print_board(session.field().ok_or(SessionError::NoBoard)?);
            }
        }
        ["promote", tile, figure] => {
            session.promote_figure(parse_tile(tile)?, parse_figure(figure)?)?;
            print_board(session.field().ok_or(SessionError::NoBoard)?);
        }
        ["surrender"] => {
            let player = session.field().ok_or(SessionError::NoBoard)?.current_player;
            session.surrender(player)?;
        }
        _ => bail!("unknown command: {}", line),
    }
    Ok(false)
}

fn parse_tile(text: &str) -> Result<TileId> {
    let parts: Vec<&str> = text.split(',').collect();
    match parts.as_slice() {
        [id] => id.parse().with_context(|| format!("bad tile id {:?}", text)),
        [file, rank, segment] => {
            let file: u32 = file.parse().context("bad file")?;
            let rank: u32 = rank.parse().context("bad rank")?;
            let segment: u32 = segment.parse().context("bad segment")?;
            if file >= FILES || rank >= RANKS {
                bail!("tile {:?} is off the segment", text);
            }
            Ok(tile_id(file, rank, segment))
        }
        _ => Err(anyhow!("tiles look like file,rank,segment or a tile id, got {:?}", text)),
    }
}

fn parse_figure(text: &str) -> Result<Figure> {
    match text.to_ascii_lowercase().as_str() {
        "q" | "queen" => Ok(Figure::Queen),
        "r" | "rook" => Ok(Figure::Rook),
        "b" | "bishop" => Ok(Figure::Bishop),
        "n" | "knight" => Ok(Figure::Knight),
        _ => bail!("cannot promote to {:?}", text),
    }
}

fn format_tile(tile: TileId) -> String {
    format!("{},{},{}", file_of(tile), rank_of(tile), segment_of(tile))
}

fn figure_letter(figure: Figure) -> char {
    match figure {
        Figure::None => '.',
        Figure::Pawn => 'P',
        Figure::Bishop => 'B',
        Figure::Knight => 'N',
        Figure::Rook => 'R',
        Figure::Queen => 'Q',
        Figure::King => 'K',
    }
}

fn print_board(field: &Field) {
    for segment in 0..field.num_players {
        println!("segment {}", segment);
        for rank in (0..RANKS).rev() {
            let row: Vec<String> = (0..FILES)
                .map(|file| {
                    let tile = &field.tiles[tile_id(file, rank, segment) as usize];
                    if tile.is_empty() {
                        " . ".to_string()
                    } else {
                        format!("{}{} ", figure_letter(tile.figure), tile.player)
                    }
                })
                .collect();
            println!("  {} {}", rank, row.concat());
        }
    }
}
