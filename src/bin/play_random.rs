use anyhow::{bail, Result};
use clap::Parser;
use kestrel::io::fen::to_fen;
use kestrel::search::tt::Bound;
use kestrel::{movegen, Move, Position, TranspositionTable, UndoInfo};
use log::{debug, info};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Plays random legal games, checking after every move that the incremental
/// hash matches a recomputation and that unmaking restores every position.
/// Visited positions are stored in a transposition table whose statistics
/// are printed at the end.
#[derive(Parser, Debug)]
#[command(name = "play_random", about = "Random-game self check for kestrel")]
struct Args {
    /// Number of games
    #[arg(long, default_value_t = 100)]
    games: usize,
    /// Maximum plies per game
    #[arg(long, default_value_t = 200)]
    max_plies: usize,
    /// RNG seed
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// Transposition table size in MB
    #[arg(long, default_value_t = 16)]
    hash_mb: usize,
}

fn material_balance(pos: &Position) -> i32 {
    pos.material(true) - pos.material(false)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let mut rng = SmallRng::seed_from_u64(args.seed);
    let mut tt = TranspositionTable::with_capacity_mb(args.hash_mb);
    let mut failures = 0usize;
    let mut total_plies = 0usize;

    for g in 0..args.games {
        let mut pos = Position::startpos();
        let mut line: Vec<(Move, UndoInfo, Position)> = Vec::with_capacity(args.max_plies);
        for ply in 0..args.max_plies {
            let moves = movegen::legal_moves(&mut pos);
            if moves.is_empty() { break; }
            let mut m = moves[rng.gen_range(0..moves.len())];
            let before = pos.clone();
            let mut undo = UndoInfo::default();
            pos.make_move(&m, &mut undo);
            if pos.zobrist_hash() != pos.compute_zobrist_hash() {
                failures += 1;
                println!("hash drift in game {g} after {m}: {}", to_fen(&pos));
            }
            let eval = material_balance(&pos);
            m.score = if before.white_move() { eval } else { -eval };
            let depth = (args.max_plies - ply).min(60) as i32;
            tt.insert(before.history_hash(), &m, Bound::Exact, ply as i32, depth, eval);
            line.push((m, undo, before));
        }
        total_plies += line.len();
        debug!("game {g}: {} plies, final {}", line.len(), to_fen(&pos));
        while let Some((m, undo, before)) = line.pop() {
            pos.unmake_move(&m, &undo);
            if pos != before {
                failures += 1;
                println!("unmake of {m} did not restore {}", to_fen(&before));
            }
        }
        tt.next_generation();
    }

    info!("played {} games, {} plies", args.games, total_plies);
    println!("{}", serde_json::to_string_pretty(&tt.stats())?);
    if failures > 0 {
        bail!("{failures} consistency failures");
    }
    println!("ok: {} games, {} plies", args.games, total_plies);
    Ok(())
}
