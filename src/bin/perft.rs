use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use kestrel::io::fen::{parse_fen, START_FEN};
use kestrel::perft::{divide, perft};
use kestrel::{movegen, Move, Position, UndoInfo};
use log::{info, warn};
use rayon::prelude::*;
use serde::Deserialize;

#[derive(Parser, Debug)]
#[command(name = "perft", about = "Perft driver for kestrel")]
struct Args {
    /// Search depth
    #[arg(value_name = "DEPTH", default_value_t = 5)]
    depth: u32,
    /// FEN string or "startpos"
    #[arg(value_name = "FEN", default_value = "startpos")]
    fen: String,
    /// Number of threads for root-split
    #[arg(long, default_value_t = 1)]
    threads: usize,
    /// Print the node count of every root move
    #[arg(long, default_value_t = false)]
    divide: bool,
    /// Report elapsed time and NPS
    #[arg(long, default_value_t = false)]
    nps: bool,
    /// JSON-lines file of {"fen", "depth", "nodes"} records to verify instead
    #[arg(long)]
    suite: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct SuiteRecord {
    fen: String,
    depth: u32,
    nodes: u64,
}

fn load_position(fen: &str) -> Result<Position> {
    let fen = if fen == "startpos" { START_FEN } else { fen };
    parse_fen(fen).with_context(|| format!("invalid FEN: {fen}"))
}

// Root-split over rayon workers; each worker owns a clone of the position.
fn run(base: &Position, depth: u32, threads: usize) -> Result<u64> {
    if depth == 0 { return Ok(1); }
    let pool = rayon::ThreadPoolBuilder::new().num_threads(threads.max(1)).build()?;
    let nodes = pool.install(|| {
        let mut root = base.clone();
        if threads <= 1 {
            return perft(&mut root, depth);
        }
        let root_moves: Vec<Move> = movegen::legal_moves(&mut root).iter().copied().collect();
        root_moves.par_iter().map(|m| {
            let mut b = base.clone();
            let mut undo = UndoInfo::default();
            b.make_move(m, &mut undo);
            perft(&mut b, depth - 1)
        }).sum()
    });
    Ok(nodes)
}

fn run_suite(path: &PathBuf, threads: usize) -> Result<()> {
    let f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let mut records = Vec::new();
    for line in BufReader::new(f).lines() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        let rec: SuiteRecord = serde_json::from_str(&line).with_context(|| format!("bad suite line: {line}"))?;
        records.push(rec);
    }
    info!("loaded {} perft records from {}", records.len(), path.display());

    let bar = ProgressBar::new(records.len() as u64);
    bar.set_style(ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}")?);
    let mut failures = 0usize;
    for rec in &records {
        bar.set_message(format!("d{} {}", rec.depth, rec.fen));
        let pos = load_position(&rec.fen)?;
        let nodes = run(&pos, rec.depth, threads)?;
        if nodes != rec.nodes {
            failures += 1;
            bar.println(format!("MISMATCH {} depth {}: expected {} got {}", rec.fen, rec.depth, rec.nodes, nodes));
            warn!("perft mismatch on {}", rec.fen);
        }
        bar.inc(1);
    }
    bar.finish_and_clear();
    if failures > 0 {
        bail!("{failures} of {} perft records failed", records.len());
    }
    println!("all {} perft records passed", records.len());
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if let Some(path) = args.suite.as_ref() {
        return run_suite(path, args.threads);
    }

    let base = load_position(&args.fen)?;
    if args.divide {
        let mut pos = base.clone();
        let parts = divide(&mut pos, args.depth);
        for (m, n) in &parts {
            println!("{m}: {n}");
        }
        println!("moves: {} nodes: {}", parts.len(), parts.iter().map(|(_, n)| n).sum::<u64>());
        return Ok(());
    }

    let t0 = Instant::now();
    let nodes = run(&base, args.depth, args.threads)?;
    let dt = t0.elapsed().as_secs_f64();
    if args.nps {
        println!("nodes: {nodes} elapsed: {:.3}s nps: {:.1}", dt, nodes as f64 / dt.max(f64::EPSILON));
    } else {
        println!("nodes: {nodes}");
    }
    Ok(())
}
