use anyhow::Context;
use clap::Parser;
use xiangqi::fen::{parse_fen, INITIAL_FEN};
use xiangqi::perft::{divide, perft};
use xiangqi::Position;

#[derive(Parser, Debug)]
#[command(author, version, about = "Count leaf nodes of the xiangqi move tree", long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = String::from(INITIAL_FEN))]
    fen: String,

    #[arg(short, long, default_value_t = 3)]
    depth: u32,

    /// Print the node count below every root move
    #[arg(long)]
    divide: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    xiangqi::init();

    let setup = parse_fen(&args.fen).with_context(|| format!("cannot parse fen '{}'", args.fen))?;
    let pos = Position::from_setup(setup).context("illegal position")?;

    println!("Running perft on FEN: '{}' at depth {}", args.fen, args.depth);

    let start = std::time::Instant::now();
    let nodes = if args.divide {
        let counts = divide(&pos, args.depth);
        for (m, n) in &counts {
            println!("{}: {}", m, n);
        }
        println!("moves: {}", counts.len());
        counts.iter().map(|&(_, n)| n).sum()
    } else {
        perft(&pos, args.depth)
    };
    let duration = start.elapsed();

    if nodes == 0 {
        eprintln!("no legal moves in this position");
    }
    println!(
        "perft({}) = {} nodes ({} ms, {:.2} Mnps)",
        args.depth,
        nodes,
        duration.as_millis(),
        nodes as f64 / (duration.as_micros().max(1) as f64)
    );
    Ok(())
}
