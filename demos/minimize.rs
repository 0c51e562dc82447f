use clap::Parser;

use logic_lab::function::{parse_indices, BooleanFunction};
use logic_lab::types::OptimizationType;

#[derive(Debug, Parser)]
#[command(author, version, about = "Minimize a Boolean function and show its K-map groups")]
struct Cli {
    /// Number of variables (2 to 4).
    #[arg(short, long, value_name = "INT", default_value = "4")]
    vars: usize,

    /// Minterms, comma-separated.
    #[arg(short, long, value_name = "LIST")]
    minterms: String,

    /// Don't-cares, comma-separated.
    #[arg(short, long, value_name = "LIST", default_value = "")]
    dont_cares: String,

    /// Produce a product of sums instead of a sum of products.
    #[arg(long)]
    pos: bool,

    /// Print the truth table.
    #[arg(long)]
    table: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let args = Cli::parse();
    println!("args = {:?}", args);

    if !(2..=4).contains(&args.vars) {
        color_eyre::eyre::bail!("--vars must be 2, 3 or 4, got {}", args.vars);
    }

    let optimization = if args.pos {
        OptimizationType::Pos
    } else {
        OptimizationType::Sop
    };
    let f = BooleanFunction::new(args.vars)
        .with_minterms(&parse_indices(&args.minterms, args.vars))
        .with_dont_cares(&parse_indices(&args.dont_cares, args.vars))
        .with_optimization(optimization);
    println!("minterms   = {:?}", f.minterms());
    println!("dont-cares = {:?}", f.dont_cares());

    if args.table {
        println!("\n{}", f.truth_table());
    }

    let report = f.minimization();
    println!("\nPrime implicants:");
    for (i, prime) in report.primes.iter().enumerate() {
        let mark = if report.essentials.contains(&i) { "*" } else { " " };
        println!("{} {}", mark, prime);
    }

    println!("\nK-map:\n{}", f.kmap());
    println!("Groups ({}):", optimization);
    for group in f.groups() {
        println!(
            "  {:>2} cells {:?} -> {} [{}]",
            group.size,
            group.minterms,
            group.term(f.variables(), optimization),
            group.color()
        );
    }

    println!("\n{}", f.minimize());

    Ok(())
}
