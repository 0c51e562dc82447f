use std::fs::File;
use std::path::PathBuf;

use clap::Parser;

use logic_lab::persist::{read_json, write_json};
use logic_lab::synth::{synthesize, synthesize_inferred};

#[derive(Debug, Parser)]
#[command(author, version, about = "Synthesize a circuit from an expression and simulate it")]
struct Cli {
    /// Expression, e.g. "F = AB' + (C + D)'".
    #[arg(value_name = "EXPR", required_unless_present = "load")]
    expression: Option<String>,

    /// Variables, e.g. "ABCD". Inferred from the expression when omitted.
    #[arg(long, value_name = "CHARS")]
    vars: Option<String>,

    /// Load a saved circuit instead of synthesizing one.
    #[arg(long, value_name = "FILE")]
    load: Option<PathBuf>,

    /// Save the circuit as JSON.
    #[arg(long, value_name = "FILE")]
    save: Option<PathBuf>,

    /// Write the circuit in DOT format.
    #[arg(long, value_name = "FILE")]
    dot: Option<PathBuf>,
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

    let circuit = match (&args.load, &args.expression) {
        (Some(path), _) => read_json(File::open(path)?)?,
        (None, Some(expression)) => match &args.vars {
            Some(vars) => synthesize(expression, &vars.chars().collect::<Vec<_>>())?,
            None => synthesize_inferred(expression)?,
        },
        (None, None) => unreachable!("clap requires an expression or --load"),
    };
    println!(
        "circuit: {} gates, {} wires",
        circuit.gates().len(),
        circuit.wires().len()
    );
    for gate in circuit.gates() {
        println!("- {}", gate);
    }

    println!("\n{}", circuit.truth_table());

    if let Some(path) = &args.save {
        write_json(File::create(path)?, &circuit)?;
        println!("Saved circuit to {}", path.display());
    }
    if let Some(path) = &args.dot {
        std::fs::write(path, circuit.to_dot()?)?;
        println!("Wrote DOT to {}", path.display());
    }

    Ok(())
}
