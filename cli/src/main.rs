use std::{fs, path::Path, path::PathBuf};

use adventure_engine::api::{run_session, session_streams, simulate_many, SessionConfig};
use adventure_engine::content::bus_challenge;
use adventure_engine::{option_pair, BinaryOracle, Character, Column, SeededSource};
use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use encoding_rs::Encoding;
use tracing::Level;

#[derive(Copy, Clone, ValueEnum)]
enum Col {
    HighLow,
    YesNo,
    Ab,
}

#[derive(Subcommand)]
enum Cmd {
    /// Ask the oracle for plain answers from one column of its table
    Draw {
        /// RNG seed for determinism
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Which label column to read
        #[arg(long, value_enum, default_value_t = Col::YesNo)]
        column: Col,
        /// Number of draws
        #[arg(long, default_value_t = 5)]
        count: u32,
    },
    /// Let the oracle pick between a success text (A) and a failure text (B)
    Outcome {
        /// RNG seed for determinism
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Text for the A (success) option
        #[arg(long)]
        a: String,
        /// Text for the B (failure) option
        #[arg(long)]
        b: String,
    },
    /// Generate a character from an attribute pool
    Character {
        /// RNG seed for determinism
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Character name
        #[arg(long, default_value = "Brian")]
        name: String,
        /// Attribute names making up the pool
        #[arg(
            long = "attribute",
            num_args = 1..,
            default_values = ["Speed", "Morality", "Toughness"]
        )]
        attributes: Vec<String>,
        /// How many attributes to sample (defaults to the whole pool)
        #[arg(long)]
        count: Option<usize>,
        /// Print JSON instead of text
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Play the built-in bus challenge with a freshly generated character
    Play {
        /// RNG seed; overrides the config file
        #[arg(long)]
        seed: Option<u64>,
        /// Optional session config JSON
        #[arg(long)]
        config: Option<PathBuf>,
        /// Print JSON instead of text
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Run the bus challenge many times and report how often it succeeds
    Simulate {
        /// Base seed (sample i uses seed+i)
        #[arg(long, default_value_t = 12345)]
        seed: u64,
        /// Number of samples
        #[arg(long, default_value_t = 1000)]
        samples: u32,
        /// Optional session config JSON
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Parser)]
#[command(name = "adventure")]
#[command(about = "Choose-your-own-adventure challenge harness")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Cmd,
}

fn to_column(c: Col) -> Column {
    match c {
        Col::HighLow => Column::HighLow,
        Col::YesNo => Column::YesNo,
        Col::Ab => Column::AB,
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn read_text_auto(path: &Path) -> anyhow::Result<String> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    if let Some((enc, bom_len)) = Encoding::for_bom(&bytes) {
        let (cow, _, _) = enc.decode(&bytes[bom_len..]);
        Ok(cow.into_owned())
    } else {
        Ok(String::from_utf8(bytes)?)
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<SessionConfig> {
    match path {
        Some(p) => SessionConfig::from_json(&read_text_auto(p)?)
            .with_context(|| format!("invalid session config: {}", p.display())),
        None => Ok(SessionConfig::default()),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.cmd {
        Cmd::Draw {
            seed,
            column,
            count,
        } => {
            let mut oracle = BinaryOracle::new(SeededSource::from_seed(seed));
            for _ in 0..count {
                println!("{}", oracle.pick(to_column(column)));
            }
        }
        Cmd::Outcome { seed, a, b } => {
            let mut oracle = BinaryOracle::new(SeededSource::from_seed(seed));
            let options = option_pair(a, b);
            let res = oracle.resolve_outcome(&options)?;
            println!("{} => {}", res.key, res.text);
        }
        Cmd::Character {
            seed,
            name,
            attributes,
            count,
            json,
        } => {
            let cfg = SessionConfig::default().with_attributes(attributes);
            let pool = cfg.pool();
            let (mut sampler, source) = session_streams(Some(seed));
            let mut oracle = BinaryOracle::new(source);
            let character = Character::generate_with_rng(
                &mut oracle,
                &pool,
                name,
                count.unwrap_or(pool.len()),
                &mut sampler,
            )?;
            if json {
                println!("{}", serde_json::to_string_pretty(&character)?);
            } else {
                println!("{} (points {})", character.name(), character.points());
                for (attr, level) in character.attributes() {
                    println!("  {attr}: {level}");
                }
            }
        }
        Cmd::Play { seed, config, json } => {
            let mut cfg = load_config(config.as_deref())?;
            if let Some(seed) = seed {
                cfg = cfg.with_seed(seed);
            }
            let res = run_session(&cfg, &bus_challenge())?;
            if json {
                println!("{}", serde_json::to_string_pretty(&res)?);
            } else {
                for line in &res.verdict.output {
                    println!("{line}");
                }
                println!(
                    "=> {} (next: {})",
                    if res.verdict.success { "SUCCESS" } else { "FAIL" },
                    res.verdict.next
                );
            }
        }
        Cmd::Simulate {
            seed,
            samples,
            config,
        } => {
            let cfg = load_config(config.as_deref())?.with_seed(seed);
            let challenge = bus_challenge();
            let stats = simulate_many(&cfg, &challenge, samples)?;

            println!("simulate results");
            println!("----------------");
            println!("challenge:          {}", challenge.id());
            println!("samples:            {}", stats.samples);
            println!("success rate:       {:.1}%", stats.success_rate() * 100.0);
            println!("missing attribute:  {}", stats.missing_attribute);
            for (mode, n) in &stats.by_mode {
                println!("{:<20}{}", format!("{mode}:"), n);
            }
        }
    }
    Ok(())
}
