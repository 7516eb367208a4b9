use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::PathBuf,
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{LevelFilter, info};
use nmea0183_rmc::{
    Decoder, ParseOutcome, Validation,
    driver::{self, DEFAULT_MAX_FIXES},
    generator::Generator,
};
use rand::{SeedableRng, rngs::StdRng};
use time::{OffsetDateTime, PrimitiveDateTime};

#[derive(Parser)]
#[command(name = "rmc")]
#[command(about = "Decode and generate NMEA 0183 RMC sentences")]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Run the built-in sample sentences through the decoder")]
    Check,
    Generate(GenerateArgs),
    Parse(ParseArgs),
}

#[derive(clap::Args)]
#[command(about = "Write random-walk RMC sentences to a file")]
struct GenerateArgs {
    output: PathBuf,

    #[arg(long, default_value_t = 300)]
    count: usize,

    /// Seed for a reproducible walk
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(clap::Args)]
#[command(about = "Decode RMC sentences from a file and log the time and position of each fix")]
struct ParseArgs {
    input: PathBuf,
    output: PathBuf,

    #[arg(long, default_value_t = DEFAULT_MAX_FIXES)]
    max_fixes: usize,

    /// Reject out-of-range times, dates, coordinates and headings
    #[arg(long)]
    strict: bool,
}

const CHECKS: [(&str, &str, ParseOutcomeKind); 5] = [
    (
        "valid parse with fix",
        "$GPRMC,102642.03,A,4813.7943164,S,01621.5693035,W,7.158,156.6705,020713,020.32,E*51",
        ParseOutcomeKind::Fix,
    ),
    (
        "valid parse with no fix",
        "$GPRMC,102642.03,V,4813.7943164,N,01621.5693035,E,7.158,156.6705,020713,020.32,E*49",
        ParseOutcomeKind::NoFix,
    ),
    (
        "failed checksum",
        "$GPRMC,102642.03,V,4813.7943164,N,01621.5693035,E,7.158,156.6705,020713,020.32,E*5E",
        ParseOutcomeKind::Malformed,
    ),
    (
        "invalid latitude",
        "$GPRMC,102642.03,A,4813.7943164,I,01621.5693035,E,7.158,156.6705,020713,020.32,E*59",
        ParseOutcomeKind::Malformed,
    ),
    (
        "invalid longitude",
        "$GPRMC,102642.03,A,4813.7943164,N,1.5693035,E,7.158,156.6705,020713,020.32,E*5B",
        ParseOutcomeKind::Malformed,
    ),
];

#[derive(Clone, Copy, PartialEq)]
enum ParseOutcomeKind {
    Fix,
    NoFix,
    Malformed,
}

impl From<&ParseOutcome> for ParseOutcomeKind {
    fn from(outcome: &ParseOutcome) -> Self {
        match outcome {
            ParseOutcome::FixObtained(_) => ParseOutcomeKind::Fix,
            ParseOutcome::NoFix => ParseOutcomeKind::NoFix,
            ParseOutcome::Malformed => ParseOutcomeKind::Malformed,
        }
    }
}

fn check() -> bool {
    let decoder = Decoder::default();
    let mut passed = true;

    for (name, sentence, expected) in CHECKS {
        print!("*** Expect output of {name}.......");

        let result = decoder.try_decode(sentence);
        let outcome = ParseOutcome::from(result);
        match (&outcome, result) {
            (ParseOutcome::FixObtained(fix), _) => println!("Valid RMC with fix\n{fix:?}"),
            (ParseOutcome::NoFix, _) => println!("Valid RMC with no fix"),
            (_, Err(e)) => println!("{e}"),
            _ => println!(),
        }

        if ParseOutcomeKind::from(&outcome) == expected {
            println!("PASSED");
        } else {
            println!("FAILED");
            passed = false;
        }
    }

    passed
}

fn generate(args: GenerateArgs) -> Result<()> {
    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let now = OffsetDateTime::now_utc();
    let start = PrimitiveDateTime::new(now.date(), now.time());

    let file = File::create(&args.output)
        .with_context(|| format!("Failed to open output file {}", args.output.display()))?;
    let mut output = BufWriter::new(file);

    for sample in Generator::new(rng, start).take(args.count) {
        writeln!(output, "{}", sample.sentence)?;
    }
    output.flush()?;

    info!("wrote {} sentences to {}", args.count, args.output.display());

    Ok(())
}

fn parse(args: ParseArgs) -> Result<()> {
    let input = File::open(&args.input)
        .with_context(|| format!("Failed to open input file {}", args.input.display()))?;
    let output = File::create(&args.output)
        .with_context(|| format!("Failed to open output file {}", args.output.display()))?;

    let validation = if args.strict {
        Validation::Strict
    } else {
        Validation::Permissive
    };

    let summary = driver::run(
        BufReader::new(input),
        BufWriter::new(output),
        &Decoder::new(validation),
        Some(args.max_fixes),
    )?;

    println!(
        "Done!\tParsed {} sentences to obtain {} fixes",
        summary.sentences, summary.fixes
    );

    Ok(())
}

fn main() -> Result<ExitCode> {
    let _ = env_logger::builder()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .try_init();

    let args = Cli::parse();

    match args.command {
        Commands::Check => {
            if !check() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Generate(args) => generate(args)?,
        Commands::Parse(args) => parse(args)?,
    }

    Ok(ExitCode::SUCCESS)
}
