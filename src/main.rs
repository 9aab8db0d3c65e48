//! Keystroke Entropy CLI
//!
//! Command-line demonstration of timing-based entropy accumulation:
//! gathers keystroke-timing entropy until the target is reached, prints
//! some derived random output and flushes the pool.

use clap::Parser;
use keystroke_entropy::{
    accumulation::{drive, AccumError, Accumulator, Progress},
    config::FileConfig,
    estimation::{flush, EntropyEstimator},
    events::{InstantTimer, StdinEvents},
    pool::{ChaChaPool, RandomPool},
    sampling::sample_range,
};
use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(
    name = "keystroke-entropy",
    version,
    about = "Accumulate keystroke-timing entropy and print random output"
)]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Whole bits of true entropy to accumulate (overrides the config).
    #[arg(long)]
    bits: Option<u32>,

    /// Shell command whose hashed output seeds the pool (uncounted).
    #[cfg(unix)]
    #[arg(long)]
    seed_command: Option<String>,
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => match FileConfig::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Failed to load config: {}", e);
                std::process::exit(1);
            }
        },
        None => FileConfig::default(),
    };

    let target_bits = args.bits.unwrap_or(config.accumulate.target_bits);

    info!("Keystroke Entropy v{}", keystroke_entropy::VERSION);

    let mut pool = ChaChaPool::with_capacity(config.pool.capacity_bits);
    let mut estimator = EntropyEstimator::new(pool.capacity_bits());

    #[cfg(unix)]
    {
        use keystroke_entropy::mixing::{mix_from_command, DigestAlgorithm};

        let seed_command = args
            .seed_command
            .clone()
            .or_else(|| config.accumulate.seed_command.clone());
        if let Some(command) = seed_command {
            match mix_from_command(&mut pool, &command, DigestAlgorithm::default()) {
                Ok(()) => info!("seed command output mixed into pool"),
                Err(e) => warn!("seed command skipped: {}", e),
            }
        }
    }

    let abort = Arc::new(AtomicBool::new(false));
    {
        let abort = Arc::clone(&abort);
        if let Err(e) = ctrlc::set_handler(move || abort.store(true, Ordering::Relaxed)) {
            warn!("Ctrl-C handler unavailable: {}", e);
        }
    }

    let mut accumulator = Accumulator::new(target_bits, &estimator);
    let mut source = StdinEvents::new();
    let mut timer = InstantTimer::new();

    let result = drive(
        &mut accumulator,
        &mut pool,
        &mut estimator,
        &mut source,
        &mut timer,
        &abort,
        render_progress,
    );

    match result {
        Ok(()) => {}
        Err(AccumError::Aborted) => {
            warn!("Accumulation aborted before the target was reached");
            std::process::exit(130);
        }
        Err(e) => {
            eprintln!("Accumulation failed: {}", e);
            std::process::exit(1);
        }
    }

    info!("Estimated true entropy: {} bits", estimator.whole_bits());

    // Demonstrate unbiased sampling backed by the accumulated pool.
    match (sample_range(&mut pool, 6), sample_range(&mut pool, 1000)) {
        (Ok(roll), Ok(pick)) => {
            println!("Die roll: {}   Pick in [0,1000): {}", roll + 1, pick);
        }
        (Err(e), _) | (_, Err(e)) => eprintln!("Sampling failed: {}", e),
    }

    let mut secret = [0u8; 32];
    pool.get_bytes(&mut secret);
    println!(
        "Key material: {}",
        secret
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect::<String>()
    );
    secret.fill(0);

    // Erase recoverability of what we just printed.
    flush(&mut pool, &mut estimator);
    info!("Done. Pool flushed, estimate reset to {}", estimator.whole_bits());
}

/// Renders accumulation progress in the classic interactive style:
/// a countdown of bits still needed, '.' per credited keystroke and
/// '?' per rejected one.
fn render_progress(progress: Progress) {
    let mut out = std::io::stdout();
    match progress {
        Progress::Started { needed_bits } => {
            println!(
                "\nWe need to generate {} random bits.  This is done by measuring the\n\
                 time intervals between your keystrokes.  Please enter some random text\n\
                 on your keyboard (press Enter after each burst):",
                needed_bits
            );
        }
        Progress::Awaiting { remaining_bits } => {
            print!("\r{:4} ", remaining_bits);
            let _ = out.flush();
        }
        Progress::Event { credited, .. } => {
            print!("{}", if credited { '.' } else { '?' });
            let _ = out.flush();
        }
        Progress::Completed => {
            println!("\r   0 * -Enough, thank you.");
        }
    }
}
