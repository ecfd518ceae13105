use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use deepnote::{generator, render, wav, DeepNote, Error, RenderContext, Score};
use rand::{rngs::SmallRng, SeedableRng};

/// Render deep note swells to WAV files
#[derive(Parser)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the 31 second deep note preset
    Thx {
        #[command(flatten)]
        render: RenderArgs,
        /// Output file
        #[arg(short, long, default_value = "deep-note.wav")]
        output: PathBuf,
    },
    /// Render a JSON array of sections back to back
    Custom {
        /// Path to the sections JSON file
        sections: PathBuf,
        #[command(flatten)]
        render: RenderArgs,
        /// Output file
        #[arg(short, long, default_value = "custom-sound.wav")]
        output: PathBuf,
    },
}

#[derive(Args)]
struct RenderArgs {
    /// Seed for every random choice; omit for a fresh sound each run
    #[arg(long)]
    seed: Option<u64>,
    /// Output sample rate in Hz
    #[arg(long, default_value_t = 44100)]
    sample_rate: u32,
    /// Output channel count, mono or stereo
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u16).range(1..=2))]
    channels: u16,
    /// Log the first voice's frequency every this many seconds
    #[arg(long, value_parser = positive_seconds)]
    trace: Option<f64>,
}

fn positive_seconds(arg: &str) -> Result<f64, String> {
    match arg.parse::<f64>() {
        Ok(seconds) if seconds > 0.0 && seconds.is_finite() => Ok(seconds),
        Ok(_) => Err("must be a positive number of seconds".into()),
        Err(e) => Err(e.to_string()),
    }
}

impl RenderArgs {
    fn rng(&self) -> SmallRng {
        match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        }
    }
    fn context(&self) -> RenderContext {
        RenderContext::new(self.sample_rate, self.channels)
    }
}

fn export(score: &Score, args: &RenderArgs, output: &Path) -> Result<(), Error> {
    if let Some(interval) = args.trace {
        for (time, freq) in score.frequency_trace(0, interval).unwrap_or_default() {
            log::info!("{time:>6.2}s  {freq:>8.2} Hz");
        }
    }
    let buffer = render(score, &args.context());
    wav::write_file(output, &buffer)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    match Cli::parse().command {
        Command::Thx { render: args, output } => {
            let score = DeepNote::default().score(&mut args.rng());
            export(&score, &args, &output)?;
        }
        Command::Custom {
            sections,
            render: args,
            output,
        } => {
            let json = std::fs::read_to_string(&sections)?;
            let generator = generator::from_json(&json)?;
            if !generator.is_playable() {
                return Err(Error::NoSections.into());
            }
            let score = generator.score(&mut args.rng());
            export(&score, &args, &output)?;
        }
    }
    Ok(())
}
