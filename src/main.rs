use std::io;
use std::process::ExitCode;

use huffpack::config::{Config, Mode, USAGE};
use huffpack::{HuffmanCodec, HuffmanError};
use log::{error, info};

const USAGE_EXIT: u8 = 64;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = if args.is_empty() {
        Config::from_prompt(io::stdin().lock(), io::stdout())
    } else {
        Config::from_args(args)
    };
    let config = match config {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}\n{USAGE}");
            return ExitCode::from(USAGE_EXIT);
        }
    };

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}: {err}", config.input.display());
            ExitCode::from(err.exit_code() as u8)
        }
    }
}

fn run(config: &Config) -> Result<(), HuffmanError> {
    info!("analyzing {}", config.input.display());
    match config.mode {
        Mode::Compress => {
            let stats = HuffmanCodec::compress_path(&config.input, &config.output)?;
            info!("compression complete, output saved to {}", config.output.display());
            info!("original size: {} bytes", stats.original_bytes);
            info!(
                "compressed size (header + data): {} bytes",
                stats.compressed_bytes()
            );
            info!("compression ratio (compressed/original): {:.4}", stats.ratio());
            info!("savings: {:.2}%", stats.savings());
        }
        Mode::Decompress => {
            let stats = HuffmanCodec::decompress_path(&config.input, &config.output)?;
            info!(
                "decompression complete, output saved to {}",
                config.output.display()
            );
            info!("padding bits in last byte: {}", stats.padding_bits);
            info!("bytes decoded: {}", stats.decoded_bytes);
        }
    }
    Ok(())
}
