/*
 * Copyright (C) 2026 The Base262144 developers
 *
 * This file is part of Base262144.
 *
 * Base262144 is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published
 * by the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Base262144 is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with Base262144. If not, see <https://www.gnu.org/licenses/>.
 */

use std::fs;
use std::io::{stdin, stdout, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{debug, info, LevelFilter};

use base262144::decode::{decode_bytes_with, decode_to_vec, DecodeConfig};
use base262144::encode::encode_to_string;

#[derive(Parser, Debug)]
#[command(
    name = "base262144",
    version,
    about = "Encodes binary data as text made of 262,144 Unicode characters"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log level (off|error|warn|info|debug|trace)
    #[arg(long = "log-level", global = true, default_value = "warn")]
    log_level: LevelFilter,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Encode binary data as base-262144 text
    #[command(visible_alias = "enc")]
    Encode {
        /// Input file, or "-" for standard input
        #[arg(default_value = "-")]
        input: PathBuf,
        /// Output file, or "-" for standard output
        #[arg(default_value = "-")]
        output: PathBuf,
    },
    /// Decode base-262144 text back to binary data
    #[command(visible_alias = "dec")]
    Decode {
        /// Input file, or "-" for standard input
        #[arg(default_value = "-")]
        input: PathBuf,
        /// Output file, or "-" for standard output
        #[arg(default_value = "-")]
        output: PathBuf,
        /// Skip whitespace (such as line breaks) in the input
        #[arg(long)]
        relaxed: bool,
    },
}

fn init_logger(level: LevelFilter) -> Result<()> {
    env_logger::Builder::new()
        .filter_level(level)
        .try_init()
        .context("could not initialize logging")
}

fn is_std_stream(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn read_input(path: &Path) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    if is_std_stream(path) {
        stdin()
            .lock()
            .read_to_end(&mut data)
            .context("could not read standard input")?;
    } else {
        data = fs::read(path).with_context(|| {
            format!("could not read file '{}'", path.display())
        })?;
    }
    debug!("read {} bytes from {}", data.len(), path.display());
    Ok(data)
}

fn write_output(path: &Path, data: &[u8]) -> Result<()> {
    if is_std_stream(path) {
        let mut out = stdout().lock();
        out.write_all(data)
            .and_then(|_| out.flush())
            .context("could not write to standard output")?;
    } else {
        fs::write(path, data).with_context(|| {
            format!("could not write file '{}'", path.display())
        })?;
    }
    debug!("wrote {} bytes to {}", data.len(), path.display());
    Ok(())
}

fn encode(input: &Path, output: &Path) -> Result<()> {
    let data = read_input(input)?;
    info!("encoding {} bytes", data.len());
    let text = encode_to_string(data);
    write_output(output, text.as_bytes())
}

fn decode(input: &Path, output: &Path, config: DecodeConfig) -> Result<()> {
    let text = read_input(input)?;
    info!("decoding {} bytes of text", text.len());
    let data = decode_to_vec(decode_bytes_with(text, config))
        .context("input is not valid base-262144 data")?;
    write_output(output, &data)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.log_level)?;

    match cli.command {
        Command::Encode {
            input,
            output,
        } => encode(&input, &output),
        Command::Decode {
            input,
            output,
            relaxed,
        } => {
            let mut config = DecodeConfig::new();
            config.relaxed = relaxed;
            decode(&input, &output, config)
        }
    }
}
