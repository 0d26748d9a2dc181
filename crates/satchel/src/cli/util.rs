use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use satchel_crypto::{decode_base64, encode_base64, random_aes_key};
use satchel_fs::{ShredOptions, find_files_by_suffix, shred_file, shred_file_with_options};
use satchel_platform::dir::expand_home;
use satchel_platform::read_stdin_with_timeout;
use satchel_text::parse_date_args;
use tracing::debug;

#[derive(Debug, clap::Args)]
pub struct KeyArg {
    /// Key length in bytes: 16, 24 or 32
    #[arg(long, short, default_value_t = 32)]
    pub len: usize,
    /// Write raw bytes instead of base64
    #[arg(long)]
    pub raw: bool,
}

impl KeyArg {
    pub fn run(self) -> Result<()> {
        let key = random_aes_key(self.len)?;
        let mut out = io::stdout().lock();
        if self.raw {
            out.write_all(&key)?;
        } else {
            writeln!(out, "{}", encode_base64(&key))?;
        }
        Ok(())
    }
}

#[derive(Debug, clap::Args)]
pub struct Base64Arg {
    /// Decode instead of encode
    #[arg(long, short)]
    pub decode: bool,
    /// Seconds to wait for input
    #[arg(long, default_value_t = 5)]
    pub timeout: u64,
    /// Most bytes read from stdin
    #[arg(long, default_value_t = 64 * 1024)]
    pub buffer: usize,
}

impl Base64Arg {
    pub fn run(self) -> Result<()> {
        let input = read_stdin_with_timeout(self.buffer, Duration::from_secs(self.timeout))?;
        debug!(bytes = input.len(), "read stdin");

        let mut out = io::stdout().lock();
        if self.decode {
            let text = String::from_utf8_lossy(&input);
            out.write_all(&decode_base64(text.trim())?)?;
        } else {
            writeln!(out, "{}", encode_base64(&input))?;
        }
        Ok(())
    }
}

#[derive(Debug, clap::Args)]
pub struct DateArg {
    /// `2d 3h 15m` relative to now, or `D.M.Y hh:mm`
    #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
    pub args: Vec<String>,
}

impl DateArg {
    pub fn run(self) -> Result<()> {
        let date = parse_date_args(&self.args)?;
        println!("{}", date.format("%Y-%m-%d %H:%M"));
        Ok(())
    }
}

#[derive(Debug, clap::Args)]
pub struct FindArg {
    pub dir: PathBuf,
    pub suffix: String,
    /// Leave out files ending with this
    #[arg(long)]
    pub ignore: Option<String>,
}

impl FindArg {
    pub fn run(self) -> Result<()> {
        let dir = expand_home(&self.dir)?;
        let files = find_files_by_suffix(&dir, &self.suffix, self.ignore.as_deref())?;

        let mut out = io::stdout().lock();
        for file in files {
            writeln!(out, "{}", file.display())?;
        }
        Ok(())
    }
}

#[derive(Debug, clap::Args)]
pub struct ShredArg {
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
    /// Overwrite this many times instead of picking by size
    #[arg(long)]
    pub passes: Option<u32>,
    /// Overwrite only, don't delete
    #[arg(long)]
    pub keep: bool,
}

impl ShredArg {
    pub fn run(self) -> Result<()> {
        for file in &self.files {
            let file = expand_home(file)?;
            let shredded = if self.passes.is_none() && !self.keep {
                shred_file(&file, None)
            } else {
                let size = std::fs::metadata(&file)
                    .with_context(|| format!("file to shred not found: {}", file.display()))?
                    .len();
                let mut options = ShredOptions::for_size(size).remove(!self.keep);
                if let Some(passes) = self.passes {
                    options = options.passes(passes);
                }
                shred_file_with_options(&file, options)
            };
            shredded.with_context(|| format!("failed to shred {}", file.display()))?;
        }
        Ok(())
    }
}
