use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use satchel_archive::options::DEFAULT_MAX_ERRORS;
use satchel_archive::{
    TarOptions, list_entries, pack_directory, pack_paths, stream_tar_with_options, unpack,
};
use satchel_fs::{last_part, sanitize_output};
use satchel_platform::dir::expand_home;
use tracing::info;

#[derive(Debug, clap::Args)]
pub struct ZipArg {
    /// Directory to pack
    pub dir: PathBuf,
    /// Archive file name, written inside the directory
    #[arg(long, short)]
    pub name: Option<String>,
    /// Skip paths containing this text
    #[arg(long, short, action = clap::ArgAction::Append)]
    pub ignore: Vec<String>,
}

impl ZipArg {
    pub fn run(self) -> Result<()> {
        let dir = expand_home(&self.dir)?;
        let name = self
            .name
            .unwrap_or_else(|| format!("{}.zip", last_part(&dir.to_string_lossy())));

        let archive = pack_directory(&dir, &name, &self.ignore)
            .with_context(|| format!("failed to zip {}", dir.display()))?;
        println!("{}", archive.display());
        Ok(())
    }
}

#[derive(Debug, clap::Args)]
pub struct ZipPathsArg {
    /// Output file, or a directory to place the archive in
    pub output: PathBuf,
    /// Files and directories to pack
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,
    /// Archive name used when OUTPUT is a directory
    #[arg(long, short)]
    pub name: Option<String>,
}

impl ZipPathsArg {
    pub fn run(self) -> Result<()> {
        let paths = self
            .paths
            .iter()
            .map(expand_home)
            .collect::<satchel_platform::Result<Vec<_>>>()?;
        let bytes = pack_paths(&paths).context("failed to zip paths")?;

        let output = expand_home(&self.output)?;
        let mut target = sanitize_output(&output, self.name.as_deref().unwrap_or_default())?;
        if target.extension().is_none() {
            target.set_extension("zip");
        }

        fs::write(&target, &bytes).with_context(|| format!("failed to write {}", target.display()))?;
        info!(archive = %target.display(), bytes = bytes.len(), "zip written");
        println!("{}", target.display());
        Ok(())
    }
}

#[derive(Debug, clap::Args)]
pub struct UnzipArg {
    pub archive: PathBuf,
    /// Directory to extract into, created when missing
    pub target: PathBuf,
}

impl UnzipArg {
    pub fn run(self) -> Result<()> {
        let archive = expand_home(&self.archive)?;
        let target = expand_home(&self.target)?;

        let report = unpack(&archive, &target)
            .with_context(|| format!("failed to extract {}", archive.display()))?;
        println!(
            "{} entries, {} bytes -> {}",
            report.entry_count,
            report.total_bytes,
            target.display()
        );
        Ok(())
    }
}

#[derive(Debug, clap::Args)]
pub struct ListArg {
    pub archive: PathBuf,
}

impl ListArg {
    pub fn run(self) -> Result<()> {
        let archive = expand_home(&self.archive)?;
        let entries = list_entries(&archive)
            .with_context(|| format!("failed to read {}", archive.display()))?;

        let mut out = io::stdout().lock();
        for entry in entries {
            let mode = entry
                .mode
                .map_or_else(|| "----".to_string(), |m| format!("{:04o}", m & 0o7777));
            writeln!(out, "{mode} {:>12} {}", entry.size, entry.name)?;
        }
        Ok(())
    }
}

#[derive(Debug, clap::Args)]
pub struct TarArg {
    /// Directory to stream
    pub dir: PathBuf,
    /// Output file, `-` for stdout
    pub output: PathBuf,
    /// Give up after this many unreadable entries
    #[arg(long, default_value_t = DEFAULT_MAX_ERRORS)]
    pub max_errors: usize,
}

impl TarArg {
    pub fn run(self) -> Result<()> {
        let dir = expand_home(&self.dir)?;
        let options = TarOptions::default().max_errors(self.max_errors);

        if self.output.as_os_str() == "-" {
            let mut stdout = stream_tar_with_options(&dir, io::stdout(), &options)
                .with_context(|| format!("failed to tar {}", dir.display()))?;
            stdout.flush()?;
            return Ok(());
        }

        let output = expand_home(&self.output)?;
        let file = File::create(&output)
            .with_context(|| format!("failed to create {}", output.display()))?;
        let writer = stream_tar_with_options(&dir, BufWriter::new(file), &options)
            .with_context(|| format!("failed to tar {}", dir.display()))?;
        writer
            .into_inner()
            .map_err(|e| e.into_error())
            .with_context(|| format!("failed to write {}", output.display()))?;

        println!("{}", output.display());
        Ok(())
    }
}
