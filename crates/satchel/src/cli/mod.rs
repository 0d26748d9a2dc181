use clap::{Parser, Subcommand};

pub mod archive;
pub mod util;

#[derive(Debug, Parser)]
#[command(name = "satchel", version = env!("CARGO_PKG_VERSION"), about, long_about = None, propagate_version = true)]
pub struct App {
    /// More log output, repeat for more detail
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    // Archives
    #[command(name = "zip", about = "Zip a directory into <dir>/<name>")]
    Zip(archive::ZipArg),
    #[command(name = "zip-paths", about = "Zip files and directories into one archive")]
    ZipPaths(archive::ZipPathsArg),
    #[command(alias = "x", name = "unzip", about = "Extract a zip archive")]
    Unzip(archive::UnzipArg),
    #[command(alias = "ls", name = "list", about = "List the entries of a zip archive")]
    List(archive::ListArg),
    #[command(name = "tar", about = "Stream a directory as a tar archive")]
    Tar(archive::TarArg),

    // Utilities
    #[command(name = "key", about = "Generate a random AES key")]
    Key(util::KeyArg),
    #[command(name = "b64", about = "Base64 encode or decode stdin")]
    Base64(util::Base64Arg),
    #[command(name = "date", about = "Resolve date arguments like `2d 3h` or `24.12. 18:00`")]
    Date(util::DateArg),
    #[command(name = "find", about = "Find files by suffix")]
    Find(util::FindArg),
    #[command(name = "shred", about = "Overwrite and delete files")]
    Shred(util::ShredArg),
}

impl Commands {
    pub fn run(self) -> anyhow::Result<()> {
        match self {
            Self::Zip(arg) => arg.run(),
            Self::ZipPaths(arg) => arg.run(),
            Self::Unzip(arg) => arg.run(),
            Self::List(arg) => arg.run(),
            Self::Tar(arg) => arg.run(),
            Self::Key(arg) => arg.run(),
            Self::Base64(arg) => arg.run(),
            Self::Date(arg) => arg.run(),
            Self::Find(arg) => arg.run(),
            Self::Shred(arg) => arg.run(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        App::command().debug_assert();
    }

    #[test]
    fn zip_with_repeated_ignores() {
        let app = App::try_parse_from([
            "satchel", "-vv", "zip", "src", "--name", "src.zip", "--ignore", "target", "--ignore", ".git",
        ])
        .unwrap();
        assert_eq!(app.verbose, 2);
        let Commands::Zip(arg) = app.cmd else {
            panic!("expected zip");
        };
        assert_eq!(arg.ignore, vec!["target", ".git"]);
        assert_eq!(arg.name.as_deref(), Some("src.zip"));
    }

    #[test]
    fn date_accepts_negative_offsets() {
        let app = App::try_parse_from(["satchel", "date", "-1d", "3h"]).unwrap();
        let Commands::Date(arg) = app.cmd else {
            panic!("expected date");
        };
        assert_eq!(arg.args, vec!["-1d", "3h"]);
    }

    #[test]
    fn tar_defaults() {
        let app = App::try_parse_from(["satchel", "tar", "dir", "out.tar"]).unwrap();
        let Commands::Tar(arg) = app.cmd else {
            panic!("expected tar");
        };
        assert_eq!(arg.max_errors, 10);
    }

    #[test]
    fn key_rejects_missing_value() {
        assert!(App::try_parse_from(["satchel", "key", "--len"]).is_err());
        assert!(App::try_parse_from(["satchel", "unzip", "only-archive"]).is_err());
    }
}
