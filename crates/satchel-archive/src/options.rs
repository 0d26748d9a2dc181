use zip::CompressionMethod;

/// Number of walk errors `stream_tar` tolerates before giving up.
pub const DEFAULT_MAX_ERRORS: usize = 10;

/// Copy buffer used for tar file contents.
pub const DEFAULT_TAR_BUFFER: usize = 1024 * 1024;

#[derive(Clone, Debug, Default)]
pub struct PackOptions {
    pub ignore: Vec<String>,
    pub compression: Compression,
}

impl PackOptions {
    pub fn ignore<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore.extend(patterns.into_iter().map(Into::into));
        self
    }

    pub fn compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }
}

/// Compression used for file entries. Directories are always stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Compression {
    #[default]
    Deflated,
    Stored,
}

impl Compression {
    pub(crate) fn method(self) -> CompressionMethod {
        match self {
            Self::Deflated => CompressionMethod::Deflated,
            Self::Stored => CompressionMethod::Stored,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct TarOptions {
    pub max_errors: usize,
    pub buffer_size: usize,
}

impl Default for TarOptions {
    fn default() -> Self {
        Self {
            max_errors: DEFAULT_MAX_ERRORS,
            buffer_size: DEFAULT_TAR_BUFFER,
        }
    }
}

impl TarOptions {
    pub fn max_errors(mut self, max_errors: usize) -> Self {
        self.max_errors = max_errors;
        self
    }

    pub fn buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let tar = TarOptions::default();
        assert_eq!(tar.max_errors, 10);
        assert_eq!(tar.buffer_size, 1024 * 1024);

        let pack = PackOptions::default();
        assert!(pack.ignore.is_empty());
        assert_eq!(pack.compression, Compression::Deflated);
    }

    #[test]
    fn builders_chain() {
        let pack = PackOptions::default()
            .ignore(["target"])
            .ignore(vec![String::from(".git")])
            .compression(Compression::Stored);
        assert_eq!(pack.ignore, vec!["target", ".git"]);
        assert_eq!(pack.compression.method(), CompressionMethod::Stored);

        let tar = TarOptions::default().max_errors(3).buffer_size(4096);
        assert_eq!(tar.max_errors, 3);
        assert_eq!(tar.buffer_size, 4096);
    }
}
