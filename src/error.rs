//! Unified error type for all taglog operations.

/// Error type for taglog operations.
#[derive(Debug)]
pub enum Error {
    /// I/O error.
    Io(std::io::Error),
    /// TOML config parsing error.
    ConfigParse(toml::de::Error),
    /// Config validation failure (missing field, bad value).
    Config(String),
    /// A filter tag is registered more than once.
    DuplicateTag(String),
    /// Invalid log level string.
    InvalidLevel(String),
    /// Filter `type` is neither `console` nor `file`.
    UnknownWriterType(String),
    /// Property name not accepted by the writer type.
    UnknownProperty(String),
    /// Required property missing from a filter entry.
    MissingProperty(&'static str),
    /// A file writer could not open its log file.
    WriterCreate {
        /// Tag of the writer being created.
        tag: String,
        /// Target log file path.
        filename: String,
        /// Underlying I/O failure.
        source: std::io::Error,
    },
    /// A logged message carried back to the caller by the warn/error entry points.
    Message(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::ConfigParse(e) => write!(f, "parse error: {e}"),
            Self::Config(s) => write!(f, "config error: {s}"),
            Self::DuplicateTag(tag) => write!(f, "log filter tag repeats: {tag}"),
            Self::InvalidLevel(level) => write!(f, "unsupported filter level: {level}"),
            Self::UnknownWriterType(kind) => write!(f, "unsupported filter type: {kind}"),
            Self::UnknownProperty(name) => write!(f, "unsupported filter property: {name}"),
            Self::MissingProperty(name) => write!(f, "missing filter property: {name}"),
            Self::WriterCreate {
                tag,
                filename,
                source,
            } => {
                write!(f, "file writer [{tag}]: open {filename} failed: {source}")
            }
            Self::Message(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::ConfigParse(e) => Some(e),
            Self::WriterCreate { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Self::ConfigParse(e)
    }
}
