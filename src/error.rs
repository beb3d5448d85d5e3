use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Config directory not found at {0}. Run 'invrep init' to create it.")]
    ConfigNotFound(PathBuf),

    #[error("Config file not found: {0}")]
    ConfigFileNotFound(PathBuf),

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Report file not found: {0}")]
    ReportFileNotFound(PathBuf),

    #[error("Failed to parse report file {path}: {source}")]
    ReportParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Report file already exists at {0}")]
    ReportFileExists(PathBuf),

    #[error("Buyer name is required. Set it with 'invrep set <FILE> --buyer-name <NAME>'.")]
    MissingBuyerName,

    #[error("Invalid item index {index}. The report has {count} item(s); use 'invrep show' to see them.")]
    InvalidItemIndex { index: usize, count: usize },

    #[error("A report keeps at least one item row; edit it instead of removing it.")]
    LastItemRow,

    #[error("No fields specified. Pass at least one --<field> flag.")]
    NoFieldsGiven,

    #[error("Failed to generate PDF: {0}")]
    PdfGeneration(String),

    #[error("Failed to generate spreadsheet: {0}")]
    SheetGeneration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config directory already exists at {0}")]
    AlreadyInitialized(PathBuf),
}

pub type Result<T> = std::result::Result<T, ReportError>;
