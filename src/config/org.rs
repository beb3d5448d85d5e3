use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    pub org: Organization,
    pub output: OutputSettings,
}

/// Organization block printed at the top of every artifact.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Organization {
    pub name: String,
    pub address: String,
    pub report_title: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct OutputSettings {
    pub dir: String,
}
