use std::{collections::HashMap, fs::File, io::BufReader, path::Path};

use crate::error::{Error, Result};

/// Run settings, optionally read from a Java-style `.properties` file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Properties {
    /// Decode every freshly compressed container and compare it with the input.
    pub verify: bool,
    /// Write a JSON stats file next to each compressed output.
    pub report: bool,
    pub log_level: String,
}

impl Default for Properties {
    fn default() -> Self {
        Self {
            verify: false,
            report: false,
            log_level: "warn".to_string(),
        }
    }
}

impl Properties {
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let values = java_properties::read(BufReader::new(file))
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;

        Properties::try_from(values)
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        other => Err(Error::Config(format!("{key} must be a boolean, got {other:?}"))),
    }
}

impl TryFrom<HashMap<String, String>> for Properties {
    type Error = Error;

    fn try_from(value: HashMap<String, String>) -> Result<Self> {
        let mut props = Properties::default();

        for (key, raw) in value.iter() {
            match key.trim() {
                "verify" => props.verify = parse_bool(key, raw)?,
                "report" => props.report = parse_bool(key, raw)?,
                "log_level" => {
                    let level = raw.trim().to_lowercase();
                    if !matches!(level.as_str(), "trace" | "debug" | "info" | "warn" | "error") {
                        return Err(Error::Config(format!("unknown log level {raw:?}")));
                    }
                    props.log_level = level;
                }
                _ => return Err(Error::Config(format!("unknown property {key:?}"))),
            }
        }

        Ok(props)
    }
}

impl From<Properties> for String {
    fn from(val: Properties) -> Self {
        let mut s = String::new();

        s.push_str("#huffpack properties\n");
        s.push_str(&format!("verify={}\n", val.verify));
        s.push_str(&format!("report={}\n", val.report));
        s.push_str(&format!("log_level={}\n", val.log_level));

        s
    }
}
