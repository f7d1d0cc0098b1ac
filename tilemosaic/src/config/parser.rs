//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This is the single place where INI key names are mapped to struct fields.

use std::path::PathBuf;
use std::str::FromStr;

use ini::Ini;

use super::file::ConfigFileError;
use super::settings::ConfigFile;
use crate::codec::OutputFormat;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()`, overlays any values found in the
/// INI, then validates the result.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [source] section
    if let Some(section) = ini.section(Some("source")) {
        if let Some(v) = section.get("url_template") {
            config.source.url_template = v.trim().to_string();
        }
        if let Some(v) = section.get("first") {
            config.source.first = parse_number(v, "source", "first", "must be a non-negative integer")?;
        }
        if let Some(v) = section.get("last") {
            config.source.last = parse_number(v, "source", "last", "must be a non-negative integer")?;
        }
    }

    // [grid] section
    if let Some(section) = ini.section(Some("grid")) {
        if let Some(v) = section.get("rows") {
            config.grid.rows = parse_number(v, "grid", "rows", "must be a positive integer")?;
        }
        if let Some(v) = section.get("cols") {
            config.grid.cols = parse_number(v, "grid", "cols", "must be a positive integer")?;
        }
    }

    // [tile] section
    if let Some(section) = ini.section(Some("tile")) {
        if let Some(v) = section.get("width") {
            config.tile.width = parse_number(v, "tile", "width", "must be a positive integer (pixels)")?;
        }
        if let Some(v) = section.get("height") {
            config.tile.height =
                parse_number(v, "tile", "height", "must be a positive integer (pixels)")?;
        }
    }

    // [output] section
    if let Some(section) = ini.section(Some("output")) {
        if let Some(v) = section.get("format") {
            config.output.format = OutputFormat::from_str(v).map_err(|_| {
                ConfigFileError::invalid("output", "format", v, "must be 'jpeg' or 'png'")
            })?;
        }
        if let Some(v) = section.get("jpeg_quality") {
            config.output.jpeg_quality =
                parse_number(v, "output", "jpeg_quality", "must be between 1 and 100")?;
        }
    }

    // [download] section
    if let Some(section) = ini.section(Some("download")) {
        if let Some(v) = section.get("timeout") {
            config.download.timeout =
                parse_number(v, "download", "timeout", "must be a positive integer (seconds)")?;
        }
        if let Some(v) = section.get("parallel") {
            config.download.parallel =
                parse_number(v, "download", "parallel", "must be a positive integer")?;
        }
    }

    // [server] section
    if let Some(section) = ini.section(Some("server")) {
        if let Some(v) = section.get("listen") {
            config.server.listen = v.trim().parse().map_err(|_| {
                ConfigFileError::invalid("server", "listen", v, "expected address like '0.0.0.0:8000'")
            })?;
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("level") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.level = v.to_lowercase();
            }
        }
        if let Some(v) = section.get("file") {
            let v = v.trim();
            config.logging.file = if v.is_empty() {
                None
            } else {
                Some(expand_tilde(v))
            };
        }
    }

    config.validate()?;
    Ok(config)
}

fn parse_number<T: FromStr>(
    value: &str,
    section: &str,
    key: &str,
    reason: &str,
) -> Result<T, ConfigFileError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigFileError::invalid(section, key, value, reason))
}

/// Expand `~` to the home directory.
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}
