//! INI serialization logic for converting `ConfigFile` → INI string.

use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    let log_file = config
        .logging
        .file
        .as_ref()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_default();

    format!(
        r#"[source]
; URL template for source images; {{id}} is replaced by each id in first..=last
url_template = {}
first = {}
last = {}

[grid]
; Composite grid shape. rows * cols must hold every source image
rows = {}
cols = {}

[tile]
; Size of each grid cell in pixels. Source images are stretched to fit
width = {}
height = {}

[output]
; Encoding of tiles and the composite: jpeg or png
format = {}
; JPEG quality, 1-100 (ignored for png)
jpeg_quality = {}

[download]
; Per-image timeout in seconds. Expired fetches become blue error tiles
timeout = {}
; Maximum number of concurrent image fetches
parallel = {}

[server]
; Address the HTTP server listens on
listen = {}

[logging]
; Log level: error, warn, info, debug, trace (RUST_LOG takes precedence)
level = {}
; Optional log file. Leave empty to log to stdout only
file = {}
"#,
        config.source.url_template,
        config.source.first,
        config.source.last,
        config.grid.rows,
        config.grid.cols,
        config.tile.width,
        config.tile.height,
        config.output.format,
        config.output.jpeg_quality,
        config.download.timeout,
        config.download.parallel,
        config.server.listen,
        config.logging.level,
        log_file,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_written_defaults_contain_every_section() {
        let content = to_config_string(&ConfigFile::default());

        for section in [
            "[source]", "[grid]", "[tile]", "[output]", "[download]", "[server]", "[logging]",
        ] {
            assert!(content.contains(section), "missing {}", section);
        }
        assert!(content.contains("{id}"));
        assert!(content.contains("format = jpeg"));
        assert!(content.contains("listen = 0.0.0.0:8000"));
    }

    #[test]
    fn test_written_defaults_parse_back() {
        let content = to_config_string(&ConfigFile::default());
        let ini = ini::Ini::load_from_str(&content).unwrap();
        let parsed = super::super::parser::parse_ini(&ini).unwrap();
        assert_eq!(parsed, ConfigFile::default());
    }
}
