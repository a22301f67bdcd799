//! Optional user configuration, read once from `bfc.toml` in the XDG
//! config directory. A missing or malformed file falls back to defaults.

use std::fs;
use std::path::PathBuf;
use std::sync::OnceLock;

use cross_xdg::BaseDirs;

/// Settings the config file may override. Anything left unset falls back
/// to the built-in default at the point of use.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    /// `tape_size` under `[machine]`: number of cells to allocate.
    pub tape_size: Option<usize>,
}

static SETTINGS: OnceLock<Settings> = OnceLock::new();

/// The loaded settings. The config file is read on the first call and the
/// result is cached for the life of the process.
pub fn settings() -> &'static Settings {
    SETTINGS.get_or_init(|| load_from_toml().unwrap_or_default())
}

fn load_from_toml() -> Option<Settings> {
    let base_dirs = BaseDirs::new().unwrap();

    // Resolves to $XDG_CONFIG_HOME, or ~/.config when unset.
    let config_home = base_dirs.config_home();

    let mut path = PathBuf::from(config_home);
    path.push("bfc.toml");

    let content = fs::read_to_string(path).ok()?;
    Some(parse(&content))
}

/// Minimal line-oriented scanner for the one section and key we accept.
/// Unknown sections, unknown keys, and unparsable values are ignored.
fn parse(content: &str) -> Settings {
    let mut settings = Settings::default();
    let mut in_machine = false;

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if line.starts_with('[') && line.ends_with(']') {
            in_machine = &line[1..line.len() - 1] == "machine";
            continue;
        }
        if !in_machine {
            continue;
        }
        if let Some(eq) = line.find('=') {
            let key = line[..eq].trim();
            let value = line[eq + 1..].trim().trim_matches('"');
            if key == "tape_size" {
                if let Ok(cells) = value.parse::<usize>() {
                    if cells > 0 {
                        settings.tape_size = Some(cells);
                    }
                }
            }
        }
    }

    settings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tape_size_under_the_machine_section() {
        let settings = parse("[machine]\ntape_size = 4096\n");
        assert_eq!(settings.tape_size, Some(4096));
    }

    #[test]
    fn ignores_keys_outside_the_machine_section() {
        let settings = parse("[display]\ntape_size = 4096\n");
        assert_eq!(settings.tape_size, None);
    }

    #[test]
    fn accepts_a_quoted_value() {
        let settings = parse("[machine]\ntape_size = \"512\"\n");
        assert_eq!(settings.tape_size, Some(512));
    }

    #[test]
    fn rejects_zero_and_garbage_values() {
        assert_eq!(parse("[machine]\ntape_size = 0\n").tape_size, None);
        assert_eq!(parse("[machine]\ntape_size = lots\n").tape_size, None);
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        let content = "# bfc settings\n\n[machine]\n# cells\ntape_size = 64\n";
        assert_eq!(parse(content).tape_size, Some(64));
    }
}
