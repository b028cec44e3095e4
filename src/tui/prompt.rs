//! Line-oriented prompts around the browse screen

use crate::config::{Config, System};
use crate::vault::GameEntry;
use anyhow::{Context, Result};
use std::io::{BufRead, Write};

pub const BANNER: &str = "Unoffical Vimm.net Game Downloader";

/// Print the banner and the numbered system menu
pub fn print_menu<W: Write>(out: &mut W, config: &Config) -> Result<()> {
    writeln!(out, "{}\n", BANNER)?;
    for system in config.sorted_systems() {
        writeln!(out, "{}. {}", system.key, system.name)?;
    }
    Ok(())
}

/// Print one page of games as `title: vault ID` lines
pub fn print_page<W: Write>(out: &mut W, entries: &[GameEntry]) -> Result<()> {
    for entry in entries {
        writeln!(out, "{}: {}", entry.title, entry.vault_id)?;
    }
    Ok(())
}

/// Print `message` and read one trimmed line
pub fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, message: &str) -> Result<String> {
    write!(out, "{}", message)?;
    out.flush()?;

    let mut line = String::new();
    input.read_line(&mut line).context("Failed to read input")?;
    Ok(line.trim().to_string())
}

/// Resolve a typed menu number to a system
pub fn parse_system_selection<'a>(config: &'a Config, input: &str) -> Option<&'a System> {
    input
        .trim()
        .parse::<u32>()
        .ok()
        .and_then(|key| config.system(key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_menu_is_numbered_by_key() {
        let mut out = Vec::new();
        print_menu(&mut out, &Config::default()).unwrap();
        let text = String::from_utf8(out).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], BANNER);
        assert_eq!(lines[2], "1. Atari 2600");
        assert_eq!(lines[11], "10. PlayStation");
        assert_eq!(lines[18], "17. Nintendo DS");
        assert_eq!(lines.len(), 19);
    }

    #[test]
    fn test_print_page_lists_vault_ids() {
        let entries = vec![
            GameEntry {
                title: "Chrono Cross".into(),
                vault_id: "6938".into(),
            },
            GameEntry {
                title: "Crash Bandicoot".into(),
                vault_id: "6935".into(),
            },
        ];
        let mut out = Vec::new();
        print_page(&mut out, &entries).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Chrono Cross: 6938\nCrash Bandicoot: 6935\n"
        );
    }

    #[test]
    fn test_prompt_reads_trimmed_line() {
        let mut input = Cursor::new("  10 \nC\n");
        let mut out = Vec::new();

        let first = prompt(&mut input, &mut out, "Select the system # : ").unwrap();
        let second = prompt(&mut input, &mut out, "Enter A-Z: ").unwrap();

        assert_eq!(first, "10");
        assert_eq!(second, "C");
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Select the system # : Enter A-Z: "
        );
    }

    #[test]
    fn test_parse_system_selection() {
        let config = Config::default();
        assert_eq!(
            parse_system_selection(&config, "10").map(|s| s.name.as_str()),
            Some("PlayStation")
        );
        assert!(parse_system_selection(&config, "0").is_none());
        assert!(parse_system_selection(&config, "18").is_none());
        assert!(parse_system_selection(&config, "abc").is_none());
        assert!(parse_system_selection(&config, "").is_none());
    }
}
