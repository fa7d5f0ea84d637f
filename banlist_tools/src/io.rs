use crate::error::{Result, ToolError};
use std::path::Path;
use ygo_common::ConfFile;

pub fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ToolError::MissingInput(path.to_path_buf()),
        _ => ToolError::io(path, e),
    })
}

pub fn write_text(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents).map_err(|e| ToolError::io(path, e))
}

/// Card names, one per line; blank lines dropped.
pub fn parse_name_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn read_name_list(path: &Path) -> Result<Vec<String>> {
    Ok(parse_name_list(&read_text(path)?))
}

/// Load a conf file that must exist.
pub fn load_conf(path: &Path) -> Result<ConfFile> {
    ConfFile::load_if_exists(path)?.ok_or_else(|| ToolError::MissingInput(path.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_list_skips_blank_lines_and_trims() {
        let names = parse_name_list("Dark Magician\n\n  Pot of Greed  \r\n\t\nRaigeki");
        assert_eq!(names, vec!["Dark Magician", "Pot of Greed", "Raigeki"]);
    }

    #[test]
    fn missing_file_is_missing_input() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("Banlist.txt");
        assert!(matches!(read_text(&path), Err(ToolError::MissingInput(p)) if p == path));
        assert!(matches!(load_conf(&path), Err(ToolError::MissingInput(_))));
    }
}
