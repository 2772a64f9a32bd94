use std::fs;
use std::path::Path;

use crate::io::session_io::SessionError;
use crate::model::config::SessionConfig;
use crate::ops::nav::NavPolicy;

/// Read the session config, returning both the parsed config and the raw
/// toml_edit Document for round-trip-safe editing.
pub fn read_config(
    stride_dir: &Path,
) -> Result<(SessionConfig, toml_edit::DocumentMut), SessionError> {
    let config_path = stride_dir.join("session.toml");
    let config_text = fs::read_to_string(&config_path).map_err(|e| SessionError::ReadError {
        path: config_path.clone(),
        source: e,
    })?;
    let config: SessionConfig = toml::from_str(&config_text)?;
    let doc: toml_edit::DocumentMut = config_text
        .parse()
        .map_err(|_: toml_edit::TomlError| {
            SessionError::ConfigParseError(toml::from_str::<SessionConfig>("").unwrap_err())
        })?;
    Ok((config, doc))
}

/// Write the config document back to disk, preserving formatting.
pub fn write_config(stride_dir: &Path, doc: &toml_edit::DocumentMut) -> Result<(), SessionError> {
    let config_path = stride_dir.join("session.toml");
    fs::write(&config_path, doc.to_string()).map_err(|e| SessionError::ReadError {
        path: config_path,
        source: e,
    })?;
    Ok(())
}

/// Update the nav policy in the config document
pub fn set_policy(doc: &mut toml_edit::DocumentMut, policy: NavPolicy) {
    if !doc.contains_key("nav") {
        doc["nav"] = toml_edit::Item::Table(toml_edit::Table::new());
    }
    doc["nav"]["policy"] = toml_edit::value(policy.as_str());
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_config() -> &'static str {
        "# stride session\n[session]\nname = \"test\"\n\n[nav]\npolicy = \"bounded\"\n"
    }

    #[test]
    fn read_parses_both_views() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("session.toml"), sample_config()).unwrap();

        let (config, doc) = read_config(dir.path()).unwrap();
        assert_eq!(config.session.name, "test");
        assert_eq!(config.nav.policy, NavPolicy::Bounded);
        assert!(doc.to_string().contains("# stride session"));
    }

    #[test]
    fn set_policy_preserves_comments() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("session.toml"), sample_config()).unwrap();

        let (_, mut doc) = read_config(dir.path()).unwrap();
        set_policy(&mut doc, NavPolicy::Wraparound);
        write_config(dir.path(), &doc).unwrap();

        let text = fs::read_to_string(dir.path().join("session.toml")).unwrap();
        assert!(text.contains("# stride session"));
        assert!(text.contains("policy = \"wraparound\""));

        let (config, _) = read_config(dir.path()).unwrap();
        assert_eq!(config.nav.policy, NavPolicy::Wraparound);
    }

    #[test]
    fn set_policy_creates_missing_nav_table() {
        let mut doc: toml_edit::DocumentMut =
            "[session]\nname = \"t\"\n".parse().unwrap();
        set_policy(&mut doc, NavPolicy::Bounded);
        assert!(doc.to_string().contains("policy = \"bounded\""));
    }
}
