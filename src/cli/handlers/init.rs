use std::fs;

use crate::cli::commands::InitArgs;
use crate::ops::nav::NavPolicy;

const SESSION_TOML_TEMPLATE: &str = r#"[session]
name = "{name}"

# --- Navigation ---
# policy controls what happens at the ends of an id list:
#   "bounded"     stop and report the boundary
#   "wraparound"  cycle to the opposite end
[nav]
policy = "{policy}"
"#;

/// Validate that a session name is non-empty and printable.
fn validate_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("session name cannot be empty".to_string());
    }
    if name.contains('"') || name.contains('\n') {
        return Err(format!("invalid session name {:?}", name));
    }
    Ok(())
}

pub fn cmd_init(args: InitArgs) -> Result<(), Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir()?;
    let stride_dir = cwd.join("stride");

    if stride_dir.join("session.toml").exists() && !args.force {
        return Err("stride/ already exists (use --force to reinitialize)".into());
    }

    let name = match args.name {
        Some(name) => name,
        None => cwd
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "session".to_string()),
    };
    validate_name(&name)?;

    let policy = args.policy.unwrap_or(NavPolicy::Bounded);
    let config = SESSION_TOML_TEMPLATE
        .replace("{name}", &name)
        .replace("{policy}", policy.as_str());

    fs::create_dir_all(&stride_dir)?;
    fs::write(stride_dir.join("session.toml"), config)?;

    println!(
        "initialized stride session \"{}\" ({} policy)",
        name,
        policy.as_str()
    );
    Ok(())
}
