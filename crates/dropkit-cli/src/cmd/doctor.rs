use anyhow::Result;
use serde::Serialize;

use crate::output;

#[derive(Debug, Serialize)]
pub struct Check {
    pub name: String,
    pub ok: bool,
    pub detail: String,
}

#[derive(Debug, Serialize)]
pub struct DoctorOut {
    pub ok: bool,
    pub checks: Vec<Check>,
}

pub async fn run() -> Result<()> {
    let mut checks = Vec::new();

    checks.push(Check {
        name: "rustc".to_string(),
        ok: which_ok("rustc"),
        detail: "required for building".to_string(),
    });

    checks.push(Check {
        name: "cargo".to_string(),
        ok: which_ok("cargo"),
        detail: "required for building".to_string(),
    });

    // Solana tooling is optional but recommended for key management.
    checks.push(Check {
        name: "solana".to_string(),
        ok: which_ok("solana"),
        detail: "optional (required for broadcasting against a cluster)".to_string(),
    });

    checks.push(Check {
        name: "default-keypair".to_string(),
        ok: default_keypair_exists(),
        detail: "optional (~/.config/solana/id.json)".to_string(),
    });

    let required_ok = checks
        .iter()
        .filter(|c| c.name == "rustc" || c.name == "cargo")
        .all(|c| c.ok);

    output::status_line(required_ok, if required_ok { "environment ok" } else { "environment has issues" });
    output::print(&DoctorOut { ok: required_ok, checks })?;
    Ok(())
}

fn which_ok(cmd: &str) -> bool {
    std::env::var_os("PATH")
        .and_then(|paths| {
            for p in std::env::split_paths(&paths) {
                let full = p.join(cmd);
                if full.exists() {
                    return Some(());
                }
                #[cfg(windows)]
                {
                    let full_exe = p.join(format!("{cmd}.exe"));
                    if full_exe.exists() {
                        return Some(());
                    }
                }
            }
            None
        })
        .is_some()
}

fn default_keypair_exists() -> bool {
    std::env::var_os("HOME")
        .map(|home| {
            std::path::Path::new(&home)
                .join(".config")
                .join("solana")
                .join("id.json")
                .exists()
        })
        .unwrap_or(false)
}
