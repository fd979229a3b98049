//! Skill catalog
//!
//! Step-by-step guides for common Odoo tasks, embedded at compile time and
//! installed verbatim as `<dir>/<topic>/SKILL.md`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::core::{BoostError, BoostResult};

/// Topic names paired with their document, in installation order
const SKILLS: &[(&str, &str)] = &[
    ("creating_models", include_str!("creating_models/SKILL.md")),
    ("xml_views", include_str!("xml_views/SKILL.md")),
    ("security_rules", include_str!("security_rules/SKILL.md")),
    ("owl_components", include_str!("owl_components/SKILL.md")),
    ("controllers_routes", include_str!("controllers_routes/SKILL.md")),
    ("report_development", include_str!("report_development/SKILL.md")),
    ("automated_actions", include_str!("automated_actions/SKILL.md")),
    ("testing", include_str!("testing/SKILL.md")),
];

/// File name of every installed skill document
pub const SKILL_FILENAME: &str = "SKILL.md";

/// Names of all available skills, in order
pub fn list_skills() -> Vec<&'static str> {
    SKILLS.iter().map(|(name, _)| *name).collect()
}

/// Content of one skill document
pub fn load_skill(name: &str) -> BoostResult<&'static str> {
    SKILLS
        .iter()
        .find(|(skill, _)| *skill == name)
        .map(|(_, content)| *content)
        .ok_or_else(|| BoostError::NotFound(format!("skill '{}'", name)))
}

/// Write every skill into `target_dir`, overwriting existing copies
///
/// Returns the paths of the written `SKILL.md` files.
pub fn install_skills(target_dir: &Path) -> BoostResult<Vec<PathBuf>> {
    let mut created = Vec::with_capacity(SKILLS.len());
    for (name, content) in SKILLS {
        let dest = target_dir.join(name);
        fs::create_dir_all(&dest)?;
        let file = dest.join(SKILL_FILENAME);
        fs::write(&file, content)?;
        created.push(file);
    }
    tracing::debug!(
        "[Skills] Installed {} skills into {}",
        created.len(),
        target_dir.display()
    );
    Ok(created)
}
