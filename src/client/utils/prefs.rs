use std::path::Path;

use crate::client::models::types::UserProfile;

const ONBOARDING_FLAG_FILE: &str = "onboarding_complete";
const PROFILE_FILE: &str = "profile.json";

/// First-run onboarding flag. Read once at startup, written once on
/// completion; the gate never re-reads it within a session. The onboarding
/// form is the only writer of these keys.
pub fn onboarding_complete(data_dir: &Path) -> bool {
    data_dir.join(ONBOARDING_FLAG_FILE).exists()
}

pub fn complete_onboarding(data_dir: &Path, profile: &UserProfile) -> anyhow::Result<()> {
    std::fs::create_dir_all(data_dir)?;
    let json = serde_json::to_string_pretty(profile)?;
    std::fs::write(data_dir.join(PROFILE_FILE), json)?;
    std::fs::write(data_dir.join(ONBOARDING_FLAG_FILE), b"true")?;
    Ok(())
}

pub fn load_profile(data_dir: &Path) -> Option<UserProfile> {
    let raw = std::fs::read_to_string(data_dir.join(PROFILE_FILE)).ok()?;
    serde_json::from_str(&raw).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn flag_is_absent_until_completion() {
        let dir = TempDir::new().unwrap();
        assert!(!onboarding_complete(dir.path()));

        let profile = UserProfile {
            name: "Ada".into(),
            country: "UK".into(),
            ..Default::default()
        };
        complete_onboarding(dir.path(), &profile).unwrap();

        assert!(onboarding_complete(dir.path()));
        let loaded = load_profile(dir.path()).unwrap();
        assert_eq!(loaded.name, "Ada");
        assert_eq!(loaded.country, "UK");
    }

    #[test]
    fn completion_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let profile = UserProfile::default();
        complete_onboarding(dir.path(), &profile).unwrap();
        complete_onboarding(dir.path(), &profile).unwrap();
        assert!(onboarding_complete(dir.path()));
    }
}
