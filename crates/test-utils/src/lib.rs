//! Shared test utilities for skillrec crates.
//!
//! Provides env-var guards and a temp-dir fixture that writes profile and
//! configuration files in the formats the datasource and state crates read.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, OnceLock};

/// Process-wide lock for tests that touch environment variables.
///
/// Hold the returned guard for the whole test; a poisoned lock is recovered
/// so one failing test does not cascade.
pub fn env_guard() -> MutexGuard<'static, ()> {
    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    ENV_LOCK
        .get_or_init(Mutex::default)
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Puts an environment variable back the way it was when dropped.
#[must_use = "the variable is restored as soon as the guard is dropped"]
pub struct EnvVarGuard {
    name: &'static str,
    saved: Option<String>,
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        apply(self.name, self.saved.as_deref());
    }
}

fn apply(name: &str, value: Option<&str>) {
    match value {
        Some(value) => std::env::set_var(name, value),
        None => std::env::remove_var(name),
    }
}

/// Set (`Some`) or unset (`None`) a variable until the guard drops.
///
/// ```
/// let _guard = skillrec_test_utils::set_env_var("SKILLREC_DOC_VAR", Some("value"));
/// assert_eq!(std::env::var("SKILLREC_DOC_VAR").as_deref(), Ok("value"));
/// ```
pub fn set_env_var(name: &'static str, value: Option<&str>) -> EnvVarGuard {
    let saved = std::env::var(name).ok();
    apply(name, value);
    EnvVarGuard { name, saved }
}

/// Render employees as a people export (pretty JSON objects back to back).
pub fn people_export(employees: &[(i64, Option<&[&str]>)]) -> String {
    employees
        .iter()
        .map(|(id, skills)| {
            let record = serde_json::json!({
                "employeeId": id,
                "role": "Consultant",
                "skills": skills,
                "wishes": [],
            });
            let mut text = serde_json::to_string_pretty(&record).unwrap_or_default();
            text.push('\n');
            text
        })
        .collect()
}

/// Render employees as a JSON id -> skills map.
pub fn skill_map(employees: &[(i64, Option<&[&str]>)]) -> String {
    let map: serde_json::Map<String, serde_json::Value> = employees
        .iter()
        .map(|(id, skills)| (id.to_string(), serde_json::json!(skills)))
        .collect();
    serde_json::Value::Object(map).to_string()
}

/// A throwaway `$HOME` holding `.skillrec/`, deleted on drop.
pub struct TestFixture {
    /// Backing temp directory.
    pub tempdir: tempfile::TempDir,
    /// `<home>/.skillrec`, created up front.
    pub config_dir: PathBuf,
}

impl TestFixture {
    /// Create the temp home and its config directory. HOME itself is left
    /// alone until [`home_guard`](Self::home_guard) is called.
    pub fn new() -> std::io::Result<Self> {
        let tempdir = tempfile::tempdir()?;
        let config_dir = tempdir.path().join(".skillrec");
        std::fs::create_dir_all(&config_dir)?;
        Ok(Self { tempdir, config_dir })
    }

    /// Root of the temp home.
    pub fn home_path(&self) -> &Path {
        self.tempdir.path()
    }

    /// Point HOME at the temp home until the guard drops.
    pub fn home_guard(&self) -> EnvVarGuard {
        set_env_var("HOME", Some(&self.home_path().to_string_lossy()))
    }

    /// Write a file relative to the temp root and return its path.
    pub fn write(&self, relative: &str, contents: &str) -> std::io::Result<PathBuf> {
        let path = self.tempdir.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, contents)?;
        Ok(path)
    }

    /// Write a people export named `people.json`.
    pub fn write_people(&self, employees: &[(i64, Option<&[&str]>)]) -> std::io::Result<PathBuf> {
        self.write("people.json", &people_export(employees))
    }

    /// Write a skill map named `skills.json`.
    pub fn write_skill_map(
        &self,
        employees: &[(i64, Option<&[&str]>)],
    ) -> std::io::Result<PathBuf> {
        self.write("skills.json", &skill_map(employees))
    }

    /// Write `~/.skillrec/<name>`.
    pub fn write_config(&self, name: &str, contents: &str) -> std::io::Result<PathBuf> {
        self.write(&format!(".skillrec/{name}"), contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_unsets_new_variable_on_drop() {
        let _lock = env_guard();
        const NAME: &str = "SKILLREC_TEST_UTILS_FRESH";
        std::env::remove_var(NAME);

        let guard = set_env_var(NAME, Some("1"));
        assert_eq!(std::env::var(NAME).as_deref(), Ok("1"));
        drop(guard);
        assert!(std::env::var_os(NAME).is_none());
    }

    #[test]
    fn test_guard_brings_back_earlier_value() {
        let _lock = env_guard();
        const NAME: &str = "SKILLREC_TEST_UTILS_EXISTING";
        std::env::set_var(NAME, "before");

        let guard = set_env_var(NAME, None);
        assert!(std::env::var_os(NAME).is_none());
        drop(guard);
        assert_eq!(std::env::var(NAME).as_deref(), Ok("before"));

        std::env::remove_var(NAME);
    }

    #[test]
    fn test_people_export_closes_records_at_column_zero() {
        let text = people_export(&[(1, Some(&["Rust", "Go"])), (2, None)]);
        let closing: Vec<&str> = text.lines().filter(|l| l.starts_with('}')).collect();
        assert_eq!(closing.len(), 2);
        assert!(text.contains("\"employeeId\": 1"));
        assert!(text.contains("\"skills\": null"));
    }

    #[test]
    fn test_skill_map_shape() {
        let text = skill_map(&[(7, Some(&["C"])), (8, None)]);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["7"], serde_json::json!(["C"]));
        assert!(value["8"].is_null());
    }

    #[test]
    fn test_fixture_writes_files() {
        let fixture = TestFixture::new().expect("fixture creation");
        assert!(fixture.config_dir.is_dir());

        let people = fixture.write_people(&[(1, Some(&["Rust"]))]).unwrap();
        assert!(people.exists());
        let config = fixture.write_config("config.toml", "use_binary = false\n").unwrap();
        assert_eq!(config, fixture.config_dir.join("config.toml"));
    }

    #[test]
    fn test_home_guard_points_home_at_fixture() {
        let _lock = env_guard();
        let fixture = TestFixture::new().unwrap();
        let before = std::env::var_os("HOME");

        let guard = fixture.home_guard();
        assert_eq!(
            std::env::var_os("HOME").map(PathBuf::from).as_deref(),
            Some(fixture.home_path())
        );
        drop(guard);
        assert_eq!(std::env::var_os("HOME"), before);
    }
}
