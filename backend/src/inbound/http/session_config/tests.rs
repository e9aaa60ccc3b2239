//! Unit tests for session configuration validation.

use super::*;
use rstest::rstest;
use uuid::Uuid;

#[derive(Debug)]
struct TempKeyFile {
    path: PathBuf,
}

impl TempKeyFile {
    fn new(len: usize) -> std::io::Result<Self> {
        let path = std::env::temp_dir().join(format!("session-key-{}", Uuid::new_v4()));
        std::fs::write(&path, vec![b'a'; len])?;
        Ok(Self { path })
    }
}

impl Drop for TempKeyFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

fn toggles(key_file: PathBuf) -> SessionToggles {
    SessionToggles {
        key_file,
        cookie_secure: true,
        same_site: Some("Strict".to_owned()),
        allow_ephemeral: false,
    }
}

fn missing_key_path() -> PathBuf {
    std::env::temp_dir().join(format!("missing-session-key-{}", Uuid::new_v4()))
}

fn expect_error(
    result: Result<SessionSettings, SessionConfigError>,
    label: &str,
) -> SessionConfigError {
    match result {
        Ok(_) => panic!("{label}"),
        Err(error) => error,
    }
}

#[rstest]
fn release_accepts_explicit_secure_settings() {
    let key = TempKeyFile::new(SESSION_KEY_MIN_LEN).expect("key file");
    let settings =
        session_settings(&toggles(key.path.clone()), BuildMode::Release).expect("valid settings");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Strict);
}

#[rstest]
#[case(BuildMode::Debug, SameSite::Lax)]
#[case(BuildMode::Release, SameSite::Strict)]
fn absent_same_site_uses_mode_default(#[case] mode: BuildMode, #[case] expected: SameSite) {
    let key = TempKeyFile::new(SESSION_KEY_MIN_LEN).expect("key file");
    let mut toggles = toggles(key.path.clone());
    toggles.same_site = None;
    let settings = session_settings(&toggles, mode).expect("valid settings");
    assert_eq!(settings.same_site, expected);
}

#[rstest]
fn release_rejects_short_keys() {
    let key = TempKeyFile::new(16).expect("key file");
    let error = expect_error(
        session_settings(&toggles(key.path.clone()), BuildMode::Release),
        "short key should fail",
    );
    assert!(matches!(
        error,
        SessionConfigError::KeyTooShort { length: 16, .. }
    ));
}

#[rstest]
fn debug_accepts_short_keys() {
    let key = TempKeyFile::new(16).expect("key file");
    assert!(session_settings(&toggles(key.path.clone()), BuildMode::Debug).is_ok());
}

#[rstest]
fn release_requires_a_readable_key() {
    let error = expect_error(
        session_settings(&toggles(missing_key_path()), BuildMode::Release),
        "missing key should fail",
    );
    assert!(matches!(error, SessionConfigError::KeyRead { .. }));
}

#[rstest]
fn debug_falls_back_to_ephemeral_key() {
    assert!(session_settings(&toggles(missing_key_path()), BuildMode::Debug).is_ok());
}

#[rstest]
fn release_rejects_ephemeral_keys() {
    let mut toggles = toggles(missing_key_path());
    toggles.allow_ephemeral = true;
    let error = expect_error(
        session_settings(&toggles, BuildMode::Release),
        "ephemeral keys should fail in release",
    );
    assert!(matches!(error, SessionConfigError::EphemeralNotAllowed));
}

#[rstest]
fn release_rejects_insecure_same_site_none() {
    let key = TempKeyFile::new(SESSION_KEY_MIN_LEN).expect("key file");
    let mut toggles = toggles(key.path.clone());
    toggles.cookie_secure = false;
    toggles.same_site = Some("none".to_owned());
    let error = expect_error(
        session_settings(&toggles, BuildMode::Release),
        "SameSite=None needs secure cookies",
    );
    assert!(matches!(error, SessionConfigError::InsecureSameSiteNone));
}

#[rstest]
#[case(BuildMode::Debug, true)]
#[case(BuildMode::Release, false)]
fn unknown_same_site_depends_on_mode(#[case] mode: BuildMode, #[case] accepted: bool) {
    let key = TempKeyFile::new(SESSION_KEY_MIN_LEN).expect("key file");
    let mut toggles = toggles(key.path.clone());
    toggles.same_site = Some("sideways".to_owned());
    let result = session_settings(&toggles, mode);
    assert_eq!(result.is_ok(), accepted);
}
