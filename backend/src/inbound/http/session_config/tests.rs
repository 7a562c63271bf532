//! Unit tests for session configuration parsing.

use super::*;
use mockable::MockEnv;
use rstest::rstest;
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Debug)]
struct TempKeyFile {
    path: PathBuf,
}

impl TempKeyFile {
    fn new(len: usize) -> std::io::Result<Self> {
        let path = std::env::temp_dir().join(format!("shayari-session-key-{}", Uuid::new_v4()));
        std::fs::write(&path, vec![b'k'; len])?;
        Ok(Self { path })
    }

    fn path_str(&self) -> String {
        self.path
            .to_str()
            .expect("temporary path should be valid UTF-8")
            .to_owned()
    }
}

impl Drop for TempKeyFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

fn mock_env(vars: HashMap<&'static str, String>) -> MockEnv {
    let mut env = MockEnv::new();
    env.expect_string()
        .times(0..)
        .returning(move |key| vars.get(key).cloned());
    env
}

fn release_vars() -> HashMap<&'static str, String> {
    HashMap::from([
        (SECRET_ENV, "s".repeat(SESSION_KEY_RELEASE_MIN_LEN)),
        (COOKIE_SECURE_ENV, "1".to_owned()),
        (SAMESITE_ENV, "Strict".to_owned()),
        (ALLOW_EPHEMERAL_ENV, "0".to_owned()),
    ])
}

fn expect_error(result: Result<SessionSettings, SessionConfigError>) -> SessionConfigError {
    match result {
        Ok(_) => panic!("expected session configuration to be rejected"),
        Err(error) => error,
    }
}

#[rstest]
#[case(COOKIE_SECURE_ENV)]
#[case(SAMESITE_ENV)]
#[case(ALLOW_EPHEMERAL_ENV)]
fn release_requires_every_toggle(#[case] missing: &'static str) {
    let mut vars = release_vars();
    vars.remove(missing);
    let err = expect_error(session_settings_from_env(&mock_env(vars), BuildMode::Release));
    assert!(matches!(err, SessionConfigError::MissingEnv { name } if name == missing));
}

#[rstest]
#[case(COOKIE_SECURE_ENV, "maybe")]
#[case(ALLOW_EPHEMERAL_ENV, "")]
#[case(SAMESITE_ENV, "sometimes")]
fn release_rejects_invalid_values(#[case] name: &'static str, #[case] value: &str) {
    let mut vars = release_vars();
    vars.insert(name, value.to_owned());
    let err = expect_error(session_settings_from_env(&mock_env(vars), BuildMode::Release));
    assert!(matches!(err, SessionConfigError::InvalidEnv { name: got, .. } if got == name));
}

#[rstest]
fn release_rejects_ephemeral_keys() {
    let mut vars = release_vars();
    vars.insert(ALLOW_EPHEMERAL_ENV, "yes".to_owned());
    let err = expect_error(session_settings_from_env(&mock_env(vars), BuildMode::Release));
    assert!(matches!(err, SessionConfigError::EphemeralNotAllowed));
}

#[rstest]
fn release_rejects_insecure_same_site_none() {
    let mut vars = release_vars();
    vars.insert(COOKIE_SECURE_ENV, "0".to_owned());
    vars.insert(SAMESITE_ENV, "None".to_owned());
    let err = expect_error(session_settings_from_env(&mock_env(vars), BuildMode::Release));
    assert!(matches!(err, SessionConfigError::InsecureSameSiteNone));
}

#[rstest]
#[case(BuildMode::Release, SESSION_KEY_RELEASE_MIN_LEN - 1)]
#[case(BuildMode::Debug, SESSION_KEY_MIN_LEN - 1)]
fn short_secrets_are_rejected(#[case] mode: BuildMode, #[case] len: usize) {
    let mut vars = release_vars();
    vars.insert(SECRET_ENV, "s".repeat(len));
    let err = expect_error(session_settings_from_env(&mock_env(vars), mode));
    assert!(matches!(
        err,
        SessionConfigError::KeyTooShort { length, .. } if length == len
    ));
}

#[rstest]
fn release_reads_key_file_when_no_secret() {
    let key_file = TempKeyFile::new(SESSION_KEY_RELEASE_MIN_LEN).expect("key file");
    let mut vars = release_vars();
    vars.remove(SECRET_ENV);
    vars.insert(KEY_FILE_ENV, key_file.path_str());

    let settings = session_settings_from_env(&mock_env(vars), BuildMode::Release)
        .expect("key file accepted");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Strict);
}

#[rstest]
fn release_rejects_short_key_file() {
    let key_file = TempKeyFile::new(SESSION_KEY_MIN_LEN).expect("key file");
    let mut vars = release_vars();
    vars.remove(SECRET_ENV);
    vars.insert(KEY_FILE_ENV, key_file.path_str());

    let err = expect_error(session_settings_from_env(&mock_env(vars), BuildMode::Release));
    assert!(matches!(err, SessionConfigError::KeyTooShort { .. }));
}

#[rstest]
fn release_missing_key_file_is_rejected() {
    let mut vars = release_vars();
    vars.remove(SECRET_ENV);
    vars.insert(
        KEY_FILE_ENV,
        std::env::temp_dir()
            .join(format!("absent-{}", Uuid::new_v4()))
            .display()
            .to_string(),
    );

    let err = expect_error(session_settings_from_env(&mock_env(vars), BuildMode::Release));
    assert!(matches!(err, SessionConfigError::KeyRead { .. }));
}

#[rstest]
fn secret_and_key_file_derive_the_same_key() {
    let key_file = TempKeyFile::new(SESSION_KEY_RELEASE_MIN_LEN).expect("key file");
    let mut from_file = release_vars();
    from_file.remove(SECRET_ENV);
    from_file.insert(KEY_FILE_ENV, key_file.path_str());
    let mut from_secret = release_vars();
    from_secret.insert(SECRET_ENV, "k".repeat(SESSION_KEY_RELEASE_MIN_LEN));

    let a = session_settings_from_env(&mock_env(from_file), BuildMode::Release).expect("file");
    let b = session_settings_from_env(&mock_env(from_secret), BuildMode::Release).expect("secret");
    assert_eq!(a.key.master(), b.key.master());
}

#[rstest]
fn debug_defaults_allow_ephemeral_key() {
    let mut vars = HashMap::new();
    vars.insert(
        KEY_FILE_ENV,
        std::env::temp_dir()
            .join(format!("absent-{}", Uuid::new_v4()))
            .display()
            .to_string(),
    );
    let settings = session_settings_from_env(&mock_env(vars), BuildMode::Debug)
        .expect("debug defaults should succeed");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Lax);
}

#[rstest]
#[case("unexpected", SameSite::Lax)]
#[case("strict", SameSite::Strict)]
#[case("NONE", SameSite::None)]
fn debug_same_site_parsing(#[case] value: &str, #[case] expected: SameSite) {
    let mut vars = release_vars();
    vars.insert(SAMESITE_ENV, value.to_owned());
    let settings =
        session_settings_from_env(&mock_env(vars), BuildMode::Debug).expect("debug settings");
    assert_eq!(settings.same_site, expected);
}

#[rstest]
#[case("1", Some(true))]
#[case("Yes", Some(true))]
#[case("n", Some(false))]
#[case("FALSE", Some(false))]
#[case("2", None)]
fn bool_parsing(#[case] raw: &str, #[case] expected: Option<bool>) {
    assert_eq!(parse_bool(raw), expected);
}
