use super::build_settings;

use std::{
    env, fs,
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};

use config::{Environment, Map};

fn temp_root(label: &str) -> PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let root = env::temp_dir().join(format!("wedding_cli_{label}_{suffix}"));
    fs::create_dir_all(&root).expect("temp root");
    root
}

fn env_from(pairs: &[(&str, &str)]) -> Environment {
    let vars: Map<String, String> = pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();
    Environment::with_prefix("SITE").source(Some(vars))
}

#[test]
fn missing_optional_file_yields_defaults() {
    let root = temp_root("defaults");
    let settings =
        build_settings(&root.join("site.toml"), false, env_from(&[])).expect("settings");

    assert_eq!(settings.max_guests, 10);
    assert_eq!(settings.meal_options.len(), 5);
    assert!(!settings.is_intake_configured());

    fs::remove_dir_all(root).expect("cleanup");
}

#[test]
fn missing_explicit_file_is_an_error() {
    let root = temp_root("explicit");
    let err = build_settings(&root.join("nope.toml"), true, env_from(&[]))
        .expect_err("file is required");
    assert!(err.to_string().contains("failed to read site configuration"));

    fs::remove_dir_all(root).expect("cleanup");
}

#[test]
fn environment_overrides_file_values() {
    let root = temp_root("layered");
    let path = root.join("site.toml");
    fs::write(
        &path,
        r#"
intake_url = "https://script.example.com/macros/s/abc/exec"
wedding_date = "2027-06-05T15:30:00"
max_guests = 6

[ceremony]
name = "Lakeside Pavilion"
"#,
    )
    .expect("write config");

    let settings = build_settings(
        &path,
        true,
        env_from(&[
            ("SITE__MAX_GUESTS", "4"),
            ("SITE__MEAL_OPTIONS", "Salmon,Risotto"),
            ("SITE__RECEPTION__NAME", "Boathouse"),
        ]),
    )
    .expect("settings");

    assert!(settings.is_intake_configured());
    assert_eq!(settings.max_guests, 4);
    assert_eq!(settings.meal_options, vec!["Salmon", "Risotto"]);
    assert_eq!(settings.ceremony.name, "Lakeside Pavilion");
    assert_eq!(settings.reception.name, "Boathouse");
    assert_eq!(
        settings.wedding_date.format("%Y-%m-%d %H:%M").to_string(),
        "2027-06-05 15:30"
    );

    fs::remove_dir_all(root).expect("cleanup");
}

#[test]
fn invalid_values_are_rejected() {
    let root = temp_root("invalid");
    let path = root.join("site.toml");
    fs::write(&path, "max_guests = 0\n").expect("write config");

    let err = build_settings(&path, true, env_from(&[])).expect_err("zero guests");
    assert!(format!("{err:#}").contains("max_guests must be at least 1"));

    fs::remove_dir_all(root).expect("cleanup");
}
