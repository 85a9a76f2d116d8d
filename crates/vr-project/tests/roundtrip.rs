use vr_project::schema::*;
use vr_project::{
    ProjectError, load, load_json, load_yaml, save, save_json, save_yaml, validate_scenario,
};

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(name)
}

#[test]
fn roundtrip_yaml_reference_scenario() {
    let scenario = reference_scenario();
    validate_scenario(&scenario).unwrap();

    let path = temp_path("vr_project_roundtrip_reference.yaml");
    save_yaml(&path, &scenario).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(scenario, loaded);
}

#[test]
fn roundtrip_json_with_all_disturbance_kinds() {
    let mut scenario = Scenario::new("all kinds");
    scenario.regulator.t_end = 5.0;
    scenario.disturbances = vec![
        DisturbanceDef::Noise {
            std_dev: 1.0,
            seed: None,
        },
        DisturbanceDef::Sinusoid {
            amplitude: 2.0,
            period_s: 3.0,
            phase_rad: 0.5,
        },
        DisturbanceDef::Pulse {
            magnitude: -4.0,
            start_s: 1.0,
            end_s: 1.0,
        },
        DisturbanceDef::Constant { value: 0.25 },
    ];

    let path = temp_path("vr_project_roundtrip_all_kinds.json");
    save_json(&path, &scenario).unwrap();
    let loaded = load_json(&path).unwrap();

    assert_eq!(scenario, loaded);
}

#[test]
fn dispatch_on_extension() {
    let scenario = default_scenario();
    let path = temp_path("vr_project_dispatch.yml");
    save(&path, &scenario).unwrap();
    assert_eq!(load(&path).unwrap(), scenario);

    let err = save(&temp_path("vr_project_dispatch.toml"), &scenario).unwrap_err();
    assert!(
        matches!(err, ProjectError::UnsupportedFormat { ref extension } if extension == "toml")
    );
}

#[test]
fn omitted_fields_take_defaults() {
    let yaml = r#"
name: sparse
regulator:
  dt: 0.1
disturbances:
  - type: Sinusoid
    amplitude: 1.0
    period_s: 10.0
"#;
    let scenario: Scenario = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(scenario.version, LATEST_VERSION);
    assert_eq!(scenario.regulator.dt, 0.1);
    assert_eq!(scenario.regulator.v_min, 210.0);
    assert_eq!(scenario.regulator.b, 220.0);
    assert_eq!(scenario.regulator.t_end, 100.0);
    assert_eq!(
        scenario.disturbances,
        vec![DisturbanceDef::Sinusoid {
            amplitude: 1.0,
            period_s: 10.0,
            phase_rad: 0.0,
        }]
    );
}

#[test]
fn invalid_scenario_not_saved() {
    let mut scenario = Scenario::new("bad");
    scenario.regulator.t_end = -1.0;
    let path = temp_path("vr_project_invalid.yaml");
    let err = save_yaml(&path, &scenario).unwrap_err();
    assert!(matches!(err, ProjectError::Validation(_)));
}

#[test]
fn unknown_disturbance_type_fails_to_parse() {
    let yaml = "name: x\ndisturbances:\n  - type: Chirp\n    rate: 1.0\n";
    assert!(serde_yaml::from_str::<Scenario>(yaml).is_err());
}
