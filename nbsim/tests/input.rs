use std::io::Write;

use nbsim::{
    load_bodies, parse_bodies, BodyRecord, CubeFormConfig, IntegratorConfig, LayoutConfig, Parameters, RunConfig,
    SimError,
};

fn invalid_line(err: &SimError) -> Option<usize> {
    match err {
        SimError::InvalidInput { line, .. } => *line,
        other => panic!("expected InvalidInput, got {other}"),
    }
}

// ==================================================================================
// Initial-condition file
// ==================================================================================

#[test]
fn parses_seven_field_rows() {
    let bodies = parse_bodies("1.0 -0.5 0 0 0 -0.7 0\n1.0 0.5 0 0 0 0.7 0\n").unwrap();
    assert_eq!(
        bodies,
        vec![
            BodyRecord::new(1.0, [-0.5, 0.0, 0.0], [0.0, -0.7, 0.0]),
            BodyRecord::new(1.0, [0.5, 0.0, 0.0], [0.0, 0.7, 0.0]),
        ]
    );
}

#[test]
fn leading_label_column_is_ignored() {
    let text = "0 1e-3  1 2 3  4 5 6\n17 2.5e-1 -1 -2 -3 -4 -5 -6\n";
    let bodies = parse_bodies(text).unwrap();
    assert_eq!(bodies.len(), 2);
    assert_eq!(bodies[0], BodyRecord::new(1e-3, [1.0, 2.0, 3.0], [4.0, 5.0, 6.0]));
    assert_eq!(bodies[1].m, 0.25);
}

#[test]
fn comments_and_blank_lines_are_skipped() {
    let text = "# mass x y z vx vy vz\n\n   \n1 0 0 0 0 0 0\n\t# trailing note\n";
    assert_eq!(parse_bodies(text).unwrap().len(), 1);
}

#[test]
fn wrong_field_count_names_the_line() {
    let err = parse_bodies("1 0 0 0 0 0 0\n# ok\n1 2 3\n").unwrap_err();
    assert_eq!(invalid_line(&err), Some(3));
    assert!(err.to_string().contains("found 3"), "{err}");
}

#[test]
fn non_numeric_field_is_rejected() {
    let err = parse_bodies("1 0 0 0 0 0 0\n1 0 zero 0 0 0 0\n").unwrap_err();
    assert_eq!(invalid_line(&err), Some(2));
    assert!(err.to_string().contains("`zero`"), "{err}");
}

#[test]
fn non_finite_and_negative_mass_are_rejected() {
    assert_eq!(invalid_line(&parse_bodies("1 0 0 NaN 0 0 0\n").unwrap_err()), Some(1));
    assert_eq!(invalid_line(&parse_bodies("1 0 0 0 inf 0 0\n").unwrap_err()), Some(1));
    assert_eq!(invalid_line(&parse_bodies("-1 0 0 0 0 0 0\n").unwrap_err()), Some(1));
}

#[test]
fn empty_file_has_no_bodies() {
    let err = parse_bodies("# nothing here\n\n").unwrap_err();
    assert_eq!(invalid_line(&err), None);
}

#[test]
fn loads_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "# binary").unwrap();
    writeln!(file, "1.0 -0.5 0.0 0.0 0.0 -0.7071067811865476 0.0").unwrap();
    writeln!(file, "1.0  0.5 0.0 0.0 0.0  0.7071067811865476 0.0").unwrap();

    let bodies = load_bodies(file.path()).unwrap();
    assert_eq!(bodies.len(), 2);
    assert_eq!(bodies[1].v[1], 0.5_f64.sqrt());
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_bodies(&dir.path().join("absent.txt")).unwrap_err();
    assert!(matches!(err, SimError::Io { .. }), "{err}");
}

// ==================================================================================
// Run config
// ==================================================================================

#[test]
fn full_config_parses() {
    let cfg = RunConfig::from_yaml_str(
        r#"
engine:
  integrator: "euler"
  layout: "encapsulated"
  cube: "power-1.5"
parameters:
  t_end: 2.5
  dt: 0.01
  report_every: 10
"#,
    )
    .unwrap();

    assert_eq!(cfg.engine.integrator, IntegratorConfig::Euler);
    assert_eq!(cfg.engine.layout, LayoutConfig::Encapsulated);
    assert_eq!(cfg.engine.cube_form, CubeFormConfig::Power);

    let params = Parameters::from(cfg.parameters);
    assert_eq!(params, Parameters { t_end: 2.5, dt: 0.01, report_every: 10 });
    assert_eq!(params.step_count(), 250);
}

#[test]
fn missing_sections_take_defaults() {
    let cfg = RunConfig::from_yaml_str("parameters:\n  dt: 0.002\n").unwrap();
    assert_eq!(cfg.engine.integrator, IntegratorConfig::Leapfrog);
    assert_eq!(cfg.engine.layout, LayoutConfig::Flat);
    assert_eq!(cfg.engine.cube_form, CubeFormConfig::SqrtMultiply);

    let params = Parameters::from(cfg.parameters);
    assert_eq!(params.t_end, 10.0);
    assert_eq!(params.dt, 0.002);
    assert_eq!(params.report_every, 100);

    assert_eq!(RunConfig::from_yaml_str("").unwrap(), RunConfig::default());
}

#[test]
fn unknown_keys_and_values_are_rejected() {
    assert!(RunConfig::from_yaml_str("engine:\n  integrator: rk4\n").is_err());
    assert!(RunConfig::from_yaml_str("engine:\n  softening: 0.1\n").is_err());
    assert!(RunConfig::from_yaml_str("parameters:\n  h0: 0.1\n").is_err());
}

#[test]
fn config_file_errors_name_the_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "engine: [not, a, map]").unwrap();

    let err = RunConfig::from_path(file.path()).unwrap_err();
    assert!(matches!(err, SimError::Config { .. }), "{err}");
    assert!(err.to_string().contains(&file.path().display().to_string()));
}

#[test]
fn shipped_scenarios_load() {
    let dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios");

    let binary = load_bodies(&dir.join("circular_binary.txt")).unwrap();
    assert_eq!(binary, nbsim::circular_binary(1.0, 1.0));

    let figure_eight = load_bodies(&dir.join("three_body.txt")).unwrap();
    assert_eq!(figure_eight.len(), 3);

    let cfg = RunConfig::from_path(&dir.join("run.yaml")).unwrap();
    assert_eq!(cfg.engine.layout, LayoutConfig::Flat);
    assert_eq!(cfg.parameters.t_end, Some(10.0));
}
