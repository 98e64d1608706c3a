use std::path::Path;
use std::process::{Command, Output};

use skadis_export::dxf::{Dxf, Entity};
use skadis_layout::Parameters;

fn skadis(args: &[&str], cwd: &Path) -> Output {
    let output = Command::new(env!("CARGO_BIN_EXE_skadis"))
        .current_dir(cwd)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("run skadis");
    assert!(
        output.status.success(),
        "CLI failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    output
}

#[test]
fn default_board_is_written_to_output_dir() {
    let dir = tempfile::tempdir().unwrap();
    let out = skadis(&["generate"], dir.path());

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert_eq!(stdout.trim(), "Board: 762 × 558.8 mm, Holes: 481");

    let dxf = Dxf::parse_file(dir.path().join("output/skadis_board.dxf")).unwrap();
    assert_eq!(dxf.entities_on("BOARD").count(), 1);
    assert_eq!(dxf.entities_on("HOLES").count(), 481);
    assert!(
        dxf.entities
            .iter()
            .all(|e| matches!(e, Entity::LwPolyline(_)))
    );
    assert!(!dir.path().join("output/preview.svg").exists());
}

#[test]
fn overrides_win_over_the_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("board.yaml");
    std::fs::write(&config, "board_width: 400\nboard_height: 300\ncorner_radius: 0\n").unwrap();

    let out = skadis(
        &[
            "generate",
            config.to_str().unwrap(),
            "--board-height",
            "200",
            "--output",
            "cut",
            "--name",
            "small",
        ],
        dir.path(),
    );
    assert!(String::from_utf8_lossy(&out.stdout).starts_with("Board: 400 × 200 mm"));

    let dxf = Dxf::parse_file(dir.path().join("cut/small.dxf")).unwrap();
    let Some(Entity::LwPolyline(board)) = dxf.entities_on("BOARD").next() else {
        panic!("board outline missing");
    };
    assert!(board.bulges.iter().all(|b| *b == 0.0));
    let max_y = board.vertices.iter().map(|v| v.y).fold(f64::MIN, f64::max);
    assert_eq!(max_y, 200.0);
}

#[test]
fn segments_and_preview_flags() {
    let dir = tempfile::tempdir().unwrap();
    skadis(
        &[
            "generate",
            "--board-width",
            "200",
            "--board-height",
            "100",
            "--segments",
            "--preview",
        ],
        dir.path(),
    );

    let dxf = Dxf::parse_file(dir.path().join("output/skadis_board.dxf")).unwrap();
    assert!(!dxf.entities.is_empty());
    assert!(
        dxf.entities
            .iter()
            .all(|e| matches!(e, Entity::Line(_) | Entity::Arc(_)))
    );

    let svg = std::fs::read_to_string(dir.path().join("output/preview.svg")).unwrap();
    assert!(svg.starts_with("<svg "));
    assert!(svg.ends_with("</svg>"));
}

#[test]
fn debug_prints_the_toolpath_tip() {
    let dir = tempfile::tempdir().unwrap();
    let out = skadis(&["generate", "--debug"], dir.path());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Holes: 481"));
    assert!(stdout.contains("toolpath"));
    // Logs never reach stdout.
    assert!(!stdout.contains("DEBUG"));
    assert!(String::from_utf8_lossy(&out.stderr).contains("resolved parameters"));
}

#[test]
fn defaults_round_trip_through_yaml_and_json() {
    let dir = tempfile::tempdir().unwrap();

    let yaml = skadis(&["defaults"], dir.path());
    let parsed = Parameters::from_yaml_str(&String::from_utf8_lossy(&yaml.stdout)).unwrap();
    assert_eq!(parsed, Parameters::default());

    let json = skadis(&["defaults", "--json"], dir.path());
    let value: serde_json::Value = serde_json::from_slice(&json.stdout).unwrap();
    assert_eq!(value["h_spacing"], 20.0);
    assert_eq!(value["offset_right"], 20.0);
}
