use pretty_assertions::assert_eq;
use std::path::PathBuf;
use supcom_flame::aggregator::MergePolicy;
use supcom_flame::commands::{execute_convert, validate_args, validate_log_file, ConvertArgs};
use supcom_flame::output::read_profile;

const LOG: &str = "\
info: Loading sim
info: prof: /srv/fa/LOUD/gamedata/lua/lua/siminit.lua,1,main,0;/srv/fa/LOUD/gamedata/lua/lua/siminit.lua,5,helper,10;3,0.006
info: prof: /srv/fa/LOUD/gamedata/lua/lua/siminit.lua,1,main,0;/srv/fa/LOUD/gamedata/lua/lua/siminit.lua,6,other,10;2,0.004
";

fn write_log(dir: &tempfile::TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("loud.log");
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_validate_args_valid() {
    let args = ConvertArgs {
        input: PathBuf::from("loud.log"),
        ..Default::default()
    };

    assert!(validate_args(&args).is_ok());
}

#[test]
fn test_validate_args_empty_input() {
    let args = ConvertArgs::default();

    assert!(validate_args(&args).is_err());
}

#[test]
fn test_validate_args_top_paths_too_large() {
    let args = ConvertArgs {
        input: PathBuf::from("loud.log"),
        top_paths: 2000,
        ..Default::default()
    };

    assert!(validate_args(&args).is_err());
}

#[test]
fn test_convert_writes_folded_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_log(&dir, LOG);
    let output = dir.path().join("out/loud.folded");
    let profile_path = dir.path().join("out/profile.json");

    let args = ConvertArgs {
        input,
        output: output.clone(),
        output_json: Some(profile_path.clone()),
        ..Default::default()
    };

    let stats = execute_convert(args).unwrap();
    assert_eq!(stats.stack_count, 2);
    assert_eq!(stats.total_samples, 5);
    assert_eq!(stats.node_count, 3);

    // No '@' marker in this log, so sources keep their full path
    let folded = std::fs::read_to_string(&output).unwrap();
    let main = "/srv/fa/LOUD/gamedata/lua/lua/siminit.lua:1(main)";
    assert_eq!(
        folded,
        format!(
            "{main};{main}->10;/srv/fa/LOUD/gamedata/lua/lua/siminit.lua:5(helper) 6\n\
             {main};{main}->10;/srv/fa/LOUD/gamedata/lua/lua/siminit.lua:6(other) 4\n"
        )
    );

    let profile = read_profile(&profile_path).unwrap();
    assert_eq!(profile.hot_paths.len(), 2);
    assert_eq!(profile.hot_paths[0].self_ms, 6);
    assert_eq!(profile.hot_paths[0].percentage, 60.0);
}

#[test]
fn test_convert_with_flamegraph_and_sum_policy() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_log(&dir, LOG);
    let svg_path = dir.path().join("loud.svg");

    let args = ConvertArgs {
        input,
        output: dir.path().join("loud.folded"),
        output_svg: Some(svg_path.clone()),
        merge_policy: MergePolicy::Sum,
        ..Default::default()
    };

    execute_convert(args).unwrap();

    let svg = std::fs::read_to_string(&svg_path).unwrap();
    assert!(svg.contains("<svg"));
}

#[test]
fn test_convert_rejects_unsupported_log() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_log(&dir, "info: no profiler here\n");
    let output = dir.path().join("loud.folded");

    let args = ConvertArgs {
        input,
        output: output.clone(),
        ..Default::default()
    };

    assert!(execute_convert(args).is_err());
    assert!(!output.exists());
}

#[test]
fn test_convert_missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let args = ConvertArgs {
        input: dir.path().join("missing.log"),
        output: dir.path().join("loud.folded"),
        ..Default::default()
    };

    assert!(execute_convert(args).is_err());
}

#[test]
fn test_validate_log_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_log(&dir, LOG);

    let parsed = validate_log_file(&input).unwrap();

    assert_eq!(parsed.stacks.len(), 2);
    assert_eq!(parsed.path_config.separator, '/');
    assert_eq!(parsed.path_config.prefix, "");
}
