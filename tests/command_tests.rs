use std::fs;
use std::path::PathBuf;

use calltrie::aggregator::{AggregationMode, WeightFormat};
use calltrie::commands::{
    execute_filter, execute_flat, execute_tree, validate_flat_args, validate_tree_args,
    FilterArgs, FlatArgs, NormalizeArgs, TreeArgs,
};
use calltrie::normalizer::SortMode;
use calltrie::output::read_report;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const SAMPLES: &str = "main;foo;bar 5\nmain;foo;baz 3\n\nmain;qux 1\nidle;park 40\n";

fn write_input(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_validate_tree_args_valid() {
    assert!(validate_tree_args(&TreeArgs::default()).is_ok());
}

#[test]
fn test_validate_tree_args_zero_indent() {
    let args = TreeArgs {
        indent_width: 0,
        ..Default::default()
    };
    assert!(validate_tree_args(&args).is_err());
}

#[test]
fn test_validate_tree_args_missing_input() {
    let args = TreeArgs {
        input: Some(PathBuf::from("/definitely/not/here.txt")),
        ..Default::default()
    };
    assert!(validate_tree_args(&args).is_err());
}

#[test]
fn test_validate_flat_args_structure_mode() {
    let args = FlatArgs {
        mode: AggregationMode::Structure,
        ..Default::default()
    };
    assert!(validate_flat_args(&args).is_err());
}

#[test]
fn test_validate_flat_args_top_paths() {
    let zero = FlatArgs {
        top_paths: 0,
        ..Default::default()
    };
    let huge = FlatArgs {
        top_paths: 2000,
        ..Default::default()
    };
    assert!(validate_flat_args(&zero).is_err());
    assert!(validate_flat_args(&huge).is_err());
    assert!(validate_flat_args(&FlatArgs::default()).is_ok());
}

#[test]
fn test_validate_flat_args_empty_separator() {
    let args = FlatArgs {
        separator: String::new(),
        ..Default::default()
    };
    assert!(validate_flat_args(&args).is_err());
}

#[test]
fn test_execute_tree() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir, "samples.txt", SAMPLES);
    let output = dir.path().join("tree.txt");

    execute_tree(TreeArgs {
        input: Some(input),
        output: Some(output.clone()),
        normalize: NormalizeArgs {
            pattern: Some("main".to_string()),
            sort_mode: SortMode::NameOnly,
            ..Default::default()
        },
        ..Default::default()
    })
    .unwrap();

    assert_eq!(
        fs::read_to_string(output).unwrap(),
        "main\n foo\n  bar\n  baz\n qux\n"
    );
}

#[test]
fn test_execute_tree_keeps_lines_with_odd_remainders() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(
        &dir,
        "samples.txt",
        "main;foo 5\nmain;bar samples\nmain;baz -3\nmain;qux 1e400\n",
    );
    let output = dir.path().join("tree.txt");

    execute_tree(TreeArgs {
        input: Some(input),
        output: Some(output.clone()),
        ..Default::default()
    })
    .unwrap();

    assert_eq!(
        fs::read_to_string(output).unwrap(),
        "main\n bar\n baz\n foo\n qux\n"
    );
}

#[test]
fn test_execute_tree_invalid_pattern() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir, "samples.txt", SAMPLES);

    let result = execute_tree(TreeArgs {
        input: Some(input),
        output: Some(dir.path().join("tree.txt")),
        normalize: NormalizeArgs {
            pattern: Some("main(".to_string()),
            ..Default::default()
        },
        ..Default::default()
    });

    assert!(result.is_err());
}

#[test]
fn test_execute_flat_with_exclusions_and_report() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir, "samples.txt", SAMPLES);
    let exclude = write_input(&dir, "exclude.txt", "park\n\n");
    let output = dir.path().join("flat.txt");
    let json = dir.path().join("reports/report.json");

    let args = FlatArgs {
        input: Some(input.clone()),
        output: Some(output.clone()),
        exclude: Some(exclude),
        json: Some(json.clone()),
        top_paths: 2,
        ..Default::default()
    };
    validate_flat_args(&args).unwrap();
    execute_flat(args).unwrap();

    assert_eq!(
        fs::read_to_string(output).unwrap(),
        "main;foo;bar 5\nmain;foo;baz 3\nmain;qux 1\n"
    );

    let report = read_report(json).unwrap();
    assert_eq!(report.source, input.display().to_string());
    assert_eq!(report.aggregation, "terminal");
    assert_eq!(report.records.lines_read, 5);
    assert_eq!(report.records.accepted, 4);
    assert_eq!(report.records.blank, 1);
    assert_eq!(report.unique_paths, 3);
    assert_eq!(report.total_weight, 49.0);
    assert_eq!(report.hot_paths.len(), 2);
    assert_eq!(report.hot_paths[0].stack, "main;foo;bar");
}

#[test]
fn test_execute_flat_reversed_input_prints_leaf_first() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir, "samples.txt", "bar;foo;main 5\nbaz;foo;main 3\n");
    let output = dir.path().join("flat.txt");

    execute_flat(FlatArgs {
        input: Some(input),
        output: Some(output.clone()),
        normalize: NormalizeArgs {
            reverse: true,
            ..Default::default()
        },
        ..Default::default()
    })
    .unwrap();

    assert_eq!(
        fs::read_to_string(output).unwrap(),
        "bar;foo;main 5\nbaz;foo;main 3\n"
    );
}

#[test]
fn test_execute_flat_fractional_with_flamegraph() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir, "samples.txt", "a;b 1.5\na;b 1.25\na 2\n");
    let output = dir.path().join("flat.txt");
    let svg = dir.path().join("flamegraph.svg");

    execute_flat(FlatArgs {
        input: Some(input),
        output: Some(output.clone()),
        weight_format: WeightFormat::Fractional,
        flamegraph: Some(svg.clone()),
        ..Default::default()
    })
    .unwrap();

    assert_eq!(fs::read_to_string(output).unwrap(), "a 2\na;b 2.75\n");
    assert!(fs::read_to_string(svg).unwrap().contains("<svg"));
}

#[test]
fn test_execute_filter() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir, "samples.txt", SAMPLES);
    let exclude = write_input(&dir, "exclude.txt", "foo\n");
    let output = dir.path().join("filtered.txt");

    execute_filter(FilterArgs {
        input: Some(input),
        output: Some(output.clone()),
        exclude,
    })
    .unwrap();

    assert_eq!(
        fs::read_to_string(output).unwrap(),
        "\nmain;qux 1\nidle;park 40\n"
    );
}
