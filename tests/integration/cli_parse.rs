use clap::Parser;
use infinite::tooling::cli::{Cli, CliContext, Commands};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn parse_valid_command_matrix() {
    let cases: Vec<Vec<&str>> = vec![
        vec!["infinite"],
        vec!["infinite", "--workspace", "/tmp"],
        vec!["infinite", "value"],
        vec!["infinite", "value", "db/user"],
        vec!["infinite", "value", "db", "--set", "Hello!"],
        vec!["infinite", "v", "db", "-s", "Hello!"],
        vec!["infinite", "children", "db"],
        vec!["infinite", "c", "db", "--new", "user"],
        vec!["infinite", "children", "--format", "json"],
        vec!["infinite", "tree", "--depth", "2"],
        vec!["infinite", "--config", "custom.toml", "tree"],
        vec!["infinite", "--log-level", "debug", "--log-output", "stderr", "value"],
    ];

    for args in cases {
        let parsed = Cli::try_parse_from(args.clone());
        assert!(parsed.is_ok(), "expected valid parse for args: {args:?}");
    }
}

#[test]
fn parse_rejects_bad_input() {
    assert!(Cli::try_parse_from(["infinite", "tree", "--depth", "-1"]).is_err());
    assert!(Cli::try_parse_from(["infinite", "frobnicate"]).is_err());
}

#[test]
fn bare_invocation_defaults_to_root_value() {
    let cli = Cli::try_parse_from(["infinite"]).unwrap();
    assert!(cli.command.is_none());
    assert_eq!(
        cli.resolved_command(),
        Commands::Value {
            path: None,
            set: None
        }
    );

    let with_command = Cli::try_parse_from(["infinite", "tree"]).unwrap();
    assert_eq!(
        with_command.resolved_command(),
        Commands::Tree {
            path: None,
            depth: None
        }
    );
}

#[test]
fn cli_context_uses_workspace_config() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("infinite.toml"),
        "[storage]\nroot = \"store\"\nmax_name_len = 16\n",
    )
    .unwrap();
    fs::create_dir(temp.path().join("store")).unwrap();

    let ctx = CliContext::new(temp.path().to_path_buf(), None).unwrap();
    let set = Commands::Value {
        path: None,
        set: Some("a value long enough to need several chunks".to_string()),
    };
    assert_eq!(ctx.execute(&set).unwrap(), "");

    let names: Vec<PathBuf> = fs::read_dir(temp.path().join("store"))
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert!(names.len() > 1);
    assert!(names
        .iter()
        .all(|p| p.file_name().unwrap().to_str().unwrap().len() <= 16));

    let get = Commands::Value {
        path: None,
        set: None,
    };
    assert_eq!(
        ctx.execute(&get).unwrap(),
        "a value long enough to need several chunks"
    );
}
