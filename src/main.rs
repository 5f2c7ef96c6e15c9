//! Shaderwire command line tool
//!
//! Loads a node graph from a JSON scene file, converts one shader (or
//! every convertible shader with `--all`) to `aiStandardSurface`, and
//! writes the mutated graph back out.

use std::fs;
use std::process::ExitCode;

use log::{error, info, warn};
use serde::{Deserialize, Serialize};

use shaderwire::convert::{convert, convert_all, AttributeMap, DEFAULT_MAP};
use shaderwire::nodes::NodeGraph;

const SCENE_VERSION: &str = "1.0";

/// On-disk scene document
#[derive(Debug, Serialize, Deserialize)]
struct SceneFile {
    version: String,
    graph: NodeGraph,
}

struct Args {
    scene: String,
    source: Option<String>,
    dest: Option<String>,
    map: Option<String>,
    out: Option<String>,
    all: bool,
    delete_sources: bool,
}

const USAGE: &str = "usage: shaderwire <scene.json> <source> <dest> [options]
       shaderwire <scene.json> --all [options]

options:
    --map <table.json>   use a custom attribute mapping table
    --out <scene.json>   write the converted graph here instead of in place
    --delete-sources     with --all, remove converted legacy shaders
";

fn parse_args(argv: &[String]) -> Result<Args, String> {
    let mut positional = Vec::new();
    let mut map = None;
    let mut out = None;
    let mut all = false;
    let mut delete_sources = false;

    let mut iter = argv.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--all" => all = true,
            "--delete-sources" => delete_sources = true,
            "--map" => {
                map = Some(
                    iter.next()
                        .ok_or_else(|| "--map needs a file argument".to_string())?
                        .clone(),
                )
            }
            "--out" => {
                out = Some(
                    iter.next()
                        .ok_or_else(|| "--out needs a file argument".to_string())?
                        .clone(),
                )
            }
            other if other.starts_with("--") => {
                return Err(format!("unknown option: {}", other));
            }
            other => positional.push(other.to_string()),
        }
    }

    let mut positional = positional.into_iter();
    let scene = positional.next().ok_or_else(|| "missing scene file".to_string())?;
    let (source, dest) = if all {
        (None, None)
    } else {
        let source = positional
            .next()
            .ok_or_else(|| "missing source node (or --all)".to_string())?;
        let dest = positional
            .next()
            .ok_or_else(|| "missing destination node".to_string())?;
        (Some(source), Some(dest))
    };

    Ok(Args {
        scene,
        source,
        dest,
        map,
        out,
        all,
        delete_sources,
    })
}

fn load_scene(path: &str) -> Result<SceneFile, String> {
    let text = fs::read_to_string(path).map_err(|e| format!("{}: {}", path, e))?;
    serde_json::from_str(&text).map_err(|e| format!("{}: {}", path, e))
}

fn save_scene(path: &str, scene: &SceneFile) -> Result<(), String> {
    let text = serde_json::to_string_pretty(scene).map_err(|e| e.to_string())?;
    fs::write(path, text).map_err(|e| format!("{}: {}", path, e))
}

fn load_map(path: &str) -> Result<AttributeMap, String> {
    let text = fs::read_to_string(path).map_err(|e| format!("{}: {}", path, e))?;
    AttributeMap::from_json(&text).map_err(|e| format!("{}: {}", path, e))
}

fn run(args: &Args) -> Result<(), String> {
    let mut scene = load_scene(&args.scene)?;
    let map = match &args.map {
        Some(path) => load_map(path)?,
        None => DEFAULT_MAP.clone(),
    };

    if args.all {
        let report = convert_all(&mut scene.graph, &map, args.delete_sources);
        for (source, dest) in &report.converted {
            info!("successfully converted: {} --> {}", source, dest);
        }
        for name in &report.skipped {
            warn!("({}): default shader, skipped", name);
        }
        for (source, reason) in &report.failed {
            error!("({}): {}", source, reason);
        }
        if !report.is_clean() {
            return Err(format!("{} shader(s) failed to convert", report.failed.len()));
        }
    } else {
        // parse_args guarantees both names outside --all mode
        let (Some(source), Some(dest)) = (&args.source, &args.dest) else {
            return Err(USAGE.to_string());
        };
        let report = convert(&mut scene.graph, &map, source, dest).map_err(|e| e.to_string())?;
        info!(
            "successfully converted: {} --> {} ({} connections, {} values)",
            report.source, report.dest, report.connections_rewired, report.values_copied
        );
        for warning in &report.warnings {
            warn!("{}", warning);
        }
    }

    scene.version = SCENE_VERSION.to_string();
    let out_path = args.out.as_deref().unwrap_or(&args.scene);
    save_scene(out_path, &scene)
}

fn main() -> ExitCode {
    env_logger::init();

    let argv: Vec<String> = std::env::args().skip(1).collect();
    let args = match parse_args(&argv) {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{}\n{}", msg, USAGE);
            return ExitCode::FAILURE;
        }
    };

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(msg) => {
            error!("{}", msg);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shaderwire::shaders::LambertNode;

    fn to_args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_single_conversion() {
        let args = parse_args(&to_args(&["scene.json", "lambert2", "ai1"])).unwrap();
        assert_eq!(args.scene, "scene.json");
        assert_eq!(args.source.as_deref(), Some("lambert2"));
        assert_eq!(args.dest.as_deref(), Some("ai1"));
        assert!(!args.all);
    }

    #[test]
    fn test_parse_all_with_options() {
        let args = parse_args(&to_args(&[
            "scene.json",
            "--all",
            "--delete-sources",
            "--map",
            "table.json",
            "--out",
            "out.json",
        ]))
        .unwrap();
        assert!(args.all && args.delete_sources);
        assert_eq!(args.map.as_deref(), Some("table.json"));
        assert_eq!(args.out.as_deref(), Some("out.json"));
    }

    #[test]
    fn test_parse_rejects_missing_arguments() {
        assert!(parse_args(&to_args(&[])).is_err());
        assert!(parse_args(&to_args(&["scene.json"])).is_err());
        assert!(parse_args(&to_args(&["scene.json", "src"])).is_err());
        assert!(parse_args(&to_args(&["scene.json", "--map"])).is_err());
        assert!(parse_args(&to_args(&["scene.json", "--bogus"])).is_err());
    }

    #[test]
    fn test_scene_file_round_trip() {
        let mut graph = NodeGraph::new();
        graph.add_node(LambertNode::create("lambert2"));
        let scene = SceneFile {
            version: SCENE_VERSION.to_string(),
            graph,
        };
        let text = serde_json::to_string(&scene).unwrap();
        let loaded: SceneFile = serde_json::from_str(&text).unwrap();
        assert_eq!(loaded.version, SCENE_VERSION);
        assert!(loaded.graph.node_by_name("lambert2").is_ok());
    }
}
