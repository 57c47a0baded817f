use crate::domain::graph::Graph;
use crate::infrastructure::event_ndjson::spawn_ndjson_printer;
use crate::infrastructure::scc_kosaraju::KosarajuSccDetector;
use crate::infrastructure::serde_json_adapter::{
    read_graph_file, write_report_file, AnalysisReportDto,
};
use crate::infrastructure::text_format::{read_edge_list_file, render_report};
use crate::usecase::analyze::analyze_graph;
use crate::usecase::event::AppEvent;
use crate::usecase::validate::validate_analysis;
use anyhow::{anyhow, Context, Result};
use std::env;
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;

pub async fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    run_with_args(&args).await
}

pub async fn run_with_args(args: &[String]) -> Result<()> {
    let cmd = Cli::parse(args)?;

    match cmd {
        Cli::GraphScc {
            input,
            format,
            output,
            emit_events,
        } => {
            if let Some(out) = output.as_deref() {
                if is_same_file(&input, out) {
                    return Err(anyhow!("refusing to overwrite input graph: {input}"));
                }
            }

            let (tx, rx) = mpsc::channel::<AppEvent>(1024);
            let printer = if emit_events {
                Some(spawn_ndjson_printer(rx))
            } else {
                drop(rx);
                None
            };

            let graph = load_graph(&input, format).await?;
            let detector = KosarajuSccDetector;
            let (analysis, stats) = analyze_graph(&graph, &detector, Some(tx)).await?;

            if let Some(handle) = printer {
                handle.await.ok();
            }

            match output {
                Some(out) => {
                    write_report_file(&out, &AnalysisReportDto::from(&analysis))
                        .await
                        .with_context(|| format!("writing report: {out}"))?;
                }
                None => print!("{}", render_report(&analysis)),
            }

            eprintln!(
                "summary: vertices={} edges={} components={} cyclic_components={} largest_component={} condensation_edges={}",
                stats.vertices,
                stats.edges,
                stats.components,
                stats.cyclic_components,
                stats.largest_component,
                stats.condensation_edges
            );

            Ok(())
        }

        Cli::GraphCheck { input, format } => {
            let graph = load_graph(&input, format).await?;
            let detector = KosarajuSccDetector;
            let (analysis, _stats) = analyze_graph(&graph, &detector, None).await?;

            validate_analysis(&graph, &analysis)
                .with_context(|| format!("checking analysis of: {input}"))?;

            eprintln!("ok: invariants validated");
            Ok(())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputFormat {
    Json,
    Text,
}

impl InputFormat {
    fn parse(s: &str) -> Result<Self> {
        match s {
            "json" => Ok(Self::Json),
            "text" | "txt" => Ok(Self::Text),
            other => Err(anyhow!(format!("unknown format: {other}\n\n{}", usage()))),
        }
    }

    fn from_extension(path: &str) -> Self {
        match Path::new(path).extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Text,
        }
    }
}

async fn load_graph(input: &str, format: InputFormat) -> Result<Graph> {
    match format {
        InputFormat::Json => read_graph_file(input)
            .await
            .with_context(|| format!("reading graph JSON: {input}"))?
            .to_graph()
            .with_context(|| format!("building graph: {input}")),
        InputFormat::Text => read_edge_list_file(input)
            .await
            .with_context(|| format!("reading edge list: {input}")),
    }
}

#[derive(Debug)]
enum Cli {
    GraphScc {
        input: String,
        format: InputFormat,
        output: Option<String>,
        emit_events: bool,
    },
    GraphCheck {
        input: String,
        format: InputFormat,
    },
}

impl Cli {
    fn parse(args: &[String]) -> Result<Self> {
        // Expected:
        // <bin> graph scc --in/--input <graph> [--format json|text] [--out/--output <report.json>] [--emit-events]
        // <bin> graph check --in/--input <graph> [--format json|text]
        if args.len() < 3 {
            return Err(anyhow!(usage()));
        }

        if args[1] != "graph" {
            return Err(anyhow!(usage()));
        }

        match args[2].as_str() {
            "scc" => Self::parse_scc(args),
            "check" => Self::parse_check(args),
            _ => Err(anyhow!(usage())),
        }
    }

    fn parse_scc(args: &[String]) -> Result<Self> {
        let mut input: Option<String> = None;
        let mut format: Option<InputFormat> = None;
        let mut output: Option<String> = None;
        let mut emit_events = false;

        let mut i = 3;
        while i < args.len() {
            match args[i].as_str() {
                "--in" | "--input" => {
                    i += 1;
                    input = args.get(i).cloned();
                }
                "--out" | "--output" => {
                    i += 1;
                    output = args.get(i).cloned();
                }
                "--format" => {
                    i += 1;
                    format = Some(parse_format_arg(args.get(i))?);
                }
                "--emit-events" => {
                    emit_events = true;
                }
                "-h" | "--help" => return Err(anyhow!(usage())),
                other => return Err(anyhow!(format!("unknown arg: {other}\n\n{}", usage()))),
            }
            i += 1;
        }

        let input = input.ok_or_else(|| anyhow!(format!("missing --in/--input\n\n{}", usage())))?;
        let format = format.unwrap_or_else(|| InputFormat::from_extension(&input));

        Ok(Cli::GraphScc {
            input,
            format,
            output,
            emit_events,
        })
    }

    fn parse_check(args: &[String]) -> Result<Self> {
        let mut input: Option<String> = None;
        let mut format: Option<InputFormat> = None;

        let mut i = 3;
        while i < args.len() {
            match args[i].as_str() {
                "--in" | "--input" => {
                    i += 1;
                    input = args.get(i).cloned();
                }
                "--format" => {
                    i += 1;
                    format = Some(parse_format_arg(args.get(i))?);
                }
                "-h" | "--help" => return Err(anyhow!(usage())),
                other => return Err(anyhow!(format!("unknown arg: {other}\n\n{}", usage()))),
            }
            i += 1;
        }

        let input = input.ok_or_else(|| anyhow!(format!("missing --in/--input\n\n{}", usage())))?;
        let format = format.unwrap_or_else(|| InputFormat::from_extension(&input));

        Ok(Cli::GraphCheck { input, format })
    }
}

fn parse_format_arg(value: Option<&String>) -> Result<InputFormat> {
    let value = value.ok_or_else(|| anyhow!(format!("missing value for --format\n\n{}", usage())))?;
    InputFormat::parse(value)
}

fn usage() -> &'static str {
    "Usage:\n  graph scc --in/--input <graph> [--format json|text] [--out/--output <report.json>] [--emit-events]\n  graph check --in/--input <graph> [--format json|text]\n\nInput:\n  json: {\"vertex_count\": n, \"edges\": [[from, to], ...]}\n  text: n, then n records `v t1 t2 ... -1`. Chosen from the file extension unless --format is given.\n\nOutput:\n  Without --out the SCC list and meta-graph are printed to stdout; with --out a JSON report is written.\n  If --emit-events is set, NDJSON events are written to stdout; summary goes to stderr."
}

fn is_same_file(a: &str, b: &str) -> bool {
    let a = std::fs::canonicalize(a).unwrap_or_else(|_| PathBuf::from(a));
    let b = std::fs::canonicalize(b).unwrap_or_else(|_| PathBuf::from(b));
    a == b
}
