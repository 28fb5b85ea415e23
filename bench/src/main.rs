use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use shortpath_core::{dijkstra, Graph, SolveStats};
use tracing_subscriber::EnvFilter;

mod demo;
mod generators;

use generators::Generator;

#[derive(Parser)]
#[command(name = "shortpath-bench")]
#[command(version, about = "Demo and benchmark runner for the shortpath-core solver")]
struct Cli {
    /// What to run
    #[arg(value_enum, default_value_t = Mode::Demo)]
    mode: Mode,

    /// Target node count for synthetic graphs
    #[arg(
        env = "SHORTPATH_BENCH_NODES",
        default_value_t = 1_000_000,
        value_parser = clap::value_parser!(u64).range(16..=100_000_000)
    )]
    node_count: u64,

    /// Start node for the demo graph
    #[arg(long, default_value = "A")]
    start: String,

    /// Output format
    #[arg(long, value_enum, env = "SHORTPATH_BENCH_FORMAT", default_value_t = Format::Text)]
    format: Format,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Solve the A–F sample graph and print every shortest path
    Demo,
    /// Run all generators and benchmark each
    All,
    /// Fractal branching tree (deep paths)
    Lsystem,
    /// Preferential attachment via edge sampling (hub-and-spoke)
    Scalefree,
    /// Watts-Strogatz ring lattice + shortcuts
    Smallworld,
    /// Erdos-Renyi uniform random edges
    Random,
    /// Two dense clusters connected by a thin bridge
    Barbell,
    /// Diffusion-limited aggregation (organic branching)
    Dla,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

/// Results of one generator run.
#[derive(Debug, Serialize)]
struct BenchReport {
    generator: String,
    nodes: usize,
    edges: usize,
    memory_mb: f64,
    generate_secs: f64,
    solve_ms: f64,
    reachable: usize,
    pushes: usize,
    pops: usize,
    stale_skips: usize,
    relaxations: usize,
    far_node: u64,
    far_distance: Option<f64>,
    far_hops: Option<usize>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let generators: Vec<(&str, Generator)> = match cli.mode {
        Mode::Demo => return run_demo(&cli.start, cli.format),
        Mode::Lsystem => vec![("L-system tree", generators::gen_lsystem as Generator)],
        Mode::Scalefree => vec![("Scale-free (edge sampling)", generators::gen_scale_free as Generator)],
        Mode::Smallworld => vec![("Small-world (Watts-Strogatz)", generators::gen_small_world as Generator)],
        Mode::Random => vec![("Erdos-Renyi random", generators::gen_random as Generator)],
        Mode::Barbell => vec![("Barbell (cluster-bridge-cluster)", generators::gen_barbell as Generator)],
        Mode::Dla => vec![("DLA (organic branching)", generators::gen_dla as Generator)],
        Mode::All => vec![
            ("L-system tree", generators::gen_lsystem as Generator),
            ("Scale-free (edge sampling)", generators::gen_scale_free),
            ("Small-world (Watts-Strogatz)", generators::gen_small_world),
            ("Erdos-Renyi random", generators::gen_random),
            ("Barbell (cluster-bridge-cluster)", generators::gen_barbell),
            ("DLA (organic branching)", generators::gen_dla),
        ],
    };

    if cli.format == Format::Text {
        println!("shortpath-bench");
        println!("===============");
        println!();
    }

    let mut reports = Vec::with_capacity(generators.len());
    for (name, generator) in generators {
        let report = run_benchmark(name, generator, cli.node_count)?;
        if cli.format == Format::Text {
            print_report(&report);
        }
        reports.push(report);
    }

    if cli.format == Format::Json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }
    Ok(())
}

fn run_demo(start: &str, format: Format) -> Result<()> {
    let graph = demo::demo_graph().context("building demo graph")?;
    let result = dijkstra(&graph, &start.to_string());
    let report = demo::build_report(&result);

    match format {
        Format::Text => print!("{}", demo::render_text(&report)),
        Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

fn run_benchmark(name: &str, generator: Generator, node_count: u64) -> Result<BenchReport> {
    tracing::info!(generator = name, node_count, "generating graph");

    let t = Instant::now();
    let graph: Graph<u64> = generator(node_count).with_context(|| format!("generating {}", name))?;
    let generate_secs = t.elapsed().as_secs_f64();

    let t = Instant::now();
    let result = dijkstra(&graph, &0);
    let solve_ms = t.elapsed().as_secs_f64() * 1000.0;

    // Highest id: the last node created, typically far from the root
    let far_node = graph.node_count().saturating_sub(1) as u64;
    let far_distance = result.distance(&far_node).filter(|d| d.is_finite());
    let far_hops = far_distance.map(|_| result.path_to(&far_node).len().saturating_sub(1));

    let SolveStats {
        pushes,
        pops,
        stale_skips,
        relaxations,
        ..
    } = result.stats;

    Ok(BenchReport {
        generator: name.to_string(),
        nodes: graph.node_count(),
        edges: graph.edge_count(),
        memory_mb: graph.memory_usage() as f64 / 1_048_576.0,
        generate_secs,
        solve_ms,
        reachable: result.reachable_count(),
        pushes,
        pops,
        stale_skips,
        relaxations,
        far_node,
        far_distance,
        far_hops,
    })
}

fn print_report(r: &BenchReport) {
    println!("--- {} ---", r.generator);
    println!(
        "Generated in {:.2}s — {} nodes, {} edges, ~{:.0}MB",
        r.generate_secs, r.nodes, r.edges, r.memory_mb
    );
    println!();
    println!(
        "{:>10} {:>12} {:>12} {:>12} {:>10}",
        "reachable", "pushes", "stale", "relaxed", "time"
    );
    println!("{:->10} {:->12} {:->12} {:->12} {:->10}", "", "", "", "", "");
    println!(
        "{:>10} {:>12} {:>12} {:>12} {:>8.1}ms",
        r.reachable, r.pushes, r.stale_skips, r.relaxations, r.solve_ms
    );
    println!();
    match (r.far_distance, r.far_hops) {
        (Some(d), Some(hops)) => println!(
            "Shortest path 0 → {}: distance {:.2} over {} hops",
            r.far_node, d, hops
        ),
        _ => println!("Shortest path 0 → {}: unreachable", r.far_node),
    }
    println!();
}
