//! Maze GA CLI - Evolve a path through a maze from a JSON configuration.

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

use maze_ga::{
    compute::EvolutionEngine,
    render::{ConsoleRenderer, MazeRenderer},
    schema::{ConfigError, Grid, MazeSource, RunConfig, TextMazeSource},
};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 && (args[1] == "--help" || args[1] == "-h") {
        print_usage(&args[0]);
        return;
    }

    if args.len() > 1 && args[1] == "--example" {
        print_example_config();
        return;
    }

    // Load configuration
    let config = match args.get(1) {
        Some(path) => RunConfig::load(PathBuf::from(path)).unwrap_or_else(|e| {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }),
        None => RunConfig::default(),
    };

    let grid = load_grid(&config).unwrap_or_else(|e| {
        eprintln!("Error loading maze: {}", e);
        std::process::exit(1);
    });

    println!("Maze GA");
    println!("=======");
    println!("Maze: {}x{}", grid.width(), grid.height());
    println!("Start: {:?}  End: {:?}", grid.start(), grid.end());
    println!(
        "Population: {}  Genes: {}  Crossover: {}  Mutation: {}",
        config.ga.population_size,
        config.ga.genes_per_genome(),
        config.ga.crossover_rate,
        config.ga.mutation_rate
    );
    println!();

    let mut engine = EvolutionEngine::new(config.ga.clone(), grid).unwrap_or_else(|e| {
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(1);
    });

    let render_grid = engine.evaluator().grid().clone();
    let renderer = ConsoleRenderer;
    let stdout = io::stdout();
    let start = Instant::now();

    let result = engine.run_with_callback(|progress| {
        let render_every = config.render_every;
        if render_every == 0 || (progress.generation % render_every != 0 && !progress.solved) {
            return;
        }

        let mut out = stdout.lock();
        let _ = writeln!(
            out,
            "Generation {}: best={:.4} avg={:.4}",
            progress.generation, progress.best_fitness, progress.avg_fitness
        );
        let _ = renderer.render(&render_grid, &progress.trail, &mut out);
        let _ = writeln!(out);
    });

    let elapsed = start.elapsed();

    println!("Stopped: {:?}", result.stats.stop_reason);
    println!("Generations: {}", result.stats.generations);
    println!("Evaluations: {}", result.stats.total_evaluations);
    println!("Best fitness: {:.4}", result.stats.best_fitness);
    if let Some(best) = &result.best {
        println!("Best genome: #{} {:?}", best.index, best.directions);
    }
    println!("Time: {:.2}s", elapsed.as_secs_f32());
}

fn load_grid(config: &RunConfig) -> Result<Grid, ConfigError> {
    match &config.maze_file {
        Some(path) => TextMazeSource::from_file(path)?.load(),
        None => Ok(Grid::reference()),
    }
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} [config.json]", program);
    eprintln!();
    eprintln!("Evolve a path through a maze with a genetic algorithm.");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  config.json  Path to run configuration (default: built-in settings)");
    eprintln!();
    eprintln!("Example configuration is printed with the --example flag.");
}

fn print_example_config() {
    let mut config = RunConfig::default();
    config.ga.random_seed = Some(42);
    config.maze_file = Some(PathBuf::from("maze.txt"));

    println!("Example configuration (config.json):");
    match serde_json::to_string_pretty(&config) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing config: {}", e),
    }
}
