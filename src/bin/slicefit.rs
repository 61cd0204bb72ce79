use std::path::Path;

use slicefit::{
    value::{points_from_tuples, Point},
    CurveFit, FitConfig,
};

const USAGE: &str =
    "Usage: slicefit <path> [degree=<number>] [--config <file>] [--curve]";

fn main() {
    env_logger::init();

    //
    // First argument is the path to a CSV or JSON file with (x, y) data points.
    let Some(path) = std::env::args().nth(1) else {
        eprintln!("Please provide a path to a CSV or JSON file with (x, y) data points.");
        eprintln!("{USAGE}");
        std::process::exit(1);
    };
    if path == "help" || path == "--help" || path == "-h" {
        eprintln!("{USAGE}");
        std::process::exit(0);
    }
    let path = Path::new(&path);

    let mut degree = 2;
    let mut config = FitConfig::default();
    let mut print_curve = false;

    let mut args = std::env::args().skip(2);
    while let Some(arg) = args.next() {
        if let Some(option) = arg.strip_prefix("degree=") {
            match str::parse::<usize>(option) {
                Ok(value) => degree = value,
                Err(_) => {
                    eprintln!("Invalid degree value: {option}");
                    std::process::exit(1);
                }
            }
        } else if arg == "--config" {
            let Some(config_path) = args.next() else {
                eprintln!("--config requires a path");
                std::process::exit(1);
            };
            config = read_config(Path::new(&config_path));
        } else if arg == "--curve" {
            print_curve = true;
        } else if arg == "help" || arg == "--help" || arg == "-h" {
            eprintln!("{USAGE}");
            std::process::exit(0);
        } else {
            eprintln!("Unknown argument: {arg}");
            eprintln!("{USAGE}");
            std::process::exit(1);
        }
    }

    let Ok(contents) = std::fs::read_to_string(path) else {
        eprintln!("Failed to read file: {}", path.display());
        std::process::exit(1);
    };

    let data: Vec<Point<f64>> = match path.extension().and_then(|s| s.to_str()) {
        Some("csv") => parse_csv(&contents),
        Some("json") => parse_json(&contents),

        _ => {
            eprintln!("Unsupported file format: {}", path.display());
            std::process::exit(1);
        }
    };

    let fit = CurveFit::with_config(&data, degree, &config).unwrap_or_else(|err| {
        eprintln!("Failed to fit data: {err}");
        std::process::exit(1);
    });

    let equation = fit.equation();
    println!("{}", equation.to_unicode());
    println!("{}", equation.to_plain());
    println!("R² = {:.6}", fit.r_squared());
    if fit.degraded() {
        println!(
            "degraded: near-singular pivots at columns {:?}, coefficient drift {:e}",
            fit.near_singular_pivots(),
            fit.monomial_error()
        );
    } else {
        println!("degraded: false");
    }

    if print_curve {
        let curve = fit.sample_curve().unwrap_or_else(|err| {
            eprintln!("Failed to sample curve: {err}");
            std::process::exit(1);
        });

        match serde_json::to_string(&curve) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("Failed to serialize curve: {err}");
                std::process::exit(1);
            }
        }
    }

    std::process::exit(0);
}

fn read_config(path: &Path) -> FitConfig {
    let Ok(contents) = std::fs::read_to_string(path) else {
        eprintln!("Failed to read config: {}", path.display());
        std::process::exit(1);
    };

    let config: FitConfig = serde_json::from_str(&contents).unwrap_or_else(|err| {
        eprintln!("Failed to parse config: {err}");
        std::process::exit(1);
    });

    if let Err(err) = config.validate() {
        eprintln!("Invalid config: {err}");
        std::process::exit(1);
    }

    config
}

fn parse_csv(contents: &str) -> Vec<Point<f64>> {
    // Simple CSV parser: expects two columns, x and y, with an optional header row.
    fn parse_line(line: &str) -> Option<Point<f64>> {
        let mut parts = line.split(',').map(str::trim);
        let x = parts.next()?.parse().ok()?;
        let y = parts.next()?.parse().ok()?;
        Some(Point::new(x, y))
    }

    let mut lines = contents.lines();
    let mut data = Vec::new();

    //
    // First line, if we get a parsing error, we assume it's a header and skip it.
    if let Some(point) = lines.next().and_then(parse_line) {
        data.push(point);
    }

    //
    // The rest we are strict.
    for (i, line) in lines.enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        match parse_line(line) {
            Some(point) => data.push(point),
            None => {
                eprintln!("Failed to parse line {}: {}", i + 2, line);
                std::process::exit(1);
            }
        }
    }

    data
}

fn parse_json(contents: &str) -> Vec<Point<f64>> {
    // Either `[[x, y], ...]` or `[{"x": .., "y": ..}, ...]`
    if let Ok(tuples) = serde_json::from_str::<Vec<(f64, f64)>>(contents) {
        return points_from_tuples(&tuples);
    }

    serde_json::from_str(contents).unwrap_or_else(|err| {
        eprintln!("Failed to parse JSON: {err}");
        std::process::exit(1);
    })
}
