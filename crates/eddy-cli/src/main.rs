use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use eddy_clifford::{AlgebraCache, Basis, EngineConfig, Monad, ProductTable, Strategy};
use eddy_core::{Cardinal, EddyError, RealD, Result};

#[derive(Parser)]
#[command(
    name = "eddy",
    about = "Eddy Clifford algebra engine",
    long_about = "Inspect canonical blade bases and geometric product tables for Clifford\nalgebras with up to 14 generators, run structural self-checks and time\nmultivector products.",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// List every blade of the n-generator basis
    Basis {
        /// Generator count (0..=14)
        n: u8,
    },
    /// Print the signed-index product table of a signature
    Table {
        /// Signature string, one '+' or '-' per generator
        signature: String,
        /// Print only the sign of each entry
        #[arg(long)]
        signs: bool,
    },
    /// Run structural checks on a product table
    Check {
        signature: String,
    },
    /// Time products of random multivectors
    Bench {
        signature: String,
        /// Number of products to time
        #[arg(long, default_value = "1000")]
        iters: usize,
        /// Probability that a coefficient is non-zero
        #[arg(long, default_value = "1.0")]
        density: f64,
        /// Blade walk: auto, dense, sparse (overrides the config file)
        #[arg(long)]
        strategy: Option<Strategy>,
        /// JSON engine configuration
        #[arg(long)]
        config: Option<String>,
        /// RNG seed
        #[arg(long, default_value = "42")]
        seed: u64,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Basis { n } => cmd_basis(n),
        Commands::Table { signature, signs } => cmd_table(&signature, signs),
        Commands::Check { signature } => cmd_check(&signature),
        Commands::Bench { signature, iters, density, strategy, config, seed } => {
            cmd_bench(&signature, iters, density, strategy, config.as_deref(), seed)
        }
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn cmd_basis(n: u8) -> Result<bool> {
    let basis = Basis::new(n)?;
    println!("=== Basis: {} generators, {} blades ===\n", n, basis.blade_count());
    println!("{:>6} {:>6} {:>18} {:>16}  {}", "Index", "Grade", "Key", "Bits", "Blade");
    println!("{}", "-".repeat(64));
    for (i, blade) in basis.blades().enumerate() {
        println!(
            "{:>6} {:>6} {:>18} {:>16b}  {}",
            i,
            blade.rank(),
            blade.key(),
            blade.bit_key(),
            blade
        );
    }
    Ok(true)
}

fn cmd_table(signature: &str, signs: bool) -> Result<bool> {
    let table = ProductTable::new(signature)?;
    println!(
        "=== Product table {:?}: {}x{} ===\n",
        table.signature().as_str(),
        table.blade_count(),
        table.blade_count()
    );
    if !signs {
        print!("{}", table);
        return Ok(true);
    }
    for r in 0..table.blade_count() {
        let line: String = table
            .row(r)?
            .iter()
            .map(|&entry| if entry < 0 { '-' } else { '+' })
            .collect();
        println!("{}", line);
    }
    Ok(true)
}

fn cmd_check(signature: &str) -> Result<bool> {
    let start = Instant::now();
    let table = ProductTable::new(signature)?;
    let count = table.blade_count();
    tracing::info!("built {:?} ({} blades) in {:.2?}", signature, count, start.elapsed());

    let mut identity = true;
    for i in 0..count {
        identity &= table.result(0, i)? == i as i32 + 1 && table.result(i, 0)? == i as i32 + 1;
    }

    let mut permutation = true;
    let mut seen = vec![false; count];
    for r in 0..count {
        seen.fill(false);
        for c in 0..count {
            let (_, k) = table.product(r, c)?;
            permutation &= !seen[k];
            seen[k] = true;
        }
    }

    let mut squares = true;
    for i in 0..count {
        squares &= table.result(i, i)?.abs() == 1;
    }

    let mut complement = true;
    for r in 0..count {
        for c in 0..count {
            complement &= table.commute_sign(r, c)? + table.acommute_sign(r, c)? == 1;
        }
    }

    let checks = [
        ("scalar row and column are identity", identity),
        ("every row is a signed permutation", permutation),
        ("every blade squares to a scalar", squares),
        ("commute and anticommute signs are complementary", complement),
    ];

    println!("=== Checks for {:?} ===", table.signature().as_str());
    let mut passed = true;
    for (name, ok) in checks {
        println!("  {} {}", if ok { "[x]" } else { "[ ]" }, name);
        passed &= ok;
    }
    println!("\n{}", if passed { "All checks passed." } else { "Some checks FAILED." });
    Ok(passed)
}

fn load_config(path: &str) -> Result<EngineConfig> {
    let text = std::fs::read_to_string(Path::new(path))
        .map_err(|e| EddyError::InvalidConfig(format!("cannot read {}: {}", path, e)))?;
    let config: EngineConfig = serde_json::from_str(&text)
        .map_err(|e| EddyError::InvalidConfig(format!("cannot parse {}: {}", path, e)))?;
    config.validate()?;
    Ok(config)
}

fn random_monad(rng: &mut StdRng, table: &Arc<ProductTable>, density: f64) -> Result<Monad<RealD>> {
    let coeffs = (0..table.blade_count())
        .map(|_| {
            if rng.gen_bool(density) {
                RealD::unit(rng.gen_range(-1.0..1.0))
            } else {
                RealD::unit(0.0)
            }
        })
        .collect();
    Monad::from_coefficients(table.clone(), &Cardinal::unit(), coeffs)
}

fn cmd_bench(
    signature: &str,
    iters: usize,
    density: f64,
    strategy: Option<Strategy>,
    config_path: Option<&str>,
    seed: u64,
) -> Result<bool> {
    if !(0.0..=1.0).contains(&density) {
        return Err(EddyError::InvalidConfig(format!("density {} outside [0, 1]", density)));
    }
    let mut config = match config_path {
        Some(path) => load_config(path)?,
        None => EngineConfig::default(),
    };
    if let Some(strategy) = strategy {
        config = config.with_strategy(strategy);
    }

    let cache = AlgebraCache::with_config(config.clone());
    let start = Instant::now();
    let table = cache.product(signature)?;
    tracing::info!("table {:?} ready in {:.2?}", signature, start.elapsed());

    let mut rng = StdRng::seed_from_u64(seed);
    let a = random_monad(&mut rng, &table, density)?;
    let b = random_monad(&mut rng, &table, density)?;

    println!("=== Eddy Product Benchmark ===");
    println!("Signature: {:?} ({} blades)", table.signature().as_str(), table.blade_count());
    println!("Density:   {}", density);
    println!("Iters:     {}\n", iters);

    println!("{:<10} {:>14} {:>12}", "Strategy", "Per product", "Grade key");
    println!("{}", "-".repeat(38));

    let strategies = [config.strategy, Strategy::Dense, Strategy::Sparse];
    for (i, strategy) in strategies.iter().enumerate() {
        if i > 0 && *strategy == config.strategy {
            continue;
        }
        let run = config.with_strategy(*strategy);
        // warmup
        let product = a.multiply_right_with(&b, &run)?;
        let start = Instant::now();
        for _ in 0..iters {
            a.multiply_right_with(&b, &run)?;
        }
        let per = start.elapsed().as_secs_f64() / iters.max(1) as f64;
        println!("{:<10} {:>12.3}us {:>12}", strategy.to_string(), per * 1e6, product.grade_key());
    }

    println!("\n{}", cache.stats());
    Ok(true)
}
