use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use hen_analysis::Branch;
use hen_app::{AppError, AppResult, Setup, load_setup, project_service};
use hen_design::{Arrangement, CostBasis, ExchangerKind, Material, eaoc, sweep};

#[derive(Parser)]
#[command(name = "hen-cli")]
#[command(about = "Pinch analysis and heat-exchanger-network targeting tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a project file's syntax and structure
    Validate {
        /// Path to the project file (YAML or JSON)
        project_path: PathBuf,
    },
    /// Report pinch, utility, exchanger-count and area targets
    Targets {
        /// Path to the project file (YAML or JSON)
        project_path: PathBuf,
    },
    /// Sweep the approach temperature for the economic optimum
    Sweep {
        /// Path to the project file (YAML or JSON)
        project_path: PathBuf,
        /// Smallest ΔTmin candidate, K
        #[arg(long)]
        dt_min: f64,
        /// Largest ΔTmin candidate, K
        #[arg(long)]
        dt_max: f64,
        /// Number of candidates, evenly spaced
        #[arg(long, default_value_t = 10)]
        points: usize,
        /// Operating gauge pressure for the costed exchanger, barg
        #[arg(long, default_value_t = 2.0)]
        pressure: f64,
    },
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Validate { project_path } => cmd_validate(&project_path),
        Commands::Targets { project_path } => cmd_targets(&project_path),
        Commands::Sweep {
            project_path,
            dt_min,
            dt_max,
            points,
            pressure,
        } => cmd_sweep(&project_path, dt_min, dt_max, points, pressure),
    }
}

fn cmd_validate(project_path: &Path) -> AppResult<()> {
    println!("Validating project: {}", project_path.display());
    let project = hen_project::load(project_path).map_err(AppError::from)?;
    println!(
        "✓ Project is valid ({} hot, {} cold streams, ΔTmin = {} K)",
        project.hot.len(),
        project.cold.len(),
        project.dt
    );
    Ok(())
}

fn cmd_targets(project_path: &Path) -> AppResult<()> {
    let setup = load_setup(project_path)?;

    match setup.pinch() {
        Some(pinch) => println!("Pinch (hot scale):   {pinch} {}", setup.units().temperature()),
        None => println!("Pinch:               none (threshold problem)"),
    }
    println!(
        "Hot utility:         {:.4} {}",
        setup.hot_utility(),
        setup.units().energy_flow()
    );
    println!(
        "Cold utility:        {:.4} {}",
        setup.cold_utility(),
        setup.units().energy_flow()
    );
    println!("Minimum exchangers:  {}", setup.min_exchangers());

    println!("\nInterval table:");
    for interval in &setup.derived().intervals {
        println!(
            "  {:>4}  {:>8.2} → {:>8.2}  excess {:>10.4}  cumulative {:>10.4}",
            interval.name,
            interval.t_in,
            interval.t_out,
            interval.excess_heat,
            interval.cumulative_heat
        );
    }

    print_branch(&setup, Branch::Above);
    print_branch(&setup, Branch::Below);

    match setup.area_target() {
        Ok(area) => println!("\nArea target:         {:.2} {}", area, setup.units().area()),
        Err(_) => println!("\nArea target:         unavailable (populate film coefficients)"),
    }
    Ok(())
}

fn print_branch(setup: &Setup, branch: Branch) {
    let (label, partition) = match branch {
        Branch::Above => ("Above pinch", &setup.derived().partitions.above),
        Branch::Below => ("Below pinch", &setup.derived().partitions.below),
    };
    if partition.is_empty() {
        return;
    }
    println!("\n{label}:");
    for p in partition.hot.iter().chain(&partition.cold) {
        println!(
            "  {:>6}  {:>8.2} → {:>8.2}  mf·cp {:>8.4}",
            p.stream.id, p.stream.t_in, p.stream.t_out,
            p.stream.mcp()
        );
    }
}

fn cmd_sweep(
    project_path: &Path,
    dt_min: f64,
    dt_max: f64,
    points: usize,
    pressure: f64,
) -> AppResult<()> {
    if points < 2 || dt_min <= 0.0 || dt_max <= dt_min {
        return Err(AppError::InvalidInput(
            "sweep needs dt_max > dt_min > 0 and at least 2 points".into(),
        ));
    }
    let setup = load_setup(project_path)?;
    let project = project_service::project_from_setup(&setup);

    let step = (dt_max - dt_min) / (points - 1) as f64;
    let candidates: Vec<f64> = (0..points).map(|i| dt_min + step * i as f64).collect();

    let basis = CostBasis {
        kind: ExchangerKind::FloatingHead,
        arrangement: Arrangement::ShellTube,
        shell_material: Some(Material::CarbonSteel),
        tube_material: Some(Material::CarbonSteel),
        pressure,
    };
    let points = sweep(
        &project.hot,
        &project.cold,
        &candidates,
        &project.hot_film,
        &project.cold_film,
        &basis,
    );

    println!(
        "{:>8}  {:>14}  {:>10}  {:>10}  {:>10}  {:>5}",
        "ΔTmin", "EAOC [$/yr]", "area [m²]", "Qh [kW]", "Qc [kW]", "N"
    );
    let mut best: Option<&eaoc::SweepPoint> = None;
    for (dt, result) in &points {
        match result {
            Ok(p) => {
                println!(
                    "{:>8.2}  {:>14.0}  {:>10.2}  {:>10.2}  {:>10.2}  {:>5}",
                    p.dt, p.eaoc, p.net_area, p.hot_utility, p.cold_utility, p.exchanger_count
                );
                if best.is_none_or(|b| p.eaoc < b.eaoc) {
                    best = Some(p);
                }
            }
            Err(err) => println!("{dt:>8.2}  candidate failed: {err}"),
        }
    }
    if let Some(p) = best {
        println!("\n✓ Economic optimum at ΔTmin = {} K (EAOC {:.0} $/yr)", p.dt, p.eaoc);
    }
    Ok(())
}
