//! Harbour and canal salinity over one tidal day.
//!
//! Demonstrates: build config → SaltModel → run a tidal scenario → read the
//! reservoirs → reset → single steps with manual forcing.

use brine_bench::{reference_profile, tidal_scenario};
use brine_engine::{Forcing, SaltModel};
use brine_test_utils::HeadDrivenSolver;

fn main() {
    println!("=== brine harbour–canal example ===\n");

    let mut model = SaltModel::new(reference_profile(), Box::new(HeadDrivenSolver)).unwrap();
    println!(
        "initial salinity: harbour {:.3} kg/m3, canal {:.3} kg/m3\n",
        model.approach_harbor().salinity().unwrap(),
        model.canal().salinity().unwrap()
    );

    // --- Run 1: one day of tide ---
    let scenario = tidal_scenario(0.0, 0.9, 24).unwrap();
    let reports = model.run_until(&scenario, 86_400.0).unwrap();
    for report in reports.iter().filter(|r| r.step.0 % 24 == 0) {
        println!(
            "t={:>6.0} s  load={:>8.2} kg/s  exchange={:>7.2} m3/s  harbour={:.3e} kg  canal={:.3e} kg",
            report.time,
            report.salt_load_lake,
            report.dispersion.discharge,
            report.harbor_mass,
            report.canal_mass,
        );
    }
    let solver_us: u64 = reports.iter().map(|r| r.metrics.solver_us).sum();
    let total_us: u64 = reports.iter().map(|r| r.metrics.total_us).sum();
    println!(
        "\n{} steps, {} us total, {} us in the solver",
        reports.len(),
        total_us,
        solver_us
    );
    println!(
        "after one day: harbour {:.3} kg/m3, canal {:.3} kg/m3\n",
        model.approach_harbor().salinity().unwrap(),
        model.canal().salinity().unwrap()
    );

    // --- Run 2: reset and hold a high sea level ---
    model.reset().unwrap();
    println!("reset to step {}", model.current_step());
    let surge = Forcing::new().head_sea(1.2);
    for _ in 0..6 {
        let report = model.step(&surge).unwrap();
        println!(
            "step {}  discharge_in={:.2} m3/s  load={:.2} kg/s",
            report.step, report.discharge_in, report.salt_load_lake
        );
    }
}
