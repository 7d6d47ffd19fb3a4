//! Property tests for reservoir arithmetic and connection exchange.

use brine_basin::{BasinSet, Connection, Dispersion, Inflow, Reservoir};
use proptest::prelude::*;

fn arb_geometry() -> impl Strategy<Value = (f64, f64, f64, f64)> {
    (
        1.0f64..50_000.0,
        1.0f64..500.0,
        -30.0f64..-1.0,
        -0.9f64..2.0,
    )
}

proptest! {
    #[test]
    fn volume_is_length_width_depth(
        (length, width, bottom, water) in arb_geometry(),
        mass in 1.0f64..1e9,
    ) {
        let r = Reservoir::from_mass(length, width, bottom, water, mass);
        prop_assert_eq!(r.volume(), length * width * (water - bottom));
    }

    #[test]
    fn salinity_is_mass_over_volume(
        (length, width, bottom, water) in arb_geometry(),
        mass in 1e-3f64..1e9,
    ) {
        let r = Reservoir::from_mass(length, width, bottom, water, mass);
        let ratio = mass / r.volume();
        prop_assert_eq!(r.salinity().unwrap(), ratio.max(0.0));
    }

    #[test]
    fn salinity_is_zero_for_negative_volume(
        length in 1.0f64..1000.0,
        width in 1.0f64..1000.0,
        mass in 1e-3f64..1e9,
    ) {
        // Water level below the bottom.
        let r = Reservoir::from_mass(length, width, 0.0, -1.0, mass);
        prop_assert_eq!(r.salinity().unwrap(), 0.0);
    }

    #[test]
    fn zero_fluxes_leave_mass_unchanged(
        (length, width, bottom, water) in arb_geometry(),
        mass in 1e-3f64..1e9,
        c_spui in 0.0f64..2.0,
        dt in 1.0f64..3600.0,
    ) {
        let mut r = Reservoir::from_mass(length, width, bottom, water, mass);
        let inflow = Inflow { c_spui, ..Inflow::default() };
        prop_assert_eq!(r.update(&inflow, dt).unwrap(), mass);
        prop_assert_eq!(r.mass(), mass);
    }

    #[test]
    fn update_is_additive(
        (length, width, bottom, water) in arb_geometry(),
        mass in 1.0f64..1e9,
        mass_dispersion in -1e6f64..1e6,
        mass_lockage in -1e6f64..1e6,
    ) {
        let mut r = Reservoir::from_mass(length, width, bottom, water, mass);
        let inflow = Inflow { mass_dispersion, mass_lockage, c_spui: 1.0, ..Inflow::default() };
        let new_mass = r.update(&inflow, 600.0).unwrap();
        prop_assert_eq!(new_mass, mass + (0.0 + -0.0 + mass_dispersion + mass_lockage));
    }

    #[test]
    fn equal_salinity_means_no_exchange(
        (length, width, bottom, water) in arb_geometry(),
        mass in 1.0f64..1e9,
        c_d in 0.0f64..2.0,
    ) {
        let a = Reservoir::from_mass(length, width, bottom, water, mass);
        let b = a.clone();
        let d = Connection::between(&a, &b, c_d, 600.0).unwrap();
        prop_assert_eq!(d, Dispersion::default());
    }

    #[test]
    fn swapping_salinities_flips_exchange(
        (length, width, bottom, water) in arb_geometry(),
        mass_a in 1.0f64..1e10,
        mass_b in 1.0f64..1e10,
        c_d in 0.01f64..2.0,
    ) {
        let mut forward = BasinSet::new();
        let a = forward.insert("a", Reservoir::from_mass(length, width, bottom, water, mass_a));
        let b = forward.insert("b", Reservoir::from_mass(length, width, bottom, water, mass_b));
        let mut swapped = BasinSet::new();
        swapped.insert("a", Reservoir::from_mass(length, width, bottom, water, mass_b));
        swapped.insert("b", Reservoir::from_mass(length, width, bottom, water, mass_a));

        let link = Connection::new(a, b);
        let there = link.dispersion(&forward, c_d, 600.0).unwrap();
        let back = link.dispersion(&swapped, c_d, 600.0).unwrap();
        prop_assert_eq!(there.discharge, -back.discharge);
        prop_assert_eq!(there.mass, -back.mass);
    }

    #[test]
    fn salt_moves_towards_fresher_side(
        (length, width, bottom, water) in arb_geometry(),
        mass_a in 1.0f64..1e10,
        mass_b in 1.0f64..1e10,
    ) {
        let a = Reservoir::from_mass(length, width, bottom, water, mass_a);
        let b = Reservoir::from_mass(length, width, bottom, water, mass_b);
        let d = Connection::between(&a, &b, 0.55, 600.0).unwrap();
        let delta = a.salinity().unwrap() - b.salinity().unwrap();
        prop_assert!(d.mass * delta >= 0.0);
    }
}
