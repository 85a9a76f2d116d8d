//! Property tests over whole trajectories and single excursion steps.

use proptest::prelude::*;
use vr_disturbance::{DisturbanceSet, WhiteNoise};
use vr_sim::{Mode, RegulatorState, RegulatorStateMachine, SimulationConfig, Simulation, simulate};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn trajectory_length_is_ceil_of_duration_over_step(
        dt in 0.001f64..0.5,
        t_end in 0.01f64..20.0,
    ) {
        let cfg = SimulationConfig::builder().dt(dt).t_end(t_end).build().unwrap();
        let traj = simulate(&cfg, &mut DisturbanceSet::new()).unwrap();
        prop_assert_eq!(traj.len(), (t_end / dt).ceil() as usize);
        prop_assert_eq!(traj.points()[0].t, 0.0);
        prop_assert!(traj.iter().zip(traj.iter().skip(1)).all(|(p, q)| p.t < q.t));
    }

    #[test]
    fn undisturbed_runs_are_bitwise_identical(
        a in 0.0f64..1.0,
        b in 0.0f64..300.0,
        c in 0.0f64..5.0,
        d in 0.0f64..5.0,
    ) {
        let cfg = SimulationConfig::builder()
            .a(a).b(b).c(c).d(d)
            .t_end(5.0)
            .build()
            .unwrap();
        let first = simulate(&cfg, &mut DisturbanceSet::new()).unwrap();
        let second = simulate(&cfg, &mut DisturbanceSet::new()).unwrap();
        prop_assert_eq!(first.len(), second.len());
        for (p, q) in first.iter().zip(second.iter()) {
            prop_assert_eq!(p.t.to_bits(), q.t.to_bits());
            prop_assert_eq!(p.voltage.to_bits(), q.voltage.to_bits());
            prop_assert_eq!(p.mode, q.mode);
        }
    }

    #[test]
    fn undervoltage_never_jumps_to_overvoltage(
        v0 in 110.0f64..209.9,
        d in 0.1f64..99.0,
    ) {
        // d * dt < 1 with the default dt of 0.01
        let cfg = SimulationConfig::builder().d(d).build().unwrap();
        let mut machine = RegulatorStateMachine::from_state(
            cfg,
            RegulatorState { voltage: v0, mode: Mode::Undervoltage },
        );
        let mut gap = cfg.v_min() - v0;
        for _ in 0..500 {
            let (v, mode) = machine.step(0.0);
            prop_assert_ne!(mode, Mode::Overvoltage);
            prop_assert!(v <= cfg.v_max());
            let next_gap = (cfg.v_min() - v).abs();
            prop_assert!(next_gap <= gap);
            gap = next_gap;
            if mode == Mode::Normal {
                break;
            }
        }
    }

    #[test]
    fn overvoltage_is_non_increasing(
        v0 in 230.1f64..330.0,
        c in 0.1f64..99.0,
    ) {
        let cfg = SimulationConfig::builder().c(c).build().unwrap();
        let mut machine = RegulatorStateMachine::from_state(
            cfg,
            RegulatorState { voltage: v0, mode: Mode::Overvoltage },
        );
        let mut prev = v0;
        for _ in 0..500 {
            let (v, mode) = machine.step(0.0);
            prop_assert!(v <= prev);
            prop_assert_ne!(mode, Mode::Undervoltage);
            if v <= cfg.v_max() {
                prop_assert_eq!(mode, Mode::Normal);
                break;
            }
            prev = v;
        }
    }
}

#[test]
fn seeded_noise_reproduces_across_runs() {
    let cfg = SimulationConfig::builder().t_end(10.0).build().unwrap();
    let run = |seed| {
        let mut set = DisturbanceSet::new().with(WhiteNoise::new(0.5, Some(seed)).unwrap());
        simulate(&cfg, &mut set).unwrap()
    };
    assert_eq!(run(7), run(7));
    assert_ne!(run(7), run(8));
}

#[test]
fn owned_simulation_reruns_independently() {
    let cfg = SimulationConfig::builder().t_end(2.0).build().unwrap();
    let mut sim = Simulation::new(cfg);
    sim.add_disturbance(|t: f64| if t < 0.5 { 1.0 } else { 0.0 });
    let first = sim.run().unwrap().clone();
    let second = sim.run().unwrap().clone();
    assert_eq!(first, second);
    assert_eq!(first.len(), 200);
    assert_eq!(sim.disturbances().len(), 1);
}
