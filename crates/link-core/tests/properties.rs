//! Property-based checks for the simulation invariants:
//! - pressure stays in [0, 1] and converges without overshoot
//! - particles never leave the wrap band
//! - advance is a pure function of state and pressure
//! - the beam pool holds exactly the newest `cap` beams
//! - beam opacity follows initial * decay^n

use glam::Vec3;
use link_core::pressure::{target, update};
use link_core::*;
use proptest::prelude::*;
use rand::prelude::*;

/// Strategy for particles already inside the band
fn particle() -> impl Strategy<Value = Particle> {
    (
        PARTICLE_SPEED_MIN..PARTICLE_SPEED_MIN + PARTICLE_SPEED_SPAN,
        -FIELD_HALF_X..FIELD_HALF_X,
        -Y_MAX..=Y_MAX,
        -FIELD_HALF_Z..FIELD_HALF_Z,
    )
        .prop_map(|(base_speed, x, y, z)| Particle {
            base_speed,
            position: Vec3::new(x, y, z),
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: one update from a bounded pressure stays bounded
    #[test]
    fn pressure_update_is_bounded(arrivals in 0u32..10_000, current in 0.0f32..=1.0) {
        let p = update(arrivals, current, PRESSURE_NORMALIZATION, PRESSURE_ALPHA);
        prop_assert!((0.0..=1.0).contains(&p), "p={}", p);
    }

    /// Property: constant load converges monotonically and never crosses the target
    #[test]
    fn pressure_converges_without_overshoot(
        arrivals in 0u32..40,
        start in 0.0f32..=1.0,
        alpha in 0.01f32..=1.0,
    ) {
        let goal = target(arrivals, PRESSURE_NORMALIZATION);
        let from_below = start <= goal;
        let mut p = start;
        for _ in 0..2_000 {
            let next = update(arrivals, p, PRESSURE_NORMALIZATION, alpha);
            if from_below {
                prop_assert!(next >= p && next <= goal);
            } else {
                prop_assert!(next <= p && next >= goal);
            }
            p = next;
        }
        prop_assert!((p - goal).abs() < 1e-4, "p={} goal={}", p, goal);
    }

    /// Property: y stays within [-Y_MAX, Y_MAX] after every advance
    #[test]
    fn particles_stay_in_band(
        particles in prop::collection::vec(particle(), 1..64),
        pressures in prop::collection::vec(0.0f32..=1.0, 1..300),
    ) {
        let mut field = ParticleField::from_particles(particles, FieldParams::default());
        for p in pressures {
            field.advance(p);
            for particle in field.particles() {
                prop_assert!(particle.position.y >= -Y_MAX && particle.position.y <= Y_MAX);
            }
        }
    }

    /// Property: identical state and pressure give identical output
    #[test]
    fn advance_has_no_hidden_randomness(seed in any::<u64>(), pressure in 0.0f32..=1.0) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut a = ParticleField::new(32, FieldParams::default(), &mut rng);
        let mut b = a.clone();
        a.advance(pressure);
        b.advance(pressure);
        prop_assert_eq!(a.instances(), b.instances());
        prop_assert_eq!(a.particles(), b.particles());
    }

    /// Property: after n triggers the pool holds ids n-len+1..=n with len = min(n, cap)
    #[test]
    fn beam_pool_keeps_the_newest(cap in 1usize..10, n in 0u64..60, seed in any::<u64>()) {
        let mut pool = BeamPool::new(cap, BEAM_DECAY, StdRng::seed_from_u64(seed));
        for _ in 0..n {
            pool.trigger(BeamTrigger::default());
            prop_assert!(pool.len() <= cap);
        }
        let len = (n as usize).min(cap);
        let ids: Vec<u64> = pool.beams().iter().map(|b| b.id).collect();
        let expected: Vec<u64> = (n - len as u64 + 1..=n).collect();
        prop_assert_eq!(ids, expected);
    }

    /// Property: opacity after n decays is initial * decay^n
    #[test]
    fn beam_opacity_is_geometric(n in 0i32..90, decay in 0.5f32..0.99) {
        let mut pool = BeamPool::new(1, decay, StdRng::seed_from_u64(0));
        pool.trigger(BeamTrigger::default());
        let mut prev = pool.beams()[0].opacity();
        for _ in 0..n {
            pool.decay();
            let o = pool.beams()[0].opacity();
            prop_assert!(o < prev);
            prev = o;
        }
        let expected = BEAM_INITIAL_OPACITY * decay.powi(n);
        prop_assert!((prev - expected).abs() <= expected * 1e-3, "{} vs {}", prev, expected);
    }
}
