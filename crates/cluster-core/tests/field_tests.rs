// Host-side tests for the particle field: construction, lerp, pointer
// repulsion and input rejection.

use cluster_core::*;
use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;

const EPS: f32 = 1e-4;

fn far_deflection() -> PointerDeflection {
    // Pointer lands at (300, 300) in field units, far from every particle.
    PointerDeflection {
        pointer_scale: 300.0,
        ..PointerDeflection::default()
    }
}

fn make_field(seed: u64) -> ParticleField {
    ParticleField::with_seed(&FieldConfig::default(), seed).expect("valid default config")
}

#[test]
fn initial_positions_and_targets_lie_in_their_radius_ranges() {
    let config = FieldConfig::default();
    for seed in [1_u64, 7, 42, 1234] {
        let field = make_field(seed);
        for p in field.iter() {
            let r0 = p.position.length();
            let rt = p.target.length();
            assert!(
                r0 >= config.initial_radius.min - EPS && r0 <= config.initial_radius.max + EPS,
                "initial radius {r0} outside {:?}",
                config.initial_radius
            );
            assert!(
                rt >= config.target_radius.min - EPS && rt <= config.target_radius.max + EPS,
                "target radius {rt} outside {:?}",
                config.target_radius
            );
        }
    }
}

#[test]
fn speeds_and_colors_follow_config() {
    let config = FieldConfig::default();
    let field = make_field(9);
    for s in field.speeds() {
        assert!(config.speed.contains(*s), "speed {s} outside {:?}", config.speed);
        assert!(*s > 0.0 && *s <= 1.0);
    }
    // s=0.8, l=0.6 -> channels between p=0.28 and q=0.92
    for c in field.colors() {
        for ch in c {
            assert!(*ch >= 0.28 - EPS && *ch <= 0.92 + EPS, "channel {ch}");
        }
    }
}

#[test]
fn same_seed_gives_identical_field() {
    let a = make_field(5);
    let b = make_field(5);
    assert_eq!(a.positions(), b.positions());
    assert_eq!(a.targets(), b.targets());
    assert_eq!(a.speeds(), b.speeds());
    assert_eq!(a.colors(), b.colors());

    let c = make_field(6);
    assert_ne!(a.positions(), c.positions());
}

#[test]
fn new_accepts_injected_rng() {
    let config = FieldConfig {
        count: 10,
        ..FieldConfig::default()
    };
    let mut rng_a = StdRng::seed_from_u64(3);
    let mut rng_b = StdRng::seed_from_u64(3);
    let a = ParticleField::new(&config, &mut rng_a).unwrap();
    let b = ParticleField::new(&config, &mut rng_b).unwrap();
    assert_eq!(a.positions(), b.positions());
}

#[test]
fn create_rejects_zero_count() {
    let config = FieldConfig {
        count: 0,
        ..FieldConfig::default()
    };
    let err = ParticleField::with_seed(&config, 1).err().expect("zero count must fail");
    assert!(matches!(err, FieldError::InvalidConfiguration(_)));
}

#[test]
fn create_rejects_counts_above_the_cap() {
    for count in [MAX_PARTICLE_COUNT + 1, usize::MAX] {
        let config = FieldConfig {
            count,
            ..FieldConfig::default()
        };
        let err = ParticleField::with_seed(&config, 1).err();
        assert!(
            matches!(err, Some(FieldError::InvalidConfiguration(_))),
            "count {count} must be rejected"
        );
    }
    let config = FieldConfig {
        count: MAX_PARTICLE_COUNT,
        ..FieldConfig::default()
    };
    assert!(config.validate().is_ok());
}

#[test]
fn create_with_150_particles_has_150_positions() {
    let config = FieldConfig {
        count: 150,
        ..FieldConfig::default()
    };
    let field = ParticleField::with_seed(&config, 1).unwrap();
    assert_eq!(field.len(), 150);
    assert_eq!(field.positions().len(), 150);
    assert!(!field.is_empty());
}

#[test]
fn create_rejects_bad_ranges() {
    let base = FieldConfig::default();
    let bad = [
        FieldConfig {
            initial_radius: ScalarRange::new(-1.0, 2.0),
            ..base.clone()
        },
        FieldConfig {
            target_radius: ScalarRange::new(-0.5, -0.1),
            ..base.clone()
        },
        FieldConfig {
            initial_radius: ScalarRange::new(5.0, 4.0),
            ..base.clone()
        },
        FieldConfig {
            speed: ScalarRange::new(0.0, 0.5),
            ..base.clone()
        },
        FieldConfig {
            speed: ScalarRange::new(0.5, 1.5),
            ..base.clone()
        },
        FieldConfig {
            speed: ScalarRange::new(f32::NAN, 0.5),
            ..base.clone()
        },
        FieldConfig {
            scale: ScalarRange::new(0.0, 1.0),
            ..base.clone()
        },
        FieldConfig {
            scale: ScalarRange::new(1.0, f32::INFINITY),
            ..base.clone()
        },
        FieldConfig {
            color: ColorPolicy {
                saturation: 1.5,
                ..base.color
            },
            ..base.clone()
        },
    ];
    for config in bad {
        let err = ParticleField::with_seed(&config, 1).err();
        assert!(
            matches!(err, Some(FieldError::InvalidConfiguration(_))),
            "expected rejection for {:?}",
            config
        );
    }
}

#[test]
fn speed_of_one_is_allowed() {
    let config = FieldConfig {
        speed: ScalarRange::fixed(1.0),
        count: 4,
        ..FieldConfig::default()
    };
    let mut field = ParticleField::with_seed(&config, 2).unwrap();
    field.advance(Vec2::ZERO, &far_deflection()).unwrap();
    for (p, t) in field.positions().iter().zip(field.targets()) {
        assert!(p.distance(*t) < EPS);
    }
}

#[test]
fn advance_without_pointer_influence_is_pure_lerp() {
    let mut field = make_field(11);
    let before: Vec<Vec3> = field.positions().to_vec();
    field.advance(Vec2::new(1.0, 1.0), &far_deflection()).unwrap();
    for i in 0..field.len() {
        let p = field.particle(i).unwrap();
        let d_before = before[i].distance(p.target);
        let d_after = p.position.distance(p.target);
        let expected = d_before * (1.0 - p.speed);
        assert!(
            (d_after - expected).abs() < EPS * d_before.max(1.0),
            "particle {i}: {d_after} vs {expected}"
        );
    }
}

#[test]
fn opposite_shells_near_f32_max_stay_finite() {
    let config = FieldConfig {
        count: 64,
        initial_radius: ScalarRange::new(2e38, 3e38),
        target_radius: ScalarRange::new(2e38, 3e38),
        speed: ScalarRange::fixed(0.5),
        ..FieldConfig::default()
    };
    let mut field = ParticleField::with_seed(&config, 3).unwrap();
    for _ in 0..3 {
        field.advance(Vec2::ZERO, &PointerDeflection::default()).unwrap();
        let bad = field.positions().iter().filter(|p| !p.is_finite()).count();
        assert_eq!(bad, 0, "{bad}/64 positions went non-finite");
    }
}

#[test]
fn scales_follow_config() {
    let config = FieldConfig {
        scale: ScalarRange::new(0.2, 0.7),
        ..FieldConfig::default()
    };
    let field = ParticleField::with_seed(&config, 10).unwrap();
    assert_eq!(field.scales().len(), field.len());
    for s in field.scales() {
        assert!(config.scale.contains(*s), "scale {s} outside {:?}", config.scale);
    }
    assert!(make_field(10).scales().iter().all(|s| *s == 1.0));
}

#[test]
fn pointer_pushes_nearby_particles_further_than_lerp_alone() {
    // Small shell so every particle starts inside the influence radius of a
    // pointer at the origin.
    let config = FieldConfig {
        count: 200,
        initial_radius: ScalarRange::fixed(1.5),
        target_radius: ScalarRange::fixed(1.5),
        ..FieldConfig::default()
    };
    let deflection = PointerDeflection::default();
    let mut field = ParticleField::with_seed(&config, 21).unwrap();
    let before: Vec<Vec3> = field.positions().to_vec();
    field.advance(Vec2::ZERO, &deflection).unwrap();

    let mut checked = 0;
    for i in 0..field.len() {
        let p = field.particle(i).unwrap();
        let d_old = before[i].truncate().length();
        if d_old <= 0.2 || d_old >= deflection.influence_radius {
            continue;
        }
        let lerp_only = before[i] + (p.target - before[i]) * p.speed;
        let with_push = p.position.truncate().length();
        assert!(
            with_push > lerp_only.truncate().length(),
            "particle {i} was not pushed away from the pointer"
        );
        assert!((p.position.z - lerp_only.z).abs() < EPS, "z must not be deflected");
        checked += 1;
    }
    assert!(checked > 100, "only {checked} particles were in range");
}

#[test]
fn deflection_offset_falls_off_and_skips_zero_distance() {
    let d = PointerDeflection {
        pointer_scale: 1.0,
        influence_radius: 2.0,
        strength: 0.2,
    };
    // Exactly under the pointer: no push, no NaN.
    assert_eq!(d.offset(Vec3::new(0.5, 0.5, 3.0), Vec2::new(0.5, 0.5)), Vec2::ZERO);
    // At and beyond the boundary: no push.
    assert_eq!(d.offset(Vec3::new(2.0, 0.0, 0.0), Vec2::ZERO), Vec2::ZERO);
    assert_eq!(d.offset(Vec3::new(5.0, 0.0, 0.0), Vec2::ZERO), Vec2::ZERO);
    // Half way: half strength, pointing away from the pointer.
    let half = d.offset(Vec3::new(1.0, 0.0, 0.0), Vec2::ZERO);
    assert!((half.x - 0.1).abs() < 1e-6 && half.y.abs() < 1e-6);
    let near = d.offset(Vec3::new(0.0, -0.1, 0.0), Vec2::ZERO);
    assert!(near.y < 0.0 && near.length() > half.length());
}

#[test]
fn advance_keeps_particle_under_pointer_finite() {
    let config = FieldConfig {
        count: 1,
        ..FieldConfig::default()
    };
    let mut field = ParticleField::with_seed(&config, 4).unwrap();
    let p = field.positions()[0];
    let deflection = PointerDeflection {
        pointer_scale: 1.0,
        ..PointerDeflection::default()
    };
    field.advance(p.truncate(), &deflection).unwrap();
    assert!(field.positions()[0].is_finite());
}

#[test]
fn nan_pointer_is_rejected_and_state_is_untouched() {
    let mut field = make_field(13);
    field.advance(Vec2::new(0.1, -0.2), &PointerDeflection::default()).unwrap();
    let before: Vec<[u32; 3]> = field
        .positions()
        .iter()
        .map(|p| [p.x.to_bits(), p.y.to_bits(), p.z.to_bits()])
        .collect();

    for bad in [
        Vec2::new(f32::NAN, 0.0),
        Vec2::new(0.0, f32::INFINITY),
        Vec2::new(f32::NEG_INFINITY, f32::NAN),
    ] {
        let err = field.advance(bad, &PointerDeflection::default()).unwrap_err();
        assert!(matches!(err, FieldError::InvalidInput(_)));
    }

    let after: Vec<[u32; 3]> = field
        .positions()
        .iter()
        .map(|p| [p.x.to_bits(), p.y.to_bits(), p.z.to_bits()])
        .collect();
    assert_eq!(before, after);
}

#[test]
fn invalid_deflection_is_rejected_as_input() {
    let mut field = make_field(14);
    let before = field.positions().to_vec();
    let bad = PointerDeflection {
        influence_radius: 0.0,
        ..PointerDeflection::default()
    };
    let err = field.advance(Vec2::ZERO, &bad).unwrap_err();
    assert!(matches!(err, FieldError::InvalidInput(_)));
    assert_eq!(before, field.positions());
}

#[test]
fn repeated_advance_converges_monotonically_without_overshoot() {
    let mut field = make_field(17);
    let deflection = far_deflection();
    let mut prev: Vec<Vec3> = field.positions().to_vec();
    for step in 0..200 {
        field.advance(Vec2::new(1.0, 1.0), &deflection).unwrap();
        for i in 0..field.len() {
            let t = field.targets()[i];
            let now = field.positions()[i];
            let d_prev = prev[i].distance(t);
            let d_now = now.distance(t);
            assert!(d_now < d_prev, "step {step} particle {i}: {d_now} >= {d_prev}");
            // Still approaching from the same side on every axis.
            assert!((t - now).dot(t - prev[i]) >= 0.0, "overshoot at step {step}");
        }
        prev.copy_from_slice(field.positions());
    }
}

#[test]
fn advance_preserves_order_and_length() {
    let mut field = make_field(19);
    let targets = field.targets().to_vec();
    let ptr = field.positions().as_ptr();
    for _ in 0..10 {
        field.advance(Vec2::new(0.3, 0.3), &PointerDeflection::default()).unwrap();
    }
    assert_eq!(field.len(), CLUSTER_PARTICLE_COUNT);
    assert_eq!(field.targets(), targets.as_slice());
    assert_eq!(field.positions().as_ptr(), ptr);
}

#[test]
fn particle_out_of_range_is_none() {
    let field = make_field(1);
    assert!(field.particle(field.len()).is_none());
    assert_eq!(field.iter().count(), field.len());
}
