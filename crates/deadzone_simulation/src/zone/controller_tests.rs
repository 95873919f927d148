//! Tests for ZoneController.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use super::super::controller::*;
    use crate::config::SimulationConfig;

    const TICK_MS: f64 = 100.0;

    fn controller(seed: u64) -> (ZoneController, ChaCha8Rng) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let zone = ZoneController::new(&SimulationConfig::default(), 0.0, &mut rng);
        (zone, rng)
    }

    fn assert_target_inside(previous: ZoneCircle, target: ZoneCircle, tile: f32) {
        let expected = if previous.radius * 0.7 < tile {
            0.0
        } else {
            previous.radius * 0.7
        };
        assert!((target.radius - expected).abs() < 1e-2);

        let offset = target.center.distance(previous.center);
        assert!(offset <= previous.radius - target.radius + 1e-2);
    }

    #[test]
    fn test_initial_circle_covers_map() {
        let (zone, _) = controller(1);

        assert_eq!(zone.phase(), ZonePhase::Waiting);
        assert_eq!(zone.current().center, Vec2::new(2500.0, 2500.0));
        assert_eq!(zone.current().radius, 5000.0);
        assert_eq!(zone.time_remaining_ms(), 10_000.0);
        assert_target_inside(zone.current(), zone.target(), 100.0);
    }

    #[test]
    fn test_waiting_freezes_geometry() {
        let (mut zone, mut rng) = controller(2);
        let current = zone.current();
        let target = zone.target();

        for _ in 0..99 {
            assert_eq!(zone.advance(TICK_MS, &mut rng), None);
        }

        assert_eq!(zone.current(), current);
        assert_eq!(zone.target(), target);
        assert!((zone.time_remaining_ms() - 100.0).abs() < 1e-6);
    }

    #[test]
    fn test_full_cycle_snaps_to_target() {
        let (mut zone, mut rng) = controller(3);
        let first_target = zone.target();

        // 10s ожидания
        let mut changed = None;
        for _ in 0..100 {
            changed = zone.advance(TICK_MS, &mut rng).or(changed);
        }
        assert_eq!(changed, Some(ZonePhase::Shrinking));
        assert_eq!(zone.time_remaining_ms(), 20_000.0);

        // Первый tick сжатия сдвигает live круг на 5%
        let before = zone.current();
        zone.advance(TICK_MS, &mut rng);
        let expected_radius = before.radius + (first_target.radius - before.radius) * 0.05;
        assert!((zone.current().radius - expected_radius).abs() < 1e-2);

        // Оставшиеся 19.9s
        let mut changed = None;
        for _ in 0..199 {
            changed = zone.advance(TICK_MS, &mut rng).or(changed);
        }
        assert_eq!(changed, Some(ZonePhase::Waiting));
        assert_eq!(zone.current(), first_target);
        assert_target_inside(first_target, zone.target(), 100.0);
    }

    #[test]
    fn test_radius_reaches_zero_and_stays() {
        let (mut zone, mut rng) = controller(4);

        // 5000 × 0.7^n < 100 при n = 11
        for _ in 0..15 {
            let previous = zone.current();
            let mut changed = None;
            while changed != Some(ZonePhase::Waiting) {
                changed = zone.advance(10_000.0, &mut rng);
            }
            assert!(zone.current().radius <= previous.radius);
        }

        assert_eq!(zone.current().radius, 0.0);
        assert_eq!(zone.target().radius, 0.0);
        assert_eq!(zone.target().center, zone.current().center);
    }

    #[test]
    fn test_damage_check_throttled_to_interval() {
        let (mut zone, _) = controller(5);

        // 2500ms по 100ms
        let checks = (1..=25)
            .filter(|i| zone.take_damage_check(*i as f64 * TICK_MS))
            .count();

        assert_eq!(checks, 2);
    }

    #[test]
    fn test_damage_check_does_not_burst_after_gap() {
        let (mut zone, _) = controller(6);

        assert!(zone.take_damage_check(5_000.0));
        // Пропущенные проверки не догоняются
        assert!(!zone.take_damage_check(5_500.0));
        assert!(zone.take_damage_check(6_000.0));
    }

    #[test]
    fn test_is_outside_boundary() {
        let circle = ZoneCircle::new(Vec2::ZERO, 100.0);
        assert!(!circle.is_outside(Vec2::new(100.0, 0.0)));
        assert!(circle.is_outside(Vec2::new(100.1, 0.0)));
    }

    proptest! {
        #[test]
        fn prop_next_target_fits_inside(seed in any::<u64>(), phases in 1usize..14) {
            let (mut zone, mut rng) = controller(seed);

            for _ in 0..phases {
                let mut changed = None;
                while changed != Some(ZonePhase::Waiting) {
                    changed = zone.advance(10_000.0, &mut rng);
                }

                let current = zone.current();
                let target = zone.target();
                let expected = if current.radius * 0.7 < 100.0 { 0.0 } else { current.radius * 0.7 };

                prop_assert!((target.radius - expected).abs() < 1e-2);
                prop_assert!(target.center.distance(current.center) <= current.radius - target.radius + 1e-2);
            }
        }
    }
}
