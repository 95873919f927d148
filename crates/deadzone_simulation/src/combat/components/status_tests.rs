//! Tests for PoisonStatus.

#[cfg(test)]
mod tests {
    use super::super::status::*;

    #[test]
    fn test_inactive_tick_does_nothing() {
        let mut status = PoisonStatus::default();
        assert_eq!(status.tick(1000.0), None);
        assert!(!status.is_active());
    }

    #[test]
    fn test_apply_activates() {
        let mut status = PoisonStatus::default();
        status.apply(5000.0, 2.0, 1000.0);

        assert!(status.is_active());
        assert_eq!(status.damage_per_tick(), 2.0);
        assert_eq!(status.duration_remaining_ms(), 5000.0);
    }

    #[test]
    fn test_stacking_adds_damage_and_refreshes_duration() {
        let mut status = PoisonStatus::default();
        status.apply(5000.0, 2.0, 1000.0);
        status.tick(1500.0);

        status.apply(5000.0, 2.0, 1000.0);

        assert_eq!(status.damage_per_tick(), 4.0);
        // duration заменяется, не суммируется
        assert_eq!(status.duration_remaining_ms(), 5000.0);
    }

    #[test]
    fn test_stacking_keeps_interval_running() {
        let mut status = PoisonStatus::default();
        status.apply(5000.0, 2.0, 1000.0);
        assert_eq!(status.tick(600.0), None);

        // Новый apply не сбрасывает interval: до tick осталось 400ms
        status.apply(5000.0, 3.0, 1000.0);
        assert_eq!(status.tick(399.0), None);
        assert_eq!(status.tick(1.0), Some(5.0));
    }

    #[test]
    fn test_five_ticks_over_five_seconds() {
        let mut status = PoisonStatus::default();
        status.apply(5000.0, 2.0, 1000.0);

        let mut total = 0.0;
        let mut ticks = 0;
        // 100ms шаги, 60 раз = 6 секунд
        for _ in 0..60 {
            if let Some(damage) = status.tick(100.0) {
                total += damage;
                ticks += 1;
            }
        }

        assert_eq!(ticks, 5);
        assert_eq!(total, 10.0);
        assert!(!status.is_active());
    }

    #[test]
    fn test_first_tick_uses_spec_interval() {
        let mut status = PoisonStatus::default();
        status.apply(3000.0, 1.0, 250.0);

        assert_eq!(status.tick(200.0), None);
        assert_eq!(status.tick(50.0), Some(1.0));
        // Дальше: фиксированный интервал
        assert_eq!(status.tick(999.0), None);
        assert_eq!(status.tick(1.0), Some(1.0));
    }

    #[test]
    fn test_reapply_after_expiry_starts_fresh() {
        let mut status = PoisonStatus::default();
        status.apply(1000.0, 2.0, 1000.0);
        status.tick(1000.0);
        assert!(!status.is_active());

        status.apply(2000.0, 3.0, 1000.0);
        assert_eq!(status.damage_per_tick(), 3.0);
    }
}
