//! Headless симуляция Deadzone
//!
//! Игрок стоит в центре карты, вокруг три врага; зона сжимается.
//! Опционально: путь к RON config первым аргументом.

use bevy::prelude::*;
use deadzone_simulation::{
    init_logger, log_error, log_info, Archetype, CombatSimulation, EntityDied, SimulationConfig,
    Weapon, ZonePhaseChanged,
};

const TICK_MS: f64 = 1000.0 / 60.0;

fn load_config() -> Result<SimulationConfig, String> {
    let Some(path) = std::env::args().nth(1) else {
        return Ok(SimulationConfig::default());
    };

    let source = std::fs::read_to_string(&path).map_err(|e| format!("{path}: {e}"))?;
    SimulationConfig::from_ron_str(&source).map_err(|e| format!("{path}: {e}"))
}

fn main() {
    init_logger();

    let config = match load_config() {
        Ok(config) => config,
        Err(message) => {
            log_error(&message);
            std::process::exit(1);
        }
    };

    log_info(&format!("Starting Deadzone headless simulation (seed: {})", config.seed));
    let center = config.map_size() * 0.5;

    let mut sim = match CombatSimulation::new(config) {
        Ok(sim) => sim,
        Err(e) => {
            log_error(&format!("invalid config: {e}"));
            std::process::exit(1);
        }
    };

    let player = sim.spawn_player(center, Some(Weapon::glock()));
    sim.spawn_enemy(Archetype::Junkie, center + Vec2::new(450.0, 0.0));
    sim.spawn_enemy(Archetype::Police, center + Vec2::new(0.0, 650.0));
    sim.spawn_enemy(Archetype::Swat, center + Vec2::new(-750.0, -100.0));
    sim.set_target_for_all_enemies(player);

    // 60 секунд игрового времени
    for tick in 0..3600 {
        sim.step(TICK_MS);

        for died in sim.drain_events::<EntityDied>() {
            log_info(&format!("Tick {}: {:?} died at {:?}", tick, died.kind, died.position));
        }
        for change in sim.drain_events::<ZonePhaseChanged>() {
            log_info(&format!(
                "Tick {}: zone {:?}, target r={:.0}",
                tick, change.phase, change.target.radius
            ));
        }

        if tick % 600 == 0 {
            let hp = sim.combatant_status(player).map_or(0.0, |s| s.hp);
            log_info(&format!(
                "Tick {}: player hp {:.1}, {} enemies alive",
                tick,
                hp,
                sim.enemy_count()
            ));
        }

        if !sim.is_alive(player) {
            log_info(&format!("Player died at tick {}", tick));
            break;
        }
    }

    log_info("Simulation complete!");
}
