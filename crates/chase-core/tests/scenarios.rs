//! Scenario tests
//!
//! End-to-end behavior of the simulation driver: progress accumulation,
//! hunter pursuit rules, knockback recovery and the game-over freeze.

use chase_core::{
    EventKind, FactionId, GameOverReason, HunterId, HunterSpawn, HunterState, LevelLayout,
    SessionState, SimConfig, Simulation, Vec2, ZoneShape,
};

const DT: f32 = 0.02;

fn config() -> SimConfig {
    let mut config = SimConfig::default();
    config.hunter.speed_growth_enabled = false;
    config
}

fn run(sim: &mut Simulation, seconds: f32) {
    let ticks = (seconds / DT).round() as u32;
    for _ in 0..ticks {
        sim.tick(DT);
    }
}

#[test]
fn ten_seconds_in_faction_zone_adds_fifty() {
    let mut config = config();
    config.player.zone_progress_rate = 5.0;
    let layout = LevelLayout::new("grove", Vec2::new(6.0, 0.0)).with_zone(
        "grove",
        FactionId::FactionA,
        Vec2::ZERO,
        ZoneShape::Circle { radius: 3.0 },
    );
    let mut sim = Simulation::new(config, layout, 1).unwrap();

    sim.tick(DT);
    assert_eq!(sim.player().unwrap().current_faction, FactionId::Neutral);
    let neutral_before = sim.progress().progress(FactionId::Neutral);
    assert!(neutral_before > 0.0);

    sim.player_mut().unwrap().position = Vec2::ZERO;
    run(&mut sim, 10.0);

    let progress = sim.progress();
    assert!((progress.progress(FactionId::FactionA) - 50.0).abs() < 1e-2);
    assert_eq!(progress.progress(FactionId::FactionB), 0.0);
    assert_eq!(progress.progress(FactionId::Neutral), neutral_before);
    assert!(!sim.is_over());
}

#[test]
fn zone_transitions_emit_exit_then_enter() {
    let layout = LevelLayout::new("pair", Vec2::ZERO)
        .with_zone(
            "left",
            FactionId::FactionA,
            Vec2::new(-2.0, 0.0),
            ZoneShape::Circle { radius: 2.5 },
        )
        .with_zone(
            "right",
            FactionId::FactionB,
            Vec2::new(2.0, 0.0),
            ZoneShape::Circle { radius: 2.5 },
        );
    let mut sim = Simulation::new(config(), layout, 1).unwrap();

    sim.player_mut().unwrap().position = Vec2::new(-1.0, 0.0);
    let report = sim.tick(DT);
    assert!(matches!(
        report.events.as_slice(),
        [chase_core::SimEvent {
            kind: EventKind::ZoneEntered {
                faction: FactionId::FactionA,
                ..
            },
            ..
        }]
    ));

    // the overlap at x = 0.5 is nearer the right zone's center
    sim.player_mut().unwrap().position = Vec2::new(0.5, 0.0);
    let report = sim.tick(DT);
    let kinds: Vec<_> = report.events.iter().map(|e| e.kind.clone()).collect();
    assert_eq!(kinds.len(), 2);
    assert!(matches!(kinds[0], EventKind::ZoneExited { faction: FactionId::FactionA, .. }));
    assert!(matches!(kinds[1], EventKind::ZoneEntered { faction: FactionId::FactionB, .. }));
    assert_eq!(sim.player().unwrap().current_faction, FactionId::FactionB);
}

#[test]
fn saturation_ends_the_game_exactly_once() {
    let mut config = config();
    config.progress.max_progress = 1.0;
    config.player.zone_progress_rate = 10.0;
    let layout = LevelLayout::new("yard", Vec2::ZERO).with_zone(
        "yard",
        FactionId::FactionB,
        Vec2::ZERO,
        ZoneShape::Rect {
            half_extents: Vec2::new(4.0, 4.0),
        },
    );
    let mut sim = Simulation::new(config, layout, 1).unwrap();

    let mut outcomes = Vec::new();
    let mut game_over_events = 0;
    for _ in 0..100 {
        let report = sim.tick(DT);
        game_over_events += report
            .events
            .iter()
            .filter(|e| matches!(e.kind, EventKind::GameOver { .. }))
            .count();
        outcomes.extend(report.outcome);
    }

    assert_eq!(
        outcomes,
        vec![GameOverReason::AccumulatorSaturated(FactionId::FactionB)]
    );
    assert_eq!(game_over_events, 1);
    assert_eq!(sim.session(), SessionState::GameOver);
    assert!(!sim.player().unwrap().can_move);
}

#[test]
fn neutral_time_never_ends_the_game() {
    let mut config = config();
    config.progress.max_progress = 1.0;
    let mut sim = Simulation::new(config, LevelLayout::new("open", Vec2::ZERO), 1).unwrap();

    run(&mut sim, 30.0);

    assert!(sim.progress().progress(FactionId::Neutral) > 1.0);
    assert!(!sim.is_over());
    assert_eq!(sim.session(), SessionState::Playing);
}

#[test]
fn finished_session_ignores_further_ticks_and_calls() {
    let layout = LevelLayout::new("ambush", Vec2::ZERO)
        .with_hunter(HunterSpawn::new(FactionId::FactionB, Vec2::new(0.9, 0.0)));
    let mut sim = Simulation::new(config(), layout, 1).unwrap();

    let report = sim.tick(DT);
    assert_eq!(
        report.outcome,
        Some(GameOverReason::CaughtByHunter(FactionId::FactionB))
    );

    let frozen = sim.snapshot();
    sim.set_movement_input(Vec2::X);
    for _ in 0..20 {
        let report = sim.tick(DT);
        assert!(report.events.is_empty());
        assert!(report.outcome.is_none());
    }
    assert_eq!(sim.snapshot(), frozen);

    // the latch holds against late triggers
    let mut progress = sim.progress().clone();
    assert_eq!(
        progress.add_progress(FactionId::FactionA, 10.0),
        Ok(chase_core::ProgressOutcome::AlreadyOver)
    );
    assert_eq!(
        progress.caught_by_hunter(FactionId::FactionA, FactionId::Neutral),
        chase_core::CatchOutcome::AlreadyOver
    );
    assert_eq!(&progress, sim.progress());
}

#[test]
fn detection_and_hysteresis() {
    let layout = LevelLayout::new("line", Vec2::new(2.9, 0.0))
        .with_hunter(HunterSpawn::new(FactionId::FactionA, Vec2::new(-5.0, 0.0)));
    let mut sim = Simulation::new(config(), layout, 1).unwrap();
    let id = HunterId(0);

    let report = sim.tick(DT);
    assert_eq!(sim.hunter(id).unwrap().state, HunterState::Chasing);
    assert!(report.events.iter().any(|e| e.kind
        == EventKind::HunterStateChanged {
            hunter_id: id,
            from: HunterState::Wandering,
            to: HunterState::Chasing,
        }));

    let hunter_x = sim.hunter(id).unwrap().position.x;
    sim.player_mut().unwrap().position = Vec2::new(hunter_x + 11.5, 0.0);
    sim.tick(DT);
    assert_eq!(sim.hunter(id).unwrap().state, HunterState::Chasing);

    let hunter_x = sim.hunter(id).unwrap().position.x;
    sim.player_mut().unwrap().position = Vec2::new(hunter_x + 13.0, 0.0);
    sim.tick(DT);
    assert_eq!(sim.hunter(id).unwrap().state, HunterState::Wandering);
}

#[test]
fn hunters_never_chase_inside_their_own_territory() {
    let layout = LevelLayout::new("home", Vec2::ZERO)
        .with_zone(
            "home",
            FactionId::FactionA,
            Vec2::ZERO,
            ZoneShape::Rect {
                half_extents: Vec2::new(10.0, 5.0),
            },
        )
        .with_hunter(HunterSpawn::new(FactionId::FactionA, Vec2::new(3.0, 0.0)))
        .with_hunter(HunterSpawn::new(FactionId::FactionA, Vec2::new(-1.0, 1.0)));
    let mut sim = Simulation::new(config(), layout, 5).unwrap();

    for step in 0..400 {
        let x = -9.0 + (step % 19) as f32;
        sim.player_mut().unwrap().position = Vec2::new(x, 0.0);
        sim.tick(DT);
        for hunter in sim.hunters() {
            assert_ne!(hunter.state, HunterState::Chasing);
            assert_ne!(hunter.state, HunterState::Attacking);
        }
    }
    assert!(!sim.is_over());
    assert!(sim.hunter_agent(HunterId(0)).unwrap().in_same_faction_zone);
}

#[test]
fn chase_speed_depends_on_player_territory() {
    let cases = [
        (FactionId::FactionB, ZoneShape::Circle { radius: 1.0 }, 0.5),
        (
            FactionId::FactionB,
            ZoneShape::Rect {
                half_extents: Vec2::new(2.0, 0.5),
            },
            0.5,
        ),
        (FactionId::Neutral, ZoneShape::Circle { radius: 2.0 }, 1.0),
    ];

    for (zone_faction, shape, expected) in cases {
        for (player_x, hunter_x) in [(4.0, -2.0), (-6.0, 0.0), (8.0, 3.0)] {
            let player = Vec2::new(player_x, 0.0);
            let layout = LevelLayout::new("sweep", player)
                .with_zone("territory", zone_faction, player, shape)
                .with_hunter(HunterSpawn::new(FactionId::FactionA, Vec2::new(hunter_x, 0.0)));
            let mut sim = Simulation::new(config(), layout, 9).unwrap();

            sim.tick(0.1);
            let hunter = sim.hunter(HunterId(0)).unwrap();
            assert_eq!(hunter.state, HunterState::Chasing);
            let moved = (hunter.position.x - hunter_x).abs();
            assert!(
                (moved - 3.0 * expected * 0.1).abs() < 1e-4,
                "zone {:?}: moved {}",
                zone_faction,
                moved
            );
        }
    }

    // open ground counts as neutral
    let layout = LevelLayout::new("open", Vec2::new(4.0, 0.0))
        .with_hunter(HunterSpawn::new(FactionId::FactionB, Vec2::ZERO));
    let mut sim = Simulation::new(config(), layout, 9).unwrap();
    sim.tick(0.1);
    assert!((sim.hunter(HunterId(0)).unwrap().position.x - 0.3).abs() < 1e-4);
}

#[test]
fn knockback_returns_then_resumes_wandering() {
    let layout = LevelLayout::new("pen", Vec2::new(-9.5, 4.5)).with_hunter(
        HunterSpawn::new(FactionId::FactionB, Vec2::ZERO).with_detection_range(2.0),
    );
    let mut sim = Simulation::new(config(), layout, 3).unwrap();
    let id = HunterId(0);

    sim.place_hunter(id, Vec2::new(4.0, 0.0)).unwrap();
    sim.apply_collision(id, Vec2::new(3.0, 0.0)).unwrap();
    let report = sim.tick(DT);
    assert_eq!(sim.hunter(id).unwrap().state, HunterState::Returning);
    let knocked = report.events.iter().any(|e| {
        matches!(e.kind, EventKind::HunterKnockedBack { hunter_id, .. } if hunter_id == id)
    });
    assert!(knocked);

    let mut resumed = false;
    for _ in 0..1000 {
        sim.tick(DT);
        if sim.hunter(id).unwrap().state != HunterState::Returning {
            resumed = true;
            break;
        }
    }
    assert!(resumed);

    let view = sim.hunter(id).unwrap();
    assert_eq!(view.state, HunterState::Wandering);
    assert_eq!(sim.hunter_agent(id).unwrap().wander_center, view.position);
    assert!(view.position.distance(Vec2::new(3.2, 0.0)) <= 0.1 + 1e-4);
}

#[test]
fn forced_return_takes_effect_next_tick() {
    let layout = LevelLayout::new("pen", Vec2::new(-9.5, 4.5)).with_hunter(
        HunterSpawn::new(FactionId::FactionA, Vec2::ZERO).with_detection_range(2.0),
    );
    let mut sim = Simulation::new(config(), layout, 3).unwrap();
    let id = HunterId(0);

    sim.place_hunter(id, Vec2::new(0.0, 4.0)).unwrap();
    sim.force_hunter_return(id).unwrap();
    let report = sim.tick(DT);

    assert_eq!(sim.hunter(id).unwrap().state, HunterState::Returning);
    assert!(!report
        .events
        .iter()
        .any(|e| matches!(e.kind, EventKind::HunterKnockedBack { .. })));
}

#[test]
fn player_stays_inside_bounds() {
    let mut sim = Simulation::new(config(), LevelLayout::new("open", Vec2::ZERO), 1).unwrap();

    for (input, dt) in [
        (Vec2::new(100.0, 100.0), 1e-5),
        (Vec2::new(100.0, 100.0), 0.02),
        (Vec2::new(-50.0, 3.0), 5.0),
        (Vec2::new(1.0, -1.0), 10_000.0),
    ] {
        sim.set_movement_input(input);
        for _ in 0..200 {
            sim.tick(dt);
            let player = sim.player().unwrap();
            assert!(player.bounds().contains(player.position));
        }
    }
    assert_eq!(sim.player().unwrap().position, Vec2::new(10.0, -5.0));
}

#[test]
fn restart_resets_everything() {
    let layout = LevelLayout::new("ambush", Vec2::ZERO)
        .with_hunter(HunterSpawn::new(FactionId::FactionB, Vec2::new(0.9, 0.0)));
    let mut sim = Simulation::new(config(), layout, 1).unwrap();
    let fresh = sim.snapshot();

    sim.tick(DT);
    assert!(sim.is_over());

    sim.restart().unwrap();
    assert!(!sim.is_over());
    assert_eq!(sim.session(), SessionState::Playing);
    assert!(sim.player().unwrap().can_move);
    assert_eq!(sim.snapshot(), fresh);

    let report = sim.tick(DT);
    assert_eq!(report.events[0].kind, EventKind::SessionRestarted);
    assert_eq!(report.tick, 1);
}

#[test]
fn missing_player_leaves_hunters_wandering() {
    let mut sim = Simulation::with_defaults(11).unwrap();
    assert!(sim.detach_player().is_some());

    for _ in 0..500 {
        let report = sim.tick(DT);
        assert!(report.outcome.is_none());
    }
    for hunter in sim.hunters() {
        assert_eq!(hunter.state, HunterState::Wandering);
    }
    assert!(sim.snapshot().player.is_none());
    sim.set_movement_input(Vec2::X);
}

#[test]
fn missing_zone_registry_skips_zone_checks() {
    let mut sim = Simulation::new(config(), LevelLayout::default_arena(), 2).unwrap();
    sim.detach_zones();
    sim.player_mut().unwrap().position = Vec2::new(-6.0, 0.0);

    sim.tick(DT);

    assert_eq!(sim.progress().progress(FactionId::FactionA), 0.0);
    assert_eq!(sim.progress().progress(FactionId::Neutral), 0.0);
    assert_eq!(sim.player().unwrap().current_faction, FactionId::Neutral);
}

#[test]
fn snapshot_reports_threats_and_mask() {
    let mut config = config();
    config.player.zone_progress_rate = 20.0;
    let layout = LevelLayout::new("grove", Vec2::new(-6.0, 0.0))
        .with_zone(
            "grove",
            FactionId::FactionA,
            Vec2::new(-6.0, 0.0),
            ZoneShape::Circle { radius: 3.0 },
        )
        .with_hunter(HunterSpawn::new(FactionId::FactionA, Vec2::new(-6.0, 2.0)));
    let mut sim = Simulation::new(config, layout, 4).unwrap();

    run(&mut sim, 1.0);

    let snapshot = sim.snapshot();
    assert_eq!(snapshot.session, SessionState::Playing);
    assert!(snapshot.progress.progress_a > 19.0);
    assert!(snapshot.mask.blend < 0.5);
    assert!(snapshot.mask.intensity > 0.0);
    let threat = snapshot.hunters[0].threat.unwrap();
    assert!(threat.distance < 10.0);
    assert!(threat.alpha < 1.0);

    let json = serde_json::to_string(&snapshot).unwrap();
    assert!(json.contains("\"session\":\"playing\""));
}
