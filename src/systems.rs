#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow precision loss when converting the millisecond mouth delay
    clippy::cast_precision_loss
)]

use bevy_ecs::prelude::*;
use log::{debug, info, trace};
use std::time::Duration;

use crate::Time;
use crate::components::{
    Difficulty, FrameEvents, GameEvent, GameState, Input, MouthTimer, MoveCommand, Note, Rest,
    RestKind, SpawnRng, Staff,
};
use crate::config::GameConfig;

/// Runs one frame of the simulation in its fixed order. Returns false (and
/// does nothing) before a run has started or once it is over.
pub fn frame_system(world: &mut World) -> bool {
    if !world.resource::<GameState>().is_running() {
        return false;
    }

    difficulty_system(world);
    input_system(world);
    physics_system(world);
    rest_system(world);
    spawn_system(world);
    mouth_system(world);

    world.resource_mut::<GameState>().frames += 1;
    true
}

/// Recomputes the spawn interval from the score and the run clock.
pub fn difficulty_system(world: &mut World) {
    let now = world.resource::<Time>().elapsed();
    let score = world.resource::<GameState>().score;
    let config = world.resource::<GameConfig>().clone();

    let mut difficulty = world.resource_mut::<Difficulty>();
    let before = difficulty.spawn_interval;
    difficulty.update(score, now, &config);
    if difficulty.spawn_interval != before {
        debug!(
            "Spawn interval {} -> {} frames",
            before, difficulty.spawn_interval
        );
    }
}

/// Applies move commands queued since the last frame, oldest first.
pub fn input_system(world: &mut World) {
    let commands: Vec<MoveCommand> = world.resource_mut::<Input>().pending.drain(..).collect();
    if commands.is_empty() {
        return;
    }

    let staff = world.resource::<Staff>().clone();
    let config = world.resource::<GameConfig>().clone();
    let mut events = Vec::new();

    {
        let mut note = world.resource_mut::<Note>();
        for command in commands {
            let moved = match command {
                MoveCommand::Up => note.move_up(config.jump_strength),
                MoveCommand::Down => {
                    note.move_down(&staff, config.jump_strength, config.descent_factor)
                }
            };
            if moved {
                trace!("{command:?} toward line {}", note.target_line);
                events.push(match command {
                    MoveCommand::Up => GameEvent::MovedUp,
                    MoveCommand::Down => GameEvent::MovedDown,
                });
            }
        }
    }

    let mut frame_events = world.resource_mut::<FrameEvents>();
    for event in events {
        frame_events.push(event);
    }
}

/// Gravity, staff snapping and the floor clamp for the note.
pub fn physics_system(world: &mut World) {
    let staff = world.resource::<Staff>().clone();
    let config = world.resource::<GameConfig>().clone();
    let mut note = world.resource_mut::<Note>();
    note.step(&staff, &config);
}

/// Scrolls every rest, resolves bites and misses, and evicts rests that have
/// left the screen. Rests are walked newest first.
pub fn rest_system(world: &mut World) {
    let config = world.resource::<GameConfig>().clone();
    let now = world.resource::<Time>().elapsed();
    let hotspot = world
        .resource::<Note>()
        .mouth_hotspot(config.mouth_hotspot_bias);
    let display_width = config.rest_display_width();

    let mut rests: Vec<(Entity, Rest)> = world
        .query::<(Entity, &Rest)>()
        .iter(world)
        .map(|(entity, rest)| (entity, *rest))
        .collect();
    rests.sort_by(|a, b| b.1.sequence.cmp(&a.1.sequence));

    let mut events = Vec::new();
    let mut bitten = false;

    for (entity, mut rest) in rests {
        rest.x -= config.scroll_speed;

        if !rest.collected && hit_test(&rest, hotspot, config.note_radius) {
            rest.collected = true;
            bitten = true;
            eat_rest(world, rest.kind);
            events.push(GameEvent::RestEaten(rest.kind));
        }

        if rest.x + display_width < 0.0 {
            if !rest.collected {
                events.extend(miss_rest(world, rest.kind));
            }
            world.despawn(entity);
        } else {
            world.entity_mut(entity).insert(rest);
        }
    }

    if bitten {
        world.resource_mut::<Note>().mouth_open = false;
        world
            .resource_mut::<MouthTimer>()
            .schedule(now + Duration::from_millis(config.mouth_closed_ms));
    }

    let mut frame_events = world.resource_mut::<FrameEvents>();
    for event in events {
        frame_events.push(event);
    }
}

fn hit_test(rest: &Rest, hotspot: (f32, f32), radius: f32) -> bool {
    let dx = rest.x - hotspot.0;
    let dy = rest.y - hotspot.1;
    (dx * dx + dy * dy).sqrt() < radius
}

fn eat_rest(world: &mut World, kind: RestKind) {
    let mut game_state = world.resource_mut::<GameState>();
    game_state.score = game_state.score + kind.value();
    game_state.rests_eaten += 1;
    trace!("Ate a {kind:?} rest, score {}", game_state.score);
}

// Subtracts the missed rest and ends the run once the score is depleted
fn miss_rest(world: &mut World, kind: RestKind) -> Vec<GameEvent> {
    let mut events = vec![GameEvent::RestMissed(kind)];
    let mut game_state = world.resource_mut::<GameState>();
    game_state.score = game_state.score - kind.value();
    game_state.rests_missed += 1;
    trace!("Missed a {kind:?} rest, score {}", game_state.score);

    if game_state.score.is_depleted() && !game_state.game_over {
        game_state.game_over = true;
        info!(
            "Game over after {} frames: {} eaten, {} missed",
            game_state.frames, game_state.rests_eaten, game_state.rests_missed
        );
        events.push(GameEvent::GameOver);
    }
    events
}

/// Counts frames toward the next spawn and spawns when the interval is reached.
pub fn spawn_system(world: &mut World) {
    let interval = world.resource::<Difficulty>().spawn_interval;
    let due = {
        let mut game_state = world.resource_mut::<GameState>();
        game_state.spawn_timer += 1;
        if game_state.spawn_timer >= interval {
            game_state.spawn_timer = 0;
            true
        } else {
            false
        }
    };

    if due {
        spawn_rest(world);
    }
}

/// Spawns a rest of random kind on a random line just past the right edge.
pub fn spawn_rest(world: &mut World) -> Entity {
    let config = world.resource::<GameConfig>().clone();
    let staff = world.resource::<Staff>().clone();

    let (line, kind) = {
        let mut rng = world.resource_mut::<SpawnRng>();
        let line = rng.0.usize(..staff.len());
        (line, RestKind::random(&mut rng.0))
    };

    let sequence = {
        let mut game_state = world.resource_mut::<GameState>();
        let sequence = game_state.next_sequence;
        game_state.next_sequence += 1;
        sequence
    };

    let rest = Rest {
        x: config.width + config.rest_spawn_offset,
        y: staff.line_y(line) - config.note_radius + config.rest_y_offset,
        kind,
        collected: false,
        line,
        sequence,
    };

    trace!("Spawned {kind:?} rest on line {line}");
    world
        .resource_mut::<FrameEvents>()
        .push(GameEvent::RestSpawned { kind, line });
    world.spawn(rest).id()
}

/// Re-opens the note's mouth once its scheduled time has come.
pub fn mouth_system(world: &mut World) {
    let now = world.resource::<Time>().elapsed();
    if world.resource_mut::<MouthTimer>().is_due(now) {
        world.resource_mut::<Note>().mouth_open = true;
    }
}

/// Puts every run resource back to its starting values and clears all rests.
/// The run is left stopped; `start_run` begins it.
pub fn reset_run(world: &mut World) {
    let config = world.resource::<GameConfig>().clone();
    let staff = world.resource::<Staff>().clone();

    let rests: Vec<Entity> = world
        .query_filtered::<Entity, With<Rest>>()
        .iter(world)
        .collect();
    for entity in rests {
        world.despawn(entity);
    }

    world.resource_mut::<GameState>().reset();
    world.insert_resource(Note::new(&staff, &config));
    world.insert_resource(MouthTimer::default());
    world.resource_mut::<Input>().clear();
    world.resource_mut::<FrameEvents>().drain();

    let now = world.resource::<Time>().elapsed();
    world.resource_mut::<Difficulty>().restart(now, &config);
}

/// Starts a run: spawn timer, interval and difficulty clock all restart now.
pub fn start_run(world: &mut World) {
    let config = world.resource::<GameConfig>().clone();
    let now = world.resource::<Time>().elapsed();

    {
        let mut game_state = world.resource_mut::<GameState>();
        game_state.started = true;
        game_state.game_over = false;
        game_state.spawn_timer = 0;
    }
    world.resource_mut::<Difficulty>().restart(now, &config);
    info!("Run started");
}
