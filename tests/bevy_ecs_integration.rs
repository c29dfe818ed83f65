//! Bevy ECS Integration Tests
//!
//! These tests pin the bevy_ecs behaviour tilefox relies on, so a breaking
//! change shows up here first when upgrading bevy_ecs.
//!
//! # Test Categories
//!
//! 1. **Observers** - event data, commands-triggered events, flush
//! 2. **Queries** - mutable pair combinations used by collision detection
//! 3. **Schedules** - chaining with deferred commands, run conditions,
//!    resource change detection
//!
//! # Usage
//!
//! ```sh
//! cargo test --test bevy_ecs_integration
//! ```

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use bevy_ecs::system::SystemState;
use std::sync::{Arc, Mutex};

use tilefox::events::switchdebug::{SwitchDebugEvent, switch_debug_observer};
use tilefox::resources::debugmode::DebugMode;
use tilefox::resources::inspector::Inspector;

// =============================================================================
// Test Components, Resources, and Events
// =============================================================================

#[derive(Component, Debug, Clone, PartialEq)]
struct Position {
    x: f32,
    y: f32,
}

#[derive(Component, Debug, Clone, Default)]
struct Touches(u32);

#[derive(Component, Debug, Clone)]
struct Spawned;

#[derive(Resource, Debug, Default)]
struct Counter(i32);

#[derive(Resource, Debug, Default)]
struct Observed(Vec<bool>);

#[derive(Event, Debug, Clone)]
struct SimpleEvent(i32);

fn increment_counter(mut counter: ResMut<Counter>) {
    counter.0 += 1;
}

// =============================================================================
// CATEGORY 1: Observers
// =============================================================================

#[test]
fn observer_receives_event_data() {
    let mut world = World::new();

    let received_value = Arc::new(Mutex::new(0));
    let received_clone = received_value.clone();

    world.add_observer(move |trigger: On<SimpleEvent>| {
        *received_clone.lock().unwrap() = trigger.event().0;
    });
    world.flush();

    world.trigger(SimpleEvent(123));

    assert_eq!(*received_value.lock().unwrap(), 123);
}

#[test]
fn commands_trigger_event() {
    let mut world = World::new();

    let received = Arc::new(Mutex::new(0));
    let received_clone = received.clone();

    world.add_observer(move |_trigger: On<SimpleEvent>| {
        *received_clone.lock().unwrap() += 1;
    });
    world.flush();

    let mut state = SystemState::<Commands>::new(&mut world);
    let mut commands = state.get_mut(&mut world);
    commands.trigger(SimpleEvent(1));
    commands.trigger(SimpleEvent(2));
    // Nothing runs until the commands are applied.
    assert_eq!(*received.lock().unwrap(), 0);
    state.apply(&mut world);

    assert_eq!(*received.lock().unwrap(), 2);
}

#[test]
fn observer_spawned_as_entity() {
    let mut world = World::new();
    world.insert_resource(Counter(0));

    world.spawn(Observer::new(
        |_trigger: On<SimpleEvent>, mut counter: ResMut<Counter>| {
            counter.0 += 10;
        },
    ));
    world.flush();

    world.trigger(SimpleEvent(0));
    assert_eq!(world.resource::<Counter>().0, 10);
}

#[test]
fn observer_toggles_resource_through_commands() {
    let mut world = World::new();
    world.spawn(Observer::new(switch_debug_observer));
    world.flush();

    world.trigger(SwitchDebugEvent {});
    world.flush();
    assert!(world.contains_resource::<DebugMode>());

    world.trigger(SwitchDebugEvent {});
    world.flush();
    assert!(!world.contains_resource::<DebugMode>());
    assert_eq!(*world.resource::<Inspector>(), Inspector::default());
}

// =============================================================================
// CATEGORY 2: Queries
// =============================================================================

#[test]
fn query_combinations_mut_visits_each_pair_once() {
    let mut world = World::new();
    for i in 0..4 {
        world.spawn((Position { x: i as f32, y: 0.0 }, Touches::default()));
    }

    let mut state = SystemState::<Query<(&Position, &mut Touches)>>::new(&mut world);
    let mut query = state.get_mut(&mut world);
    let mut pairs = 0;
    let mut combos = query.iter_combinations_mut();
    while let Some([(_, mut a), (_, mut b)]) = combos.fetch_next() {
        a.0 += 1;
        b.0 += 1;
        pairs += 1;
    }

    // 4 choose 2, each entity paired with the 3 others.
    assert_eq!(pairs, 6);
    let mut touches = world.query::<&Touches>();
    assert!(touches.iter(&world).all(|t| t.0 == 3));
}

// =============================================================================
// CATEGORY 3: Schedules
// =============================================================================

#[test]
fn schedule_chain_applies_commands_between_systems() {
    let mut world = World::new();
    world.insert_resource(Counter(0));

    fn spawn_one(mut commands: Commands) {
        commands.spawn(Spawned);
    }

    fn count_spawned(query: Query<&Spawned>, mut counter: ResMut<Counter>) {
        counter.0 = query.iter().count() as i32;
    }

    let mut schedule = Schedule::default();
    schedule.add_systems((spawn_one, count_spawned).chain());
    schedule.run(&mut world);

    assert_eq!(world.resource::<Counter>().0, 1);
}

#[test]
fn schedule_run_if_resource_exists() {
    let mut world = World::new();
    world.insert_resource(Counter(0));

    let mut schedule = Schedule::default();
    schedule.add_systems(increment_counter.run_if(resource_exists::<DebugMode>));

    schedule.run(&mut world);
    assert_eq!(world.resource::<Counter>().0, 0);

    world.insert_resource(DebugMode {});
    schedule.run(&mut world);
    schedule.run(&mut world);
    assert_eq!(world.resource::<Counter>().0, 2);

    world.remove_resource::<DebugMode>();
    schedule.run(&mut world);
    assert_eq!(world.resource::<Counter>().0, 2);
}

#[test]
fn resource_change_detection_between_runs() {
    let mut world = World::new();
    world.insert_resource(Counter(0));
    world.insert_resource(Observed::default());

    fn watch(counter: Res<Counter>, mut observed: ResMut<Observed>) {
        observed.0.push(counter.is_changed());
    }

    let mut schedule = Schedule::default();
    schedule.add_systems(watch);

    schedule.run(&mut world);
    schedule.run(&mut world);
    world.resource_mut::<Counter>().0 = 5;
    schedule.run(&mut world);
    schedule.run(&mut world);

    assert_eq!(world.resource::<Observed>().0, vec![true, false, true, false]);
}

#[test]
fn schedule_initialize_before_first_run() {
    let mut world = World::new();
    world.insert_resource(Counter(0));

    let mut schedule = Schedule::default();
    schedule.add_systems(increment_counter);
    schedule
        .initialize(&mut world)
        .expect("Failed to initialize schedule");

    schedule.run(&mut world);
    assert_eq!(world.resource::<Counter>().0, 1);
}
