//! Runtime loop tests with a scripted host: step accounting, catch-up
//! bounds, focus handling, time scale and loop exit.

use std::time::Duration;

use bevy_ecs::prelude::*;

use tilefox::clock::FixedClock;
use tilefox::resources::input::InputState;
use tilefox::resources::worldtime::WorldTime;
use tilefox::runtime::{ExitFlag, Host, Runtime};

#[derive(Resource, Default)]
struct Ticks(u64);

#[derive(Resource, Default)]
struct Frames(u64);

fn count_tick(mut ticks: ResMut<Ticks>) {
    ticks.0 += 1;
}

fn count_frame(mut frames: ResMut<Frames>) {
    frames.0 += 1;
}

/// Requests exit once ten ticks have run.
fn exit_after_ten(ticks: Res<Ticks>, mut exit: ResMut<ExitFlag>) {
    if ticks.0 >= 10 {
        exit.request();
    }
}

fn runtime(fixed_extra: Option<Schedule>) -> Runtime {
    let mut world = World::new();
    world.init_resource::<Ticks>();
    world.init_resource::<Frames>();
    world.insert_resource(InputState::default());

    let fixed = fixed_extra.unwrap_or_else(|| {
        let mut fixed = Schedule::default();
        fixed.add_systems(count_tick);
        fixed
    });
    let mut update = Schedule::default();
    update.add_systems(count_frame);

    let mut runtime = Runtime::new(world, fixed, update, FixedClock::default());
    runtime.initialize().expect("schedules build");
    runtime
}

fn ticks(runtime: &Runtime) -> u64 {
    runtime.world.resource::<Ticks>().0
}

/// Host replaying a fixed list of frame times.
struct ScriptedHost {
    frames: Vec<Duration>,
    next: usize,
    presented: usize,
    close_after: Option<usize>,
}

impl ScriptedHost {
    fn new(frames: Vec<Duration>) -> Self {
        Self {
            frames,
            next: 0,
            presented: 0,
            close_after: None,
        }
    }
}

impl Host for ScriptedHost {
    fn should_close(&mut self, _world: &mut World) -> bool {
        self.next >= self.frames.len() || self.close_after.is_some_and(|n| self.presented >= n)
    }

    fn frame_time(&mut self, _world: &mut World) -> Duration {
        let dt = self.frames[self.next];
        self.next += 1;
        dt
    }

    fn pump_input(&mut self, world: &mut World) {
        world.resource_mut::<InputState>().set_focused(true);
    }

    fn present(&mut self, _world: &mut World) {
        self.presented += 1;
    }
}

#[test]
fn alpha_stays_in_range_for_random_frames() {
    let mut runtime = runtime(None);
    let mut rng = fastrand::Rng::with_seed(42);
    for _ in 0..500 {
        let ms = rng.u64(0..120);
        let plan = runtime.frame(Duration::from_millis(ms));
        assert!((0.0..1.0).contains(&plan.alpha), "alpha {}", plan.alpha);
        assert_eq!(runtime.world.resource::<WorldTime>().alpha, plan.alpha);
    }
    assert_eq!(runtime.world.resource::<Frames>().0, 500);
    assert_eq!(runtime.world.resource::<WorldTime>().tick, ticks(&runtime));
}

#[test]
fn total_time_decides_the_tick_count() {
    let mut a = runtime(None);
    let mut b = runtime(None);
    for _ in 0..100 {
        a.frame(Duration::from_millis(5));
    }
    for _ in 0..20 {
        b.frame(Duration::from_millis(25));
    }
    // 500 ms at 60 Hz.
    assert_eq!(ticks(&a), 30);
    assert_eq!(ticks(&b), 30);
}

#[test]
fn long_frames_are_capped() {
    let mut runtime = runtime(None);
    let plan = runtime.frame(Duration::from_secs(3));
    assert_eq!(plan.steps, 5);
    assert!(plan.dropped > Duration::ZERO);
    assert_eq!(ticks(&runtime), 5);
    assert_eq!(runtime.world.resource::<WorldTime>().tick, 5);
    assert!(runtime.clock().accumulator() < runtime.clock().step());

    // Back to normal pacing right after.
    let step = runtime.clock().step();
    runtime.frame(step);
    assert_eq!(ticks(&runtime), 6);
}

#[test]
fn unfocused_window_pauses_the_simulation() {
    let mut runtime = runtime(None);
    runtime.frame(Duration::from_millis(50));
    let before = ticks(&runtime);
    assert_eq!(before, 3);

    runtime.world.resource_mut::<InputState>().set_focused(false);
    for _ in 0..10 {
        let plan = runtime.frame(Duration::from_millis(50));
        assert_eq!(plan.steps, 0);
    }
    assert_eq!(ticks(&runtime), before);
    // Frames still render.
    assert_eq!(runtime.world.resource::<Frames>().0, 11);

    runtime.world.resource_mut::<InputState>().set_focused(true);
    runtime.frame(Duration::from_millis(50));
    assert_eq!(ticks(&runtime), 6);
}

#[test]
fn time_scale_slows_the_simulation() {
    let mut runtime = runtime(None);
    runtime.world.resource_mut::<WorldTime>().time_scale = 0.5;
    for _ in 0..60 {
        runtime.frame(Duration::from_millis(20));
    }
    // 1.2 s of wall time simulates 0.6 s.
    assert_eq!(ticks(&runtime), 36);

    runtime.world.resource_mut::<WorldTime>().time_scale = 0.0;
    runtime.frame(Duration::from_millis(100));
    assert_eq!(ticks(&runtime), 36);
}

#[test]
fn exit_flag_stops_the_loop() {
    let mut fixed = Schedule::default();
    fixed.add_systems((count_tick, exit_after_ten).chain());
    let mut runtime = runtime(Some(fixed));

    let mut host = ScriptedHost::new(vec![Duration::from_millis(16); 1000]);
    runtime.run(&mut host);

    assert!(runtime.should_exit());
    // The frame that raised the flag still finishes and is presented.
    assert!(ticks(&runtime) >= 10);
    assert!(host.next < 20);
    assert_eq!(host.presented, host.next);
}

#[test]
fn closing_host_stops_before_the_next_frame() {
    let mut runtime = runtime(None);
    let mut host = ScriptedHost::new(vec![Duration::from_millis(20); 100]);
    host.close_after = Some(3);
    runtime.run(&mut host);
    assert_eq!(host.presented, 3);
    assert_eq!(runtime.world.resource::<Frames>().0, 3);

    let mut closed = ScriptedHost::new(Vec::new());
    runtime.run(&mut closed);
    assert_eq!(closed.presented, 0);
}
