use std::{num::NonZeroUsize, sync::Arc, time::Duration};

use chrono::{Local, TimeDelta, TimeZone};
use clockface_proto::ports::clock::format_time_of_day;
use tokio::runtime::Handle;

use super::*;
use crate::{
    event_bus::{BusEvent, EventBus, EventReceiver},
    test_utils::{FixedClock, PausedClock},
};

const SECOND: Duration = Duration::from_secs(1);

fn t0() -> DateTime<Local> {
    Local
        .with_ymd_and_hms(2024, 1, 15, 15, 4, 5)
        .single()
        .expect("unambiguous local time")
}

async fn settle() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}

async fn advance(duration: Duration) {
    tokio::time::advance(duration).await;
    settle().await;
}

/// Minimal host: applies clock messages from the bus and renders on redraw.
struct Host {
    clock:    Clock,
    context:  ModuleContext,
    receiver: EventReceiver,
    renders:  Vec<ClockView>,
}

impl Host {
    fn new(clock: Clock) -> Self {
        let bus = EventBus::new(NonZeroUsize::new(32).expect("capacity"));
        let context = ModuleContext::new(bus.sender(), Handle::current());

        Self {
            clock,
            context,
            receiver: bus.receiver(),
            renders: Vec::new(),
        }
    }

    fn paused() -> Self {
        Self::new(Clock::new(Arc::new(PausedClock::new(t0()))))
    }

    fn mount(&mut self) {
        self.clock
            .register(&self.context, SECOND)
            .expect("mount clock");
    }

    fn pump(&mut self) {
        while let Some(event) = self.receiver.try_recv().expect("bus readable") {
            match event {
                BusEvent::Module(ModuleEvent::Clock(message)) => self.clock.update(message),
                BusEvent::Redraw => self.renders.push(self.clock.view(())),
            }
        }
    }
}

#[tokio::test(start_paused = true)]
async fn mount_reads_host_clock() {
    let source = Arc::new(FixedClock::new(t0()));
    let mut host = Host::new(Clock::new(source.clone()));

    let later = t0() + TimeDelta::minutes(3);
    source.set(later);
    host.mount();

    assert_eq!(host.clock.data().current_time, later);
    assert_eq!(host.clock.lifecycle(), Lifecycle::Mounted);
    assert!(host.clock.is_timer_active());
}

#[tokio::test(start_paused = true)]
async fn mounted_clock_renders_greeting_and_time() {
    let mut host = Host::paused();
    host.mount();

    let view = host.clock.view(());
    assert_eq!(view.greeting, "Hello, world!");
    assert_eq!(
        view.time_line,
        format!("The time now is {}.", format_time_of_day(t0()))
    );
}

#[tokio::test(start_paused = true)]
async fn no_render_before_first_period() {
    let mut host = Host::paused();
    host.mount();

    advance(Duration::from_millis(999)).await;
    host.pump();

    assert!(host.renders.is_empty());
    assert_eq!(host.clock.data().current_time, t0());
}

#[tokio::test(start_paused = true)]
async fn one_period_advances_time_and_renders() {
    let mut host = Host::paused();
    host.mount();

    advance(SECOND).await;
    host.pump();

    let expected = t0() + TimeDelta::milliseconds(1000);
    assert_eq!(host.clock.data().current_time, expected);
    assert_eq!(host.renders.len(), 1);
    assert_eq!(
        host.renders[0].time_line,
        format!("The time now is {}.", format_time_of_day(expected))
    );
}

#[tokio::test(start_paused = true)]
async fn each_tick_renders_once_with_non_decreasing_time() {
    let mut host = Host::paused();
    host.mount();

    let mut seen = vec![host.clock.data().current_time];
    for tick in 1..=5 {
        advance(SECOND).await;
        host.pump();

        assert_eq!(host.renders.len(), tick);
        seen.push(host.clock.data().current_time);
    }

    assert!(seen.windows(2).all(|pair| pair[0] <= pair[1]));
    assert_eq!(seen.last().copied(), Some(t0() + TimeDelta::seconds(5)));
}

#[tokio::test(start_paused = true)]
async fn ticks_queued_between_pumps_each_render() {
    let mut host = Host::paused();
    host.mount();

    advance(SECOND).await;
    advance(SECOND).await;
    host.pump();

    assert_eq!(host.renders.len(), 2);
    assert_eq!(host.clock.data().current_time, t0() + TimeDelta::seconds(2));
    assert_eq!(
        host.renders[1].time_line,
        format!(
            "The time now is {}.",
            format_time_of_day(t0() + TimeDelta::seconds(2))
        )
    );
}

#[tokio::test(start_paused = true)]
async fn rendering_without_tick_is_stable() {
    let mut host = Host::paused();
    host.mount();

    assert_eq!(host.clock.view(()), host.clock.view(()));
}

#[tokio::test(start_paused = true)]
async fn unmount_stops_refreshing() {
    let mut host = Host::paused();
    host.mount();

    host.clock.unregister();
    advance(Duration::from_millis(5000)).await;
    host.pump();

    assert!(host.renders.is_empty());
    assert!(!host.clock.is_timer_active());
    assert_eq!(host.clock.data().current_time, t0());
    assert_eq!(host.clock.lifecycle(), Lifecycle::Retired);
}

#[tokio::test(start_paused = true)]
async fn tick_queued_before_unmount_is_ignored() {
    let mut host = Host::paused();
    host.mount();

    advance(SECOND).await;
    host.clock.unregister();
    host.pump();

    assert!(host.renders.is_empty());
    assert_eq!(host.clock.data().current_time, t0());
}

#[tokio::test(start_paused = true)]
async fn dropping_mounted_clock_cancels_timer() {
    let mut host = Host::paused();
    host.mount();

    let Host {
        clock,
        mut receiver,
        ..
    } = host;
    drop(clock);

    advance(Duration::from_secs(3)).await;

    assert!(receiver.try_recv().expect("bus readable").is_none());
}

#[tokio::test(start_paused = true)]
async fn second_mount_is_rejected() {
    let mut host = Host::paused();
    host.mount();

    let err = host
        .clock
        .register(&host.context, SECOND)
        .expect_err("double mount");
    assert!(matches!(err, ModuleError::Registration { .. }));
    assert!(host.clock.is_timer_active());
}

#[tokio::test(start_paused = true)]
async fn retired_clock_cannot_be_mounted_again() {
    let mut host = Host::paused();
    host.mount();
    host.clock.unregister();

    assert!(host.clock.register(&host.context, SECOND).is_err());
    assert!(!host.clock.is_timer_active());
    assert_eq!(host.clock.lifecycle(), Lifecycle::Retired);
}

#[tokio::test(start_paused = true)]
async fn zero_interval_is_rejected() {
    let mut host = Host::paused();

    assert!(host.clock.register(&host.context, Duration::ZERO).is_err());
    assert_eq!(host.clock.lifecycle(), Lifecycle::Unmounted);
}

#[tokio::test(start_paused = true)]
async fn configured_interval_is_honoured() {
    let mut host = Host::paused();
    host.clock
        .register(&host.context, Duration::from_millis(250))
        .expect("mount clock");

    advance(Duration::from_millis(250)).await;
    host.pump();

    assert_eq!(host.renders.len(), 1);
    assert_eq!(
        host.clock.data().current_time,
        t0() + TimeDelta::milliseconds(250)
    );
}

#[test]
fn unmount_before_mount_is_a_no_op() {
    let mut clock = Clock::new(Arc::new(FixedClock::new(t0())));
    clock.unmount();

    assert_eq!(clock.lifecycle(), Lifecycle::Unmounted);
}
