mod panels;

use anyhow::Context;
use panels::{BottomBar, BottomBarListener, Screen, TopBar, TopBarListener};
use snapdrag_animation::FlingAnimation;
use snapdrag_core::Runtime;
use snapdrag_foundation::input::PointerEvent;
use snapdrag_foundation::{DragAction, DragConfig, DragDirection, GestureRouter};
use std::rc::Rc;
use std::time::Duration;
use web_time::Instant;

const SCREEN_HEIGHT: f32 = 800.0;
const FRAME: Duration = Duration::from_millis(16);

/// Gives up on a settle that is still running after this long.
const SETTLE_TIMEOUT: Duration = Duration::from_secs(5);

struct Demo {
    runtime: Runtime,
    started: Instant,
    screen: Rc<Screen>,
    router: GestureRouter,
    top: DragAction,
    bottom: DragAction,
    top_bar: Rc<TopBar>,
    bottom_bar: Rc<BottomBar>,
}

impl Demo {
    fn new() -> anyhow::Result<Self> {
        let runtime = Runtime::new();
        let h = SCREEN_HEIGHT;

        let top = DragAction::new(
            DragConfig::new(vec![0.0, h * 0.3, h])
                .with_direction(DragDirection::Down)
                .with_drag_threshold(0.4),
            Rc::new(FlingAnimation::new(runtime.frame_clock())),
        )
        .context("top bar configuration")?;
        let bottom = DragAction::new(
            DragConfig::new(vec![h, h * 0.3, 0.0])
                .with_direction(DragDirection::Up)
                .with_drag_threshold(0.2),
            Rc::new(FlingAnimation::new(runtime.frame_clock())),
        )
        .context("bottom bar configuration")?;

        let top_bar = Rc::new(TopBar::new(h));
        let bottom_bar = Rc::new(BottomBar::new(h));
        top.set_listener(TopBarListener {
            bar: Rc::clone(&top_bar),
            this: top.downgrade(),
            other: bottom.downgrade(),
        });
        bottom.set_listener(BottomBarListener {
            bar: Rc::clone(&bottom_bar),
            this: bottom.downgrade(),
            other: top.downgrade(),
        });

        let screen = Rc::new(Screen::default());
        let router = GestureRouter::new();
        router.add_action(top.clone());
        router.add_action(bottom.clone());
        router.attach(screen.as_ref());

        Ok(Self {
            runtime,
            started: Instant::now(),
            screen,
            router,
            top,
            bottom,
            top_bar,
            bottom_bar,
        })
    }

    fn now_millis(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    /// Drives frames in real time until no animation is left.
    fn run_until_idle(&self) -> anyhow::Result<()> {
        let deadline = Instant::now() + SETTLE_TIMEOUT;
        while self.runtime.has_frame_callbacks() {
            if Instant::now() > deadline {
                anyhow::bail!("animations still running after {SETTLE_TIMEOUT:?}");
            }
            std::thread::sleep(FRAME);
            let frame_time = self.started.elapsed().as_nanos() as u64;
            self.runtime.drain_frame_callbacks(frame_time);
        }
        Ok(())
    }

    /// A finger swipe from `from_y` to `to_y`, held still before lifting.
    fn swipe(&self, from_y: f32, to_y: f32) -> anyhow::Result<()> {
        const MOVES: u32 = 12;
        let x = 40.0;
        let mut time = self.now_millis();
        self.screen.send(PointerEvent::down(x, from_y, time));
        for step in 1..=MOVES {
            time += 8;
            let y = from_y + (to_y - from_y) * step as f32 / MOVES as f32;
            self.screen.send(PointerEvent::moved(x, y, time));
        }
        self.screen.send(PointerEvent::up(x, to_y, time + 100));
        self.run_until_idle()
    }

    /// What the expand/collapse buttons do: nothing while blocked.
    fn press_button(&self, action: &DragAction, expand: bool) -> anyhow::Result<()> {
        let pushed = if expand {
            action.expand()
        } else {
            action.collapse()
        };
        if !pushed {
            println!("  (button ignored: panel is locked by the other one)");
            return Ok(());
        }
        self.run_until_idle()
    }

    fn report(&self, label: &str) {
        println!(
            "{label:<28} top: height {:>6.1} color {} step {}{} | bottom: y {:>6.1} step {}{}",
            self.top_bar.height.get(),
            self.top_bar.color.get(),
            self.top.step(),
            if self.top.is_blocked() { " [locked]" } else { "" },
            self.bottom_bar.y.get(),
            self.bottom.step(),
            if self.bottom.is_blocked() { " [locked]" } else { "" },
        );
    }
}

#[cfg(feature = "logging")]
fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
}

#[cfg(not(feature = "logging"))]
fn init_logging() {}

fn main() -> anyhow::Result<()> {
    init_logging();

    println!("=== snapdrag panel demo ===");
    println!("A top bar opening downward and a bottom bar opening upward share one screen.");
    println!("Whichever is extended locks the other until it closes again.");
    println!();

    let demo = Demo::new()?;
    log::debug!("{:?} on a {SCREEN_HEIGHT} high screen", demo.router);
    demo.report("start");

    demo.swipe(100.0, 300.0)?;
    demo.report("swipe down 200");

    demo.press_button(&demo.bottom, true)?;
    demo.report("bottom expand button");

    demo.press_button(&demo.top, true)?;
    demo.report("top expand button");

    demo.press_button(&demo.top, false)?;
    demo.report("top collapse button");

    demo.swipe(600.0, 200.0)?;
    demo.report("swipe up 400");

    demo.press_button(&demo.top, true)?;
    demo.report("top expand button");

    demo.press_button(&demo.bottom, true)?;
    demo.report("bottom expand button");

    demo.press_button(&demo.bottom, false)?;
    demo.report("bottom collapse button");

    Ok(())
}
