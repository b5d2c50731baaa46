//! Timed Traffic Light
//!
//! A traffic light made of three element views. Each element is its own
//! statable entity; the light drives them and advances itself on a timer.
//! Automobiles subscribe to the signal the light announces.
//!
//! Key concepts:
//! - One factor per signal, each showing the lamps then scheduling the next signal
//! - Nested dispatchers (the light sets its elements' states)
//! - Deterministic timing with `ManualScheduler`
//! - Push-style observers through `Broadcaster`
//!
//! Run with: RUST_LOG=statable=trace cargo run --example traffic_light

use statable::dispatch::state_is;
use statable::{
    advance_after, state_enum, Broadcaster, Dispatcher, Effect, Factor, ManualScheduler,
    Statable, Subscriber,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

state_enum! {
    enum Lamp {
        Enabled,
        Disabled,
        Transition,
    }
}

state_enum! {
    enum Signal {
        Green,
        BlinkingGreen,
        Yellow,
        Red,
        YellowRed,
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Color {
    Red,
    Yellow,
    Green,
}

impl Signal {
    fn following(&self) -> Signal {
        match self {
            Signal::Green => Signal::BlinkingGreen,
            Signal::BlinkingGreen => Signal::Yellow,
            Signal::Yellow => Signal::Red,
            Signal::Red => Signal::YellowRed,
            Signal::YellowRed => Signal::Green,
        }
    }

    fn lamp_for(&self, color: Color) -> Lamp {
        match (self, color) {
            (Signal::Green, Color::Green) => Lamp::Enabled,
            (Signal::BlinkingGreen, Color::Green) => Lamp::Transition,
            (Signal::Yellow, Color::Yellow) => Lamp::Enabled,
            (Signal::YellowRed, Color::Red | Color::Yellow) => Lamp::Transition,
            (Signal::Red, Color::Red) => Lamp::Enabled,
            _ => Lamp::Disabled,
        }
    }

    fn hold(&self) -> Duration {
        match self {
            Signal::Green | Signal::Red => Duration::from_secs(10),
            Signal::BlinkingGreen => Duration::from_secs(3),
            Signal::Yellow | Signal::YellowRed => Duration::from_secs(2),
        }
    }
}

struct ElementView {
    color: Color,
    dispatcher: Dispatcher<ElementView, Lamp>,
    shown: &'static str,
}

impl ElementView {
    fn new(color: Color) -> Self {
        let mut view = ElementView {
            color,
            dispatcher: Dispatcher::new(Lamp::Disabled),
            shown: "off",
        };
        view.dispatcher
            .register(Factor::on_state(Lamp::Enabled, |v: &mut ElementView| v.shown = "lit"));
        view.dispatcher
            .register(Factor::on_state(Lamp::Transition, |v: &mut ElementView| v.shown = "blink"));
        view.dispatcher
            .set_default(Some(Effect::new(|v: &mut ElementView| v.shown = "off")));
        view
    }
}

impl Statable for ElementView {
    type State = Lamp;
    type Rule = Factor<ElementView>;

    fn dispatcher(&self) -> &Dispatcher<Self, Lamp> {
        &self.dispatcher
    }

    fn dispatcher_mut(&mut self) -> &mut Dispatcher<Self, Lamp> {
        &mut self.dispatcher
    }
}

struct TrafficLight {
    dispatcher: Dispatcher<TrafficLight, Signal>,
    elements: Vec<ElementView>,
    announced: Rc<RefCell<Vec<Signal>>>,
}

impl Statable for TrafficLight {
    type State = Signal;
    type Rule = Factor<TrafficLight>;

    fn dispatcher(&self) -> &Dispatcher<Self, Signal> {
        &self.dispatcher
    }

    fn dispatcher_mut(&mut self) -> &mut Dispatcher<Self, Signal> {
        &mut self.dispatcher
    }
}

impl TrafficLight {
    fn install(scheduler: &ManualScheduler) -> Rc<RefCell<TrafficLight>> {
        let light = Rc::new(RefCell::new(TrafficLight {
            dispatcher: Dispatcher::new(Signal::Red),
            elements: [Color::Red, Color::Yellow, Color::Green]
                .into_iter()
                .map(ElementView::new)
                .collect(),
            announced: Rc::new(RefCell::new(Vec::new())),
        }));

        for signal in Signal::ALL.iter().copied() {
            let show = Effect::new(move |light: &mut TrafficLight| {
                for element in light.elements.iter_mut() {
                    let lamp = signal.lamp_for(element.color);
                    element.set_state(lamp);
                }
                light.announced.borrow_mut().push(signal);
            });
            let advance = advance_after(
                scheduler.clone(),
                signal.hold(),
                Rc::downgrade(&light),
                Signal::following,
            );
            light
                .borrow_mut()
                .dispatcher_mut()
                .register(Factor::new(state_is(signal), show.then(advance)).labeled(signal.name()));
        }
        light
    }

    fn render(&self) -> String {
        self.elements
            .iter()
            .map(|e| format!("{:?}={}", e.color, e.shown))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Timed Traffic Light ===\n");

    let scheduler = ManualScheduler::new();
    let light = TrafficLight::install(&scheduler);

    let moving = Cell::new(0usize);
    let waiting = Cell::new(0usize);
    let mut crossing = Broadcaster::new();
    for _ in 0..4 {
        crossing.subscribe(Subscriber::when(|s: &Signal| *s == Signal::Green, || {
            moving.set(moving.get() + 1)
        }));
        crossing.subscribe(Subscriber::when(
            |s: &Signal| matches!(s, Signal::Red | Signal::Yellow),
            || waiting.set(waiting.get() + 1),
        ));
    }
    println!("{} automobile subscriptions at the crossing\n", crossing.len());

    light.borrow_mut().apply_current();

    let announced = Rc::clone(&light.borrow().announced);
    let mut seen = 0;
    for _ in 0..12 {
        scheduler.fire_next();
        let light = light.borrow();
        println!("t={:>3}s  {:<14} {}", scheduler.now().as_secs(), light.state().name(), light.render());

        let fresh: Vec<Signal> = announced.borrow()[seen..].to_vec();
        seen += fresh.len();
        for signal in fresh {
            crossing.broadcast(&signal);
        }
    }

    println!("\nAutomobile reactions: {} starts, {} stops", moving.get(), waiting.get());
    println!("\n=== Example Complete ===");
}
