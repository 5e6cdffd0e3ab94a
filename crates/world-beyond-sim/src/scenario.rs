//! Scripted playthroughs

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use clap::ValueEnum;
use world_beyond_xr::chapter::MessageKind;
use world_beyond_xr::{
    ChapterController, Components, ConfigError, ExperienceConfig, ExperiencePhase, Floorplan,
    FloorplanRoom, GestureEvent, Point3D,
};

use crate::device::SimDevice;
use crate::stage::{self, Stage};

/// When the simulated scene finishes loading
const SCENE_LOAD_AT: f32 = 0.5;

/// Where the tool waits to be grabbed
pub fn bait_position() -> Point3D {
    Point3D::new(0.0, 1.0, 1.2)
}

/// Which playthrough to script
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Scenario {
    /// Start inside the room and play through normally
    Inside,
    /// Start outside the room, then walk in
    Outside,
    /// The scene has no usable room data
    BrokenRoom,
}

impl Scenario {
    pub fn room(&self) -> FloorplanRoom {
        match self {
            Scenario::BrokenRoom => FloorplanRoom::without_scene(),
            Scenario::Inside | Scenario::Outside => {
                FloorplanRoom::new(Floorplan::rectangle(4.0, 4.0), 0.0)
            }
        }
    }

    /// Device state `t` seconds into the playthrough
    pub fn device_at(&self, t: f32) -> SimDevice {
        let mut device = SimDevice::default();
        let rest = device.right;

        if *self == Scenario::Outside && t < 2.0 {
            let walk_in = ((t - 1.0) / 1.0).clamp(0.0, 1.0);
            device.head.x = 2.5 * (1.0 - walk_in);
        }
        if (8.0..9.0).contains(&t) {
            device.head.x = 3.0;
        }

        device.right = match t {
            t if t < 1.5 => rest,
            t if t < 3.0 => lerp(rest, bait_position(), (t - 1.5) / 1.5),
            t if t < 3.5 => bait_position(),
            _ => rest,
        };

        device.using_hands = t >= 4.0;
        if (5.0..6.0).contains(&t) {
            device.right_curl = 1.0;
        }
        device.right_tracked = !(9.5..10.0).contains(&t);
        device
    }
}

fn lerp(a: Point3D, b: Point3D, t: f32) -> Point3D {
    let t = t.clamp(0.0, 1.0);
    a + (b - a) * t
}

/// Events observed through the controller's listeners
#[derive(Debug, Default)]
struct Tally {
    phases: Vec<ExperiencePhase>,
    fists: usize,
    modality_changes: usize,
}

/// A scripted playthrough stepped at a fixed rate
pub struct Simulation {
    scenario: Scenario,
    controller: ChapterController,
    stage: Stage,
    tally: Rc<RefCell<Tally>>,
    tick: Duration,
    elapsed: Duration,
    ticks: u64,
    scene_notified: bool,
}

impl Simulation {
    pub fn new(
        config: ExperienceConfig,
        scenario: Scenario,
        tick: Duration,
    ) -> Result<Self, ConfigError> {
        let (collaborators, stage) = stage::build(scenario.room(), bait_position());
        let mut controller = ChapterController::new(config, Components::default(), collaborators)?;

        let tally = Rc::new(RefCell::new(Tally {
            phases: vec![controller.phase()],
            ..Default::default()
        }));
        let sink = Rc::clone(&tally);
        controller.on_phase_change(move |change| sink.borrow_mut().phases.push(change.to));
        let sink = Rc::clone(&tally);
        controller.on_gesture(move |event| {
            if *event == GestureEvent::Closed {
                sink.borrow_mut().fists += 1;
            }
        });
        let sink = Rc::clone(&tally);
        controller.on_modality_change(move |_| sink.borrow_mut().modality_changes += 1);

        controller.start();
        Ok(Self {
            scenario,
            controller,
            stage,
            tally,
            tick,
            elapsed: Duration::ZERO,
            ticks: 0,
            scene_notified: false,
        })
    }

    pub fn step(&mut self) {
        let t = self.elapsed.as_secs_f32();
        if !self.scene_notified && t >= SCENE_LOAD_AT {
            self.scene_notified = true;
            self.controller.notify_scene_loaded();
        }
        let frame = self.scenario.device_at(t).frame();
        self.controller.tick(self.tick, &frame);
        self.elapsed += self.tick;
        self.ticks += 1;
    }

    pub fn controller(&self) -> &ChapterController {
        &self.controller
    }

    pub fn summary(&self) -> Summary {
        let tally = self.tally.borrow();
        let stage = self.stage.borrow();
        Summary {
            scenario: self.scenario,
            ticks: self.ticks,
            elapsed: self.elapsed,
            phases: tally.phases.clone(),
            fists: tally.fists,
            modality_changes: tally.modality_changes,
            messages: stage.message_log.clone(),
            secondary_tool_unlocked: stage.secondary_tool_unlocked,
            halted: self.controller.is_halted(),
        }
    }
}

/// Outcome of a scripted run
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub scenario: Scenario,
    pub ticks: u64,
    pub elapsed: Duration,
    pub phases: Vec<ExperiencePhase>,
    pub fists: usize,
    pub modality_changes: usize,
    pub messages: Vec<MessageKind>,
    pub secondary_tool_unlocked: bool,
    pub halted: bool,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let phases: Vec<String> = self.phases.iter().map(|p| p.to_string()).collect();
        writeln!(
            f,
            "scenario {:?}: {} ticks ({:.2}s)",
            self.scenario,
            self.ticks,
            self.elapsed.as_secs_f32()
        )?;
        writeln!(f, "  phases:            {}", phases.join(" -> "))?;
        writeln!(f, "  fists closed:      {}", self.fists)?;
        writeln!(f, "  modality changes:  {}", self.modality_changes)?;
        writeln!(f, "  messages:          {:?}", self.messages)?;
        let unlocked = if self.secondary_tool_unlocked {
            "unlocked"
        } else {
            "locked"
        };
        writeln!(f, "  secondary tool:    {}", unlocked)?;
        write!(f, "  halted:            {}", self.halted)
    }
}

/// Step `simulation` on a real-time interval
pub async fn run(simulation: &mut Simulation, ticks: u64) {
    let mut interval = tokio::time::interval(simulation.tick);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    for _ in 0..ticks {
        interval.tick().await;
        simulation.step();
    }
    tracing::info!(
        "Scripted run finished in phase {}",
        simulation.controller().phase()
    );
}
