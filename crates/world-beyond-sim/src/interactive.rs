//! Keyboard-driven device simulator
//!
//! Controls:
//! - L: scene finished loading
//! - H: toggle hand tracking / controllers
//! - F: toggle a fist on the right hand
//! - T: toggle right hand tracking loss
//! - G: move the right input onto the bait, R: move it back
//! - Arrows or WASD: walk
//! - N: force the next phase
//! - Q, Esc or Ctrl-C: quit

use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    style::Print,
    terminal::{self, disable_raw_mode, enable_raw_mode, ClearType},
};
use world_beyond_xr::input::Handedness;
use world_beyond_xr::{ChapterController, Components, ExperienceConfig};

use crate::device::SimDevice;
use crate::scenario::{bait_position, Scenario};
use crate::stage::{self, StageState};

/// Distance covered per movement key press
const STEP: f32 = 0.25;

/// Controller-level requests raised by keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    SceneLoaded,
    NextPhase,
    Quit,
}

/// Maps keys onto simulated device state
#[derive(Debug, Default)]
pub struct Keyboard {
    device: SimDevice,
}

impl Keyboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn device(&self) -> &SimDevice {
        &self.device
    }

    /// Process a key press, returning an action for the controller if any
    pub fn process_key(&mut self, key: KeyEvent) -> Option<Action> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(Action::Quit);
        }

        let device = &mut self.device;
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Some(Action::Quit),
            KeyCode::Char('l') => return Some(Action::SceneLoaded),
            KeyCode::Char('n') => return Some(Action::NextPhase),
            KeyCode::Char('h') => device.using_hands = !device.using_hands,
            KeyCode::Char('f') => {
                device.right_curl = if device.right_curl > 0.5 { 0.0 } else { 1.0 };
            }
            KeyCode::Char('t') => device.right_tracked = !device.right_tracked,
            KeyCode::Char('g') => *device.input_mut(Handedness::Right) = bait_position(),
            KeyCode::Char('r') => {
                *device.input_mut(Handedness::Right) = SimDevice::default().right;
            }
            KeyCode::Up | KeyCode::Char('w') => device.head.z += STEP,
            KeyCode::Down | KeyCode::Char('s') => device.head.z -= STEP,
            KeyCode::Left | KeyCode::Char('a') => device.head.x -= STEP,
            KeyCode::Right | KeyCode::Char('d') => device.head.x += STEP,
            _ => {}
        }
        None
    }
}

/// Restores the terminal on any exit path
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), Print("\r\n"));
    }
}

fn flag(on: bool, label: &'static str) -> &'static str {
    if on {
        label
    } else {
        "-"
    }
}

fn status_line(controller: &ChapterController, stage: &StageState, keyboard: &Keyboard) -> String {
    let device = keyboard.device();
    let mut line = format!(
        "phase {:<22} input {:<16} fist {:.2} head ({:+.2}, {:+.2}) tool {}",
        controller.phase().to_string(),
        format!("{:?}", controller.active_input()),
        controller.fist_strength(),
        device.head.x,
        device.head.z,
        stage.tool_index,
    );
    if let Some(mesh) = stage.tool_mesh {
        line.push_str(&format!(" {:?}", mesh));
    }
    line.push_str(&format!(
        " [{} {} {} {} {} {}] tint {:.2} sat {:.2} flicker {:.2} buzz {:.1} msg {:?}{}",
        flag(stage.tool_visible, "tool"),
        flag(stage.tool_cone, "cone"),
        flag(stage.secondary_tool_unlocked, "wall"),
        flag(stage.walls_visible, "walls"),
        flag(stage.environment_visible, "env"),
        flag(stage.tutorial_visible, "panel"),
        stage.background_tint.a,
        stage.environment_saturation,
        stage.flicker_time,
        stage.vibration,
        stage.message,
        if controller.is_halted() { " [halted]" } else { "" },
    ));
    line
}

fn render(line: &str) -> io::Result<()> {
    let mut stdout = io::stdout();
    execute!(
        stdout,
        cursor::MoveToColumn(0),
        terminal::Clear(ClearType::CurrentLine),
        Print(line)
    )?;
    stdout.flush()
}

/// Run the keyboard simulator until the player quits
pub async fn run(config: ExperienceConfig, scenario: Scenario, tick: Duration) -> anyhow::Result<()> {
    let (collaborators, stage) = stage::build(scenario.room(), bait_position());
    let mut controller = ChapterController::new(config, Components::default(), collaborators)?;
    controller.start();
    let mut keyboard = Keyboard::new();

    println!("beyond-sim interactive: L load scene, H hands, F fist, T tracking, G grab, R release, WASD walk, N next phase, Q quit");
    enable_raw_mode()?;
    let _guard = TerminalGuard;

    let mut interval = tokio::time::interval(tick);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    loop {
        interval.tick().await;

        while event::poll(Duration::ZERO)? {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            match keyboard.process_key(key) {
                Some(Action::Quit) => return Ok(()),
                Some(Action::SceneLoaded) => controller.notify_scene_loaded(),
                Some(Action::NextPhase) => {
                    if let Some(next) = controller.phase().next() {
                        if let Err(err) = controller.force_phase(next) {
                            tracing::warn!("Cannot force {}: {}", next, err);
                        }
                    }
                }
                None => {}
            }
        }

        controller.tick(tick, &keyboard.device().frame());
        render(&status_line(&controller, &stage.borrow(), &keyboard))?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(keyboard: &mut Keyboard, code: KeyCode) -> Option<Action> {
        keyboard.process_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_keys_map_to_device_state() {
        let mut keyboard = Keyboard::new();
        assert_eq!(press(&mut keyboard, KeyCode::Char('h')), None);
        press(&mut keyboard, KeyCode::Char('f'));
        press(&mut keyboard, KeyCode::Char('g'));
        press(&mut keyboard, KeyCode::Right);

        let device = keyboard.device();
        assert!(device.using_hands);
        assert_eq!(device.right_curl, 1.0);
        assert_eq!(device.right, bait_position());
        assert_eq!(device.head.x, STEP);
    }

    #[test]
    fn test_controller_actions() {
        let mut keyboard = Keyboard::new();
        assert_eq!(press(&mut keyboard, KeyCode::Char('l')), Some(Action::SceneLoaded));
        assert_eq!(press(&mut keyboard, KeyCode::Char('n')), Some(Action::NextPhase));
        assert_eq!(press(&mut keyboard, KeyCode::Esc), Some(Action::Quit));
        assert_eq!(
            keyboard.process_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        );
    }

    #[test]
    fn test_key_release_ignored() {
        let mut keyboard = Keyboard::new();
        let mut release = KeyEvent::new(KeyCode::Char('h'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(keyboard.process_key(release), None);
        assert!(!keyboard.device().using_hands);
    }

    #[test]
    fn test_status_line_reports_phase() {
        let (collaborators, stage) = stage::build(Scenario::Inside.room(), bait_position());
        let config = ExperienceConfig::default();
        let controller =
            ChapterController::new(config, Components::default(), collaborators).unwrap();
        let line = status_line(&controller, &stage.borrow(), &Keyboard::new());
        assert!(line.starts_with("phase void"));
        assert!(line.contains("RightController"));
        assert!(line.contains("[- - - - - panel]"));
        assert!(!line.contains("[halted]"));
    }
}
