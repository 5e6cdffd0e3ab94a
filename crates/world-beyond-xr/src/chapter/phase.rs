//! Experience phases

use std::fmt;

/// Narrative chapters, in the only order the experience moves through them
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum ExperiencePhase {
    /// Dark passthrough while the scene loads
    #[default]
    Void,
    /// The tool is waiting in the room for the player to grab it
    BaitPresented,
    /// The player holds the flashlight and searches the revealed room
    SearchingForSubject,
}

impl ExperiencePhase {
    pub const ALL: [ExperiencePhase; 3] = [
        ExperiencePhase::Void,
        ExperiencePhase::BaitPresented,
        ExperiencePhase::SearchingForSubject,
    ];

    /// Position in the experience, handed to the environment visuals
    pub fn index(&self) -> usize {
        match self {
            ExperiencePhase::Void => 0,
            ExperiencePhase::BaitPresented => 1,
            ExperiencePhase::SearchingForSubject => 2,
        }
    }

    /// Tool selection bound to this phase
    pub fn tool_index(&self) -> usize {
        match self {
            ExperiencePhase::Void => 0,
            ExperiencePhase::BaitPresented => 3,
            ExperiencePhase::SearchingForSubject => 4,
        }
    }

    /// Whether the room geometry exists and the player is held to it
    pub fn tracks_room(&self) -> bool {
        *self != ExperiencePhase::Void
    }

    /// Earlier phases keep the camera background dark
    pub fn uses_dark_camera(&self) -> bool {
        *self < ExperiencePhase::SearchingForSubject
    }

    pub fn shows_environment(&self) -> bool {
        *self == ExperiencePhase::SearchingForSubject
    }

    pub fn next(&self) -> Option<ExperiencePhase> {
        match self {
            ExperiencePhase::Void => Some(ExperiencePhase::BaitPresented),
            ExperiencePhase::BaitPresented => Some(ExperiencePhase::SearchingForSubject),
            ExperiencePhase::SearchingForSubject => None,
        }
    }
}

impl fmt::Display for ExperiencePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExperiencePhase::Void => "void",
            ExperiencePhase::BaitPresented => "bait-presented",
            ExperiencePhase::SearchingForSubject => "searching-for-subject",
        };
        f.write_str(name)
    }
}

/// Raised after a phase has been fully entered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseChange {
    pub from: ExperiencePhase,
    pub to: ExperiencePhase,
}
