use std::str::FromStr;

use smallvec::SmallVec;

/// One discrete input event.  `None` means "use the configured default"
/// (move speed for translations, turn angle for rotations).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    MoveForward(Option<f32>),
    MoveBackward(Option<f32>),
    StrafeLeft(Option<f32>),
    StrafeRight(Option<f32>),
    PanLeft(Option<f32>),
    PanRight(Option<f32>),
    PitchUp(Option<f32>),
    PitchDown(Option<f32>),
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command `{0}`")]
    Unknown(String),

    #[error("bad amount in `{0}`")]
    BadAmount(String),
}

impl FromStr for Command {
    type Err = CommandError;

    /// Script form: a key letter (`w s a d q e r f`), optionally followed by
    /// `:amount`, e.g. `w`, `q:90`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, amount) = match s.split_once(':') {
            Some((k, a)) => {
                let v = a
                    .parse::<f32>()
                    .map_err(|_| CommandError::BadAmount(s.to_string()))?;
                (k, Some(v))
            }
            None => (s, None),
        };
        let cmd = match key.to_ascii_lowercase().as_str() {
            "w" => Command::MoveForward(amount),
            "s" => Command::MoveBackward(amount),
            "a" => Command::StrafeLeft(amount),
            "d" => Command::StrafeRight(amount),
            "q" => Command::PanLeft(amount),
            "e" => Command::PanRight(amount),
            "r" => Command::PitchUp(amount),
            "f" => Command::PitchDown(amount),
            _ => return Err(CommandError::Unknown(s.to_string())),
        };
        Ok(cmd)
    }
}

/// Turns raw pointer deltas into pan / pitch commands.
///
/// Screen X grows rightward and screen Y grows downward, so a positive
/// `dx` pans right and a positive `dy` pitches down.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MouseLook {
    /// Degrees per pixel.
    pub sensitivity: f32,
}

impl MouseLook {
    pub fn new(sensitivity: f32) -> Self {
        Self { sensitivity }
    }

    pub fn commands(&self, dx: f32, dy: f32) -> SmallVec<[Command; 2]> {
        let mut out = SmallVec::new();

        let yaw = dx * self.sensitivity;
        if yaw > 0.0 {
            out.push(Command::PanRight(Some(yaw)));
        } else if yaw < 0.0 {
            out.push(Command::PanLeft(Some(-yaw)));
        }

        let tilt = dy * self.sensitivity;
        if tilt > 0.0 {
            out.push(Command::PitchDown(Some(tilt)));
        } else if tilt < 0.0 {
            out.push(Command::PitchUp(Some(-tilt)));
        }

        out
    }
}
