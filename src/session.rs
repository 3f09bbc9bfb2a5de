use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Default session file, looked up relative to the working directory.
pub const DEFAULT_SESSION_PATH: &str = "session.json";

const VIDEO_EMBED_BASE: &str = "https://www.youtube.com/embed/";

/// Exercise identifiers are numbers in most session files but strings are accepted too.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExerciseId {
    Number(u64),
    Text(String),
}

impl fmt::Display for ExerciseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExerciseId::Number(n) => write!(f, "{n}"),
            ExerciseId::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: ExerciseId,
    pub name: String,
    #[serde(default)]
    pub specs: String,
    #[serde(default)]
    pub icon: String,
    /// Seconds. `None` (or zero) makes this a tap-to-complete exercise.
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub video: String,
}

impl Exercise {
    /// Countdown length for timed exercises.
    pub fn timed_duration(&self) -> Option<u32> {
        self.duration.filter(|d| *d > 0)
    }

    pub fn is_timed(&self) -> bool {
        self.timed_duration().is_some()
    }

    pub fn video_url(&self) -> Option<String> {
        if self.video.trim().is_empty() {
            None
        } else {
            Some(format!(
                "{VIDEO_EMBED_BASE}{}?rel=0&modestbranding=1",
                self.video.trim()
            ))
        }
    }
}

/// Immutable description of a training session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub body_areas: String,
    #[serde(default)]
    pub estimated_time: String,
    pub tours: u32,
    pub exercises: Vec<Exercise>,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not load \"{}\": {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not load \"{}\": {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not load \"{}\": {source}", .path.display())]
    Invalid {
        path: PathBuf,
        #[source]
        source: SessionError,
    },
}

/// A session that decodes but cannot be played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("\"tours\" must be at least 1")]
    NoTours,

    #[error("\"exercises\" must not be empty")]
    NoExercises,
}

impl Session {
    /// Reads and validates a session description from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let session = Self::from_json_slice(&bytes, path)?;
        info!(
            path = %path.display(),
            title = %session.title,
            exercises = session.exercises.len(),
            tours = session.tours,
            "session loaded"
        );
        Ok(session)
    }

    /// Parses a session from raw JSON; `origin` is only used in error messages.
    pub fn from_json_slice(bytes: &[u8], origin: &Path) -> Result<Self, LoadError> {
        let session: Session =
            serde_json::from_slice(bytes).map_err(|source| LoadError::Parse {
                path: origin.to_path_buf(),
                source,
            })?;
        session.validate().map_err(|source| LoadError::Invalid {
            path: origin.to_path_buf(),
            source,
        })?;
        Ok(session)
    }

    /// Checks that the session has at least one tour and one exercise.
    pub fn validate(&self) -> Result<(), SessionError> {
        if self.tours < 1 {
            return Err(SessionError::NoTours);
        }
        if self.exercises.is_empty() {
            return Err(SessionError::NoExercises);
        }
        Ok(())
    }

    pub fn exercise_count(&self) -> usize {
        self.exercises.len()
    }

    /// Number of completion keys in a fully completed workout.
    pub fn total_steps(&self) -> usize {
        self.exercises.len() * self.tours as usize
    }
}
