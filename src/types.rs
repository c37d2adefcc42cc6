use serde::{Deserialize, Serialize};

/// A scored region of the dartboard
///
/// The board reports a face value (`number`) and a ring multiplier
/// (1 = single, 2 = double, 3 = triple). Missing fields default to zero
/// so an incompletely recognized segment scores 0 instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub number: u32,

    #[serde(default)]
    pub multiplier: u32,
}

/// One thrown dart as reported by the board
///
/// A dart that missed the board (or was not recognized) has no segment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dart {
    #[serde(default)]
    pub segment: Option<Segment>,
}

impl Dart {
    /// Score of this dart: `number * multiplier`, 0 without a segment
    ///
    /// The board does not bound either field, so the product saturates
    /// instead of overflowing on absurd payloads.
    pub fn score(&self) -> u32 {
        match &self.segment {
            Some(segment) => segment.number.saturating_mul(segment.multiplier),
            None => 0,
        }
    }
}

/// Extract the current visit's darts from a raw `/api/state` payload
///
/// Returns `None` when the `throws` field is missing, not an array or
/// empty. All of these mean "no new information", not an error.
/// Unrecognizable elements count as segmentless zero-score darts, the same
/// way a dart that missed the board does.
pub fn parse_throws(state: &serde_json::Value) -> Option<Vec<Dart>> {
    let throws = state.get("throws")?.as_array()?;
    if throws.is_empty() {
        return None;
    }

    Some(
        throws
            .iter()
            .map(|value| serde_json::from_value(value.clone()).unwrap_or_default())
            .collect(),
    )
}

/// Camera parameters from the board's `/api/config` endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CameraInfo {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
}

impl Default for CameraInfo {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            fps: 20,
        }
    }
}

impl CameraInfo {
    /// Parse camera parameters from a raw config payload, falling back to
    /// the board manager's defaults for any missing field
    pub fn from_config(config: &serde_json::Value) -> Self {
        let defaults = Self::default();
        let cam = match config.get("cam") {
            Some(cam) => cam,
            None => return defaults,
        };

        Self {
            width: cam
                .get("width")
                .and_then(|v| v.as_u64())
                .map(|v| v as u32)
                .unwrap_or(defaults.width),
            height: cam
                .get("height")
                .and_then(|v| v.as_u64())
                .map(|v| v as u32)
                .unwrap_or(defaults.height),
            fps: cam
                .get("fps")
                .and_then(|v| v.as_u64())
                .map(|v| v as u32)
                .unwrap_or(defaults.fps),
        }
    }

    /// Serialize as the JSON string published for each camera slot
    pub fn to_state_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
