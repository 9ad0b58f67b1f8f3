use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Local transform channels a writer may touch.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct TransformChannels: u8 {
        const POSITION = 1 << 0;
        const ROTATION = 1 << 1;
        const SCALE    = 1 << 2;
    }
}

/// Target property of a baked clip track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetPath {
    Translation, // Maps to transform.position
    Rotation,    // Maps to transform.rotation
    Scale,       // Maps to transform.scale
    Weights,     // Morph target weights, never a joint transform
}

impl TargetPath {
    /// Transform channels written when this track plays.
    #[must_use]
    pub fn channels(self) -> TransformChannels {
        match self {
            TargetPath::Translation => TransformChannels::POSITION,
            TargetPath::Rotation => TransformChannels::ROTATION,
            TargetPath::Scale => TransformChannels::SCALE,
            TargetPath::Weights => TransformChannels::empty(),
        }
    }
}

/// Track descriptor: which node property a baked track drives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackMeta {
    pub node_name: String,
    pub target: TargetPath,
}

/// Descriptor of a keyframed clip baked into the model asset.
///
/// Keyframe data and playback stay with the engine's mixer; the rig only
/// needs to know the clip exists and which joints it drives, so procedural
/// registrations can stay out of its way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationClip {
    pub name: String,
    #[serde(default)]
    pub duration: f32,
    #[serde(default)]
    pub tracks: Vec<TrackMeta>,
}

impl AnimationClip {
    #[must_use]
    pub fn new(name: &str, duration: f32, tracks: Vec<TrackMeta>) -> Self {
        Self {
            name: name.to_string(),
            duration,
            tracks,
        }
    }

    /// First track that writes any of `channels` on `node_name`.
    ///
    /// Track names are compared case-insensitively, matching how bone names
    /// are keyed in the registry.
    #[must_use]
    pub fn conflicting_track(&self, node_name: &str, channels: TransformChannels) -> Option<&TrackMeta> {
        self.tracks.iter().find(|t| {
            t.node_name.eq_ignore_ascii_case(node_name) && t.target.channels().intersects(channels)
        })
    }
}
