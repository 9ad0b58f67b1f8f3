pub mod clip;
pub mod context;
pub mod controller;
pub mod function;
pub mod harness;
pub mod library;
pub mod pose;
pub mod settings;
pub mod smoothing;

pub use clip::{AnimationClip, TargetPath, TrackMeta, TransformChannels};
pub use context::{Amplitude, AnimationContext, Tempo};
pub use controller::{BoneAnimationController, ControllerSnapshot, Diagnostic, FrameReport, RegistrationSnapshot};
pub use function::{BoneAnimation, TargetSelector};
pub use harness::AnimationHarness;
pub use library::{Breathing, EmphasisNod, HeadSway, IdleSway, JawTalk};
pub use pose::{ArmsDownPose, BodyPose, RestPose, ThinkingPose, WavePose};
pub use settings::ControllerSettings;
pub use smoothing::Smoothing;
