//! Error Types
//!
//! This module defines the error types used throughout the crate.
//!
//! # Overview
//!
//! Almost nothing in the animation path is allowed to fail: lookup misses,
//! empty skeletons and unknown identifiers are absorbed and surfaced only as
//! diagnostics. [`RigError`] therefore covers the few calls that take
//! caller-supplied input which can be malformed:
//! - Regular-expression bone selection
//! - Rig asset and configuration parsing
//! - Exclusive registration against clip-animated joints
//!
//! # Usage
//!
//! Fallible APIs return [`Result<T>`] which is an alias for
//! `std::result::Result<T, RigError>`.
//!
//! ```rust,ignore
//! use avatar_rig::errors::Result;
//!
//! fn fingers(registry: &BoneRegistry) -> Result<usize> {
//!     Ok(registry.find_all_matching("finger|thumb")?.len())
//! }
//! ```

use thiserror::Error;

use crate::animation::TargetPath;

/// The main error type for the rig crate.
#[derive(Error, Debug)]
pub enum RigError {
    // ========================================================================
    // Lookup Errors
    // ========================================================================
    /// A bulk-selection pattern is not a valid regular expression.
    #[error("Invalid bone pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The pattern as supplied by the caller
        pattern: String,
        /// Underlying regex compilation error
        #[source]
        source: regex::Error,
    },

    // ========================================================================
    // Asset & Configuration Errors
    // ========================================================================
    /// JSON parsing error (rig assets, controller settings, matcher tables).
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// A rig asset refers to a node index that does not exist.
    #[error("Asset node index out of bounds: {context} (index: {index})")]
    AssetIndexOutOfBounds {
        /// Description of what was being resolved
        context: String,
        /// The invalid index
        index: usize,
    },

    /// A rig asset node hierarchy contains a cycle or a node with two parents.
    #[error("Invalid asset hierarchy: node {index} is reachable more than once")]
    InvalidHierarchy {
        /// Index of the node that was visited twice
        index: usize,
    },

    // ========================================================================
    // Registration Errors
    // ========================================================================
    /// An exclusive registration targets a joint already driven by a baked clip.
    #[error("Joint '{joint}' is animated by clip '{clip}' ({target:?}); registration '{id}' rejected")]
    ClipTargetConflict {
        /// Registration identifier
        id: String,
        /// Display name of the contested joint
        joint: String,
        /// Name of the clip that also animates it
        clip: String,
        /// Clip channel that overlaps
        target: TargetPath,
    },
}

/// Alias for `Result<T, RigError>`.
pub type Result<T> = std::result::Result<T, RigError>;
