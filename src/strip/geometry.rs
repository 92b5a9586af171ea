//! Layout-direction-aware coordinate helpers.
//!
//! The strip works in a "logical" coordinate convention: scroll offsets and
//! ordering always run start-to-end regardless of UI directionality. Every
//! RTL sign flip in the crate goes through this module.

/// Flips `value` when `condition` holds.
pub fn flip_sign_if(value: f32, condition: bool) -> f32 {
    if condition { -value } else { value }
}

/// Converts a visual (screen-space) x delta to a logical delta.
pub fn to_logical_delta(delta: f32, rtl: bool) -> f32 {
    flip_sign_if(delta, rtl)
}

/// Converts a logical delta back to a visual x delta.
pub fn from_logical_delta(delta: f32, rtl: bool) -> f32 {
    flip_sign_if(delta, rtl)
}

/// Whether a drag offset (visual space) points toward the end of the strip.
pub fn is_offset_toward_end(offset: f32, rtl: bool) -> bool {
    (offset >= 0.0) != rtl
}
