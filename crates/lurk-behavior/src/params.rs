//! Enemy tuning parameters.

use lurk_nav::CategoryMask;

use crate::{BehaviorError, BehaviorResult};

/// Immutable tuning snapshot for one enemy controller.
///
/// Values are read for the lifetime of the controller and never mutated.
/// Defaults mirror the shipped enemy tuning; [`validate`](Self::validate)
/// enforces the same ranges the level editor exposes.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TuningParameters {
    /// Dot-product threshold for the concealment facing test.  A boundary
    /// point is accepted when `normal · to_target < hide_sensitivity`;
    /// lower values demand boundaries that face further away from the
    /// target.  Range `[-1, 1]`.
    pub hide_sensitivity: f32,

    /// Obstacles closer than this to the target are rejected as hiding
    /// spots (strictly less than: an obstacle at exactly this distance
    /// survives).  Range `[1, 10]`.
    pub min_target_distance: f32,

    /// Obstacles with a smaller vertical extent are rejected (too low to
    /// hide behind).  Range `[0, 5]`.
    pub min_obstacle_height: f32,

    /// Period of the hide/chase re-evaluation cadence, in seconds.
    /// Range `[0.01, 1]`.
    pub update_cadence_secs: f32,

    /// Seconds spent in each hiding phase before moving on.  Range `[1, 300]`.
    pub max_hide_secs: f32,

    /// Seconds spent chasing before returning to cover.  Range `[1, 300]`.
    pub max_chase_secs: f32,

    /// Radius of the detection volume, shared by the proximity check and the
    /// concealment obstacle query.  Must be positive.
    pub detection_radius: f32,

    /// Obstacle categories considered usable cover.
    pub hidable_categories: CategoryMask,
}

impl Default for TuningParameters {
    fn default() -> Self {
        Self {
            hide_sensitivity:    0.0,
            min_target_distance: 5.0,
            min_obstacle_height: 1.25,
            update_cadence_secs: 0.25,
            max_hide_secs:       10.0,
            max_chase_secs:      10.0,
            detection_radius:    10.0,
            hidable_categories:  CategoryMask::bit(0),
        }
    }
}

impl TuningParameters {
    /// Check every field against its allowed range.
    pub fn validate(&self) -> BehaviorResult<()> {
        fn check(name: &str, value: f32, min: f32, max: f32) -> BehaviorResult<()> {
            if (min..=max).contains(&value) {
                Ok(())
            } else {
                Err(BehaviorError::Config(format!(
                    "{name} = {value} outside [{min}, {max}]"
                )))
            }
        }

        check("hide_sensitivity", self.hide_sensitivity, -1.0, 1.0)?;
        check("min_target_distance", self.min_target_distance, 1.0, 10.0)?;
        check("min_obstacle_height", self.min_obstacle_height, 0.0, 5.0)?;
        check("update_cadence_secs", self.update_cadence_secs, 0.01, 1.0)?;
        check("max_hide_secs", self.max_hide_secs, 1.0, 300.0)?;
        check("max_chase_secs", self.max_chase_secs, 1.0, 300.0)?;
        if self.detection_radius <= 0.0 {
            return Err(BehaviorError::Config(format!(
                "detection_radius = {} must be positive",
                self.detection_radius
            )));
        }
        Ok(())
    }
}
