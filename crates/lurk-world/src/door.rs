//! Door rotation tween and obstacle-carve toggling.

use log::debug;

use lurk_core::{lerp_angle, CarveId, Vec3};

/// A carve toggle the host must apply to the walkable surface.
///
/// Emitted when a door's tween completes: a closed door blocks its doorway
/// region, an open door does not.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CarveCommand {
    pub carve:   CarveId,
    pub blocked: bool,
}

struct Tween {
    from_yaw: f32,
    to_yaw:   f32,
    t:        f32,
}

/// A swinging door.
///
/// Opening picks the swing side away from whoever opened it: the door's
/// `forward` axis dotted with the direction to the user decides whether the
/// rotation goes negative or positive.  Re-opening or re-closing mid-swing
/// retargets the running tween from the current yaw rather than snapping.
pub struct Door {
    position:            Vec3,
    forward:             Vec3,
    rest_yaw_deg:        f32,
    rotation_amount_deg: f32,
    speed:               f32,
    forward_threshold:   f32,
    carve:               CarveId,
    is_open:             bool,
    yaw_deg:             f32,
    anim:                Option<Tween>,
}

impl Door {
    /// A closed door at `position`, hinged to swing `rotation` degrees from
    /// `rest_yaw_deg`, carving `carve` while closed.
    ///
    /// `forward` is the axis used to pick the swing side; it does not need to
    /// match the door leaf's visual facing.
    pub fn new(position: Vec3, forward: Vec3, rest_yaw_deg: f32, carve: CarveId) -> Self {
        Self {
            position,
            forward: forward.normalize_or_zero(),
            rest_yaw_deg,
            rotation_amount_deg: 90.0,
            speed: 1.0,
            forward_threshold: 0.0,
            carve,
            is_open: false,
            yaw_deg: rest_yaw_deg,
            anim: None,
        }
    }

    /// Tween rate in full swings per second (default 1).
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    /// Swing magnitude in degrees (default 90).
    pub fn with_rotation_amount(mut self, degrees: f32) -> Self {
        self.rotation_amount_deg = degrees;
        self
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn yaw_deg(&self) -> f32 {
        self.yaw_deg
    }

    pub fn is_animating(&self) -> bool {
        self.anim.is_some()
    }

    pub fn carve(&self) -> CarveId {
        self.carve
    }

    /// The carve state the host should apply when placing the door, before
    /// any tween has run: blocked iff closed.
    pub fn initial_carve_blocked(&self) -> bool {
        !self.is_open
    }

    /// Start opening, swinging away from the user at `user_pos`.
    /// No-op if already open.
    pub fn open(&mut self, user_pos: Vec3) {
        if self.is_open {
            return;
        }
        self.is_open = true;

        let to_user = (user_pos - self.position).normalize_or_zero();
        let dot = self.forward.dot(to_user);
        let target = if dot >= self.forward_threshold {
            self.rest_yaw_deg - self.rotation_amount_deg
        } else {
            self.rest_yaw_deg + self.rotation_amount_deg
        };
        debug!("door opening toward {target}° (dot = {dot:.2})");
        self.start_tween(target);
    }

    /// Start closing back to the rest yaw.  No-op if already closed.
    pub fn close(&mut self) {
        if !self.is_open {
            return;
        }
        self.is_open = false;
        debug!("door closing to {}°", self.rest_yaw_deg);
        self.start_tween(self.rest_yaw_deg);
    }

    fn start_tween(&mut self, to_yaw: f32) {
        // Retarget from the current yaw; an interrupted swing never snaps.
        self.anim = Some(Tween {
            from_yaw: self.yaw_deg,
            to_yaw,
            t: 0.0,
        });
    }

    /// Advance the tween.  Returns the carve toggle to apply when the swing
    /// completes this frame, `None` otherwise.
    pub fn advance(&mut self, dt_secs: f32) -> Option<CarveCommand> {
        let anim = self.anim.as_mut()?;
        anim.t += dt_secs * self.speed;
        self.yaw_deg = lerp_angle(anim.from_yaw, anim.to_yaw, anim.t);

        if anim.t < 1.0 {
            return None;
        }
        self.anim = None;
        Some(CarveCommand {
            carve:   self.carve,
            blocked: !self.is_open,
        })
    }
}
