//! Single eyeball state machine

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

// External
use log::trace;

// Internal
use super::EyeConfig;
use crate::motion::{dir_toward, reached, Side, StepState};
use crate::servo_ctrl::{ServoCtrl, ServoFamily};

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Limits the stepping primitives can travel toward.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum EyeStepTarget {
    Up,
    Down,
    Left,
    Right,
}

/// Phases of the eye roll, in the order they are visited.
///
/// The roll traces a semicircle: out to the left limit, curving up through
/// the top, curving down to the right limit, then back to neutral.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum RollPhase {
    /// Neutral out to the left limit.
    ToLeft,

    /// Left limit curving up to the top.
    LeftToTop,

    /// Top curving down to the right limit.
    TopToRight,

    /// Right limit back to neutral.
    ToNeutral,
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// One eyeball: a vertical and a horizontal servo.
pub struct Eye {
    side: Side,

    cfg: EyeConfig,
    family: ServoFamily,

    /// Stepping command, shared between the vertical and horizontal
    /// primitives. A stepping sequence on one axis must complete before a
    /// sequence on the other begins.
    cmd_deg: f64,
    step: StepState<EyeStepTarget>,

    /// Roll commands, one per axis since the roll interleaves both.
    cmd_vert_deg: f64,
    cmd_hor_deg: f64,
    roll: StepState<RollPhase>,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Eye {
    pub fn new(side: Side, cfg: EyeConfig, family: ServoFamily) -> Self {
        Self {
            side,
            cfg,
            family,
            cmd_deg: cfg.down_vert_deg,
            step: StepState::Uninitialised,
            cmd_vert_deg: cfg.neutral_vert_deg,
            cmd_hor_deg: cfg.neutral_hor_deg,
            roll: StepState::Uninitialised,
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    /// The eye's calibration table.
    pub fn config(&self) -> &EyeConfig {
        &self.cfg
    }

    /// Overwrite the stepping command, used by the coordinator to seed a
    /// stepping cycle at a known limit.
    pub fn set_cmd(&mut self, cmd_deg: f64) {
        self.cmd_deg = cmd_deg;
    }

    // ---- DIRECT SETPOINT MOVES ----

    /// Move the vertical servo to the given angle.
    pub fn move_vert_to(&mut self, deg: f64, servo: &mut ServoCtrl) {
        servo.drive(self.cfg.vert_channel, deg, self.family);
    }

    /// Move the horizontal servo to the given angle.
    pub fn move_hor_to(&mut self, deg: f64, servo: &mut ServoCtrl) {
        servo.drive(self.cfg.hor_channel, deg, self.family);
    }

    /// Move both servos.
    pub fn move_to(&mut self, vert_deg: f64, hor_deg: f64, servo: &mut ServoCtrl) {
        self.move_vert_to(vert_deg, servo);
        self.move_hor_to(hor_deg, servo);
    }

    /// Look straight ahead.
    pub fn neutral(&mut self, servo: &mut ServoCtrl) {
        let (v, h) = (self.cfg.neutral_vert_deg, self.cfg.neutral_hor_deg);
        self.move_to(v, h, servo);
    }

    /// Look up.
    pub fn up(&mut self, servo: &mut ServoCtrl) {
        let v = self.cfg.up_vert_deg;
        self.move_vert_to(v, servo);
    }

    /// Look down.
    pub fn down(&mut self, servo: &mut ServoCtrl) {
        let v = self.cfg.down_vert_deg;
        self.move_vert_to(v, servo);
    }

    /// Look left.
    pub fn left(&mut self, servo: &mut ServoCtrl) {
        let h = self.cfg.left_hor_deg;
        self.move_hor_to(h, servo);
    }

    /// Look right.
    pub fn right(&mut self, servo: &mut ServoCtrl) {
        let h = self.cfg.right_hor_deg;
        self.move_hor_to(h, servo);
    }

    // ---- STEPPING PRIMITIVES ----

    /// Step toward the upper vertical limit. Returns true once the command
    /// has reached or passed it.
    pub fn step_up(
        &mut self,
        min_interval_ms: u64,
        incr_deg: f64,
        now_ms: u64,
        servo: &mut ServoCtrl,
    ) -> bool {
        self.step_toward(EyeStepTarget::Up, min_interval_ms, incr_deg, now_ms, servo)
    }

    /// Step toward the lower vertical limit.
    pub fn step_down(
        &mut self,
        min_interval_ms: u64,
        incr_deg: f64,
        now_ms: u64,
        servo: &mut ServoCtrl,
    ) -> bool {
        self.step_toward(EyeStepTarget::Down, min_interval_ms, incr_deg, now_ms, servo)
    }

    /// Step toward the left horizontal limit.
    pub fn step_left(
        &mut self,
        min_interval_ms: u64,
        incr_deg: f64,
        now_ms: u64,
        servo: &mut ServoCtrl,
    ) -> bool {
        self.step_toward(EyeStepTarget::Left, min_interval_ms, incr_deg, now_ms, servo)
    }

    /// Step toward the right horizontal limit.
    pub fn step_right(
        &mut self,
        min_interval_ms: u64,
        incr_deg: f64,
        now_ms: u64,
        servo: &mut ServoCtrl,
    ) -> bool {
        self.step_toward(EyeStepTarget::Right, min_interval_ms, incr_deg, now_ms, servo)
    }

    /// Core stepping primitive.
    ///
    /// The command is re-asserted every call even when no increment is due,
    /// so the servo position is refreshed every tick. The command advances
    /// by `incr_deg` toward the target limit whenever `min_interval_ms` has
    /// elapsed since the last increment, and the primitive reports true from
    /// the call on which the command reaches or passes the limit until a new
    /// sequence begins.
    fn step_toward(
        &mut self,
        target: EyeStepTarget,
        min_interval_ms: u64,
        incr_deg: f64,
        now_ms: u64,
        servo: &mut ServoCtrl,
    ) -> bool {
        match self.step {
            StepState::Uninitialised => {
                // A sequence is assumed to begin at the far end of travel
                self.cmd_deg = self.limit(target.opposite());
                self.step.retarget(target, now_ms);
            }
            StepState::SteppingToward { target: current, .. } if current != target => {
                debug_assert!(
                    self.arrived(current),
                    "eye stepping retargeted before the previous sequence arrived"
                );
                self.step.retarget(target, now_ms);
            }
            _ => (),
        }

        let cmd = self.cmd_deg;
        self.drive_axis(target, cmd, servo);

        if self.arrived(target) {
            return true;
        }

        if self.step.due(now_ms, min_interval_ms) {
            self.cmd_deg += self.dir(target) * incr_deg;
            self.step.mark(now_ms);
        }

        false
    }

    // ---- ROLL ----

    /// Advance the eye roll by one tick.
    ///
    /// The roll starts from neutral and visits its phases in fixed order.
    /// Within the curved phases both axes step toward their sub-targets and
    /// the phase only advances once both have arrived.
    pub fn roll(
        &mut self,
        min_interval_ms: u64,
        incr_deg: f64,
        now_ms: u64,
        servo: &mut ServoCtrl,
    ) {
        if let StepState::Uninitialised = self.roll {
            // The roll is assumed to begin with the eye at neutral
            self.cmd_vert_deg = self.cfg.neutral_vert_deg;
            self.cmd_hor_deg = self.cfg.neutral_hor_deg;
            self.roll.retarget(RollPhase::ToLeft, now_ms);
        }

        let (v, h) = (self.cmd_vert_deg, self.cmd_hor_deg);
        self.move_to(v, h, servo);

        if !self.roll.due(now_ms, min_interval_ms) {
            return;
        }

        let phase = match self.roll.target() {
            Some(p) => p,
            None => return,
        };

        trace!("{:?} eye roll phase: {:?}", self.side, phase);

        let vert_dir_up = dir_toward(self.cfg.down_vert_deg, self.cfg.up_vert_deg);

        let next = match phase {
            RollPhase::ToLeft => {
                if reached(self.cmd_hor_deg, self.cfg.left_hor_deg, -1.0) {
                    Some(RollPhase::LeftToTop)
                } else {
                    self.cmd_hor_deg -= incr_deg;
                    None
                }
            }
            RollPhase::LeftToTop => {
                let hor_set = reached(self.cmd_hor_deg, self.cfg.neutral_hor_deg, 1.0);
                let vert_set = reached(self.cmd_vert_deg, self.cfg.up_vert_deg, vert_dir_up);

                if hor_set && vert_set {
                    Some(RollPhase::TopToRight)
                } else {
                    if !hor_set {
                        self.cmd_hor_deg += incr_deg;
                    }
                    if !vert_set {
                        self.cmd_vert_deg += vert_dir_up * incr_deg;
                    }
                    None
                }
            }
            RollPhase::TopToRight => {
                let hor_set = reached(self.cmd_hor_deg, self.cfg.right_hor_deg, 1.0);
                let vert_set =
                    reached(self.cmd_vert_deg, self.cfg.neutral_vert_deg, -vert_dir_up);

                if hor_set && vert_set {
                    Some(RollPhase::ToNeutral)
                } else {
                    if !hor_set {
                        self.cmd_hor_deg += incr_deg;
                    }
                    if !vert_set {
                        self.cmd_vert_deg -= vert_dir_up * incr_deg;
                    }
                    None
                }
            }
            RollPhase::ToNeutral => {
                if reached(self.cmd_hor_deg, self.cfg.neutral_hor_deg, -1.0) {
                    Some(RollPhase::ToLeft)
                } else {
                    self.cmd_hor_deg -= incr_deg;
                    None
                }
            }
        };

        if let Some(next) = next {
            self.roll.retarget(next, now_ms);
        } else {
            self.roll.mark(now_ms);
        }
    }

    /// The roll phase currently in progress, if the roll has started.
    pub fn roll_phase(&self) -> Option<RollPhase> {
        self.roll.target()
    }

    // ---- PREDICATES ----

    /// True if the stepping command has reached or passed the given limit.
    fn arrived(&self, target: EyeStepTarget) -> bool {
        reached(self.cmd_deg, self.limit(target), self.dir(target))
    }

    /// Calibrated limit angle of a stepping target.
    fn limit(&self, target: EyeStepTarget) -> f64 {
        match target {
            EyeStepTarget::Up => self.cfg.up_vert_deg,
            EyeStepTarget::Down => self.cfg.down_vert_deg,
            EyeStepTarget::Left => self.cfg.left_hor_deg,
            EyeStepTarget::Right => self.cfg.right_hor_deg,
        }
    }

    /// Direction of travel toward a target, derived from the calibration
    /// table. The vertical directions are mirrored between sides, the
    /// horizontal ones are shared - both fall out of the table.
    fn dir(&self, target: EyeStepTarget) -> f64 {
        dir_toward(self.limit(target.opposite()), self.limit(target))
    }

    fn drive_axis(&mut self, target: EyeStepTarget, cmd_deg: f64, servo: &mut ServoCtrl) {
        match target {
            EyeStepTarget::Up | EyeStepTarget::Down => self.move_vert_to(cmd_deg, servo),
            EyeStepTarget::Left | EyeStepTarget::Right => self.move_hor_to(cmd_deg, servo),
        }
    }
}

impl EyeStepTarget {
    /// The limit a sequence toward this target is assumed to start from.
    pub fn opposite(self) -> EyeStepTarget {
        match self {
            EyeStepTarget::Up => EyeStepTarget::Down,
            EyeStepTarget::Down => EyeStepTarget::Up,
            EyeStepTarget::Left => EyeStepTarget::Right,
            EyeStepTarget::Right => EyeStepTarget::Left,
        }
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
