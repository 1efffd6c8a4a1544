//! Turns pointer drags on a face into a slice spin.
//!
//! A drag is interpreted one pointer event at a time. The world-space delta
//! between consecutive samples picks a [`SpinDirection`] relative to the grabbed
//! face; every event then nudges the spin angle by one degree in the sense that
//! direction implies. The three lookup tables below encode, per face, which
//! drag maps to which direction, which directions spin positively, and which
//! world axis each direction spins about.

use nalgebra::Point3;

use crate::cube::{Axis, Face};

/// Angle added or removed per drag event, in degrees
const SPIN_STEP: f32 = 1.0;

/// Discretized drag direction relative to the grabbed face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum SpinDirection {
    Up,
    Down,
    Left,
    Right,
}

impl SpinDirection {
    #[cfg(test)]
    pub(crate) const ALL: [SpinDirection; 4] = [
        SpinDirection::Up,
        SpinDirection::Down,
        SpinDirection::Left,
        SpinDirection::Right,
    ];

    pub(crate) fn opposite(self) -> Self {
        match self {
            SpinDirection::Up => SpinDirection::Down,
            SpinDirection::Down => SpinDirection::Up,
            SpinDirection::Left => SpinDirection::Right,
            SpinDirection::Right => SpinDirection::Left,
        }
    }

    pub(crate) fn is_horizontal(self) -> bool {
        matches!(self, SpinDirection::Left | SpinDirection::Right)
    }
}

/// Maps the sign of a drag along one world axis to a spin direction.
#[derive(Clone, Copy, Debug)]
struct DragRule {
    along: Axis,
    negative: SpinDirection,
    positive: SpinDirection,
}

const fn rule(along: Axis, negative: SpinDirection, positive: SpinDirection) -> DragRule {
    DragRule {
        along,
        negative,
        positive,
    }
}

/// Per face: the rule used when the drag is dominated by the first axis, and the
/// rule used otherwise.
fn drag_rules(face: Face) -> (DragRule, DragRule) {
    use SpinDirection::*;

    match face {
        Face::Back => (rule(Axis::X, Right, Left), rule(Axis::Y, Down, Up)),
        Face::Front => (rule(Axis::X, Left, Right), rule(Axis::Y, Down, Up)),
        Face::Right => (rule(Axis::Y, Down, Up), rule(Axis::Z, Right, Left)),
        Face::Left => (rule(Axis::Y, Down, Up), rule(Axis::Z, Left, Right)),
        Face::Bottom => (rule(Axis::X, Left, Right), rule(Axis::Z, Down, Up)),
        Face::Top => (rule(Axis::X, Left, Right), rule(Axis::Z, Up, Down)),
    }
}

/// Whether spinning `direction` on `face` increases the slice angle.
fn spins_positive(face: Face, direction: SpinDirection) -> bool {
    use SpinDirection::*;

    match face {
        Face::Back | Face::Right => matches!(direction, Right | Up),
        Face::Front | Face::Left | Face::Bottom => matches!(direction, Right | Down),
        Face::Top => matches!(direction, Left | Down),
    }
}

/// World axis the slice spins about for a drag in `direction` on `face`.
pub(crate) fn spin_axis(face: Face, direction: SpinDirection) -> Axis {
    match (face, direction.is_horizontal()) {
        (Face::Back | Face::Front, true) => Axis::Y,
        (Face::Back | Face::Front, false) => Axis::X,
        (Face::Right | Face::Left, true) => Axis::Y,
        (Face::Right | Face::Left, false) => Axis::Z,
        (Face::Bottom | Face::Top, true) => Axis::Z,
        (Face::Bottom | Face::Top, false) => Axis::X,
    }
}

/// Direction implied by the drag from `from` to `to` on `face`.
fn drag_direction(face: Face, from: Point3<f32>, to: Point3<f32>) -> SpinDirection {
    let delta = to - from;
    let (primary, secondary) = drag_rules(face);
    let rule = if delta[primary.along.index()].abs() > delta[secondary.along.index()].abs() {
        primary
    } else {
        secondary
    };
    if delta[rule.along.index()] < 0.0 {
        rule.negative
    } else {
        rule.positive
    }
}

/// Running state of one slice drag.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct SliceGesture {
    /// Face grabbed at pointer-down, if the click landed clearly on one
    pub(crate) face: Option<Face>,
    /// Undetermined until the first drag event on a known face
    pub(crate) direction: Option<SpinDirection>,
    /// Accumulated spin in degrees, within [0, 360)
    pub(crate) angle: f32,
}

impl SliceGesture {
    pub(crate) fn new(face: Option<Face>) -> Self {
        Self {
            face,
            direction: None,
            angle: 0.0,
        }
    }

    /// Rotation axis once the drag direction is known.
    pub(crate) fn axis(&self) -> Option<Axis> {
        Some(spin_axis(self.face?, self.direction?))
    }

    /// Processes one drag event moving from `from` to `to`.
    ///
    /// Once a direction is set, it may only flip to its opposite so the slice
    /// never changes its rotation axis mid-drag.
    pub(crate) fn advance(&mut self, from: Point3<f32>, to: Point3<f32>) {
        let Some(face) = self.face else {
            return;
        };

        let candidate = drag_direction(face, from, to);
        match self.direction {
            None => self.direction = Some(candidate),
            Some(current) if current.opposite() == candidate => self.direction = Some(candidate),
            Some(_) => {}
        }

        if let Some(direction) = self.direction {
            let step = if spins_positive(face, direction) {
                SPIN_STEP
            } else {
                -SPIN_STEP
            };
            self.angle = (self.angle + step).rem_euclid(360.0);
            log::trace!(
                "slice drag on {face:?}: {direction:?}, angle {:.0}",
                self.angle
            );
        }
    }
}
