//! Cube session: the owned state of one interactive cube.
//!
//! Collects the cube grid, the current pointer interaction, the demo toggle,
//! and the whole-cube view rotation into one context. The windowing layer
//! forwards pointer, menu and frame events here in delivery order.

use nalgebra::{Point2, Point3};
use rand::Rng;

use crate::camera::ViewRotation;
use crate::cube::{Axis, CubeGrid, GridIndex};
use crate::gesture::SliceGesture;
use crate::input::{MenuCommand, PointerButton};
use crate::picking::{locate, Pick};

/// Draws the cube for the current interaction state.
pub(crate) trait RenderAdapter {
    /// Draws all 27 sub-cubes at rest.
    fn draw_all(&mut self, grid: &CubeGrid);

    /// Draws every sub-cube outside the moving slice at rest, and the slice
    /// rotated by `angle` degrees about `axis`.
    fn draw_with_moving_slice(&mut self, grid: &CubeGrid, axis: Axis, slice: usize, angle: f32);
}

/// A slice drag in progress.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct SliceDrag {
    /// Sub-cube grabbed at pointer-down
    pub(crate) target: GridIndex,
    pub(crate) gesture: SliceGesture,
    /// Cube-space point of the previous pointer sample
    last_point: Point3<f32>,
}

impl SliceDrag {
    /// Axis and slice index of the moving slice, once the drag direction is known.
    pub(crate) fn moving_slice(&self) -> Option<(Axis, usize)> {
        let axis = self.gesture.axis()?;
        Some((axis, self.target[axis.index()]))
    }
}

/// What the primary pointer is currently doing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum InteractionMode {
    Idle,
    WholeCubeRotation { last_pointer: Point2<f32> },
    SliceRotation(SliceDrag),
}

/// Whether the application should keep running after a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Flow {
    Continue,
    Exit,
}

#[derive(Clone, Debug)]
pub(crate) struct CubeSession {
    grid: CubeGrid,
    mode: InteractionMode,
    demo: bool,
    view: ViewRotation,
}

impl CubeSession {
    pub(crate) fn new() -> Self {
        Self {
            grid: CubeGrid::new(),
            mode: InteractionMode::Idle,
            demo: false,
            view: ViewRotation::default(),
        }
    }

    #[cfg(test)]
    pub(crate) fn grid(&self) -> &CubeGrid {
        &self.grid
    }

    #[cfg(test)]
    pub(crate) fn mode(&self) -> &InteractionMode {
        &self.mode
    }

    pub(crate) fn is_demo(&self) -> bool {
        self.demo
    }

    pub(crate) fn view(&self) -> &ViewRotation {
        &self.view
    }

    /// Starts an interaction. `screen` is the pointer in widget pixels and
    /// `world` the cube-space point under it.
    pub(crate) fn pointer_down(
        &mut self,
        button: PointerButton,
        screen: Point2<f32>,
        world: Point3<f32>,
    ) {
        if button != PointerButton::Primary {
            return;
        }

        self.mode = match locate(&self.grid, world) {
            Pick::Hit { face, index } => {
                log::debug!("picked sub-cube {index:?} on face {face:?}");
                InteractionMode::SliceRotation(SliceDrag {
                    target: index,
                    gesture: SliceGesture::new(face),
                    last_point: world,
                })
            }
            Pick::Miss => {
                log::debug!("no sub-cube under pointer, rotating whole cube");
                InteractionMode::WholeCubeRotation {
                    last_pointer: screen,
                }
            }
        };
    }

    /// Handles one pointer-motion event while a button is held.
    ///
    /// Returns whether the view needs a repaint.
    pub(crate) fn pointer_drag(&mut self, screen: Point2<f32>, world: Point3<f32>) -> bool {
        match &mut self.mode {
            InteractionMode::Idle => false,
            InteractionMode::WholeCubeRotation { last_pointer } => {
                let delta = screen - *last_pointer;
                *last_pointer = screen;
                self.view.process_drag(delta.x, delta.y);
                true
            }
            InteractionMode::SliceRotation(drag) => {
                drag.gesture.advance(drag.last_point, world);
                drag.last_point = world;
                true
            }
        }
    }

    /// Ends the current interaction, committing a slice drag to the nearest
    /// quarter turn. Returns the number of quarter turns applied.
    pub(crate) fn pointer_up(&mut self, button: PointerButton) -> u8 {
        if button != PointerButton::Primary {
            return 0;
        }

        let mode = std::mem::replace(&mut self.mode, InteractionMode::Idle);
        let InteractionMode::SliceRotation(drag) = mode else {
            return 0;
        };
        let Some((axis, slice)) = drag.moving_slice() else {
            return 0;
        };

        let quarter_turns = self.grid.commit_turn(axis, slice, drag.gesture.angle);
        if quarter_turns > 0 {
            log::info!("turned {axis:?} slice {slice} by {quarter_turns} quarter turn(s)");
            if self.grid.is_solved() {
                log::info!("cube solved");
            }
        }
        quarter_turns
    }

    pub(crate) fn apply_menu(&mut self, command: MenuCommand, rng: &mut impl Rng) -> Flow {
        log::info!("menu command: {command}");
        match command {
            MenuCommand::Scramble => {
                let turns = self.grid.scramble(rng);
                log::debug!("scrambled with {turns:?}");
            }
            MenuCommand::Rotate => self.demo = true,
            MenuCommand::Stop => self.demo = false,
            MenuCommand::Reset => {
                self.demo = false;
                self.mode = InteractionMode::Idle;
                self.view = ViewRotation::default();
                self.grid.initialize();
            }
            MenuCommand::Quit => return Flow::Exit,
        }
        Flow::Continue
    }

    /// Advances the demo spin by one frame. Returns whether anything moved.
    pub(crate) fn tick(&mut self) -> bool {
        if self.demo {
            self.view.advance_demo();
        }
        self.demo
    }

    /// The moving slice and its angle, if one should be drawn rotated.
    ///
    /// Demo mode only changes what is drawn: drags keep running underneath
    /// and still commit on release.
    pub(crate) fn moving_slice(&self) -> Option<(Axis, usize, f32)> {
        match &self.mode {
            InteractionMode::SliceRotation(drag) if !self.demo => {
                let (axis, slice) = drag.moving_slice()?;
                Some((axis, slice, drag.gesture.angle))
            }
            _ => None,
        }
    }

    pub(crate) fn render(&self, adapter: &mut impl RenderAdapter) {
        match self.moving_slice() {
            Some((axis, slice, angle)) => {
                adapter.draw_with_moving_slice(&self.grid, axis, slice, angle)
            }
            None => adapter.draw_all(&self.grid),
        }
    }
}

impl Default for CubeSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::cube::Face;
    use crate::turn::Turn;

    #[derive(Debug, Default, PartialEq)]
    struct Recorder {
        calls: Vec<Option<(Axis, usize, f32)>>,
    }

    impl RenderAdapter for Recorder {
        fn draw_all(&mut self, _grid: &CubeGrid) {
            self.calls.push(None);
        }

        fn draw_with_moving_slice(
            &mut self,
            _grid: &CubeGrid,
            axis: Axis,
            slice: usize,
            angle: f32,
        ) {
            self.calls.push(Some((axis, slice, angle)));
        }
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(1)
    }

    /// Drags the grabbed front face to the right `steps` times.
    fn drag_front_right(session: &mut CubeSession, steps: usize) {
        let start = Point3::new(1.0, 1.0, 1.7);
        session.pointer_down(PointerButton::Primary, Point2::new(250.0, 200.0), start);
        for n in 1..=steps {
            let point = Point3::new(1.0 + 0.01 * n as f32, 1.0, 1.7);
            session.pointer_drag(Point2::new(250.0 + n as f32, 200.0), point);
        }
    }

    #[test]
    fn dragging_a_face_turns_its_slice() {
        let mut session = CubeSession::new();
        drag_front_right(&mut session, 80);

        let InteractionMode::SliceRotation(drag) = *session.mode() else {
            panic!("expected slice rotation, got {:?}", session.mode());
        };
        assert_eq!(drag.target, [2, 2, 2]);
        assert_eq!(drag.gesture.face, Some(Face::Front));
        assert_eq!(session.moving_slice(), Some((Axis::Y, 2, 80.0)));

        let mut recorder = Recorder::default();
        session.render(&mut recorder);
        assert_eq!(recorder.calls, vec![Some((Axis::Y, 2, 80.0))]);

        assert_eq!(session.pointer_up(PointerButton::Primary), 1);
        assert_eq!(*session.mode(), InteractionMode::Idle);

        let mut expected = CubeGrid::new();
        expected.apply(Turn {
            axis: Axis::Y,
            slice: 2,
            quarter_turns: 1,
        });
        assert_eq!(session.grid(), &expected);
    }

    #[test]
    fn short_drag_snaps_back() {
        let mut session = CubeSession::new();
        drag_front_right(&mut session, 30);
        assert_eq!(session.pointer_up(PointerButton::Primary), 0);
        assert!(session.grid().is_solved());
    }

    #[test]
    fn click_without_drag_commits_nothing() {
        let mut session = CubeSession::new();
        session.pointer_down(
            PointerButton::Primary,
            Point2::new(200.0, 200.0),
            Point3::new(0.0, 1.7, 0.0),
        );
        let mut recorder = Recorder::default();
        session.render(&mut recorder);
        assert_eq!(recorder.calls, vec![None]);
        assert_eq!(session.pointer_up(PointerButton::Primary), 0);
        assert!(session.grid().is_solved());
    }

    #[test]
    fn missing_the_cube_rotates_the_view() {
        let mut session = CubeSession::new();
        session.pointer_down(
            PointerButton::Primary,
            Point2::new(10.0, 10.0),
            Point3::new(-9.0, 4.0, -3.0),
        );
        assert!(matches!(
            session.mode(),
            InteractionMode::WholeCubeRotation { .. }
        ));
        assert!(session.pointer_drag(Point2::new(20.0, 12.0), Point3::origin()));
        assert_eq!(session.view().spin_y, 3.0);
        assert_eq!(session.pointer_up(PointerButton::Primary), 0);
        assert_eq!(*session.mode(), InteractionMode::Idle);
        assert!(!session.pointer_drag(Point2::new(30.0, 12.0), Point3::origin()));
    }

    #[test]
    fn secondary_button_is_ignored() {
        let mut session = CubeSession::new();
        session.pointer_down(
            PointerButton::Secondary,
            Point2::new(200.0, 200.0),
            Point3::new(0.0, 1.7, 0.0),
        );
        assert_eq!(*session.mode(), InteractionMode::Idle);
    }

    #[test]
    fn demo_mode_spins_the_view() {
        let mut session = CubeSession::new();
        assert!(!session.tick());
        assert_eq!(session.apply_menu(MenuCommand::Rotate, &mut rng()), Flow::Continue);
        assert!(session.tick());
        assert_eq!(*session.view(), ViewRotation { spin_x: 1.0, spin_y: 1.0 });

        session.apply_menu(MenuCommand::Stop, &mut rng());
        assert!(!session.is_demo());
        assert!(!session.tick());
        assert_eq!(*session.view(), ViewRotation { spin_x: 1.0, spin_y: 1.0 });
    }

    #[test]
    fn slice_drag_during_demo_still_commits() {
        let mut session = CubeSession::new();
        session.apply_menu(MenuCommand::Rotate, &mut rng());
        drag_front_right(&mut session, 80);

        assert!(matches!(session.mode(), InteractionMode::SliceRotation(_)));
        assert_eq!(session.moving_slice(), None);
        let mut recorder = Recorder::default();
        session.render(&mut recorder);
        assert_eq!(recorder.calls, vec![None]);

        assert_eq!(session.pointer_up(PointerButton::Primary), 1);
        let mut expected = CubeGrid::new();
        expected.apply(Turn {
            axis: Axis::Y,
            slice: 2,
            quarter_turns: 1,
        });
        assert_eq!(session.grid(), &expected);
        assert!(session.is_demo());
    }

    #[test]
    fn missing_the_cube_during_demo_rotates_the_view() {
        let mut session = CubeSession::new();
        session.apply_menu(MenuCommand::Rotate, &mut rng());
        session.pointer_down(
            PointerButton::Primary,
            Point2::new(10.0, 10.0),
            Point3::new(-9.0, 4.0, -3.0),
        );
        assert!(matches!(
            session.mode(),
            InteractionMode::WholeCubeRotation { .. }
        ));
        assert!(session.pointer_drag(Point2::new(20.0, 12.0), Point3::origin()));
        assert_eq!(session.view().spin_y, 3.0);
    }

    #[test]
    fn toggling_demo_keeps_a_drag_in_progress() {
        let mut session = CubeSession::new();
        drag_front_right(&mut session, 80);
        session.apply_menu(MenuCommand::Rotate, &mut rng());
        session.apply_menu(MenuCommand::Stop, &mut rng());
        assert_eq!(session.moving_slice(), Some((Axis::Y, 2, 80.0)));
    }

    #[test]
    fn reset_restores_solved_cube_and_view() {
        let mut session = CubeSession::new();
        session.apply_menu(MenuCommand::Scramble, &mut rng());
        session.apply_menu(MenuCommand::Rotate, &mut rng());
        session.tick();
        session.apply_menu(MenuCommand::Reset, &mut rng());

        assert!(session.grid().is_solved());
        assert!(!session.is_demo());
        assert_eq!(*session.view(), ViewRotation::default());
        assert_eq!(session.apply_menu(MenuCommand::Quit, &mut rng()), Flow::Exit);
    }
}
