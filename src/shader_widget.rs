//! Custom shader widget for cube rendering.
//!
//! The widget is a thin view over [`CubeSession`]: it draws the instances the
//! session produced for this frame, and turns raw mouse events into pointer
//! messages carrying the cube-space point under the cursor.

use iced::widget::shader::{self, wgpu};
use iced::{Point, Rectangle, event, mouse};
use nalgebra::{Point2, Point3};

use crate::Message;
use crate::camera::{Camera, Projection, ViewRotation};
use crate::input::PointerButton;
use crate::math::InstanceBuilder;
use crate::ray_casting::Unprojector;
use crate::renderer::{InstanceRaw, Renderer};
use crate::session::CubeSession;

/// Custom primitive carrying one frame of cube instances
#[derive(Debug, Clone)]
pub(crate) struct CubePrimitive {
    pub(crate) instances: Vec<InstanceRaw>,
    pub(crate) camera: Camera,
    pub(crate) projection: Projection,
}

impl shader::Primitive for CubePrimitive {
    fn prepare(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        format: wgpu::TextureFormat,
        storage: &mut shader::Storage,
        bounds: &Rectangle,
        viewport: &shader::Viewport,
    ) {
        let physical_bounds = *bounds * viewport.scale_factor() as f32;
        if !storage.has::<Renderer>() {
            let renderer = pollster::block_on(Renderer::new(
                device,
                format,
                physical_bounds,
                viewport.physical_size(),
            ));
            storage.store(renderer);
        }
        let Some(renderer) = storage.get_mut::<Renderer>() else {
            return;
        };
        renderer.resize(device, physical_bounds, viewport.physical_size());
        renderer.update_instances(queue, &self.instances);
        renderer.update_camera(queue, &self.camera, &self.projection);
    }

    fn render(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        storage: &shader::Storage,
        target: &wgpu::TextureView,
        _clip_bounds: &Rectangle<u32>,
    ) {
        if let Some(renderer) = storage.get::<Renderer>() {
            renderer.render(encoder, target);
        }
    }
}

/// Internal state managed by the shader widget
#[derive(Debug, Default)]
pub(crate) struct CubeShaderState {
    /// Whether the primary button went down inside the widget and is still held
    primary_pressed: bool,
}

/// The shader program for one frame of the cube
pub(crate) struct CubeShaderProgram {
    instances: Vec<InstanceRaw>,
    view: ViewRotation,
    camera: Camera,
    projection: Projection,
}

impl CubeShaderProgram {
    /// Snapshots what the session wants drawn this frame.
    pub(crate) fn new(session: &CubeSession) -> Self {
        let mut builder = InstanceBuilder::new(session.view());
        session.render(&mut builder);
        Self {
            instances: builder.instances,
            view: *session.view(),
            camera: Camera::default(),
            projection: Projection::default(),
        }
    }

    /// Widget-space and cube-space positions of the pointer at `position`.
    fn pointer(&self, bounds: Rectangle, position: Point) -> Option<(Point2<f32>, Point3<f32>)> {
        let unprojector = Unprojector::new(bounds, &self.camera, &self.projection, &self.view)?;
        let screen = Point2::new(position.x, position.y);
        Some((screen, unprojector.unproject(position)))
    }
}

impl shader::Program<Message> for CubeShaderProgram {
    type State = CubeShaderState;
    type Primitive = CubePrimitive;

    fn update(
        &self,
        state: &mut Self::State,
        event: shader::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
        _shell: &mut iced::advanced::Shell<'_, Message>,
    ) -> (event::Status, Option<Message>) {
        match event {
            shader::Event::Mouse(mouse_event) => {
                self.handle_mouse_event(state, mouse_event, bounds, cursor)
            }
            _ => (event::Status::Ignored, None),
        }
    }

    fn draw(
        &self,
        _state: &Self::State,
        _cursor: mouse::Cursor,
        _bounds: Rectangle,
    ) -> Self::Primitive {
        CubePrimitive {
            instances: self.instances.clone(),
            camera: self.camera,
            projection: self.projection,
        }
    }

    fn mouse_interaction(
        &self,
        state: &Self::State,
        _bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if state.primary_pressed {
            mouse::Interaction::Grabbing
        } else {
            mouse::Interaction::default()
        }
    }
}

impl CubeShaderProgram {
    /// Translates mouse events into pointer messages for the session
    fn handle_mouse_event(
        &self,
        state: &mut CubeShaderState,
        mouse_event: mouse::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> (event::Status, Option<Message>) {
        match mouse_event {
            mouse::Event::ButtonPressed(button) => {
                let Some(position) = cursor.position_in(bounds) else {
                    return (event::Status::Ignored, None);
                };
                let button = PointerButton::from(button);
                if button == PointerButton::Primary {
                    state.primary_pressed = true;
                }
                let message = self
                    .pointer(bounds, position)
                    .map(|(screen, world)| Message::PointerDown { button, screen, world });
                (event::Status::Captured, message)
            }
            mouse::Event::CursorMoved { .. } if state.primary_pressed => {
                // Drags keep tracking after the cursor leaves the widget
                let Some(position) = cursor.position_from(bounds.position()) else {
                    return (event::Status::Ignored, None);
                };
                let message = self
                    .pointer(bounds, position)
                    .map(|(screen, world)| Message::PointerDrag { screen, world });
                (event::Status::Captured, message)
            }
            mouse::Event::ButtonReleased(mouse::Button::Left) if state.primary_pressed => {
                state.primary_pressed = false;
                (
                    event::Status::Captured,
                    Some(Message::PointerUp(PointerButton::Primary)),
                )
            }
            _ => (event::Status::Ignored, None),
        }
    }
}
