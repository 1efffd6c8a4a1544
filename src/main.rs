//! Interactive 3x3x3 Rubik's cube with iced UI.
//!
//! Slices are turned by dragging a face with the primary button; dragging
//! off the cube spins the whole cube. Uses iced for UI and wgpu for GPU
//! rendering.

use iced::keyboard::{self, key};
use iced::widget::{Column, Row, Shader, button, text};
use iced::{Element, Length, Settings, Subscription, Task};
use nalgebra::{Point2, Point3};

mod camera;
mod cube;
mod gesture;
mod input;
mod math;
mod picking;
mod ray_casting;
mod renderer;
mod session;
mod shader_widget;
mod turn;

use input::{MenuCommand, PointerButton};
use session::{CubeSession, Flow};
use shader_widget::CubeShaderProgram;

/// Side of the square cube viewport, in logical pixels
const VIEWPORT_SIZE: f32 = 400.0;
/// Height reserved for the menu row above the viewport
const MENU_HEIGHT: f32 = 36.0;
const WINDOW_SIZE: (f32, f32) = (VIEWPORT_SIZE, VIEWPORT_SIZE + MENU_HEIGHT);

/// Main application state
#[derive(Debug, Default)]
pub(crate) struct CubeApp {
    session: CubeSession,
}

/// Messages that the application can receive
#[derive(Debug, Clone)]
pub(crate) enum Message {
    PointerDown {
        button: PointerButton,
        screen: Point2<f32>,
        world: Point3<f32>,
    },
    PointerDrag {
        screen: Point2<f32>,
        world: Point3<f32>,
    },
    PointerUp(PointerButton),
    Menu(MenuCommand),
    /// One display frame elapsed while the demo spin is on
    Frame,
}

impl CubeApp {
    pub(crate) fn title(&self) -> &'static str {
        "Rubik's Cube"
    }

    pub(crate) fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PointerDown {
                button,
                screen,
                world,
            } => self.session.pointer_down(button, screen, world),
            Message::PointerDrag { screen, world } => {
                self.session.pointer_drag(screen, world);
            }
            Message::PointerUp(button) => {
                self.session.pointer_up(button);
            }
            Message::Menu(command) => {
                if self.session.apply_menu(command, &mut rand::thread_rng()) == Flow::Exit {
                    return iced::exit();
                }
            }
            Message::Frame => {
                self.session.tick();
            }
        }

        Task::none()
    }

    pub(crate) fn view(&self) -> Element<Message> {
        let menu = MenuCommand::ALL.iter().fold(
            Row::new().spacing(4).padding(4).height(MENU_HEIGHT),
            |row, &command| {
                row.push(
                    button(text(command.to_string()).size(12)).on_press(Message::Menu(command)),
                )
            },
        );

        let viewport = Shader::new(CubeShaderProgram::new(&self.session))
            .width(Length::Fixed(VIEWPORT_SIZE))
            .height(Length::Fixed(VIEWPORT_SIZE));

        Column::new().push(menu).push(viewport).into()
    }

    pub(crate) fn subscription(&self) -> Subscription<Message> {
        let quit = keyboard::on_key_press(|key, _modifiers| match key {
            keyboard::Key::Named(key::Named::Escape) => Some(Message::Menu(MenuCommand::Quit)),
            _ => None,
        });

        if self.session.is_demo() {
            Subscription::batch([quit, iced::window::frames().map(|_| Message::Frame)])
        } else {
            quit
        }
    }
}

fn main() -> iced::Result {
    env_logger::builder().format_timestamp(None).init();

    let app = CubeApp::default();
    iced::application(app.title(), CubeApp::update, CubeApp::view)
        .subscription(CubeApp::subscription)
        .window_size(WINDOW_SIZE)
        .settings(Settings {
            antialiasing: true,
            ..Settings::default()
        })
        .run_with(move || (app, Task::none()))
}
