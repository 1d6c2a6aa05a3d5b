pub mod app;
pub mod clock;
pub mod entity;
pub mod math;
pub mod projection;
pub mod render;
pub mod render_target;
pub mod sim;
pub mod sprite;
pub mod stepper;

pub use app::{Engine, Options};
pub use stepper::SteppingMode;
