pub mod bezier;
pub mod color_utils;
pub mod driver;
pub mod error;
pub mod math_utils;
pub mod models;
pub mod point;
pub mod renderer;
pub mod renderer_skia;
pub mod session;
pub mod spring;
pub mod target;
pub mod utils;

pub use bezier::{ControlPolygon, TangentMark};
pub use driver::{FrameDriver, FrameObserver, TraceEntry, TraceRecorder};
pub use error::SimError;
pub use models::{RateSample, RenderStyle, SimConfig, TouchEvent};
pub use point::Point2;
pub use renderer::generate_svg;
pub use renderer_skia::render_to_png;
pub use session::{Input, InputSender, RenderFrame, Session};
pub use spring::{SpringParams, SpringState};
pub use target::MotionMode;
