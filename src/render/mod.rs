pub mod interpolate;
pub mod renderer;

pub use renderer::Renderer;
