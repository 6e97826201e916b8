mod app;
mod commands;
mod effects;
mod render;

pub use app::run;
pub use effects::EffectRunner;
