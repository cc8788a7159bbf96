//! Class generation module

mod class_generator;
mod code_generator;
mod composite_key;
mod naming;
mod options;
mod renderer;
mod template;
mod type_map;

pub use class_generator::*;
pub use code_generator::*;
pub use composite_key::*;
pub use naming::*;
pub use options::*;
pub use renderer::*;
pub use template::*;
pub use type_map::*;
