/// Terminal collaborators: text renderer and line input.

pub mod input;
pub mod renderer;
