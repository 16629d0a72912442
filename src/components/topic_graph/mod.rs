mod classify;
mod component;
mod layout;
mod levels;
mod render;
mod state;
mod types;
mod visibility;

pub use component::TopicGraphCanvas;
pub use state::Action;
pub use types::{Category, Edge, GraphData, Node};
