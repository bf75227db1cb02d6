mod component;
mod frame_loop;
mod graph;
mod render;
mod simulation;
mod state;

pub use component::NetworkGraph;
pub use graph::{Graph, GraphEdge, GraphNode};
pub use simulation::SimulationParameters;
