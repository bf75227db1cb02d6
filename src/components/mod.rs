pub mod ascii_mountains;
pub mod directory;
pub mod hero;
pub mod network_graph;
pub mod photo_capture;
pub mod profile_card;
