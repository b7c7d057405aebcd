mod sp_graph;

pub use sp_graph::read_sp_graph;
pub use sp_graph::write_sp_graph;
pub use sp_graph::write_sp_graph_to;
pub use sp_graph::ReadSpGraphError;
pub use sp_graph::WriteSpGraphError;
