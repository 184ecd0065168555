pub type NodeId = u32;
pub type EdgeId = u32;
pub type EdgeType = u32;
pub type Weight = f64;

/// distance of a pair that has not been computed (or cannot be reached)
pub const INFINITY: Weight = f64::INFINITY;

/// next hop of a pair that has not been computed (or cannot be reached)
pub const NO_NEXT_HOP: NodeId = NodeId::MAX;

pub type NodeIds = Vec<NodeId>;
pub type EdgeIds = Vec<EdgeId>;
pub type Weights = Vec<Weight>;
pub type Arclist = [(NodeId, EdgeId)];
