// Domain layer: the adapter contract. Value types, BOSH wire types and the
// two capability traits adapters implement.

pub mod bosh;
pub mod model;
pub mod ports;
