// Domain layer: core models, the document tree and ports (interfaces).

pub mod document;
pub mod model;
pub mod ports;
