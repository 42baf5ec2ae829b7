mod topology;

pub use topology::*;
