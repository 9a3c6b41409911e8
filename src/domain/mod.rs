// Domain layer: cart models and the ports the cart manager talks through.

pub mod model;
pub mod ports;
