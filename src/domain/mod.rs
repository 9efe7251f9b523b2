// Domain layer: address models and the ports the checkout flow depends on.

pub mod model;
pub mod ports;
