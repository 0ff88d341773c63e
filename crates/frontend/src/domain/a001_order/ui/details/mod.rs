mod proof_of_delivery;
mod view;

pub use proof_of_delivery::ProofOfDeliveryViewer;
pub use view::OrderDetails;
