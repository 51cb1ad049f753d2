pub mod approval;
pub mod approval_gate;
pub mod capability;
pub mod editor;
pub mod model_gateway;
pub mod progress;
