pub mod network;
pub mod selection;
