pub mod auth;
pub mod companies;
pub mod conversations;
pub mod delivery;
pub mod functions;
pub mod menu;
pub mod orders;
pub mod payment;
pub mod public;
