pub mod auth;
pub mod company;
pub mod conversation;
pub mod delivery;
pub mod functions;
pub mod menu;
pub mod orders;
pub mod payment;
