pub mod assistant_service;
pub mod auth;
pub mod company_service;
pub mod conversation_logger;
pub mod delivery_service;
pub mod document_service;
pub mod menu_service;
pub mod order_service;
pub mod payment_service;
pub mod pix;
