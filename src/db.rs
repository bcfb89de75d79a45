pub mod user_repo;
pub use user_repo::UserRepository;
pub mod company_repo;
pub use company_repo::CompanyRepository;
pub mod delivery_repo;
pub use delivery_repo::DeliveryRepository;
pub mod payment_repo;
pub use payment_repo::PaymentRepository;
pub mod conversation_repo;
pub use conversation_repo::ConversationRepository;
pub mod menu_repo;
pub use menu_repo::MenuRepository;
pub mod order_repo;
pub use order_repo::OrderRepository;
