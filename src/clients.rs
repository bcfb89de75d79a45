pub mod google_maps;
pub mod megaapi;
pub mod openai;

pub use google_maps::GoogleMapsClient;
pub use megaapi::MegaApiClient;
pub use openai::OpenAiClient;
