pub mod ethereum;

pub use ethereum::VistaClient;
