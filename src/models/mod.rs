pub mod params;
pub mod session;
pub mod transaction;

pub use params::LaunchParams;
pub use session::{LaunchResult, LaunchSession, LaunchStatus, SessionStore, TxHashes};
pub use transaction::{FeeParams, GasEstimate, TransactionDescriptor};
