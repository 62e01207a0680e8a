pub mod directory;
pub mod payment;

pub use directory::UserDirectory;
pub use payment::{ChargeOutcome, MockGateway, PaymentGateway};
