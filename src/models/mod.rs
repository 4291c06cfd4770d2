mod survey;

pub use survey::{DeliveryResult, DeliveryStatus, TriggerRequest};
