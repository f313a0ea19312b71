mod store;
mod validation;


pub use store::{
    FormError, FormOptions, FormResult, FormSnapshot, FormStateStore, ValidationMode,
};
pub use validation::ValidationTicket;
