mod extract;
mod state;

pub use extract::{present, required, CompanyKeyQuery, JsonBody, ResourceId};
pub use state::AppState;
