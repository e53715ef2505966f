// Export route modules
pub mod aimodel;

use axum::Router;

// Function to configure all routes
pub fn configure(state: crate::state::AppState) -> Router {
    Router::new().merge(aimodel::routes(state))
}
