pub mod conversations;
pub mod cursor;
pub mod error;
pub mod extract;
pub mod messages;
pub mod pagination;
pub mod routes;
pub mod state;
pub mod users;

pub use error::{ApiError, ApiResult};
pub use routes::router;
pub use state::{AppState, AppStateInner, init_store};
