pub mod consultant_handlers;
pub mod dashboard_handlers;
pub mod extraction_handlers;
pub mod payment_handlers;
pub mod system_handlers;

pub use consultant_handlers::*;
pub use dashboard_handlers::*;
pub use extraction_handlers::*;
pub use payment_handlers::*;
pub use system_handlers::*;
