pub mod identity;

pub use identity::{require_admin, require_staff, Identity, Role};
