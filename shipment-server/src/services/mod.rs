//! Service layer
//!
//! Business rules live here; handlers stay thin and repositories stay dumb.
//!
//! - [`OrderService`] - order validation pipeline and status transitions
//! - [`AddressService`] - composite address+coordinate operations
//! - [`PackageTypeService`] - package type reads with the TTL cache
//! - [`UserService`] - accounts and credential checks

pub mod address;
pub mod order;
pub mod package_type;
pub mod user;

pub use address::AddressService;
pub use order::OrderService;
pub use package_type::PackageTypeService;
pub use user::UserService;
