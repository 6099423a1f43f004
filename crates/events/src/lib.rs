//! `omnistock-events`: event and tenant-scoping contracts shared by the
//! domain crates.

pub mod event;
pub mod tenant;

pub use event::Event;
pub use tenant::TenantScoped;
