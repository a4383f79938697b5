pub mod catalogue;
pub mod client;
pub mod directory;
pub mod filter;
pub mod normalize;
pub mod query;
pub mod specialty;
pub mod suggest;

pub use catalogue::{DirectoryCatalogue, LoadTicket};
pub use client::{load_doctors, DoctorFeedClient, DoctorSource};
pub use directory::DirectoryService;
