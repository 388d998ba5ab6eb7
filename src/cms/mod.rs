pub mod client;
pub mod mutations;
pub mod queries;

pub use client::{CmsClient, QueryParams};
pub use mutations::{Mutation, Patch};
