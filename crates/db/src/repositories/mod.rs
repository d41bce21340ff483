pub mod group_repo;

pub use group_repo::GroupRepo;
