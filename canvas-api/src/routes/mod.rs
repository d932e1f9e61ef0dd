pub(crate) mod capacities;
pub(crate) mod dashboard;
pub(crate) mod error;
pub(crate) mod export;
pub(crate) mod projects;
pub(crate) mod tasks;
pub(crate) mod teams;
pub(crate) mod time_entries;

pub(crate) use error::ApiError;
