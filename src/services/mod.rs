pub mod organizations;

pub use organizations::OrganizationService;
