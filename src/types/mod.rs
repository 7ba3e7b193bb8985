pub mod consultant;
pub mod profile;
pub mod project;
pub mod response;

pub use consultant::Consultant;
pub use profile::ConsultantProfile;
pub use project::{Priority, Project, ProjectConsultant, ProjectStatus};
