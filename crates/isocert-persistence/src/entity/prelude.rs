pub use super::application::Entity as Application;
pub use super::company::Entity as Company;
pub use super::document::Entity as Document;
pub use super::qms_type::Entity as QmsType;
