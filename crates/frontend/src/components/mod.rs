pub mod alert;
pub mod doc_type_select;
pub mod extracted_data;
pub mod layout;
pub mod navbar;
pub mod spinner;

pub use alert::{ErrorAlert, SuccessAlert};
pub use doc_type_select::DocTypeSelect;
pub use extracted_data::ExtractedDataView;
pub use layout::Layout;
pub use navbar::Navbar;
pub use spinner::LoadingSpinner;
