pub mod chunk_details;
pub mod chunk_list;
pub mod dashboard;
pub mod home;
pub mod login;
pub mod not_found;
pub mod pdf_details;
pub mod pdf_list;
pub mod pdf_upload;
pub mod prompt_editor;
pub mod rag_chat;
pub mod register;
pub mod unauthorized;

pub use chunk_details::ChunkDetailsPage;
pub use chunk_list::ChunkListPage;
pub use dashboard::DashboardPage;
pub use home::HomePage;
pub use login::LoginPage;
pub use not_found::NotFoundPage;
pub use pdf_details::PdfDetailsPage;
pub use pdf_list::PdfListPage;
pub use pdf_upload::PdfUploadPage;
pub use prompt_editor::PromptEditorPage;
pub use rag_chat::RagChatPage;
pub use register::RegisterPage;
pub use unauthorized::UnauthorizedPage;
