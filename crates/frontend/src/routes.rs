//! Application routes

use crate::auth::RequireAuth;
use crate::pages::{
    ChunkDetailsPage, ChunkListPage, DashboardPage, HomePage, LoginPage, NotFoundPage,
    PdfDetailsPage, PdfListPage, PdfUploadPage, PromptEditorPage, RagChatPage, RegisterPage,
    UnauthorizedPage,
};
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Clone, Routable, PartialEq, Eq, Debug)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/login")]
    Login,
    #[at("/register")]
    Register,
    #[at("/unauthorized")]
    Unauthorized,
    #[at("/dashboard")]
    Dashboard,
    #[at("/upload-pdf")]
    UploadPdf,
    #[at("/pdfs")]
    PdfList,
    #[at("/pdfs/:id")]
    PdfDetails { id: String },
    #[at("/pdfs/:id/chunks")]
    ChunkDetails { id: String },
    #[at("/chunks")]
    ChunkList,
    #[at("/rag-chat")]
    RagChat,
    #[at("/prompt-engineer")]
    PromptEngineer,
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl Route {
    /// Routes that need a logged-in user
    pub const fn is_protected(&self) -> bool {
        matches!(
            self,
            Self::Dashboard
                | Self::UploadPdf
                | Self::PdfList
                | Self::PdfDetails { .. }
                | Self::ChunkDetails { .. }
                | Self::ChunkList
                | Self::RagChat
                | Self::PromptEngineer
        )
    }
}

pub fn switch(route: Route) -> Html {
    let protected = route.is_protected();
    let page = match route {
        Route::Home => html! { <HomePage /> },
        Route::Login => html! { <LoginPage /> },
        Route::Register => html! { <RegisterPage /> },
        Route::Unauthorized => html! { <UnauthorizedPage /> },
        Route::Dashboard => html! { <DashboardPage /> },
        Route::UploadPdf => html! { <PdfUploadPage /> },
        Route::PdfList => html! { <PdfListPage /> },
        Route::PdfDetails { id } => html! { <PdfDetailsPage {id} /> },
        Route::ChunkDetails { id } => html! { <ChunkDetailsPage {id} /> },
        Route::ChunkList => html! { <ChunkListPage /> },
        Route::RagChat => html! { <RagChatPage /> },
        Route::PromptEngineer => html! { <PromptEditorPage /> },
        Route::NotFound => html! { <NotFoundPage /> },
    };

    if protected {
        html! { <RequireAuth>{page}</RequireAuth> }
    } else {
        page
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(Route::UploadPdf.to_path(), "/upload-pdf");
        assert_eq!(Route::PdfDetails { id: "p1".into() }.to_path(), "/pdfs/p1");
        assert_eq!(
            Route::ChunkDetails { id: "p1".into() }.to_path(),
            "/pdfs/p1/chunks"
        );
        assert_eq!(Route::Login.to_path(), docuchat_http::LOGIN_ROUTE);
    }

    #[test]
    fn test_recognize() {
        assert_eq!(
            Route::recognize("/pdfs/abc"),
            Some(Route::PdfDetails { id: "abc".into() })
        );
        assert_eq!(
            Route::recognize("/pdfs/abc/chunks"),
            Some(Route::ChunkDetails { id: "abc".into() })
        );
        assert_eq!(Route::recognize("/nowhere"), Some(Route::NotFound));
    }

    #[test]
    fn test_protection() {
        assert!(Route::Dashboard.is_protected());
        assert!(Route::PdfDetails { id: "x".into() }.is_protected());
        assert!(Route::RagChat.is_protected());
        assert!(!Route::Home.is_protected());
        assert!(!Route::Login.is_protected());
        assert!(!Route::Register.is_protected());
        assert!(!Route::Unauthorized.is_protected());
        assert!(!Route::NotFound.is_protected());
    }
}
