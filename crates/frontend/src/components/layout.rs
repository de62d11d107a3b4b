//! Page frame: navigation bar, session notice and content

use super::{Navbar, alert::ErrorAlert};
use crate::auth::{SessionAction, use_session};
use crate::config::AppConfig;
use gloo::timers::callback::Timeout;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct LayoutProps {
    pub children: Children,
}

#[function_component(Layout)]
pub fn layout(props: &LayoutProps) -> Html {
    let session = use_session();
    let notice = session.notice();

    // Session notices fade after a while
    {
        let session = session.clone();
        use_effect_with(notice.clone(), move |notice| {
            let timeout = notice.is_some().then(|| {
                Timeout::new(AppConfig::NOTICE_TIMEOUT_MS, move || {
                    session.dispatch(SessionAction::DismissNotice);
                })
            });
            move || drop(timeout)
        });
    }

    html! {
        <div class="min-h-screen bg-gray-50 text-gray-900">
            <Navbar />
            <main class="max-w-6xl mx-auto p-6">
                if let Some(notice) = notice {
                    <ErrorAlert message={notice} />
                }
                {props.children.clone()}
            </main>
        </div>
    }
}
