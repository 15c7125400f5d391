use dioxus::prelude::*;

use super::layout::Layout;

#[component]
pub fn HomePage(title: String) -> Element {
    rsx! {
        Layout { page_title: title.clone(),
            h1 { "Welcome to {title}!" }
            p { "Answer a few multiple-choice questions and see how you score." }
            a { class: "button", href: "/quiz", "Start Quiz" }
        }
    }
}
