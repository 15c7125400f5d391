use dioxus::prelude::*;

use super::layout::Layout;

#[component]
pub fn RestartPage(title: String) -> Element {
    rsx! {
        Layout { page_title: title,
            h1 { "Something went wrong" }
            p { "Your quiz could not be loaded. Please start again." }
            a { class: "button", href: "/", "Back to start" }
        }
    }
}
