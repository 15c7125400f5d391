use dioxus::prelude::*;

/// Shared page styles. Kept free of quotes and angle brackets so the SSR
/// text escaping leaves it intact.
const STYLE: &str = "
body { font-family: system-ui, sans-serif; background: #f5f6f8; color: #1f2328; margin: 0; }
.page { max-width: 40rem; margin: 3rem auto; padding: 2rem; background: #fff; border-radius: 8px; }
.progress { color: #57606a; font-size: 0.9rem; }
.option { display: block; margin: 0.5rem 0; }
.answers li { margin-bottom: 0.75rem; }
.correct { color: #1a7f37; }
.incorrect { color: #cf222e; }
.button { display: inline-block; margin-top: 1rem; padding: 0.5rem 1rem; }
";

/// Head and body of every page; `render` wraps it in the `html` element.
#[component]
pub fn Layout(page_title: String, children: Element) -> Element {
    rsx! {
        head {
            meta { charset: "utf-8" }
            title { "{page_title}" }
            style { {STYLE} }
        }
        body {
            main { class: "page", {children} }
        }
    }
}
