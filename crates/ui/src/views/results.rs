use dioxus::prelude::*;

use super::layout::Layout;
use crate::vm::ResultsVm;

#[component]
pub fn ResultsPage(title: String, vm: ResultsVm) -> Element {
    rsx! {
        Layout { page_title: format!("{title} - Results"),
            h1 { "Your Score: {vm.score_label}" }
            ol { class: "answers",
                for row in vm.rows.iter() {
                    li { key: "{row.number}",
                        p { strong { "{row.prompt}" } }
                        p { class: row.status_class(),
                            "Your answer: {row.user_answer}"
                        }
                        p { "Correct answer: {row.correct_answer}" }
                    }
                }
            }
            a { class: "button", href: "/", "Play Again" }
        }
    }
}
