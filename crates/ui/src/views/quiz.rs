use dioxus::prelude::*;

use super::layout::Layout;
use crate::vm::QuestionVm;

/// One question with its options as radio inputs named `answer`.
///
/// The hidden `position` field lets the server ignore a resubmitted form
/// once the quiz has moved on.
#[component]
pub fn QuestionPage(vm: QuestionVm) -> Element {
    rsx! {
        Layout { page_title: vm.page_title.clone(),
            p { class: "progress", "{vm.progress_label}" }
            h2 { "{vm.prompt}" }
            form { method: "post", action: "/quiz",
                input { r#type: "hidden", name: "position", value: "{vm.position}" }
                for opt in vm.options.iter() {
                    label { class: "option", r#for: "{opt.input_id}",
                        input {
                            r#type: "radio",
                            name: "answer",
                            id: "{opt.input_id}",
                            value: "{opt.value}",
                        }
                        " {opt.value}"
                    }
                }
                button { class: "button", r#type: "submit", "Submit" }
            }
        }
    }
}
