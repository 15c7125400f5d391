//! String rendering entry points for the HTTP layer.

use dioxus::prelude::*;
use services::{QuestionView, ResultsView};

use crate::views;
use crate::vm::{map_question, map_results};

const DOCTYPE: &str = "<!DOCTYPE html>";

fn document(element: Element) -> String {
    format!(
        "{DOCTYPE}<html lang=\"en\">{}</html>",
        dioxus_ssr::render_element(element)
    )
}

#[must_use]
pub fn render_home(title: &str) -> String {
    let title = title.to_owned();
    document(rsx! { views::HomePage { title } })
}

#[must_use]
pub fn render_question(view: &QuestionView) -> String {
    let vm = map_question(view);
    document(rsx! { views::QuestionPage { vm } })
}

#[must_use]
pub fn render_results(title: &str, view: &ResultsView) -> String {
    let title = title.to_owned();
    let vm = map_results(view);
    document(rsx! { views::ResultsPage { title, vm } })
}

#[must_use]
pub fn render_restart(title: &str) -> String {
    let title = title.to_owned();
    document(rsx! { views::RestartPage { title } })
}
