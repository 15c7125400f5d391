use quiz_core::model::{AnsweredEntry, QuestionRecord};
use services::{QuestionView, ResultsView};

use crate::render::{render_home, render_question, render_restart, render_results};

fn question(prompt: &str, options: [&str; 3], answer: &str) -> QuestionRecord {
    QuestionRecord::new(prompt, options.map(String::from).to_vec(), answer).unwrap()
}

#[test]
fn home_page_welcomes_and_links_to_quiz() {
    let html = render_home("DevOps Knowledge Test");
    assert!(html.starts_with("<!DOCTYPE html><html lang=\"en\"><head>"), "{html}");
    assert!(html.ends_with("</body></html>"), "{html}");
    assert!(html.contains("<title>DevOps Knowledge Test</title>"), "{html}");
    assert!(html.contains("Welcome to DevOps Knowledge Test!"), "{html}");
    assert!(html.contains("href=\"/quiz\""), "{html}");
    assert!(html.contains("Start Quiz"));
}

#[test]
fn question_page_lists_options_as_radio_inputs() {
    let view = QuestionView {
        question: question("Capital of Croatia?", ["Zagreb", "Split", "Rijeka"], "Zagreb"),
        position: 2,
        total: 3,
    };
    let html = render_question(&view);

    assert!(html.contains("<title>Quiz - Question 2</title>"), "{html}");
    assert!(html.contains("Question 2 of 3"), "{html}");
    assert!(html.contains("Capital of Croatia?"));
    assert_eq!(html.matches("type=\"radio\"").count(), 3, "{html}");
    assert_eq!(html.matches("name=\"answer\"").count(), 3);
    for option in ["Zagreb", "Split", "Rijeka"] {
        assert!(html.contains(&format!("value=\"{option}\"")), "{html}");
    }
    assert!(html.contains("name=\"position\""));
    assert!(html.contains("value=\"2\""));
    assert!(html.contains("action=\"/quiz\""));
    assert!(html.contains("Submit"));
}

#[test]
fn question_text_is_escaped() {
    let view = QuestionView {
        question: question("Is <b> bold?", ["yes", "no", "maybe"], "yes"),
        position: 1,
        total: 1,
    };
    let html = render_question(&view);
    assert!(!html.contains("<b>"), "{html}");
    assert!(html.contains("Is &#60;b&#62; bold?"), "{html}");
}

#[test]
fn results_page_shows_score_and_each_answer() {
    let q1 = question("Q1", ["A", "B", "C"], "A");
    let q2 = question("Q2", ["D", "E", "F"], "F");
    let view = ResultsView {
        score: 1,
        total: 2,
        answers: vec![
            AnsweredEntry::new(&q1, Some("A".into())),
            AnsweredEntry::new(&q2, Some("D".into())),
        ],
    };
    let html = render_results("Quiz", &view);

    assert!(html.contains("Your Score: 1 / 2"), "{html}");
    assert!(html.contains("Your answer: D"), "{html}");
    assert!(html.contains("Correct answer: F"), "{html}");
    assert!(html.contains("class=\"incorrect\""), "{html}");
    assert!(html.contains("Play Again"));
    assert!(html.contains("href=\"/\""));
}

#[test]
fn restart_page_links_home() {
    let html = render_restart("Quiz");
    assert!(html.contains("Please start again"), "{html}");
    assert!(html.contains("href=\"/\""));
}
