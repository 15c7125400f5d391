mod home;
mod layout;
mod quiz;
mod restart;
mod results;

pub use home::HomePage;
pub use layout::Layout;
pub use quiz::QuestionPage;
pub use restart::RestartPage;
pub use results::ResultsPage;

#[cfg(test)]
mod view_smoke;
