pub mod auth_form;
pub mod menu;
pub mod progress_bar;
pub mod quiz_card;
pub mod step_tracker;
pub mod top_bar;
