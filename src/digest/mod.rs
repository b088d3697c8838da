pub mod content;
pub mod dispatcher;
pub mod eligibility;
