pub mod approval;
pub mod issue;
pub mod sprint;
