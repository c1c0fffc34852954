pub mod competence;
pub mod flash;
pub mod user;
