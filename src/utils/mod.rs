pub mod numerical;
