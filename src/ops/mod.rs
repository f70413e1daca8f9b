pub mod compositor;
pub mod filters;
