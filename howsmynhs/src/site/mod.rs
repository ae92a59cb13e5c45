//! Trust pages: which blocks a page carries, what goes in them and the
//! concurrent build of the whole site.
mod eligibility;
pub mod labels;
mod pages;
mod summary;
