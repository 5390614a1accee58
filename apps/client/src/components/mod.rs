// Form and workspace state machines plus the page shell that composes them.
// Each component owns its state and calls the API through `CompilerApi`.

pub mod download;
pub mod jd_form;
pub mod shell;
pub mod upload;
pub mod view;
pub mod workspace;
