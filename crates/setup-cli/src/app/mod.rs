//! Terminal-independent installer session

mod form;
mod input;
mod session;

pub use form::{CredentialsForm, Field, TextField};
pub use input::{Input, Key};
pub use session::{BatchRequest, Command, Flow, MenuItem, Session, View};
