pub mod email_token;
pub mod event;
pub mod mentor;
pub mod mentor_request;
pub mod notification;
pub mod startup;
pub mod submission;

pub use email_token::*;
pub use event::*;
pub use mentor::*;
pub use mentor_request::*;
pub use notification::*;
pub use startup::*;
pub use submission::*;
