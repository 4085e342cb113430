//! Session domain
//!
//! A session owns the initiative list, the participating members, and the
//! current vote set. Sessions arrive as full snapshots from whatever
//! persistence layer is in use; the scoring core never talks to a database
//! itself.

pub mod entities;

pub use entities::{Initiative, Member, Session, SystemRole, can_vote};
